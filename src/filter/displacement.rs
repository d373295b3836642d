use crate::filter::ChannelSelector;
use crate::filter::offset::sample_bilinear;
use crate::foundation::math::unpremultiply;
use crate::render::surface::Surface;

/// Sample `input` at each pixel displaced by `scale · (channel − 0.5)` read from `map`.
///
/// `scale` is per axis in device pixels. Map channels are read unpremultiplied.
pub(crate) fn displace(
    input: &Surface,
    map: &Surface,
    scale: (f64, f64),
    x_channel: ChannelSelector,
    y_channel: ChannelSelector,
) -> Surface {
    let bounds = input.bounds;
    let mut out = Surface::new(bounds);
    let w = out.width();
    for (i, px) in out.data.iter_mut().enumerate() {
        let (lx, ly) = (i % w, i / w);
        let m = unpremultiply(map.get(bounds.x0 + lx as i32, bounds.y0 + ly as i32));
        let dx = scale.0 * (f64::from(m[x_channel.index()]) - 0.5);
        let dy = scale.1 * (f64::from(m[y_channel.index()]) - 0.5);
        *px = sample_bilinear(input, lx as f64 + 0.5 + dx, ly as f64 + 0.5 + dy);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/filter/displacement.rs"]
mod tests;
