use super::*;
use crate::foundation::core::PixelBounds;
use crate::foundation::math::{Px, TRANSPARENT_PX};

const RED: Px = [1.0, 0.0, 0.0, 1.0];

fn input() -> Surface {
    let mut s = Surface::new(PixelBounds::new(0, 0, 4, 1));
    *s.get_mut(2, 0).unwrap() = RED;
    s
}

fn map(r: f32) -> Surface {
    let mut s = Surface::new(PixelBounds::new(0, 0, 4, 1));
    s.fill([r, 0.5, 0.5, 1.0]);
    s
}

#[test]
fn neutral_map_is_identity() {
    let out = displace(&input(), &map(0.5), (10.0, 10.0), ChannelSelector::R, ChannelSelector::G);
    assert_eq!(out, input());
}

#[test]
fn full_channel_shifts_by_half_scale() {
    // R = 1 reads from x + scale/2 = x + 1.
    let out = displace(&input(), &map(1.0), (2.0, 0.0), ChannelSelector::R, ChannelSelector::G);
    assert_eq!(out.get(1, 0), RED);
    assert_eq!(out.get(2, 0), TRANSPARENT_PX);
}
