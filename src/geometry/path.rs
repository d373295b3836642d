use std::sync::{Arc, OnceLock};

use kurbo::{PathEl, Shape};

use crate::foundation::core::{BezPath, Point, Rect, Vec2};
use crate::geometry::transform::Transform;

/// Flattening tolerance (path units) for memoized contours used by hit testing.
pub const FLATTEN_TOLERANCE: f64 = 0.05;

/// Tolerance used when converting circles, ellipses and arcs to cubics.
const CURVE_TOLERANCE: f64 = 0.01;

/// Mutable construction phase of a [`Path`]. Consumed by [`PathBuilder::build`].
#[derive(Clone, Debug, Default)]
pub struct PathBuilder {
    bez: BezPath,
    current: Option<Point>,
    start: Point,
    needs_move: bool,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        let p = Point::new(x, y);
        self.bez.move_to(p);
        self.current = Some(p);
        self.start = p;
        self.needs_move = false;
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.ensure_subpath();
        let p = Point::new(x, y);
        self.bez.line_to(p);
        self.current = Some(p);
        self
    }

    pub fn quad_to(mut self, cx: f64, cy: f64, x: f64, y: f64) -> Self {
        self.ensure_subpath();
        let p = Point::new(x, y);
        self.bez.quad_to(Point::new(cx, cy), p);
        self.current = Some(p);
        self
    }

    pub fn cubic_to(mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) -> Self {
        self.ensure_subpath();
        let p = Point::new(x, y);
        self.bez.curve_to(Point::new(c1x, c1y), Point::new(c2x, c2y), p);
        self.current = Some(p);
        self
    }

    /// SVG-style elliptical arc from the current point to `(x, y)`.
    ///
    /// Stored as cubic segments. Degenerate radii produce a straight line.
    #[allow(clippy::too_many_arguments)]
    pub fn arc_to(
        mut self,
        rx: f64,
        ry: f64,
        x_axis_rotation_deg: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) -> Self {
        self.ensure_subpath();
        let from = self.current.unwrap_or(self.start);
        let to = Point::new(x, y);
        let arc = kurbo::SvgArc {
            from,
            to,
            radii: Vec2::new(rx.abs(), ry.abs()),
            x_rotation: x_axis_rotation_deg.to_radians(),
            large_arc,
            sweep,
        };
        match kurbo::Arc::from_svg_arc(&arc) {
            Some(arc) => {
                for el in arc.append_iter(CURVE_TOLERANCE) {
                    self.bez.push(el);
                }
            }
            None => self.bez.line_to(to),
        }
        self.current = Some(to);
        self
    }

    pub fn close(mut self) -> Self {
        if self.current.is_some() && !self.needs_move {
            self.bez.close_path();
            self.current = Some(self.start);
            self.needs_move = true;
        }
        self
    }

    pub fn rect(self, x: f64, y: f64, w: f64, h: f64) -> Self {
        self.move_to(x, y)
            .line_to(x + w, y)
            .line_to(x + w, y + h)
            .line_to(x, y + h)
            .close()
    }

    pub fn circle(self, cx: f64, cy: f64, r: f64) -> Self {
        self.shape(&kurbo::Circle::new((cx, cy), r))
    }

    pub fn ellipse(self, cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        self.shape(&kurbo::Ellipse::new((cx, cy), (rx, ry), 0.0))
    }

    pub fn rounded_rect(self, x: f64, y: f64, w: f64, h: f64, radius: f64) -> Self {
        self.shape(&kurbo::RoundedRect::new(x, y, x + w, y + h, radius))
    }

    /// Append every contour of an existing path.
    pub fn append(mut self, path: &Path) -> Self {
        for el in path.bez().elements() {
            self.push_el(*el);
        }
        self
    }

    pub fn build(self) -> Path {
        Path::from_bez(self.bez)
    }

    fn shape(mut self, shape: &impl Shape) -> Self {
        for el in shape.path_elements(CURVE_TOLERANCE) {
            self.push_el(el);
        }
        self
    }

    fn push_el(&mut self, el: PathEl) {
        match el {
            PathEl::MoveTo(p) => {
                self.bez.move_to(p);
                self.current = Some(p);
                self.start = p;
                self.needs_move = false;
            }
            PathEl::ClosePath => {
                self.bez.close_path();
                self.current = Some(self.start);
                self.needs_move = true;
            }
            PathEl::LineTo(p) | PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => {
                self.ensure_subpath();
                self.bez.push(el);
                self.current = Some(p);
            }
        }
    }

    fn ensure_subpath(&mut self) {
        if self.current.is_none() {
            self.bez.move_to(Point::ORIGIN);
            self.current = Some(Point::ORIGIN);
            self.start = Point::ORIGIN;
        } else if self.needs_move {
            let p = self.start;
            self.bez.move_to(p);
            self.current = Some(p);
        }
        self.needs_move = false;
    }
}

/// A flattened contour: polyline vertices plus the closed flag.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    pub points: Vec<Point>,
    pub closed: bool,
}

/// Frozen path geometry.
///
/// Cloning shares the same allocation, so identity (`ptr_eq`, `id`) survives clones. Exact bounds
/// and flattened contours are computed on first use and memoized.
#[derive(Clone, Debug)]
pub struct Path {
    inner: Arc<PathInner>,
}

#[derive(Debug)]
struct PathInner {
    bez: BezPath,
    bounds: OnceLock<Rect>,
    contours: OnceLock<Vec<Contour>>,
}

impl Path {
    pub fn builder() -> PathBuilder {
        PathBuilder::new()
    }

    pub fn from_bez(bez: BezPath) -> Self {
        Self {
            inner: Arc::new(PathInner {
                bez,
                bounds: OnceLock::new(),
                contours: OnceLock::new(),
            }),
        }
    }

    pub fn bez(&self) -> &BezPath {
        &self.inner.bez
    }

    pub fn is_empty(&self) -> bool {
        self.inner.bez.elements().is_empty()
    }

    /// Exact axis-aligned bounding box. Empty paths report `Rect::ZERO`.
    pub fn bounds(&self) -> Rect {
        *self.inner.bounds.get_or_init(|| {
            if self.is_empty() {
                Rect::ZERO
            } else {
                self.inner.bez.bounding_box()
            }
        })
    }

    /// Flattened contours at [`FLATTEN_TOLERANCE`].
    pub fn contours(&self) -> &[Contour] {
        self.inner
            .contours
            .get_or_init(|| flatten_contours(&self.inner.bez, FLATTEN_TOLERANCE))
    }

    /// Geometry mapped through `transform`, as a fresh `BezPath`.
    pub fn transformed(&self, transform: Transform) -> BezPath {
        transform.as_affine() * self.inner.bez.clone()
    }

    /// Stable identity of the shared allocation.
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl From<PathBuilder> for Path {
    fn from(value: PathBuilder) -> Self {
        value.build()
    }
}

impl From<BezPath> for Path {
    fn from(value: BezPath) -> Self {
        Self::from_bez(value)
    }
}

pub(crate) fn flatten_contours(bez: &BezPath, tolerance: f64) -> Vec<Contour> {
    let mut out = Vec::new();
    let mut cur: Option<Contour> = None;
    kurbo::flatten(bez.iter(), tolerance, |el| match el {
        PathEl::MoveTo(p) => {
            if let Some(c) = cur.take()
                && c.points.len() > 1
            {
                out.push(c);
            }
            cur = Some(Contour {
                points: vec![p],
                closed: false,
            });
        }
        PathEl::LineTo(p) => {
            if let Some(c) = cur.as_mut() {
                c.points.push(p);
            }
        }
        PathEl::ClosePath => {
            if let Some(mut c) = cur.take() {
                c.closed = true;
                if c.points.len() > 1 {
                    out.push(c);
                }
            }
        }
        // `flatten` only emits move/line/close.
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });
    if let Some(c) = cur
        && c.points.len() > 1
    {
        out.push(c);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/path.rs"]
mod tests;
