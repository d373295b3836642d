pub mod path;
pub mod transform;

pub use hit_test::{
    hit_test_fill, hit_test_fill_transformed, hit_test_stroke, hit_test_stroke_styled,
};
pub use path::{Contour, FLATTEN_TOLERANCE, Path, PathBuilder};
pub use transform::Transform;
