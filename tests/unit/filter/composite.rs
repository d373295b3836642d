use super::*;
use crate::foundation::core::PixelBounds;
use crate::foundation::math::Px;

const RED: Px = [1.0, 0.0, 0.0, 1.0];
const HALF_BLUE: Px = [0.0, 0.0, 0.5, 0.5];

fn one(p: Px) -> Surface {
    let mut s = Surface::new(PixelBounds::new(0, 0, 1, 1));
    s.fill(p);
    s
}

#[test]
fn porter_duff_operators() {
    let (red, blue) = (one(RED), one(HALF_BLUE));
    assert_eq!(composite(&red, &blue, CompositeOperator::Over).data[0], RED);
    assert_eq!(
        composite(&red, &blue, CompositeOperator::In).data[0],
        [0.5, 0.0, 0.0, 0.5]
    );
    assert_eq!(
        composite(&red, &blue, CompositeOperator::Out).data[0],
        [0.5, 0.0, 0.0, 0.5]
    );
    assert_eq!(
        composite(&blue, &red, CompositeOperator::Atop).data[0],
        [0.5, 0.0, 0.5, 1.0]
    );
}

#[test]
fn arithmetic_clamps_to_alpha() {
    let (red, blue) = (one(RED), one(HALF_BLUE));
    let out = composite(
        &red,
        &blue,
        CompositeOperator::Arithmetic {
            k1: 0.0,
            k2: 1.0,
            k3: 1.0,
            k4: 0.0,
        },
    );
    assert_eq!(out.data[0], [1.0, 0.0, 0.5, 1.0]);

    let out = composite(
        &red,
        &blue,
        CompositeOperator::Arithmetic {
            k1: 0.0,
            k2: 0.0,
            k3: 0.0,
            k4: 2.0,
        },
    );
    assert_eq!(out.data[0], [1.0, 1.0, 1.0, 1.0]);
}

#[test]
fn merge_stacks_in_order() {
    let out = merge([&one(RED), &one(HALF_BLUE)]);
    assert_eq!(out.data[0], [0.5, 0.0, 0.5, 1.0]);
    let out = merge([&one(HALF_BLUE), &one(RED)]);
    assert_eq!(out.data[0], RED);
}
