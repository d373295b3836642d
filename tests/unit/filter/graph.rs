use super::*;

#[test]
fn previous_result_chains_in_declaration_order() {
    let f = Filter::chain([Primitive::gaussian_blur(2.0), Primitive::offset(1.0, 1.0)]).unwrap();
    assert_eq!(f.len(), 2);
    match &f.primitives()[0] {
        Primitive::GaussianBlur { input, .. } => assert_eq!(*input, Slot::SourceGraphic),
        other => panic!("unexpected {other:?}"),
    }
    match &f.primitives()[1] {
        Primitive::Offset { input, .. } => assert_eq!(*input, Slot::Result(0)),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn named_results_resolve_to_earlier_primitives() {
    let f = Filter::builder()
        .push_named("shadow", Primitive::gaussian_blur(3.0).with_input(FilterInput::SourceAlpha))
        .push(Primitive::flood(Color::BLACK))
        .push(Primitive::merge([
            FilterInput::Named("shadow".into()),
            FilterInput::SourceGraphic,
        ]))
        .build()
        .unwrap();
    match &f.primitives()[2] {
        Primitive::Merge { inputs } => {
            assert_eq!(inputs.as_slice(), &[Slot::Result(0), Slot::SourceGraphic]);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn forward_and_unknown_references_fail_at_build() {
    let forward = Filter::builder()
        .push(Primitive::composite(
            CompositeOperator::Over,
            FilterInput::Result(PrimitiveId(1)),
            FilterInput::SourceGraphic,
        ))
        .push(Primitive::flood(Color::WHITE))
        .build();
    assert!(matches!(forward, Err(StratumError::InvalidFilterGraph(_))));

    let self_ref = Filter::builder()
        .push(Primitive::offset(1.0, 0.0).with_input(FilterInput::Result(PrimitiveId(0))))
        .build();
    assert!(matches!(self_ref, Err(StratumError::InvalidFilterGraph(_))));

    let unknown = Filter::builder()
        .push(Primitive::offset(1.0, 0.0).with_input(FilterInput::Named("nope".into())))
        .build();
    assert!(matches!(unknown, Err(StratumError::InvalidFilterGraph(_))));
}

#[test]
fn duplicate_names_and_bad_params_are_rejected() {
    let dup = Filter::builder()
        .push_named("a", Primitive::flood(Color::BLACK))
        .push_named("a", Primitive::flood(Color::WHITE))
        .build();
    assert!(matches!(dup, Err(StratumError::InvalidFilterGraph(_))));

    assert!(Filter::chain([Primitive::gaussian_blur(-1.0)]).is_err());
    assert!(Filter::chain([Primitive::offset(f64::NAN, 0.0)]).is_err());
    assert!(Filter::chain([Primitive::merge(Vec::<FilterInput>::new())]).is_err());
}

#[test]
fn padding_accumulates_reach_and_scales_with_transform() {
    let f = Filter::chain([Primitive::gaussian_blur(2.0), Primitive::offset(4.0, -1.0)]).unwrap();
    let pad = f.padding(Transform::IDENTITY);
    assert_eq!(pad, Vec2::new(10.0, 7.0));

    let pad = f.padding(Transform::scale_non_uniform(2.0, 1.0));
    assert_eq!(pad, Vec2::new(20.0, 7.0));

    assert_eq!(Filter::empty().padding(Transform::IDENTITY), Vec2::ZERO);
}
