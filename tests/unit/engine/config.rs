use super::*;

#[test]
fn defaults_validate() {
    let cfg = EngineConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.budgets.max_clip_depth, 64);
    assert_eq!(cfg.budgets.max_offscreen_surfaces, 32);
    assert_eq!(cfg.budgets.max_surface_dim, 8192);
    assert!(cfg.parallel());
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let cfg = EngineConfig::from_json_str(
        r#"{ "canvas": { "width": 200, "height": 100 }, "determinism": "strict" }"#,
    )
    .unwrap();
    assert_eq!(cfg.canvas, Canvas { width: 200, height: 100 });
    assert_eq!(cfg.determinism, DeterminismProfile::Strict);
    assert_eq!(cfg.budgets, ResourceBudgets::default());
    assert!(!cfg.parallel());
}

#[test]
fn partial_budgets_keep_other_defaults() {
    let cfg = EngineConfig::from_reader(
        r#"{ "budgets": { "max_offscreen_surfaces": 2 } }"#.as_bytes(),
    )
    .unwrap();
    assert_eq!(cfg.budgets.max_offscreen_surfaces, 2);
    assert_eq!(cfg.budgets.max_clip_depth, 64);
}

#[test]
fn validate_rejects_bad_values() {
    let zero = EngineConfig::new(Canvas { width: 0, height: 10 });
    assert!(matches!(zero.validate(), Err(StratumError::Validation(_))));

    let mut tol = EngineConfig::default();
    tol.flatten_tolerance = 0.0;
    assert!(tol.validate().is_err());

    let budgets = ResourceBudgets {
        max_offscreen_surfaces: 0,
        ..ResourceBudgets::default()
    };
    assert!(EngineConfig::default().with_budgets(budgets).validate().is_err());
}

#[test]
fn malformed_json_is_a_validation_error() {
    let err = EngineConfig::from_json_str("{ not json").unwrap_err();
    assert!(err.to_string().starts_with("validation error: invalid engine config"));
}

#[test]
fn missing_file_is_reported() {
    assert!(matches!(
        EngineConfig::from_path("/definitely/not/here.json"),
        Err(StratumError::Other(_))
    ));
}
