use cvd_risk_calculator::{
    config::{ReferenceData, ReferenceDataError, ReferenceDataSettings, Settings},
    models::{Horizon, InterventionSelection, PatientProfile, TherapySelection},
    risk::{HorizonConversion, RiskError},
    services::RiskCalculator,
};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

const CUSTOM_REFERENCE: &str = r#"
version = "test-1"

[[therapies]]
name = "Statin A"
ldl_reduction_percent = 50.0

[[interventions]]
name = "Walking"
arr_5yr = 4.0
arr_lifetime = 10.0

[[citations]]
therapy = "Statin A"
trial = "TRIAL-A"
reference = "Doe J. Example 2020;1:1-2"
"#;

#[test]
fn test_settings_file_layer_overrides_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(
        &path,
        r#"
[api]
port = 9191

[model]
diminishing_addon_effect = false
horizon_conversion = "square_root_approximation"

[model.risk_caps]
lifetime = 75.0
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(path.as_path())).unwrap();
    assert_eq!(settings.api.port, 9191);
    assert_eq!(settings.api.host, "0.0.0.0");
    assert!(!settings.model.diminishing_addon_effect);
    assert_eq!(settings.model.horizon_conversion, HorizonConversion::SquareRootApproximation);
    assert_eq!(settings.model.risk_caps.lifetime, 75.0);
    assert_eq!(settings.model.risk_caps.ten_year, 85.0);
    assert_eq!(settings.model.ldl_floor_mmol_l, 1.0);
}

#[test]
fn test_validation_ranges_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "[validation]\nsystolic_bp_range = [90.0, 200.0]\n").unwrap();

    let settings = Settings::load(Some(path.as_path())).unwrap();
    assert_eq!(settings.validation.systolic_bp_range, (90.0, 200.0));
    assert_eq!(settings.validation.age_range, (30, 90));

    let calculator = RiskCalculator::from_settings(Arc::new(ReferenceData::builtin().unwrap()), &settings);
    let profile = PatientProfile {
        systolic_bp: 85.0,
        ..PatientProfile::default()
    };
    let rejected = calculator.compute_risk_reduction(
        &profile,
        &TherapySelection::none(),
        &InterventionSelection::none(),
        120.0,
        Horizon::TenYear,
    );
    assert!(matches!(rejected, Err(RiskError::Validation(_))));
}

#[test]
fn test_missing_settings_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let settings = Settings::load(Some(dir.path().join("absent.toml").as_path())).unwrap();
    assert!(settings.model.diminishing_addon_effect);
    assert!(settings.reference_data.path.is_none());
}

#[test]
fn test_invalid_model_settings_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "[model.risk_caps]\nfive_year = 150.0\n").unwrap();

    assert!(Settings::load(Some(path.as_path())).is_err());
}

#[test]
fn test_environment_overrides_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "[logging]\nformat = \"pretty\"\n").unwrap();

    std::env::set_var("CVD_RISK__LOGGING__FORMAT", "json");
    let settings = Settings::load(Some(path.as_path()));
    std::env::remove_var("CVD_RISK__LOGGING__FORMAT");

    assert_eq!(settings.unwrap().logging.format, "json");
}

#[test]
fn test_reference_data_override_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reference.toml");
    fs::write(&path, CUSTOM_REFERENCE).unwrap();

    let data = ReferenceData::load(&ReferenceDataSettings {
        path: Some(path.display().to_string()),
    })
    .unwrap();
    assert_eq!(data.version, "test-1");
    assert_eq!(data.ldl_reduction_percent("Statin A"), Some(50.0));
    assert_eq!(data.citation("Statin A").unwrap().trial, "TRIAL-A");

    let calculator = RiskCalculator::new(Arc::new(data), Settings::default().model);
    let result = calculator
        .compute_risk_reduction(
            &PatientProfile::default(),
            &TherapySelection::new(vec!["Statin A".to_string()], Vec::new()),
            &InterventionSelection::new(["Walking"]),
            145.0,
            Horizon::TenYear,
        )
        .unwrap();
    assert_eq!(result.reference_data_version, "test-1");
    assert_eq!(result.projected_ldl, 1.75);
    assert_eq!(result.adjustments[0].relative_reduction, 10.0);

    // Built-in names are unknown to the override tables
    assert!(calculator
        .compute_risk_reduction(
            &PatientProfile::default(),
            &TherapySelection::new(vec!["Ezetimibe".to_string()], Vec::new()),
            &InterventionSelection::none(),
            145.0,
            Horizon::TenYear,
        )
        .is_err());
}

#[test]
fn test_reference_data_file_errors() {
    let dir = tempdir().unwrap();

    let missing = ReferenceData::from_file(dir.path().join("missing.toml"));
    assert!(matches!(missing, Err(ReferenceDataError::Io { .. })));

    let garbled = dir.path().join("garbled.toml");
    fs::write(&garbled, "version = ").unwrap();
    assert!(matches!(ReferenceData::from_file(&garbled), Err(ReferenceDataError::Parse(_))));

    let duplicated = dir.path().join("duplicated.toml");
    fs::write(
        &duplicated,
        r#"
version = "dup"
interventions = []

[[therapies]]
name = "Statin A"
ldl_reduction_percent = 50.0

[[therapies]]
name = "Statin A"
ldl_reduction_percent = 40.0
"#,
    )
    .unwrap();
    assert!(matches!(
        ReferenceData::from_file(&duplicated),
        Err(ReferenceDataError::Invalid(_))
    ));
}
