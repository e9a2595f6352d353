//! Integration tests for catalog assembly and the cross-embayment survey.

use embay::analysis::default_outliers;
use embay::response::{MouthDesignStudy, SweepSettings, amplitude_curves};
use embay::{
    Catalog, ConfigError, EmbaymentId, ModelError, relative_amplitude_survey, synthesize_response,
};

const USER_CATALOG: &str = r#"
[[embayment]]
name = "Hypothetical"
basin_area = 180000.0
channel_width = 30.0
channel_depth = 1.0
channel_length = 2000.0
drag_coefficient = 0.0032

[[embayment.forcing_modes]]
period_hours = 2.9
amplitude_meters = 0.1

[[embayment.forcing_modes]]
period_hours = 1.5
amplitude_meters = 0.05
phase_radians = 0.4
bay_amplitude_meters = 0.03
"#;

#[test]
fn test_user_entries_extend_builtin_presets() {
    let catalog = Catalog::builtin().with_toml_str(USER_CATALOG).unwrap();
    assert_eq!(catalog.len(), EmbaymentId::ALL.len() + 1);

    let user = catalog.lookup("Hypothetical").unwrap();
    assert_eq!(user.n_modes(), 2);
    assert_eq!(user.forcing_modes[0].phase_radians, 0.0);
    assert_eq!(user.forcing_modes[1].bay_amplitude_meters, Some(0.03));

    let response = synthesize_response(user, 0.5, 12).unwrap();
    assert_eq!(response.name, "Hypothetical");
    assert_eq!(response.modes.len(), 2);
}

#[test]
fn test_preset_lookup_by_key() {
    let catalog = Catalog::builtin();
    let id: EmbaymentId = "tob-cih".parse().unwrap();
    assert_eq!(id, EmbaymentId::CoveIslandHarbour);
    assert_eq!(catalog.preset(id).unwrap().name, "Tob-CIH");
    assert!(matches!(
        catalog.lookup("Nowhere"),
        Err(ConfigError::UnknownEmbayment(_))
    ));
}

#[test]
fn test_invalid_user_entry_rejected() {
    let text = USER_CATALOG.replace("channel_depth = 1.0", "channel_depth = 0.0");
    let result = Catalog::empty().with_toml_str(&text);
    assert!(matches!(
        result,
        Err(ConfigError::Invalid(ModelError::InvalidConfig { .. }))
    ));
}

#[test]
fn test_survey_includes_user_measurements() {
    let survey = relative_amplitude_survey(&Catalog::survey(), &default_outliers()).unwrap();
    let extended = relative_amplitude_survey(
        &Catalog::survey().with_toml_str(USER_CATALOG).unwrap(),
        &default_outliers(),
    )
    .unwrap();

    assert_eq!(survey.points.len(), 12);
    assert_eq!(extended.points.len(), 13);
    let point = extended
        .points
        .iter()
        .find(|p| p.name == "Hypothetical")
        .unwrap();
    assert!((point.measured_ratio - 0.6).abs() < 1e-12);
    assert!(!point.outlier);

    // surveyed Frenchman's Bay modes are damped by the channel
    let fmb_5h = survey
        .points
        .iter()
        .find(|p| p.name == "FMB" && (p.period_hours - 5.2).abs() < 1e-9)
        .unwrap();
    assert!((fmb_5h.measured_ratio - 0.02 / 0.022).abs() < 1e-12);
    assert!(fmb_5h.measured_ratio < 1.0);
}

#[test]
fn test_sweeps_over_catalog() {
    let catalog = Catalog::builtin();
    for cfg in catalog.iter() {
        let curves = amplitude_curves(cfg, SweepSettings::new(200, 3.5)).unwrap();
        assert_eq!(curves.len(), cfg.n_modes());
        assert!(curves.iter().all(|c| c.values.iter().all(|v| v.is_finite())));
    }

    let design = MouthDesignStudy::default()
        .with_forcing(0.1, 7.9)
        .curve(180_000.0, &MouthDesignStudy::default_widths())
        .unwrap();
    // a wider mouth lets more of the forcing through
    let relative = design.relative_amplitudes();
    assert!(relative[relative.len() - 1] > relative[0]);
}
