//! Registry of named embayments.
//!
//! Built-in presets are a closed set ([`EmbaymentId`]); each carries its full
//! parameter record, so selecting an embayment is a single lookup. A
//! [`Catalog`] is assembled once at start-up (presets, TOML entries, or
//! both) and is read-only afterwards.
//!
//! # TOML format
//!
//! ```text
//! [[embayment]]
//! name = "Hypothetical"
//! basin_area = 180000.0
//! channel_width = 30.0
//! channel_depth = 1.0
//! channel_length = 2000.0
//! drag_coefficient = 0.0032
//!
//! [[embayment.forcing_modes]]
//! period_hours = 2.9
//! amplitude_meters = 0.1
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::{ConfigError, EmbaymentConfig, ForcingMode};

/// Drag coefficient used by all presets.
const PRESET_DRAG: f64 = 0.0032;

/// Frenchman's Bay basin area, channel width, depth and length.
const FMB_GEOMETRY: (f64, f64, f64, f64) = (850_000.0, 25.0, 1.0, 130.0);

/// Frenchman's Bay modes measured on both sides of the channel.
const FMB_SURVEY_MODES: [ModeRow; 6] = [
    (12.4, 0.034, 5.0, Some(0.024)),
    (5.2, 0.022, 22.0, Some(0.02)),
    (1.28, 0.017, -15.0, Some(0.014)),
    (0.8, 0.023, 39.0, Some(0.012)),
    (0.5, 0.021, -4.6, Some(0.0045)),
    (0.36, 0.022, 0.0, Some(0.002)),
];

/// Built-in embayment presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EmbaymentId {
    /// Frenchman's Bay, Lake Ontario (lake spectrum only; the in-bay
    /// measurements live in [`Catalog::survey`])
    FrenchmansBay,
    /// Inner Boat Passage, Fathom Five (extended five-mode spectrum)
    InnerBoatPassageExtended,
    /// Inner Boat Passage, Fathom Five
    InnerBoatPassage,
    /// Cove Island Harbour, Fathom Five
    CoveIslandHarbour,
    /// Hypothetical Lake Superior embayment (no measurements)
    LakeSuperior,
}

impl EmbaymentId {
    /// All presets.
    pub const ALL: [EmbaymentId; 5] = [
        EmbaymentId::FrenchmansBay,
        EmbaymentId::InnerBoatPassageExtended,
        EmbaymentId::InnerBoatPassage,
        EmbaymentId::CoveIslandHarbour,
        EmbaymentId::LakeSuperior,
    ];

    /// Catalog key.
    pub fn name(self) -> &'static str {
        match self {
            EmbaymentId::FrenchmansBay => "FMB",
            EmbaymentId::InnerBoatPassageExtended => "Tob-IBP-ex",
            EmbaymentId::InnerBoatPassage => "Tob-IBP",
            EmbaymentId::CoveIslandHarbour => "Tob-CIH",
            EmbaymentId::LakeSuperior => "L-SUP",
        }
    }

    /// Full parameter record for the preset.
    pub fn config(self) -> EmbaymentConfig {
        match self {
            EmbaymentId::FrenchmansBay => preset(
                self,
                FMB_GEOMETRY,
                &[
                    (12.2, 0.0365, 5.0, None),
                    (5.065, 0.023, 22.0, None),
                    (1.38, 0.015, -15.0, None),
                    (0.81, 0.018, 39.0, None),
                    (0.48, 0.016, -4.6, None),
                ],
                Some("Inner_Harbour_July_processed.csv"),
            ),
            EmbaymentId::InnerBoatPassageExtended => preset(
                self,
                (150_000.0, 140.0, 2.143, 570.0),
                &[
                    (16.8 / 60.0, 0.02, 0.0, None),
                    (12.0 / 60.0, 0.018, 0.0, None),
                    (8.0 / 60.0, 0.016, 0.0, None),
                    (5.35 / 60.0, 0.015, 0.0, None),
                    (4.5 / 60.0, 0.018, 0.0, None),
                ],
                Some("LL1.csv"),
            ),
            EmbaymentId::InnerBoatPassage => preset(
                self,
                (145_000.0, 140.0, 2.143, 570.0),
                &[
                    (16.8 / 60.0, 0.02, 0.0, Some(0.09)),
                    (12.0 / 60.0, 0.018, 0.0, Some(0.043)),
                    (8.0 / 60.0, 0.016, 0.0, Some(0.058)),
                ],
                Some("LL1.csv"),
            ),
            EmbaymentId::CoveIslandHarbour => preset(
                self,
                (64_000.0, 56.0, 1.9, 175.0),
                &[
                    (16.8 / 60.0, 0.02, 0.0, Some(0.025)),
                    (12.0 / 60.0, 0.018, 0.0, Some(0.078)),
                    (9.2 / 60.0, 0.014, 0.0, Some(0.037)),
                ],
                Some("LL4.csv"),
            ),
            EmbaymentId::LakeSuperior => preset(
                self,
                (180_000.0, 30.0, 1.0, 2000.0),
                &[(2.9, 0.1, 0.0, None), (2.9, 0.1, 0.0, None)],
                None,
            ),
        }
    }
}

/// (period h, amplitude m, phase rad, measured bay amplitude m)
type ModeRow = (f64, f64, f64, Option<f64>);

fn preset(
    id: EmbaymentId,
    (area, width, depth, length): (f64, f64, f64, f64),
    modes: &[ModeRow],
    measured: Option<&str>,
) -> EmbaymentConfig {
    let modes = modes
        .iter()
        .map(|&(period, amplitude, phase, bay)| ForcingMode {
            period_hours: period,
            amplitude_meters: amplitude,
            phase_radians: phase,
            bay_amplitude_meters: bay,
        })
        .collect();

    let cfg = EmbaymentConfig::new(id.name(), area, width, depth, length, PRESET_DRAG)
        .with_modes(modes);
    match measured {
        Some(source) => cfg.with_measured_series(source),
        None => cfg,
    }
}

impl fmt::Display for EmbaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EmbaymentId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmbaymentId::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownEmbayment(s.to_string()))
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    embayment: Vec<EmbaymentConfig>,
}

/// Immutable registry of embayment configurations keyed by name.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: BTreeMap<String, EmbaymentConfig>,
}

impl Catalog {
    /// An empty catalog.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog holding every built-in preset.
    pub fn builtin() -> Self {
        let entries = EmbaymentId::ALL
            .into_iter()
            .map(|id| (id.name().to_string(), id.config()))
            .collect();
        Self { entries }
    }

    /// Embayments with paired lake and bay measurements, for
    /// [`relative_amplitude_survey`](crate::analysis::relative_amplitude_survey).
    ///
    /// Frenchman's Bay enters with its six surveyed modes rather than the
    /// preset spectrum; the Fathom Five harbours use their presets.
    pub fn survey() -> Self {
        let fmb = preset(
            EmbaymentId::FrenchmansBay,
            FMB_GEOMETRY,
            &FMB_SURVEY_MODES,
            Some("Inner_Harbour_July_processed.csv"),
        );
        let entries = [
            fmb,
            EmbaymentId::InnerBoatPassage.config(),
            EmbaymentId::CoveIslandHarbour.config(),
        ]
        .into_iter()
        .map(|cfg| (cfg.name.clone(), cfg))
        .collect();
        Self { entries }
    }

    /// Add an entry while assembling the catalog.
    ///
    /// # Errors
    /// - `Duplicate` if the name is already registered
    /// - `Invalid` if the configuration does not validate
    pub fn with_entry(mut self, config: EmbaymentConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if self.entries.contains_key(&config.name) {
            return Err(ConfigError::Duplicate(config.name));
        }
        self.entries.insert(config.name.clone(), config);
        Ok(self)
    }

    /// Add every `[[embayment]]` entry of a TOML document.
    pub fn with_toml_str(self, text: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = toml::from_str(text)?;
        file.embayment
            .into_iter()
            .try_fold(self, |catalog, cfg| catalog.with_entry(cfg))
    }

    /// Build a catalog from a TOML document only.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Self::empty().with_toml_str(text)
    }

    /// Build a catalog from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<&EmbaymentConfig> {
        self.entries.get(name)
    }

    /// Look up an entry by name, failing with `UnknownEmbayment`.
    pub fn lookup(&self, name: &str) -> Result<&EmbaymentConfig, ConfigError> {
        self.get(name)
            .ok_or_else(|| ConfigError::UnknownEmbayment(name.to_string()))
    }

    /// Look up a preset.
    pub fn preset(&self, id: EmbaymentId) -> Result<&EmbaymentConfig, ConfigError> {
        self.lookup(id.name())
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Iterate over all entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = &EmbaymentConfig> {
        self.entries.values()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_presets_validate() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), EmbaymentId::ALL.len());
        for cfg in catalog.iter() {
            assert!(cfg.validate().is_ok(), "{} should validate", cfg.name);
        }
    }

    #[test]
    fn test_frenchmans_bay_preset() {
        let cfg = EmbaymentId::FrenchmansBay.config();
        assert_eq!(cfg.name, "FMB");
        assert_eq!(cfg.n_modes(), 5);
        assert!((cfg.basin_area - 850_000.0).abs() < 1e-9);
        assert!((cfg.forcing_modes[0].period_hours - 12.2).abs() < 1e-12);
        assert!((cfg.forcing_modes[4].phase_radians + 4.6).abs() < 1e-12);
        assert_eq!(
            cfg.measured_series_ref.as_deref(),
            Some("Inner_Harbour_July_processed.csv")
        );
    }

    #[test]
    fn test_survey_catalog() {
        let catalog = Catalog::survey();
        assert_eq!(catalog.names(), vec!["FMB", "Tob-CIH", "Tob-IBP"]);
        let fmb = catalog.preset(EmbaymentId::FrenchmansBay).unwrap();
        assert!(fmb.validate().is_ok());
        assert_eq!(fmb.n_modes(), 6);
        assert_eq!(fmb.forcing_modes[5].bay_amplitude_meters, Some(0.002));
        // same channel as the preset
        assert_eq!(fmb.basin_area, EmbaymentId::FrenchmansBay.config().basin_area);
    }

    #[test]
    fn test_frenchmans_bay_preset_has_no_bay_amplitudes() {
        let cfg = EmbaymentId::FrenchmansBay.config();
        assert!(cfg.forcing_modes.iter().all(|m| m.bay_amplitude_meters.is_none()));
    }

    #[test]
    fn test_hypothetical_preset_has_no_measurements() {
        let cfg = EmbaymentId::LakeSuperior.config();
        assert!(cfg.measured_series_ref.is_none());
        assert!(cfg.forcing_modes.iter().all(|m| m.bay_amplitude_meters.is_none()));
    }

    #[test]
    fn test_id_from_str() {
        assert_eq!(
            "tob-cih".parse::<EmbaymentId>().unwrap(),
            EmbaymentId::CoveIslandHarbour
        );
        assert!(matches!(
            "Emb-Z".parse::<EmbaymentId>(),
            Err(ConfigError::UnknownEmbayment(_))
        ));
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::builtin();
        assert!(catalog.preset(EmbaymentId::InnerBoatPassage).is_ok());
        assert!(catalog.lookup("nowhere").is_err());
        assert_eq!(catalog.names()[0], "FMB");
    }

    #[test]
    fn test_toml_catalog() {
        let text = r#"
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
        "#;
        let catalog = Catalog::from_toml_str(text).unwrap();
        let cfg = catalog.lookup("Hypothetical").unwrap();
        assert_eq!(cfg.n_modes(), 1);
        assert!((cfg.forcing_modes[0].phase_radians).abs() < 1e-15);
    }

    #[test]
    fn test_toml_entry_without_modes_is_rejected() {
        let text = r#"
            [[embayment]]
            name = "Empty"
            basin_area = 1000.0
            channel_width = 5.0
            channel_depth = 1.0
            channel_length = 10.0
            drag_coefficient = 0.003
        "#;
        assert!(matches!(
            Catalog::from_toml_str(text),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_duplicate_entry() {
        let result = Catalog::builtin().with_entry(EmbaymentId::FrenchmansBay.config());
        assert!(matches!(result, Err(ConfigError::Duplicate(name)) if name == "FMB"));
    }
}
