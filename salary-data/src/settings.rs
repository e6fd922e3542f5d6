use std::collections::BTreeMap;

use rust_decimal::Decimal;
use salary_core::{Jurisdiction, JurisdictionSettings, RulingThresholds};
use serde::Deserialize;

use crate::loader::DataLoaderError;

/// Raw shape of a `settings.toml` file.
///
/// TOML table keys are always strings, so the per-year thresholds are read
/// with string keys and converted afterwards.
#[derive(Debug, Deserialize)]
struct SettingsFile {
    jurisdiction: String,
    current_year: i32,
    default_working_hours: Decimal,
    working_weeks: Decimal,
    working_days: Decimal,
    #[serde(default)]
    ruling_thresholds: BTreeMap<String, RulingThresholds>,
}

/// Loader for jurisdiction settings from TOML.
pub struct SettingsLoader;

impl SettingsLoader {
    /// Parses the contents of a `settings.toml` file.
    ///
    /// # Arguments
    ///
    /// * `text` - The TOML document
    ///
    /// # Returns
    ///
    /// The settings, with ruling thresholds keyed by numeric year.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoaderError::SettingsParse`] for malformed TOML or a
    /// missing field, [`DataLoaderError::UnknownJurisdiction`] and
    /// [`DataLoaderError::InvalidYear`] for values it cannot interpret.
    pub fn parse(text: &str) -> Result<JurisdictionSettings, DataLoaderError> {
        let file: SettingsFile = toml::from_str(text)?;

        let jurisdiction = Jurisdiction::parse(&file.jurisdiction)
            .ok_or_else(|| DataLoaderError::UnknownJurisdiction(file.jurisdiction.clone()))?;

        let ruling_thresholds = file
            .ruling_thresholds
            .into_iter()
            .map(|(year, thresholds)| {
                year.trim()
                    .parse::<i32>()
                    .map(|year| (year, thresholds))
                    .map_err(|_| DataLoaderError::InvalidYear(year))
            })
            .collect::<Result<_, _>>()?;

        Ok(JurisdictionSettings {
            jurisdiction,
            current_year: file.current_year,
            default_working_hours: file.default_working_hours,
            working_weeks: file.working_weeks,
            working_days: file.working_days,
            ruling_thresholds,
        })
    }
}
