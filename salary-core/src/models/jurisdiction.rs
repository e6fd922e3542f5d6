use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bracket::RateField;
use super::bracket_table::{BracketTable, LookupError, TaxKind};
use super::input::DutchRuling;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Jurisdiction {
    Netherlands,
    Cyprus,
}

impl Jurisdiction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Netherlands => "netherlands",
            Self::Cyprus => "cyprus",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "nl" | "netherlands" => Some(Self::Netherlands),
            "cy" | "cyprus" => Some(Self::Cyprus),
            _ => None,
        }
    }

    /// Tax lines every configured year of this jurisdiction must carry.
    pub fn required_kinds(&self) -> &'static [TaxKind] {
        match self {
            Self::Netherlands => &[
                TaxKind::Payroll,
                TaxKind::Social,
                TaxKind::GeneralCredit,
                TaxKind::LabourCredit,
            ],
            Self::Cyprus => &[TaxKind::Payroll, TaxKind::Social, TaxKind::Nhs],
        }
    }

    /// Optional columns every bracket of `kind` must carry.
    ///
    /// The Dutch pipeline reads the `social` and `older` shares of the social
    /// table for the contribution and the credit scale.
    pub fn required_fields(
        &self,
        kind: TaxKind,
    ) -> &'static [RateField] {
        match (self, kind) {
            (Self::Netherlands, TaxKind::Social) => &[RateField::SocialExcl, RateField::OlderAge],
            _ => &[],
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum taxable salary that qualifies for the Dutch 30% facility, per
/// ruling type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulingThresholds {
    pub normal: Decimal,
    pub young: Decimal,
    pub research: Decimal,
}

/// Per-jurisdiction constants that are not bracket tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionSettings {
    pub jurisdiction: Jurisdiction,
    pub current_year: i32,
    pub default_working_hours: Decimal,
    pub working_weeks: Decimal,
    pub working_days: Decimal,
    #[serde(default)]
    pub ruling_thresholds: BTreeMap<i32, RulingThresholds>,
}

impl JurisdictionSettings {
    /// Threshold for `ruling` in `year`. [`DutchRuling::None`] has no
    /// threshold and is reported as missing.
    pub fn ruling_threshold(
        &self,
        year: i32,
        ruling: DutchRuling,
    ) -> Result<Decimal, LookupError> {
        let missing = LookupError::MissingRulingThreshold {
            year,
            ruling: ruling.key(),
        };
        let thresholds = self.ruling_thresholds.get(&year).ok_or(missing.clone())?;

        match ruling {
            DutchRuling::Normal => Ok(thresholds.normal),
            DutchRuling::YoungMasters => Ok(thresholds.young),
            DutchRuling::Research => Ok(thresholds.research),
            DutchRuling::None => Err(missing),
        }
    }
}

/// Everything a pipeline reads: the settings and bracket tables of one
/// jurisdiction. Immutable once loaded; share it freely between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxTables {
    pub settings: JurisdictionSettings,
    pub brackets: BracketTable,
}

impl TaxTables {
    pub fn jurisdiction(&self) -> Jurisdiction {
        self.settings.jurisdiction
    }

    /// Years with a payroll table, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.brackets.years(TaxKind::Payroll)
    }

    /// Dutch rulings selectable in `year`: [`DutchRuling::None`] always, the
    /// others when a threshold is configured. Empty for other jurisdictions.
    pub fn rulings_for(
        &self,
        year: i32,
    ) -> Vec<DutchRuling> {
        if self.jurisdiction() != Jurisdiction::Netherlands {
            return Vec::new();
        }
        DutchRuling::ALL
            .into_iter()
            .filter(|ruling| {
                *ruling == DutchRuling::None
                    || self.settings.ruling_threshold(year, *ruling).is_ok()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::Bracket;

    fn dutch_settings() -> JurisdictionSettings {
        JurisdictionSettings {
            jurisdiction: Jurisdiction::Netherlands,
            current_year: 2023,
            default_working_hours: dec!(40),
            working_weeks: dec!(52),
            working_days: dec!(255),
            ruling_thresholds: BTreeMap::from([(
                2023,
                RulingThresholds {
                    normal: dec!(41954),
                    young: dec!(31891),
                    research: dec!(0),
                },
            )]),
        }
    }

    #[test]
    fn jurisdiction_parse_accepts_codes_and_names() {
        assert_eq!(Jurisdiction::parse("nl"), Some(Jurisdiction::Netherlands));
        assert_eq!(Jurisdiction::parse("Netherlands"), Some(Jurisdiction::Netherlands));
        assert_eq!(Jurisdiction::parse("CY"), Some(Jurisdiction::Cyprus));
        assert_eq!(Jurisdiction::parse("de"), None);
    }

    #[test]
    fn required_fields_of_dutch_social_table() {
        assert_eq!(
            Jurisdiction::Netherlands.required_fields(TaxKind::Social),
            &[RateField::SocialExcl, RateField::OlderAge]
        );
        assert!(Jurisdiction::Netherlands.required_fields(TaxKind::Payroll).is_empty());
        assert!(Jurisdiction::Cyprus.required_fields(TaxKind::Social).is_empty());
    }

    #[test]
    fn ruling_threshold_per_type() {
        let settings = dutch_settings();

        assert_eq!(settings.ruling_threshold(2023, DutchRuling::Normal), Ok(dec!(41954)));
        assert_eq!(
            settings.ruling_threshold(2023, DutchRuling::YoungMasters),
            Ok(dec!(31891))
        );
        assert_eq!(settings.ruling_threshold(2023, DutchRuling::Research), Ok(dec!(0)));
    }

    #[test]
    fn ruling_threshold_missing_year() {
        let settings = dutch_settings();

        assert_eq!(
            settings.ruling_threshold(2012, DutchRuling::Normal),
            Err(LookupError::MissingRulingThreshold {
                year: 2012,
                ruling: "normal"
            })
        );
    }

    #[test]
    fn rulings_for_configured_and_unconfigured_years() {
        let mut brackets = BracketTable::new();
        brackets
            .insert(
                TaxKind::Payroll,
                2023,
                vec![Bracket::new(dec!(0), None, dec!(0.0928))],
            )
            .unwrap();
        let tables = TaxTables {
            settings: dutch_settings(),
            brackets,
        };

        assert_eq!(tables.years(), vec![2023]);
        assert_eq!(tables.rulings_for(2023), DutchRuling::ALL.to_vec());
        assert_eq!(tables.rulings_for(2030), vec![DutchRuling::None]);
    }
}
