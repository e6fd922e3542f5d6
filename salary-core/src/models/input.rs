use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::jurisdiction::Jurisdiction;

/// The unit a salary is quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Year,
    Month,
    Day,
    Hour,
}

impl Period {
    pub const ALL: [Period; 4] = [Self::Year, Self::Month, Self::Day, Self::Hour];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "year" => Some(Self::Year),
            "month" => Some(Self::Month),
            "day" => Some(Self::Day),
            "hour" => Some(Self::Hour),
            _ => None,
        }
    }
}

/// Dutch 30% facility variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DutchRuling {
    None,
    #[default]
    Normal,
    /// Employees under 30 with a master's degree; lower salary threshold.
    #[serde(rename = "young")]
    YoungMasters,
    /// Scientific researchers; no salary threshold.
    Research,
}

impl DutchRuling {
    pub const ALL: [DutchRuling; 4] = [
        Self::None,
        Self::Normal,
        Self::YoungMasters,
        Self::Research,
    ];

    /// Key of the threshold column in the settings data.
    pub fn key(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Normal => "normal",
            Self::YoungMasters => "young",
            Self::Research => "research",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Normal => "Normal",
            Self::YoungMasters => "Young Employee with Master's",
            Self::Research => "Research",
        }
    }

    /// Accepts the data keys and the display labels.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "none" | "None" => Some(Self::None),
            "normal" | "Normal" => Some(Self::Normal),
            "young" | "Young Employee with Master's" | "Young & Master's" => {
                Some(Self::YoungMasters)
            }
            "research" | "Research" => Some(Self::Research),
            _ => None,
        }
    }
}

/// Cyprus first-employment exemption: share of taxable income that is not taxed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CyprusRuling {
    #[default]
    #[serde(rename = "0%")]
    None,
    #[serde(rename = "20%")]
    TwentyPercent,
    #[serde(rename = "50%")]
    FiftyPercent,
}

impl CyprusRuling {
    pub const ALL: [CyprusRuling; 3] = [Self::None, Self::TwentyPercent, Self::FiftyPercent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "0%",
            Self::TwentyPercent => "20%",
            Self::FiftyPercent => "50%",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "0%" | "0" => Some(Self::None),
            "20%" | "20" => Some(Self::TwentyPercent),
            "50%" | "50" => Some(Self::FiftyPercent),
            _ => None,
        }
    }

    /// Exempt share of taxable income.
    pub fn exempt_share(&self) -> Decimal {
        match self {
            Self::None => Decimal::ZERO,
            Self::TwentyPercent => Decimal::new(2, 1),
            Self::FiftyPercent => Decimal::new(5, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutchFlags {
    /// At or past state-pension age: no AOW contribution.
    pub old_age: bool,
    pub ruling: DutchRuling,
    pub social_security: bool,
    /// The quoted salary includes the 8% holiday allowance.
    pub holiday_allowance: bool,
}

impl Default for DutchFlags {
    fn default() -> Self {
        Self {
            old_age: false,
            ruling: DutchRuling::Normal,
            social_security: true,
            holiday_allowance: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CyprusFlags {
    pub ruling: CyprusRuling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "jurisdiction", rename_all = "lowercase")]
pub enum JurisdictionFlags {
    Netherlands(DutchFlags),
    Cyprus(CyprusFlags),
}

impl JurisdictionFlags {
    pub fn jurisdiction(&self) -> Jurisdiction {
        match self {
            Self::Netherlands(_) => Jurisdiction::Netherlands,
            Self::Cyprus(_) => Jurisdiction::Cyprus,
        }
    }
}

/// One calculation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub salary: Decimal,
    pub period: Period,
    pub tax_year: i32,
    /// Weekly working hours.
    pub working_hours: Decimal,
    pub flags: JurisdictionFlags,
}

impl CalculationInput {
    pub fn netherlands(
        salary: Decimal,
        period: Period,
        tax_year: i32,
        working_hours: Decimal,
        flags: DutchFlags,
    ) -> Self {
        Self {
            salary,
            period,
            tax_year,
            working_hours,
            flags: JurisdictionFlags::Netherlands(flags),
        }
    }

    pub fn cyprus(
        salary: Decimal,
        period: Period,
        tax_year: i32,
        working_hours: Decimal,
        flags: CyprusFlags,
    ) -> Self {
        Self {
            salary,
            period,
            tax_year,
            working_hours,
            flags: JurisdictionFlags::Cyprus(flags),
        }
    }
}
