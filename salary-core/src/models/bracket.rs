use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The value configured for one column of a bracket.
///
/// Bracket data does not tag its values: a true percentage and a flat amount
/// share the same column. [`RateValue::classify`] performs the range test
/// once, when the table is loaded, so the resolver never has to guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateValue {
    /// A marginal rate applied to the part of the base inside the bracket.
    Rate(Decimal),
    /// A flat amount for the whole bracket, independent of the base.
    Fixed(Decimal),
}

impl RateValue {
    /// Classifies a raw configured value.
    ///
    /// Values in the open interval (-1, 1), except 0, are rates. Everything
    /// else (0, whole amounts, anything at or beyond ±1) is a fixed amount.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use salary_core::RateValue;
    ///
    /// assert_eq!(RateValue::classify(dec!(0.0928)), RateValue::Rate(dec!(0.0928)));
    /// assert_eq!(RateValue::classify(dec!(-0.06095)), RateValue::Rate(dec!(-0.06095)));
    /// assert_eq!(RateValue::classify(dec!(3070)), RateValue::Fixed(dec!(3070)));
    /// assert_eq!(RateValue::classify(dec!(0)), RateValue::Fixed(dec!(0)));
    /// ```
    pub fn classify(value: Decimal) -> Self {
        if value > -Decimal::ONE && value < Decimal::ONE && !value.is_zero() {
            Self::Rate(value)
        } else {
            Self::Fixed(value)
        }
    }

    /// The configured number, whichever kind it is.
    pub fn value(&self) -> Decimal {
        match *self {
            Self::Rate(v) | Self::Fixed(v) => v,
        }
    }

    pub fn is_rate(&self) -> bool {
        matches!(self, Self::Rate(_))
    }
}

/// Selects which column of a bracket the resolver reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateField {
    /// The `rate` column, present on every bracket.
    Standard,
    /// The `older` column: contribution share for people past state-pension age.
    OlderAge,
    /// The `social` column: the social-insurance share of the combined rate.
    SocialExcl,
}

impl RateField {
    pub fn column(&self) -> &'static str {
        match self {
            Self::Standard => "rate",
            Self::OlderAge => "older",
            Self::SocialExcl => "social",
        }
    }
}

/// One band of a progressive table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub min: Decimal,
    /// `None` for an unbounded band.
    pub max: Option<Decimal>,
    pub rate: RateValue,
    pub social: Option<RateValue>,
    pub older: Option<RateValue>,
}

impl Bracket {
    /// A bracket carrying only the standard `rate` column.
    pub fn new(
        min: Decimal,
        max: Option<Decimal>,
        rate: Decimal,
    ) -> Self {
        Self {
            min,
            max,
            rate: RateValue::classify(rate),
            social: None,
            older: None,
        }
    }

    /// Width of the band, or `None` when it extends to infinity.
    pub fn span(&self) -> Option<Decimal> {
        self.max.map(|max| max - self.min)
    }

    /// Whether the bracket carries the selected column.
    pub fn has(
        &self,
        field: RateField,
    ) -> bool {
        match field {
            RateField::Standard => true,
            RateField::OlderAge => self.older.is_some(),
            RateField::SocialExcl => self.social.is_some(),
        }
    }

    /// Value of the selected column. Brackets that do not carry an optional
    /// column answer with their standard `rate`; loaded tables carry every
    /// column their jurisdiction reads (see `Jurisdiction::required_fields`).
    pub fn value(
        &self,
        field: RateField,
    ) -> RateValue {
        let selected = match field {
            RateField::Standard => None,
            RateField::OlderAge => self.older,
            RateField::SocialExcl => self.social,
        };
        selected.unwrap_or(self.rate)
    }
}
