use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bracket::Bracket;

/// The tax or credit line a bracket sequence belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaxKind {
    Payroll,
    Social,
    Nhs,
    GeneralCredit,
    LabourCredit,
}

impl TaxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payroll => "payroll",
            Self::Social => "social",
            Self::Nhs => "nhs",
            Self::GeneralCredit => "general_credit",
            Self::LabourCredit => "labour_credit",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "payroll" => Some(Self::Payroll),
            "social" => Some(Self::Social),
            "nhs" => Some(Self::Nhs),
            "general_credit" => Some(Self::GeneralCredit),
            "labour_credit" => Some(Self::LabourCredit),
            _ => None,
        }
    }
}

impl fmt::Display for TaxKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested combination is not configured.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no {kind} brackets configured for {year}")]
    MissingTable { kind: TaxKind, year: i32 },

    #[error("no ruling threshold '{ruling}' configured for {year}")]
    MissingRulingThreshold { year: i32, ruling: &'static str },
}

/// A bracket sequence rejected at load time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BracketTableError {
    #[error("{kind} {year}: no brackets")]
    Empty { kind: TaxKind, year: i32 },

    #[error("{kind} {year}: bracket {index} starts at {min}, below the previous bracket")]
    Unordered {
        kind: TaxKind,
        year: i32,
        index: usize,
        min: Decimal,
    },

    #[error("{kind} {year}: bracket {index} has max {max} below min {min}")]
    InvertedBounds {
        kind: TaxKind,
        year: i32,
        index: usize,
        min: Decimal,
        max: Decimal,
    },

    #[error("{kind} {year}: bracket {index} is unbounded but is not the last bracket")]
    UnboundedBeforeEnd { kind: TaxKind, year: i32, index: usize },
}

/// Progressive tables for one jurisdiction, keyed by tax kind and year.
///
/// Built once while loading data and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BracketTable {
    tables: BTreeMap<(TaxKind, i32), Vec<Bracket>>,
}

impl BracketTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the brackets for `kind` in `year`, replacing any existing ones.
    ///
    /// Brackets must be in ascending `min` order and only the last one may be
    /// unbounded. Touching or overlapping boundaries are accepted: the
    /// resolver only looks at each bracket's own span.
    pub fn insert(
        &mut self,
        kind: TaxKind,
        year: i32,
        brackets: Vec<Bracket>,
    ) -> Result<(), BracketTableError> {
        if brackets.is_empty() {
            return Err(BracketTableError::Empty { kind, year });
        }

        let last = brackets.len() - 1;
        for (index, bracket) in brackets.iter().enumerate() {
            if index > 0 && bracket.min < brackets[index - 1].min {
                return Err(BracketTableError::Unordered {
                    kind,
                    year,
                    index,
                    min: bracket.min,
                });
            }
            match bracket.max {
                Some(max) if max < bracket.min => {
                    return Err(BracketTableError::InvertedBounds {
                        kind,
                        year,
                        index,
                        min: bracket.min,
                        max,
                    });
                }
                None if index != last => {
                    return Err(BracketTableError::UnboundedBeforeEnd { kind, year, index });
                }
                _ => {}
            }
        }

        self.tables.insert((kind, year), brackets);
        Ok(())
    }

    pub fn get(
        &self,
        kind: TaxKind,
        year: i32,
    ) -> Result<&[Bracket], LookupError> {
        self.tables
            .get(&(kind, year))
            .map(Vec::as_slice)
            .ok_or(LookupError::MissingTable { kind, year })
    }

    /// Years configured for `kind`, ascending.
    pub fn years(
        &self,
        kind: TaxKind,
    ) -> Vec<i32> {
        self.tables
            .keys()
            .filter(|(k, _)| *k == kind)
            .map(|(_, year)| *year)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
