use std::collections::BTreeMap;
use std::io::Read;

use rust_decimal::Decimal;
use salary_core::{Bracket, BracketTable, BracketTableError, RateValue, TaxKind};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading jurisdiction data.
#[derive(Debug, Error)]
pub enum DataLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Unknown tax type '{0}'")]
    UnknownTaxType(String),

    #[error("Invalid bracket table: {0}")]
    InvalidTable(#[from] BracketTableError),

    #[error("Settings parse error: {0}")]
    SettingsParse(String),

    #[error("Invalid tax year '{0}' in settings")]
    InvalidYear(String),

    #[error("Unknown jurisdiction '{0}'")]
    UnknownJurisdiction(String),

    #[error("Settings are for {settings}, brackets were loaded for {requested}")]
    JurisdictionMismatch { settings: String, requested: String },

    #[error("{jurisdiction} {year}: no {kind} brackets")]
    Incomplete {
        jurisdiction: String,
        kind: TaxKind,
        year: i32,
    },

    #[error("{jurisdiction} {year}: {kind} bracket {bracket} has no '{column}' value")]
    MissingColumn {
        jurisdiction: String,
        kind: TaxKind,
        year: i32,
        bracket: usize,
        column: &'static str,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl From<csv::Error> for DataLoaderError {
    fn from(err: csv::Error) -> Self {
        DataLoaderError::CsvParse(err.to_string())
    }
}

impl From<toml::de::Error> for DataLoaderError {
    fn from(err: toml::de::Error) -> Self {
        DataLoaderError::SettingsParse(err.to_string())
    }
}

/// A single record from a `brackets.csv` file.
///
/// - `tax_type`: `payroll`, `social`, `nhs`, `general_credit` or `labour_credit`
/// - `tax_year`: The tax year (e.g., 2023)
/// - `bracket`: Position of the bracket within its table, starting at 1
/// - `min` / `max`: Bracket bounds (`max` empty for unlimited)
/// - `rate`: A rate when strictly between -1 and 1 and non-zero, a flat
///   amount otherwise
/// - `social` / `older`: Optional alternative columns of social tables
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub tax_type: String,
    pub tax_year: i32,
    pub bracket: u32,
    pub min: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max: Option<Decimal>,
    pub rate: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub social: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub older: Option<Decimal>,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for bracket tables from CSV files.
pub struct BracketLoader;

impl BracketLoader {
    /// Parse bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or a
    /// string slice.
    ///
    /// # Arguments
    ///
    /// * `reader` - A source of CSV data with a header row
    ///
    /// # Returns
    ///
    /// The records in file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, DataLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Groups records by tax type and year into a validated [`BracketTable`].
    ///
    /// Within a group, brackets are ordered by their `bracket` number, so the
    /// rows of a file need not be sorted. Rate values are classified as rates
    /// or flat amounts here, once.
    pub fn build(records: &[BracketRecord]) -> Result<BracketTable, DataLoaderError> {
        let mut groups: BTreeMap<(TaxKind, i32), Vec<&BracketRecord>> = BTreeMap::new();

        for record in records {
            let kind = TaxKind::parse(record.tax_type.trim())
                .ok_or_else(|| DataLoaderError::UnknownTaxType(record.tax_type.clone()))?;
            groups.entry((kind, record.tax_year)).or_default().push(record);
        }

        let mut table = BracketTable::new();
        for ((kind, year), mut group) in groups {
            group.sort_by_key(|record| record.bracket);
            let brackets = group.into_iter().map(to_bracket).collect();
            table.insert(kind, year, brackets)?;
        }

        Ok(table)
    }
}

fn to_bracket(record: &BracketRecord) -> Bracket {
    Bracket {
        min: record.min,
        max: record.max,
        rate: RateValue::classify(record.rate),
        social: record.social.map(RateValue::classify),
        older: record.older.map(RateValue::classify),
    }
}
