//! Tables shipped with the crate, and loading of replacement tables from disk.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use salary_core::{Jurisdiction, TaxTables};
use tracing::{debug, info};

use crate::loader::{BracketLoader, DataLoaderError};
use crate::settings::SettingsLoader;

const NETHERLANDS_BRACKETS: &str = include_str!("../data/netherlands/brackets.csv");
const NETHERLANDS_SETTINGS: &str = include_str!("../data/netherlands/settings.toml");
const CYPRUS_BRACKETS: &str = include_str!("../data/cyprus/brackets.csv");
const CYPRUS_SETTINGS: &str = include_str!("../data/cyprus/settings.toml");

static NETHERLANDS: OnceLock<TaxTables> = OnceLock::new();
static CYPRUS: OnceLock<TaxTables> = OnceLock::new();

/// Built-in Dutch tables, parsed on first use.
pub fn netherlands() -> Result<&'static TaxTables, DataLoaderError> {
    cached(&NETHERLANDS, || parse(NETHERLANDS_SETTINGS, NETHERLANDS_BRACKETS))
}

/// Built-in Cypriot tables, parsed on first use.
pub fn cyprus() -> Result<&'static TaxTables, DataLoaderError> {
    cached(&CYPRUS, || parse(CYPRUS_SETTINGS, CYPRUS_BRACKETS))
}

pub fn tables(jurisdiction: Jurisdiction) -> Result<&'static TaxTables, DataLoaderError> {
    match jurisdiction {
        Jurisdiction::Netherlands => netherlands(),
        Jurisdiction::Cyprus => cyprus(),
    }
}

/// Loads `settings.toml` and `brackets.csv` from `dir`.
///
/// The files use the same formats as the built-in data, so a new tax year
/// can be tried out without rebuilding.
///
/// # Arguments
///
/// * `dir` - Directory holding both files
///
/// # Returns
///
/// The checked tables of the jurisdiction named in the settings.
pub fn load_dir(dir: &Path) -> Result<TaxTables, DataLoaderError> {
    let settings = read(&dir.join("settings.toml"))?;
    let brackets = read(&dir.join("brackets.csv"))?;
    parse(&settings, &brackets)
}

/// Parses one jurisdiction's settings and brackets and checks that every
/// configured year carries the tables its pipeline needs.
pub fn parse(
    settings: &str,
    brackets: &str,
) -> Result<TaxTables, DataLoaderError> {
    let settings = SettingsLoader::parse(settings)?;
    let records = BracketLoader::parse(brackets.as_bytes())?;
    let brackets = BracketLoader::build(&records)?;
    let tables = TaxTables { settings, brackets };

    check_complete(&tables)?;
    info!(
        jurisdiction = %tables.jurisdiction(),
        years = ?tables.years(),
        tables = tables.brackets.len(),
        "loaded tax tables"
    );
    Ok(tables)
}

fn check_complete(tables: &TaxTables) -> Result<(), DataLoaderError> {
    let jurisdiction = tables.jurisdiction();
    for year in tables.years() {
        for &kind in jurisdiction.required_kinds() {
            let Ok(brackets) = tables.brackets.get(kind, year) else {
                return Err(DataLoaderError::Incomplete {
                    jurisdiction: jurisdiction.to_string(),
                    kind,
                    year,
                });
            };

            for (index, bracket) in brackets.iter().enumerate() {
                if let Some(field) = jurisdiction
                    .required_fields(kind)
                    .iter()
                    .find(|field| !bracket.has(**field))
                {
                    return Err(DataLoaderError::MissingColumn {
                        jurisdiction: jurisdiction.to_string(),
                        kind,
                        year,
                        bracket: index + 1,
                        column: field.column(),
                    });
                }
            }
        }
    }
    Ok(())
}

fn cached(
    cell: &'static OnceLock<TaxTables>,
    load: impl FnOnce() -> Result<TaxTables, DataLoaderError>,
) -> Result<&'static TaxTables, DataLoaderError> {
    if let Some(tables) = cell.get() {
        return Ok(tables);
    }
    let tables = load()?;
    Ok(cell.get_or_init(|| tables))
}

fn read(path: &Path) -> Result<String, DataLoaderError> {
    debug!(path = %path.display(), "reading data file");
    fs::read_to_string(path).map_err(|source| DataLoaderError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Checks that `tables` belong to `jurisdiction`.
pub fn expect_jurisdiction(
    tables: &TaxTables,
    jurisdiction: Jurisdiction,
) -> Result<(), DataLoaderError> {
    if tables.jurisdiction() == jurisdiction {
        Ok(())
    } else {
        Err(DataLoaderError::JurisdictionMismatch {
            settings: tables.jurisdiction().to_string(),
            requested: jurisdiction.to_string(),
        })
    }
}
