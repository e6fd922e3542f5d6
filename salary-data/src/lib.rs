//! Bracket tables and settings for the salary calculator.
//!
//! Each jurisdiction is described by two files: `brackets.csv`, one row per
//! bracket, and `settings.toml` with working-time constants and ruling
//! thresholds. The Dutch and Cypriot files are compiled into the crate and
//! available through [`netherlands`], [`cyprus`] and [`tables`].

mod builtin;
mod loader;
mod settings;

pub use builtin::{cyprus, expect_jurisdiction, load_dir, netherlands, parse, tables};
pub use loader::{BracketLoader, BracketRecord, DataLoaderError};
pub use settings::SettingsLoader;
