use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use salary_core::{
    CalculationInput, CyprusFlags, CyprusRuling, DutchFlags, DutchRuling, Jurisdiction,
    JurisdictionFlags, Period, TaxTables, calculate,
};
use serde::Serialize;
use tracing::debug;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Gross-to-net salary calculator for the Netherlands and Cyprus.
#[derive(Debug, Parser)]
#[command(name = "salary", version, about, long_about = None)]
pub struct Cli {
    /// Print the result as JSON instead of a table.
    #[arg(long, global = true)]
    pub json: bool,

    /// Also append log records to this file.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Read `settings.toml` and `brackets.csv` from this directory instead of
    /// the built-in tables.
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Net income of a Dutch employee.
    #[command(visible_alias = "nl")]
    Netherlands(DutchArgs),

    /// Net income of a Cypriot employee.
    #[command(visible_alias = "cy")]
    Cyprus(CyprusArgs),

    /// List configured tax years and ruling choices.
    Years {
        #[arg(value_parser = parse_jurisdiction)]
        jurisdiction: Jurisdiction,
    },
}

#[derive(Debug, Args)]
pub struct SalaryArgs {
    /// Gross salary, in euros per `--period`.
    #[arg(long, value_parser = parse_decimal)]
    pub salary: Decimal,

    /// Unit the salary is quoted in: year, month, day or hour.
    #[arg(long, default_value = "year", value_parser = parse_period)]
    pub period: Period,

    /// Tax year. Defaults to the latest configured year.
    #[arg(long)]
    pub year: Option<i32>,

    /// Working hours per week. Defaults to 40.
    #[arg(long, value_parser = parse_decimal)]
    pub hours: Option<Decimal>,
}

#[derive(Debug, Args)]
pub struct DutchArgs {
    #[command(flatten)]
    pub salary: SalaryArgs,

    /// 30% facility: none, normal, young or research.
    #[arg(long, default_value = "normal", value_parser = parse_dutch_ruling)]
    pub ruling: DutchRuling,

    /// The salary does not include the 8% holiday allowance.
    #[arg(long)]
    pub no_holiday_allowance: bool,

    /// No Dutch social security contributions are due.
    #[arg(long)]
    pub no_social_security: bool,

    /// At or past state-pension age.
    #[arg(long)]
    pub old_age: bool,
}

#[derive(Debug, Args)]
pub struct CyprusArgs {
    #[command(flatten)]
    pub salary: SalaryArgs,

    /// First-employment exemption: 0%, 20% or 50%.
    #[arg(long, default_value = "0%", value_parser = parse_cyprus_ruling)]
    pub ruling: CyprusRuling,
}

fn parse_decimal(s: &str) -> Result<Decimal, String> {
    Decimal::from_str(s.trim()).map_err(|e| format!("'{s}' is not a number: {e}"))
}

fn parse_period(s: &str) -> Result<Period, String> {
    Period::parse(s).ok_or_else(|| format!("unknown period '{s}' (year, month, day, hour)"))
}

fn parse_dutch_ruling(s: &str) -> Result<DutchRuling, String> {
    DutchRuling::parse(s)
        .ok_or_else(|| format!("unknown ruling '{s}' (none, normal, young, research)"))
}

fn parse_cyprus_ruling(s: &str) -> Result<CyprusRuling, String> {
    CyprusRuling::parse(s).ok_or_else(|| format!("unknown ruling '{s}' (0%, 20%, 50%)"))
}

fn parse_jurisdiction(s: &str) -> Result<Jurisdiction, String> {
    Jurisdiction::parse(s).ok_or_else(|| format!("unknown jurisdiction '{s}' (nl, cy)"))
}

// ─── commands ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct YearChoices {
    year: i32,
    rulings: Vec<&'static str>,
}

/// Runs `cli`, writing the result to `out`.
pub fn run(
    cli: &Cli,
    out: &mut impl Write,
) -> Result<()> {
    match &cli.command {
        Command::Netherlands(args) => {
            let flags = JurisdictionFlags::Netherlands(DutchFlags {
                old_age: args.old_age,
                ruling: args.ruling,
                social_security: !args.no_social_security,
                holiday_allowance: !args.no_holiday_allowance,
            });
            with_tables(cli, Jurisdiction::Netherlands, |tables| {
                print_result(cli, tables, &args.salary, flags, out)
            })
        }
        Command::Cyprus(args) => {
            let flags = JurisdictionFlags::Cyprus(CyprusFlags { ruling: args.ruling });
            with_tables(cli, Jurisdiction::Cyprus, |tables| {
                print_result(cli, tables, &args.salary, flags, out)
            })
        }
        Command::Years { jurisdiction } => {
            with_tables(cli, *jurisdiction, |tables| print_years(cli, tables, out))
        }
    }
}

/// Calls `f` with the built-in tables of `jurisdiction`, or with the tables
/// in `--data-dir`.
fn with_tables<T>(
    cli: &Cli,
    jurisdiction: Jurisdiction,
    f: impl FnOnce(&TaxTables) -> Result<T>,
) -> Result<T> {
    match &cli.data_dir {
        Some(dir) => {
            let tables = salary_data::load_dir(dir)
                .with_context(|| format!("failed to load tables from {}", dir.display()))?;
            salary_data::expect_jurisdiction(&tables, jurisdiction)?;
            f(&tables)
        }
        None => {
            let tables = salary_data::tables(jurisdiction)
                .with_context(|| format!("failed to load built-in {jurisdiction} tables"))?;
            f(tables)
        }
    }
}

fn print_result(
    cli: &Cli,
    tables: &TaxTables,
    salary: &SalaryArgs,
    flags: JurisdictionFlags,
    out: &mut impl Write,
) -> Result<()> {
    let settings = &tables.settings;
    let input = CalculationInput {
        salary: salary.salary,
        period: salary.period,
        tax_year: salary.year.unwrap_or(settings.current_year),
        working_hours: salary.hours.unwrap_or(settings.default_working_hours),
        flags,
    };
    debug!(?input, "calculating");

    let result = calculate(tables, &input)?;

    if cli.json {
        serde_json::to_writer_pretty(&mut *out, &result)?;
        writeln!(out)?;
    } else {
        write!(out, "{result}")?;
    }
    Ok(())
}

fn print_years(
    cli: &Cli,
    tables: &TaxTables,
    out: &mut impl Write,
) -> Result<()> {
    let choices: Vec<YearChoices> = tables
        .years()
        .into_iter()
        .map(|year| YearChoices {
            year,
            rulings: match tables.jurisdiction() {
                Jurisdiction::Netherlands => {
                    tables.rulings_for(year).iter().map(DutchRuling::label).collect()
                }
                Jurisdiction::Cyprus => CyprusRuling::ALL.iter().map(CyprusRuling::as_str).collect(),
            },
        })
        .collect();

    if cli.json {
        serde_json::to_writer_pretty(&mut *out, &choices)?;
        writeln!(out)?;
    } else {
        for choice in &choices {
            writeln!(out, "{}  {}", choice.year, choice.rulings.join(", "))?;
        }
    }
    Ok(())
}
