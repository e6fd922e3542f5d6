use std::io;

use clap::Parser;
use salary_cli::cli::{Cli, run};
use salary_cli::logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_file.as_deref())?;

    let stdout = io::stdout();
    run(&cli, &mut stdout.lock())
}
