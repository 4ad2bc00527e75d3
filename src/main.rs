use std::{fs, path::PathBuf};

use clap::Parser;
use latefees::{ledger::FeeSchedule, logger, report::fees_report_with};
use rust_decimal::Decimal;

/// Computes per-patron late fees from a CSV log of book loans.
#[derive(Parser)]
struct Cli {
    /// Loan log with `patron_id`, `date_due` and `date_returned` columns
    #[clap(default_value = "data/book_returns_short.csv")]
    input: PathBuf,
    /// Where to write the `patron_id,late_fees` summary
    #[clap(short, long, default_value = "book_fees.csv")]
    output: PathBuf,
    /// Fee charged per day late
    #[clap(long, default_value = "0.25")]
    daily_rate: Decimal,
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose);

    let schedule = FeeSchedule::new(cli.daily_rate)?;
    fees_report_with(&cli.input, &cli.output, schedule)?;

    print!("{}", fs::read_to_string(&cli.output)?);
    Ok(())
}
