use std::{fs::File, io, path::Path};

use tracing::info;

use crate::{
    error::Error,
    ledger::{FeeLedger, FeeSchedule},
    parser::parse,
};

fn open_input(path: &Path) -> Result<File, Error> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::InputNotFound(path.to_path_buf()),
        _ => Error::io(path, e),
    })
}

/// Builds the fee ledger from a loan log.
/// Every patron in the log gets an entry, fee or not.
pub fn build_ledger<R>(input: R, schedule: FeeSchedule) -> Result<FeeLedger, Error>
where
    R: io::Read,
{
    let rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut ledger = FeeLedger::with_schedule(schedule);
    let mut records = 0usize;
    for loan in parse(rdr) {
        ledger.apply(&loan?)?;
        records += 1;
    }
    info!(records, patrons = ledger.len(), "loan log processed");
    Ok(ledger)
}

/// Computes late fees per patron from `infile` and writes `patron_id,late_fees`
/// rows to `outfile`, charging 0.25 per day late.
pub fn fees_report(infile: impl AsRef<Path>, outfile: impl AsRef<Path>) -> Result<(), Error> {
    fees_report_with(infile, outfile, FeeSchedule::default())
}

/// Like [`fees_report`], with a custom fee schedule.
///
/// The output file is only created once the whole input parsed successfully,
/// so a malformed log leaves any existing `outfile` untouched.
pub fn fees_report_with(
    infile: impl AsRef<Path>,
    outfile: impl AsRef<Path>,
    schedule: FeeSchedule,
) -> Result<(), Error> {
    let (infile, outfile) = (infile.as_ref(), outfile.as_ref());
    info!(
        infile = %infile.display(),
        daily_rate = %schedule.daily_rate(),
        "computing late fees"
    );

    let ledger = build_ledger(open_input(infile)?, schedule).map_err(|e| e.on_path(infile))?;

    let output = File::create(outfile).map_err(|e| Error::io(outfile, e))?;
    ledger
        .serialize(output)
        .map_err(|e| Error::io(outfile, e))?;

    info!(outfile = %outfile.display(), "late fee report written");
    Ok(())
}
