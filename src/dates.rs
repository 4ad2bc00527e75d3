use chrono::{Days, NaiveDate};

use crate::error::Error;

/// `YYYY-MM-DD`, accepted by the date helpers.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
/// `DD Mon YYYY`, e.g. `01 Jan 2001`.
pub const DISPLAY_DATE_FORMAT: &str = "%d %b %Y";

pub(crate) fn parse_date(value: &str, format: &'static str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value, format).map_err(|_| Error::InvalidDate {
        value: value.to_string(),
        format,
    })
}

/// Re-format `YYYY-MM-DD` date strings as `DD Mon YYYY`, keeping their order.
/// Fails on the first string that isn't a valid date.
pub fn reformat_dates<I, S>(dates: I) -> Result<Vec<String>, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    dates
        .into_iter()
        .map(|date| {
            parse_date(date.as_ref(), ISO_DATE_FORMAT)
                .map(|parsed| parsed.format(DISPLAY_DATE_FORMAT).to_string())
        })
        .collect()
}

/// Returns `n` consecutive days, the first one being `start` (`YYYY-MM-DD`).
pub fn date_range(start: &str, n: usize) -> Result<Vec<NaiveDate>, Error> {
    let start_date = parse_date(start, ISO_DATE_FORMAT)?;
    if n == 0 {
        return Ok(Vec::new());
    }
    // Checking the last day up front guarantees `iter_days` yields all `n` days.
    start_date
        .checked_add_days(Days::new(n as u64 - 1))
        .ok_or(Error::DateOutOfRange {
            start: start_date,
            days: n,
        })?;
    Ok(start_date.iter_days().take(n).collect())
}

/// Pairs every value with a day, counting daily from `start_date`.
pub fn add_date_range<T>(values: Vec<T>, start_date: &str) -> Result<Vec<(NaiveDate, T)>, Error> {
    let dates = date_range(start_date, values.len())?;
    Ok(dates.into_iter().zip(values).collect())
}
