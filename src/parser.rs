use std::path::PathBuf;

use serde::Deserialize;

use crate::{
    dates::parse_date,
    error::Error,
    loan::{LoanRecord, LOAN_DATE_FORMAT},
};

#[derive(Deserialize, Debug, PartialEq)]
struct ParsedLoan {
    #[serde(default)]
    patron_id: Option<String>,
    #[serde(default)]
    date_due: Option<String>,
    #[serde(default)]
    date_returned: Option<String>,
}

fn required(field: Option<String>, name: &'static str) -> Result<String, Error> {
    field
        .filter(|value| !value.is_empty())
        .ok_or(Error::MissingField(name))
}

/// Reads loan records from a CSV with at least `patron_id`, `date_due` and
/// `date_returned` columns. Other columns are ignored.
pub fn parse<R>(rdr: csv::Reader<R>) -> impl Iterator<Item = Result<LoanRecord, Error>>
where
    R: std::io::Read,
{
    rdr.into_deserialize::<ParsedLoan>().map(|loan| {
        let loan = loan.map_err(|e| {
            if e.is_io_error() {
                Error::io(PathBuf::new(), e)
            } else {
                Error::ParsingFailure(e.to_string())
            }
        })?;

        // Fields are optional in the intermediate representation so that a missing
        // column is reported by name rather than as a generic deserialization error.
        let patron_id = required(loan.patron_id, "patron_id")?;
        let date_due = required(loan.date_due, "date_due")?;
        let date_returned = required(loan.date_returned, "date_returned")?;

        Ok(LoanRecord {
            patron_id,
            date_due: parse_date(&date_due, LOAN_DATE_FORMAT)?,
            date_returned: parse_date(&date_returned, LOAN_DATE_FORMAT)?,
        })
    })
}

#[cfg(test)]
mod tests {
    mod parsing {
        use chrono::NaiveDate;

        use crate::error::Error;
        use crate::loan::LoanRecord;
        use crate::parser::parse;

        macro_rules! parse {
            ($data:literal) => {
                parse!("patron_id, date_due, date_returned", $data)
            };
            ($header:literal, $data:literal) => {{
                let input = format!("{}\n{}", $header, $data);
                let rdr = csv::ReaderBuilder::new()
                    .trim(csv::Trim::All)
                    .from_reader(input.as_bytes());
                parse(rdr).collect::<Vec<Result<LoanRecord, _>>>()
            }};
        }

        fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
            NaiveDate::from_ymd_opt(y, m, d).unwrap()
        }

        #[test]
        fn parse_loan() {
            assert_eq!(
                parse!("P1, 01/01/2020, 01/05/2020"),
                vec![Ok(LoanRecord {
                    patron_id: "P1".to_string(),
                    date_due: ymd(2020, 1, 1),
                    date_returned: ymd(2020, 1, 5),
                })]
            );
        }

        #[test]
        fn parse_multiple_loans() {
            let loans = parse!(
                "P1, 01/01/2020, 01/05/2020
                P2, 12/31/2019, 01/02/2020"
            );
            assert_eq!(2, loans.len());
            assert_eq!(
                loans[1],
                Ok(LoanRecord {
                    patron_id: "P2".to_string(),
                    date_due: ymd(2019, 12, 31),
                    date_returned: ymd(2020, 1, 2),
                })
            );
        }

        #[test]
        fn parse_ignores_extra_columns_and_order() {
            assert_eq!(
                parse!(
                    "id, date_returned, book_id, patron_id, date_due",
                    "7, 03/02/2021, B-17, 17-873-8783, 02/26/2021"
                ),
                vec![Ok(LoanRecord {
                    patron_id: "17-873-8783".to_string(),
                    date_due: ymd(2021, 2, 26),
                    date_returned: ymd(2021, 3, 2),
                })]
            );
        }

        #[test]
        fn parse_iso_date_is_rejected() {
            assert_eq!(
                parse!("P1, 2020-01-01, 01/05/2020"),
                vec![Err(Error::InvalidDate {
                    value: "2020-01-01".to_string(),
                    format: "%m/%d/%Y"
                })]
            );
        }

        #[test]
        fn parse_impossible_date_is_rejected() {
            assert!(matches!(
                parse!("P1, 01/01/2020, 02/30/2020")[..],
                [Err(Error::InvalidDate { .. })]
            ));
        }

        #[test]
        fn parse_missing_column() {
            assert_eq!(
                parse!("patron_id, date_due", "P1, 01/01/2020"),
                vec![Err(Error::MissingField("date_returned"))]
            );
        }

        #[test]
        fn parse_empty_field() {
            assert_eq!(
                parse!(", 01/01/2020, 01/05/2020"),
                vec![Err(Error::MissingField("patron_id"))]
            );
            assert_eq!(
                parse!("P1, , 01/05/2020"),
                vec![Err(Error::MissingField("date_due"))]
            );
        }

        #[test]
        fn parse_ragged_row() {
            assert!(matches!(
                parse!("P1, 01/01/2020")[..],
                [Err(Error::ParsingFailure(_))]
            ));
        }
    }
}
