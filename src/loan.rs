use chrono::NaiveDate;

pub type PatronId = String;

/// `MM/DD/YYYY`, the date format of the loan log.
pub const LOAN_DATE_FORMAT: &str = "%m/%d/%Y";

#[derive(Debug, Clone, PartialEq)]
pub struct LoanRecord {
    pub patron_id: PatronId,
    pub date_due: NaiveDate,
    pub date_returned: NaiveDate,
}

impl LoanRecord {
    /// Whole days between the due date and the return, zero for loans returned in time.
    pub fn days_late(&self) -> u32 {
        let days = self
            .date_returned
            .signed_duration_since(self.date_due)
            .num_days();
        u32::try_from(days.max(0)).unwrap_or(u32::MAX)
    }
}
