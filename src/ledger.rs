use std::collections::HashMap;

use itertools::Itertools;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::debug;

use crate::{
    error::Error,
    loan::{LoanRecord, PatronId},
};

/// How much a loan costs per day it is returned late.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeSchedule {
    daily_rate: Decimal,
}

impl FeeSchedule {
    pub fn new(daily_rate: Decimal) -> Result<Self, Error> {
        if daily_rate < Decimal::ZERO {
            return Err(Error::NegativeRate(daily_rate));
        }
        Ok(Self { daily_rate })
    }

    pub fn daily_rate(&self) -> Decimal {
        self.daily_rate
    }

    pub fn fee_for(&self, loan: &LoanRecord) -> Result<Decimal, Error> {
        Decimal::from(loan.days_late())
            .checked_mul(self.daily_rate)
            .ok_or_else(|| Error::FeeOverflow(loan.patron_id.clone()))
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            daily_rate: Decimal::new(25, 2),
        }
    }
}

#[derive(Debug, Serialize)]
struct FeeRow<'a> {
    patron_id: &'a str,
    late_fees: String,
}

/// Renders a fee with exactly two fraction digits, rounding half away from zero.
pub fn format_fee(fee: Decimal) -> String {
    let rounded = fee.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Late fees accumulated per patron.
#[derive(Debug, Default)]
pub struct FeeLedger {
    schedule: FeeSchedule,
    fees: HashMap<PatronId, Decimal>,
}

impl FeeLedger {
    pub fn with_schedule(schedule: FeeSchedule) -> Self {
        Self {
            schedule,
            fees: HashMap::new(),
        }
    }

    /// Returns the patron's running fee, creating a zero entry for unseen patrons.
    pub fn open_account(&mut self, patron_id: &str) -> &mut Decimal {
        self.fees.entry(patron_id.to_string()).or_default()
    }

    /// Record a loan: the patron always gets an entry, late returns add to it.
    pub fn apply(&mut self, loan: &LoanRecord) -> Result<(), Error> {
        let fee = self.schedule.fee_for(loan)?;
        let account = self.open_account(&loan.patron_id);
        if !fee.is_zero() {
            *account = account
                .checked_add(fee)
                .ok_or_else(|| Error::FeeOverflow(loan.patron_id.clone()))?;
            debug!(
                patron_id = %loan.patron_id,
                days_late = loan.days_late(),
                %fee,
                "late return"
            );
        }
        Ok(())
    }

    pub fn fee(&self, patron_id: &str) -> Option<Decimal> {
        self.fees.get(patron_id).copied()
    }

    pub fn len(&self) -> usize {
        self.fees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fees.is_empty()
    }

    /// Serialize the ledger to CSV as `patron_id,late_fees`.
    /// Patrons are sorted by ID so repeated runs produce identical output.
    pub fn serialize(&self, output: impl std::io::Write) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_writer(output);
        if self.fees.is_empty() {
            writer.write_record(["patron_id", "late_fees"])?;
        }
        for (patron_id, fee) in self.fees.iter().sorted_by(|(a, _), (b, _)| a.cmp(b)) {
            writer.serialize(FeeRow {
                patron_id,
                late_fees: format_fee(*fee),
            })?;
        }
        writer.flush()?;
        Ok(())
    }
}
