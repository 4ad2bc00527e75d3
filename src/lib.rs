pub mod dates;
pub mod error;
pub mod ledger;
pub mod loan;
pub mod logger;
pub mod parser;
pub mod report;
