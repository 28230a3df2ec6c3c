//! Pocketbook is the core data layer for a personal expense and income
//! tracker.
//!
//! It records dated money movements in two parallel ledgers (expenses and
//! incomes), computes aggregated views over them (monthly totals, category
//! and source breakdowns, daily time series, available reporting periods),
//! and manages the category and income-source lookup lists that write forms
//! offer to the user.
//!
//! Persistence goes through the store traits in [stores], with a SQLite
//! implementation in [stores::sqlite]. The aggregation functions in
//! [aggregation] are plain reductions over store queries and work with any
//! [stores::TransactionStore] implementation.

#![warn(missing_docs)]

pub mod aggregation;
pub mod config;
pub mod db;
pub mod export;
pub mod format;
pub mod ledger;
pub mod lookup;
pub mod stores;
pub mod timezone;
pub mod transaction;
pub mod validation;

pub use config::Config;
pub use ledger::Ledger;
pub use transaction::{Transaction, TransactionBuilder, TransactionId, TransactionUpdate};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The amount was missing or not greater than zero.
    #[error("amount is required and must be greater than zero")]
    InvalidAmount,

    /// The transaction date was missing or later than the current moment.
    ///
    /// Transactions record events that have already happened, therefore
    /// future dates are not allowed. There is no lower bound, arbitrarily
    /// old backdated entries are fine.
    #[error("a transaction date is required and must not be in the future")]
    InvalidDate,

    /// The description exceeded the maximum length.
    #[error(
        "description is too long (max {} characters)",
        crate::validation::MAX_DESCRIPTION_LENGTH
    )]
    DescriptionTooLong,

    /// No category or income source was selected for a transaction.
    #[error("a category or source must be selected")]
    MissingTag,

    /// The selected tag is not in the current effective lookup list.
    ///
    /// This only blocks writes. Historical records may carry tags that have
    /// since been removed from the list, and reads tolerate them.
    #[error("\"{0}\" is not in the current list of options")]
    UnknownTag(String),

    /// An empty string was used as a lookup list entry name.
    #[error("name cannot be empty")]
    EmptyName,

    /// A lookup list entry name exceeded the maximum length.
    #[error(
        "name is too long (max {} characters)",
        crate::lookup::MAX_NAME_LENGTH
    )]
    NameTooLong,

    /// The lookup list entry already exists in the effective list.
    #[error("\"{0}\" already exists")]
    AlreadyExists(String),

    /// Tried to remove a builtin lookup list entry.
    #[error("\"{0}\" is a builtin entry and cannot be removed")]
    BuiltinProtected(String),

    /// The requested record could not be found.
    ///
    /// For updates and deletes this means the store confirmed that zero
    /// rows were modified.
    #[error("the requested record could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLock,

    /// A persisted value could not be serialized to or parsed from JSON.
    #[error("could not read or write JSON: {0}")]
    JsonError(String),

    /// An error occurred while writing CSV output.
    #[error("could not write CSV: {0}")]
    Csv(String),

    /// An error occurred while getting the local time from a canonical
    /// timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<time::error::ComponentRange> for Error {
    fn from(_: time::error::ComponentRange) -> Self {
        Error::InvalidDate
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::Csv(value.to_string())
    }
}
