//! Defines the transaction store trait.

use std::ops::RangeInclusive;

use time::PrimitiveDateTime;

use crate::{
    Error,
    transaction::{Transaction, TransactionBuilder, TransactionId, TransactionUpdate},
};

/// Handles the creation, modification and retrieval of transactions for a
/// single ledger.
///
/// Implementations assume the caller has already run
/// [validation](crate::validation) on user input; the store never
/// re-validates. Writes are independent single-record operations with no
/// cross-record transaction discipline.
pub trait TransactionStore {
    /// Create a new transaction in the store.
    ///
    /// Assigns the record's ID and sets `created_at` and `updated_at` to
    /// the current moment.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error>;

    /// Overwrite the editable fields of the transaction with `id`.
    ///
    /// `created_at` and the ID are left untouched and `updated_at` is
    /// advanced. Success is only reported if the store confirms at least
    /// one record was modified.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no record was modified.
    fn update(&mut self, id: TransactionId, changes: TransactionUpdate) -> Result<(), Error>;

    /// Irreversibly remove the transaction with `id`. No cascade, no undo.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no matching record.
    fn delete(&mut self, id: TransactionId) -> Result<(), Error>;

    /// Retrieve a single transaction by its `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no matching record.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Get the total number of transactions in the store.
    fn count(&self) -> Result<usize, Error>;

    /// Retrieve transactions from the store in the way defined by `query`.
    fn get_query(&self, query: TransactionQuery) -> Result<Vec<Transaction>, Error>;
}

/// Defines how transactions should be fetched from
/// [TransactionStore::get_query].
#[derive(Debug, Default)]
pub struct TransactionQuery {
    /// Include transactions within `date_range` (inclusive on both ends).
    /// `None` means all time.
    pub date_range: Option<RangeInclusive<PrimitiveDateTime>>,
    /// Include only transactions whose tag equals `tag`.
    pub tag: Option<String>,
    /// Orders transactions by date in the order `sort_date`. `None`
    /// returns transactions in the order they are stored.
    pub sort_date: Option<SortOrder>,
}

impl TransactionQuery {
    /// The query used for listing transactions: optionally filtered, most
    /// recent first.
    pub fn listing(
        date_range: Option<RangeInclusive<PrimitiveDateTime>>,
        tag: Option<String>,
    ) -> Self {
        Self {
            date_range,
            tag,
            sort_date: Some(SortOrder::Descending),
        }
    }
}

/// The order to sort transactions in a [TransactionQuery].
#[derive(Debug)]
pub enum SortOrder {
    /// Sort in order of increasing date.
    Ascending,
    /// Sort in order of decreasing date.
    Descending,
}
