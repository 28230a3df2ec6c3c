//! Defines the core transaction model shared by the expense and income
//! ledgers.

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

/// Alias for the integer type used for mapping to database IDs.
pub type TransactionId = i64;

/// A single money movement: an expense or an income entry.
///
/// Which ledger a transaction belongs to is decided by the store it was
/// created in, not by the record itself. To create a new `Transaction`, use
/// [Transaction::build] and pass the builder to a
/// [TransactionStore](crate::stores::TransactionStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, assigned by the store at creation and
    /// immutable thereafter.
    pub id: TransactionId,
    /// When the money moved, to second precision.
    pub date: PrimitiveDateTime,
    /// The category (expenses) or source (incomes) of the transaction.
    ///
    /// Stored as a plain string rather than a reference into the lookup
    /// list, so records survive later edits to the list.
    pub tag: String,
    /// A free-text description of what the transaction was for. May be
    /// empty.
    pub description: String,
    /// The amount of money spent or earned.
    pub amount: f64,
    /// When the record was first written. Set by the store, not
    /// user-editable.
    pub created_at: PrimitiveDateTime,
    /// When the record was last modified. Set by the store on every write.
    pub updated_at: PrimitiveDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(amount: f64, date: PrimitiveDateTime, tag: &str) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            date,
            tag: tag.to_owned(),
            description: String::new(),
        }
    }
}

/// The user-supplied fields of a new transaction.
///
/// The store assigns the ID and timestamps when the builder is passed to
/// [TransactionStore::create](crate::stores::TransactionStore::create).
/// Builders are expected to have passed
/// [validation](crate::validation::validate_submission) already; stores do
/// not re-validate.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    /// The amount of money spent or earned.
    pub amount: f64,
    /// When the money moved.
    pub date: PrimitiveDateTime,
    /// The category or source of the transaction.
    pub tag: String,
    /// A free-text description. Defaults to the empty string.
    pub description: String,
}

impl TransactionBuilder {
    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }
}

/// The editable fields applied by
/// [TransactionStore::update](crate::stores::TransactionStore::update).
///
/// The ID and `created_at` of the target record never change; the store
/// advances `updated_at` itself.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionUpdate {
    /// The new transaction date.
    pub date: PrimitiveDateTime,
    /// The new category or source.
    pub tag: String,
    /// The new description.
    pub description: String,
    /// The new amount.
    pub amount: f64,
}
