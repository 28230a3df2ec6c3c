//! Contains traits and implementations for objects that store transactions
//! and lookup lists.

mod lookup;
mod transaction;

pub mod sqlite;

pub use lookup::LookupStore;
pub use transaction::{SortOrder, TransactionQuery, TransactionStore};
