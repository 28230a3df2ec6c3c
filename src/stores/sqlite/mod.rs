//! SQLite-backed implementations of the store traits.
//!
//! All stores share one connection behind an `Arc<Mutex<_>>`; each store
//! call locks it for the duration of a single statement. There is no
//! cross-record transaction discipline, matching the one-request-at-a-time
//! execution model the application runs under.

mod lookup;
mod transaction;

pub use lookup::SqliteLookupStore;
pub(crate) use lookup::create_lookup_table;
pub use transaction::SqliteTransactionStore;
pub(crate) use transaction::create_transaction_table;
