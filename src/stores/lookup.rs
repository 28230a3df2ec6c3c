//! Defines the lookup list store trait.

use crate::{Error, Ledger};

/// Persists the custom entries of a ledger's lookup list.
///
/// Each ledger has a single keyed record holding its current custom
/// entries; the builtin entries are deploy-time configuration and are
/// never persisted.
pub trait LookupStore {
    /// Read the custom entries for `ledger`.
    ///
    /// Returns an empty list when no record has been written yet. That is
    /// the first-use bootstrap state, not an error.
    fn get_custom_items(&self, ledger: Ledger) -> Result<Vec<String>, Error>;

    /// Replace the custom entries for `ledger` with `items`.
    fn set_custom_items(&mut self, ledger: Ledger, items: &[String]) -> Result<(), Error>;
}
