//! Lookup list management for expense categories and income sources.
//!
//! Each ledger's list is the union of a fixed builtin list (deploy-time
//! configuration, never persisted) and a mutable custom list persisted
//! through a [LookupStore]. The union is recomputed on every call rather
//! than cached, so it can never go stale after an add or remove.
//!
//! Removing an entry never touches existing transactions that reference
//! it; their tags keep appearing in breakdowns as legacy tags.

use std::collections::BTreeSet;

use crate::{Error, Ledger, stores::LookupStore};

/// The maximum number of characters allowed in a lookup list entry name.
pub const MAX_NAME_LENGTH: usize = 30;

/// Maintains one ledger's lookup list over a [LookupStore].
///
/// The expense and income managers are independent instances that can
/// share the same store.
#[derive(Debug, Clone)]
pub struct LookupListManager<S> {
    ledger: Ledger,
    builtin: Vec<String>,
    store: S,
}

impl<S: LookupStore> LookupListManager<S> {
    /// Create a manager for `ledger` with the deploy-time `builtin`
    /// entries.
    pub fn new(ledger: Ledger, builtin: Vec<String>, store: S) -> Self {
        Self {
            ledger,
            builtin,
            store,
        }
    }

    /// The deduplicated union of builtin and custom entries, sorted
    /// ascending.
    pub fn effective_list(&self) -> Result<Vec<String>, Error> {
        let custom = self.store.get_custom_items(self.ledger)?;

        let list: BTreeSet<String> = self.builtin.iter().cloned().chain(custom).collect();

        Ok(list.into_iter().collect())
    }

    /// The persisted custom entries only, i.e. the removable ones.
    pub fn custom_list(&self) -> Result<Vec<String>, Error> {
        self.store.get_custom_items(self.ledger)
    }

    /// Add a custom entry and return its normalized name.
    ///
    /// The name is trimmed and its first letter uppercased; the rest of
    /// the casing is left untouched. Nothing is persisted on failure.
    ///
    /// # Errors
    /// Returns [Error::EmptyName] if the trimmed name is empty,
    /// [Error::NameTooLong] if it is longer than [MAX_NAME_LENGTH]
    /// characters, or [Error::AlreadyExists] if the normalized name is
    /// already in the effective list.
    pub fn add(&mut self, name: &str) -> Result<String, Error> {
        let name = normalize_name(name)?;

        if self.effective_list()?.contains(&name) {
            return Err(Error::AlreadyExists(name));
        }

        let mut custom = self.store.get_custom_items(self.ledger)?;
        custom.push(name.clone());
        self.store.set_custom_items(self.ledger, &custom)?;

        Ok(name)
    }

    /// Remove a custom entry.
    ///
    /// Existing transactions referencing `name` are left untouched.
    ///
    /// # Errors
    /// Returns [Error::BuiltinProtected] if `name` is a builtin entry, or
    /// [Error::NotFound] if it is not in the custom list.
    pub fn remove(&mut self, name: &str) -> Result<(), Error> {
        if self.builtin.iter().any(|builtin| builtin == name) {
            return Err(Error::BuiltinProtected(name.to_owned()));
        }

        let mut custom = self.store.get_custom_items(self.ledger)?;
        let position = custom
            .iter()
            .position(|item| item == name)
            .ok_or(Error::NotFound)?;
        custom.remove(position);

        self.store.set_custom_items(self.ledger, &custom)
    }
}

/// Trim a name and uppercase its first letter, leaving the rest of the
/// casing untouched.
fn normalize_name(name: &str) -> Result<String, Error> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(Error::EmptyName);
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(Error::NameTooLong);
    }

    let mut chars = trimmed.chars();
    let first = match chars.next() {
        Some(first) => first,
        None => return Err(Error::EmptyName),
    };

    Ok(first.to_uppercase().chain(chars).collect())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{db::initialize, stores::sqlite::SqliteLookupStore};

    use super::*;

    fn builtin_categories() -> Vec<String> {
        ["Food", "Transport", "Rent", "Shopping", "Bills", "Other"]
            .map(String::from)
            .to_vec()
    }

    fn get_test_manager() -> LookupListManager<SqliteLookupStore> {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");
        let store = SqliteLookupStore::new(Arc::new(Mutex::new(connection)));

        LookupListManager::new(Ledger::Expense, builtin_categories(), store)
    }

    #[test]
    fn effective_list_is_builtin_when_no_custom_entries() {
        let manager = get_test_manager();

        let list = manager.effective_list().expect("Could not get list");

        assert_eq!(
            list,
            vec!["Bills", "Food", "Other", "Rent", "Shopping", "Transport"]
        );
    }

    #[test]
    fn add_normalizes_trims_and_capitalizes() {
        let mut manager = get_test_manager();

        let name = manager.add("  healthCare  ").expect("Could not add entry");

        assert_eq!(name, "HealthCare");
        let list = manager.effective_list().expect("Could not get list");
        assert!(list.contains(&"HealthCare".to_owned()));
    }

    #[test]
    fn add_rejects_duplicate_of_builtin() {
        let mut manager = get_test_manager();

        let result = manager.add("Food ");

        assert_eq!(result, Err(Error::AlreadyExists("Food".to_owned())));
    }

    #[test]
    fn add_rejects_duplicate_of_custom_entry() {
        let mut manager = get_test_manager();
        manager.add("Healthcare").expect("Could not add entry");

        let result = manager.add("healthcare");

        assert_eq!(result, Err(Error::AlreadyExists("Healthcare".to_owned())));
    }

    #[test]
    fn add_rejects_empty_and_overlong_names() {
        let mut manager = get_test_manager();

        assert_eq!(manager.add("   "), Err(Error::EmptyName));
        assert_eq!(
            manager.add(&"x".repeat(MAX_NAME_LENGTH + 1)),
            Err(Error::NameTooLong)
        );
        // Nothing was persisted by the failed adds.
        assert_eq!(manager.custom_list(), Ok(Vec::new()));
    }

    #[test]
    fn remove_rejects_builtin_entries() {
        let mut manager = get_test_manager();

        let result = manager.remove("Food");

        assert_eq!(result, Err(Error::BuiltinProtected("Food".to_owned())));
    }

    #[test]
    fn remove_rejects_unknown_entries() {
        let mut manager = get_test_manager();

        let result = manager.remove("Healthcare");

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn add_then_remove_restores_the_prior_list() {
        let mut manager = get_test_manager();
        let before = manager.effective_list().expect("Could not get list");

        manager.add("Healthcare").expect("Could not add entry");
        manager.remove("Healthcare").expect("Could not remove entry");

        let after = manager.effective_list().expect("Could not get list");
        assert_eq!(before, after);
    }

    #[test]
    fn expense_and_income_lists_are_independent() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");
        let store = SqliteLookupStore::new(Arc::new(Mutex::new(connection)));
        let mut categories =
            LookupListManager::new(Ledger::Expense, builtin_categories(), store.clone());
        let sources = LookupListManager::new(
            Ledger::Income,
            vec!["Salary".to_owned(), "Other".to_owned()],
            store,
        );

        categories.add("Healthcare").expect("Could not add entry");

        let source_list = sources.effective_list().expect("Could not get list");
        assert_eq!(source_list, vec!["Other", "Salary"]);
    }
}
