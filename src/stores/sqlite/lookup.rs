//! Implements a SQLite backed lookup list store.
//!
//! Each ledger's custom entries live in one keyed row holding a JSON
//! array, mirroring the singleton document shape the lookup lists use.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension};

use crate::{Error, Ledger, stores::LookupStore};

/// Stores the custom lookup list entries in a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteLookupStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteLookupStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|_| Error::DatabaseLock)
    }
}

impl LookupStore for SqliteLookupStore {
    /// Read the custom entries for `ledger`, defaulting to an empty list
    /// when no row has been written yet.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] on SQL errors or an [Error::JsonError]
    /// if the stored row does not hold a JSON string array.
    fn get_custom_items(&self, ledger: Ledger) -> Result<Vec<String>, Error> {
        let key = ledger.lookup_key();

        let items: Option<String> = self
            .connection()?
            .prepare("SELECT items FROM lookup_items WHERE id = :id")?
            .query_row(&[(":id", &key)], |row| row.get(0))
            .optional()?;

        match items {
            None => Ok(Vec::new()),
            Some(text) => {
                serde_json::from_str(&text).map_err(|error| Error::JsonError(error.to_string()))
            }
        }
    }

    /// Replace the custom entries for `ledger` with `items`.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    fn set_custom_items(&mut self, ledger: Ledger, items: &[String]) -> Result<(), Error> {
        let text =
            serde_json::to_string(items).map_err(|error| Error::JsonError(error.to_string()))?;

        self.connection()?.execute(
            "INSERT INTO lookup_items (id, items) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET items = excluded.items",
            (ledger.lookup_key(), text),
        )?;

        Ok(())
    }
}

/// Create the lookup list table.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL
/// error.
pub(crate) fn create_lookup_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS lookup_items (
            id TEXT PRIMARY KEY,
            items TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}
