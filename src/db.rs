//! Database schema setup.

use rusqlite::Connection;

use crate::{
    Ledger,
    stores::sqlite::{create_lookup_table, create_transaction_table},
};

/// Create all application tables and indexes in the database.
///
/// Safe to call on an already-initialized database.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL
/// error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    create_transaction_table(connection, Ledger::Expense)?;
    create_transaction_table(connection, Ledger::Income)?;
    create_lookup_table(connection)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_creates_all_tables() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("Could not initialize database");

        let count: i64 = connection
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master
                 WHERE type = 'table' AND name IN ('expense', 'income', 'lookup_items')",
                [],
                |row| row.get(0),
            )
            .expect("Could not query sqlite_master");
        assert_eq!(count, 3);
    }

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("Could not initialize database");
        initialize(&connection).expect("Second initialize failed");
    }
}
