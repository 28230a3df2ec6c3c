//! Implements a SQLite backed transaction store.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row, ToSql};
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::{
    Error, Ledger,
    stores::{
        TransactionStore,
        transaction::{SortOrder, TransactionQuery},
    },
    transaction::{Transaction, TransactionBuilder, TransactionId, TransactionUpdate},
};

/// Stores one ledger's transactions in a SQLite database.
///
/// Create one instance per ledger; the expense and income stores can share
/// the same connection.
#[derive(Debug, Clone)]
pub struct SqliteTransactionStore {
    connection: Arc<Mutex<Connection>>,
    ledger: Ledger,
}

impl SqliteTransactionStore {
    /// Create a new store for `ledger` over the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>, ledger: Ledger) -> Self {
        Self { connection, ledger }
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|_| Error::DatabaseLock)
    }

    fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
        Ok(Transaction {
            id: row.get(0)?,
            date: row.get(1)?,
            tag: row.get(2)?,
            description: row.get(3)?,
            amount: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}

impl TransactionStore for SqliteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// Sets `created_at` and `updated_at` to the current moment and returns
    /// the record with its generated ID.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let now = now_utc();

        let transaction = self
            .connection()?
            .prepare(&format!(
                "INSERT INTO \"{table}\" (date, tag, description, amount, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 RETURNING id, date, tag, description, amount, created_at, updated_at",
                table = self.ledger.table_name()
            ))?
            .query_row(
                (
                    builder.date,
                    builder.tag,
                    builder.description,
                    builder.amount,
                    now,
                    now,
                ),
                Self::map_row,
            )?;

        Ok(transaction)
    }

    /// Overwrite the editable fields of a transaction and advance its
    /// `updated_at`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the store reports zero modified rows,
    /// or [Error::SqlError] if there is some other SQL error.
    fn update(&mut self, id: TransactionId, changes: TransactionUpdate) -> Result<(), Error> {
        let rows_affected = self.connection()?.execute(
            &format!(
                "UPDATE \"{table}\" SET date = ?1, tag = ?2, description = ?3, amount = ?4, updated_at = ?5
                 WHERE id = ?6",
                table = self.ledger.table_name()
            ),
            (
                changes.date,
                changes.tag,
                changes.description,
                changes.amount,
                now_utc(),
                id,
            ),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    /// Delete a transaction by ID.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the transaction doesn't exist.
    fn delete(&mut self, id: TransactionId) -> Result<(), Error> {
        let rows_affected = self.connection()?.execute(
            &format!(
                "DELETE FROM \"{table}\" WHERE id = ?1",
                table = self.ledger.table_name()
            ),
            [id],
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    /// Retrieve a transaction from the database by its `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a valid
    /// transaction, or [Error::SqlError] if there is some other SQL error.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = self
            .connection()?
            .prepare(&format!(
                "SELECT id, date, tag, description, amount, created_at, updated_at
                 FROM \"{table}\" WHERE id = :id",
                table = self.ledger.table_name()
            ))?
            .query_row(&[(":id", &id)], Self::map_row)?;

        Ok(transaction)
    }

    /// Get the total number of transactions in the database.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is some SQL error.
    fn count(&self) -> Result<usize, Error> {
        let count: i64 = self.connection()?.query_row(
            &format!(
                "SELECT COUNT(id) FROM \"{table}\"",
                table = self.ledger.table_name()
            ),
            [],
            |row| row.get(0),
        )?;

        Ok(count as usize)
    }

    /// Query for transactions in the database.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is a SQL error.
    fn get_query(&self, query: TransactionQuery) -> Result<Vec<Transaction>, Error> {
        let mut query_string_parts = vec![format!(
            "SELECT id, date, tag, description, amount, created_at, updated_at FROM \"{table}\"",
            table = self.ledger.table_name()
        )];
        let mut where_clause_parts = vec![];
        let mut query_parameters: Vec<Box<dyn ToSql>> = vec![];

        if let Some(date_range) = query.date_range {
            where_clause_parts.push(format!(
                "date BETWEEN ?{} AND ?{}",
                query_parameters.len() + 1,
                query_parameters.len() + 2,
            ));
            query_parameters.push(Box::new(*date_range.start()));
            query_parameters.push(Box::new(*date_range.end()));
        }

        if let Some(tag) = query.tag {
            where_clause_parts.push(format!("tag = ?{}", query_parameters.len() + 1));
            query_parameters.push(Box::new(tag));
        }

        if !where_clause_parts.is_empty() {
            query_string_parts.push(String::from("WHERE ") + &where_clause_parts.join(" AND "));
        }

        match query.sort_date {
            Some(SortOrder::Ascending) => query_string_parts.push("ORDER BY date ASC".to_string()),
            Some(SortOrder::Descending) => {
                query_string_parts.push("ORDER BY date DESC".to_string())
            }
            None => {}
        }

        let query_string = query_string_parts.join(" ");
        let params: Vec<&dyn ToSql> = query_parameters.iter().map(Box::as_ref).collect();

        self.connection()?
            .prepare(&query_string)?
            .query_map(&params[..], Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }
}

/// Create the transaction table and indexes for `ledger`.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL
/// error.
pub(crate) fn create_transaction_table(
    connection: &Connection,
    ledger: Ledger,
) -> Result<(), rusqlite::Error> {
    let table = ledger.table_name();

    connection.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS \"{table}\" (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            tag TEXT NOT NULL,
            description TEXT NOT NULL,
            amount REAL NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_{table}_date ON \"{table}\"(date);
        CREATE INDEX IF NOT EXISTS idx_{table}_tag_date ON \"{table}\"(tag, date);",
    ))
}

/// The current moment in UTC, used for the store-managed timestamps.
fn now_utc() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}
