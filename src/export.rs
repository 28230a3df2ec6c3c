//! CSV export of transaction listings.

use std::io::Write;

use crate::{Error, Ledger, transaction::Transaction};

/// Write `transactions` to `writer` as CSV.
///
/// Columns are Date (ISO 8601 date, time discarded), Category or Source
/// (per `ledger`), Description and Amount, in the order the transactions
/// were given, so an export round-trips exactly what a listing query
/// returned.
///
/// # Errors
/// Returns an [Error::Csv] if a record cannot be written.
pub fn write_csv<W: Write>(
    transactions: &[Transaction],
    ledger: Ledger,
    writer: W,
) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(["Date", ledger.tag_label(), "Description", "Amount"])?;

    for transaction in transactions {
        writer.write_record([
            transaction.date.date().to_string(),
            transaction.tag.clone(),
            transaction.description.clone(),
            transaction.amount.to_string(),
        ])?;
    }

    writer.flush().map_err(|error| Error::Csv(error.to_string()))
}

/// Render `transactions` as a CSV string, see [write_csv].
pub fn csv_string(transactions: &[Transaction], ledger: Ledger) -> Result<String, Error> {
    let mut buffer = Vec::new();
    write_csv(transactions, ledger, &mut buffer)?;

    String::from_utf8(buffer).map_err(|error| Error::Csv(error.to_string()))
}
