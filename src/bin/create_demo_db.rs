//! A utility for creating a pocketbook database seeded with demo data.

use std::{
    error::Error,
    path::Path,
    process::exit,
    sync::{Arc, Mutex},
};

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, PrimitiveDateTime};
use tracing_subscriber::EnvFilter;

use pocketbook::{
    Config, Ledger, Transaction,
    db::initialize,
    lookup::LookupListManager,
    stores::{
        TransactionStore,
        sqlite::{SqliteLookupStore, SqliteTransactionStore},
    },
    timezone::local_now,
    validation::validate_submission,
};

/// Create a pocketbook database populated with a few months of demo
/// expenses and incomes.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();

    let args = Args::parse();
    let output_path = Path::new(&args.output_path);

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    let config = Config::default();
    let now = local_now(&config.timezone)?;

    tracing::info!("Creating database at {output_path:#?}");
    let connection = Connection::open(output_path)?;
    initialize(&connection)?;
    let connection = Arc::new(Mutex::new(connection));

    let mut categories = LookupListManager::new(
        Ledger::Expense,
        config.categories.clone(),
        SqliteLookupStore::new(connection.clone()),
    );
    let sources = LookupListManager::new(
        Ledger::Income,
        config.income_sources.clone(),
        SqliteLookupStore::new(connection.clone()),
    );

    let added = categories.add("Healthcare")?;
    tracing::info!("Added custom category \"{added}\"");

    let mut expenses = SqliteTransactionStore::new(connection.clone(), Ledger::Expense);
    let expense_list = categories.effective_list()?;
    seed_ledger(
        &mut expenses,
        &expense_list,
        now,
        &[
            (620.0, 2, "Food", "Weekly groceries"),
            (45.0, 5, "Transport", "Bus card top-up"),
            (12000.0, 12, "Rent", ""),
            (799.0, 20, "Shopping", "Headphones"),
            (350.0, 33, "Healthcare", "Pharmacy"),
            (1499.0, 41, "Bills", "Electricity"),
            (90.0, 67, "Food", "Dinner out"),
        ],
    )?;

    let mut incomes = SqliteTransactionStore::new(connection, Ledger::Income);
    let income_list = sources.effective_list()?;
    seed_ledger(
        &mut incomes,
        &income_list,
        now,
        &[
            (52000.0, 14, "Salary", "Monthly salary"),
            (8000.0, 26, "Freelance", "Logo design"),
            (52000.0, 44, "Salary", "Monthly salary"),
            (1200.0, 58, "Refund", "Returned kettle"),
        ],
    )?;

    tracing::info!("Success!");

    Ok(())
}

/// Validate and insert demo records dated `days_ago` before `now`.
fn seed_ledger(
    store: &mut SqliteTransactionStore,
    allowed: &[String],
    now: PrimitiveDateTime,
    records: &[(f64, i64, &str, &str)],
) -> Result<(), Box<dyn Error>> {
    for &(amount, days_ago, tag, description) in records {
        let date = now - Duration::days(days_ago);

        validate_submission(
            Some(amount),
            Some(date),
            description,
            Some(tag),
            allowed,
            now,
        )
        .map_err(|errors| format!("invalid demo record: {errors:?}"))?;

        store.create(Transaction::build(amount, date, tag).description(description))?;
    }

    Ok(())
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
