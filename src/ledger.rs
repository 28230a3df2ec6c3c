//! The two ledgers that transactions belong to.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Selects either the expense or income collection.
///
/// The two ledgers are structurally identical but logically distinct: they
/// are stored in separate tables and each has its own lookup list (expense
/// categories and income sources).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ledger {
    /// Money spent.
    Expense,
    /// Money earned.
    Income,
}

impl Ledger {
    /// The SQLite table holding this ledger's transactions.
    pub(crate) fn table_name(self) -> &'static str {
        match self {
            Ledger::Expense => "expense",
            Ledger::Income => "income",
        }
    }

    /// The key of the singleton row holding this ledger's custom lookup
    /// list entries.
    pub fn lookup_key(self) -> &'static str {
        match self {
            Ledger::Expense => "custom_categories",
            Ledger::Income => "custom_income_sources",
        }
    }

    /// The display label for this ledger's tag field.
    pub fn tag_label(self) -> &'static str {
        match self {
            Ledger::Expense => "Category",
            Ledger::Income => "Source",
        }
    }
}

impl Display for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ledger::Expense => write!(f, "expense"),
            Ledger::Income => write!(f, "income"),
        }
    }
}
