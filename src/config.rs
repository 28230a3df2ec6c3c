//! Deploy-time application configuration.
//!
//! All values are supplied at process start and immutable for the process
//! lifetime. The builtin lookup lists defined here are never persisted;
//! they are merged with the stored custom entries on every read.

use serde::{Deserialize, Serialize};

use crate::Ledger;

/// The application settings supplied at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// The symbol prepended to formatted amounts.
    pub currency_symbol: String,
    /// The builtin expense categories. Never removable.
    pub categories: Vec<String>,
    /// The builtin income sources. Never removable.
    pub income_sources: Vec<String>,
    /// Canonical timezone name used to resolve "now" for date validation.
    pub timezone: String,
}

impl Config {
    /// The builtin lookup list entries for `ledger`.
    pub fn builtin_list(&self, ledger: Ledger) -> &[String] {
        match ledger {
            Ledger::Expense => &self.categories,
            Ledger::Income => &self.income_sources,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_owned(),
            categories: ["Food", "Transport", "Rent", "Shopping", "Bills", "Other"]
                .map(String::from)
                .to_vec(),
            income_sources: ["Salary", "Freelance", "Investment", "Gift", "Refund", "Other"]
                .map(String::from)
                .to_vec(),
            timezone: "Asia/Kolkata".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_builtin_lists_are_per_ledger() {
        let config = Config::default();

        assert!(config.builtin_list(Ledger::Expense).contains(&"Rent".to_owned()));
        assert!(config.builtin_list(Ledger::Income).contains(&"Salary".to_owned()));
        assert_eq!(config.builtin_list(Ledger::Expense).len(), 6);
        assert_eq!(config.builtin_list(Ledger::Income).len(), 6);
    }
}
