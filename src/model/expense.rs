use crate::aggregate::Grouped;
use crate::model::{Amount, Category};
use crate::validate;
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// The column headers of the expenses file, in order.
pub const EXPENSE_COLUMNS: [&str; 4] = ["Date", "Category", "Description", "Amount"];

/// A single expense. Used both for the tracker's ledger and for the transactions entered into the
/// budget analyzer (which have no description).
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Expense {
    date: String,
    category: Category,
    description: String,
    amount: Amount,
}

impl Expense {
    pub fn new(
        date: impl Into<String>,
        category: Category,
        description: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self {
            date: date.into(),
            category,
            description: description.into(),
            amount,
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

impl Grouped for Expense {
    type Key = Category;

    fn key(&self) -> Category {
        self.category
    }

    fn amount(&self) -> Amount {
        self.amount
    }
}

/// A row of the expenses file as it is found on disk, before validation.
// "Date","Category","Description","Amount"
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ExpenseRow {
    #[serde(default)]
    pub(crate) date: String,
    #[serde(default)]
    pub(crate) category: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) amount: String,
}

impl ExpenseRow {
    /// Validates the row. Categories outside the known set are kept as `Other` so that a hand
    /// edited file still loads; a bad amount is an error.
    pub(crate) fn into_expense(self) -> Result<Expense> {
        let amount = validate::parse_amount(&self.amount)
            .with_context(|| format!("Invalid amount '{}'", self.amount))?;
        let category = match Category::from_str(&self.category) {
            Ok(category) => category,
            Err(e) => {
                warn!("{e}, recording it as {}", Category::Other);
                Category::Other
            }
        };
        Ok(Expense {
            date: self.date,
            category,
            description: self.description,
            amount,
        })
    }
}
