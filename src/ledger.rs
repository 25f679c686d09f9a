//! The expense tracker's ledger: an ordered list of expenses that is mirrored to a CSV file.

use crate::aggregate::aggregate;
use crate::model::{Amount, Category, Expense, ExpenseRow, EXPENSE_COLUMNS};
use crate::{fs, Result};
use anyhow::Context;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Owns the expenses and the path of the file they are saved to.
///
/// Expenses can only be appended. Every append rewrites the whole file so that the file always
/// matches what is in memory.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
    expenses: Vec<Expense>,
}

impl Ledger {
    /// Loads the ledger at `path`. A missing file is an empty ledger; nothing is written until
    /// the first expense is added.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_file() {
            info!(
                "No expenses file at {}, starting an empty ledger",
                path.display()
            );
            return Ok(Self {
                path,
                expenses: Vec::new(),
            });
        }

        let rows: Vec<ExpenseRow> = fs::read_csv(&path)?;
        let mut expenses = Vec::with_capacity(rows.len());
        for (ix, row) in rows.into_iter().enumerate() {
            let expense = row
                .into_expense()
                .with_context(|| format!("Bad row {} in {}", ix + 2, path.display()))?;
            expenses.push(expense);
        }
        debug!("Loaded {} expenses from {}", expenses.len(), path.display());
        Ok(Self { path, expenses })
    }

    /// Appends `expense` and saves. If saving fails the expense is not kept.
    pub fn add(&mut self, expense: Expense) -> Result<()> {
        self.expenses.push(expense);
        if let Err(e) = self.save() {
            let _ = self.expenses.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Writes every expense to the ledger's file, replacing what was there.
    pub fn save(&self) -> Result<()> {
        fs::write_csv(&self.path, &EXPENSE_COLUMNS, &self.expenses)
            .context("Unable to save the expenses file")?;
        debug!(
            "Saved {} expenses to {}",
            self.expenses.len(),
            self.path.display()
        );
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Total spending per category. Only categories with at least one expense are present.
    pub fn summary(&self) -> BTreeMap<Category, Decimal> {
        aggregate(&self.expenses)
    }
}

impl Display for Ledger {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let width = self
            .expenses
            .iter()
            .map(|e| e.description().chars().count())
            .max()
            .unwrap_or_default()
            .max(EXPENSE_COLUMNS[2].len());
        writeln!(
            f,
            "{:<12}{:<15}{:<width$}  {:>12}",
            EXPENSE_COLUMNS[0], EXPENSE_COLUMNS[1], EXPENSE_COLUMNS[2], EXPENSE_COLUMNS[3],
        )?;
        for e in &self.expenses {
            writeln!(
                f,
                "{:<12}{:<15}{:<width$}  {:>12}",
                e.date(),
                e.category().to_string(),
                e.description(),
                e.amount().money().to_string(),
            )?;
        }
        Ok(())
    }
}

/// Renders a per-category summary as text, one category per line.
pub fn format_summary(summary: &BTreeMap<Category, Decimal>) -> String {
    summary
        .iter()
        .map(|(category, total)| {
            format!(
                "{:<15}{:>14}",
                category.to_string(),
                Amount::new(*total).money().to_string()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::total;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn expense(date: &str, category: Category, description: &str, amount: &str) -> Expense {
        Expense::new(date, category, description, Amount::from_str(amount).unwrap())
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.csv");
        let ledger = Ledger::load(&path).unwrap();
        assert!(ledger.is_empty());
        assert!(ledger.summary().is_empty());
        assert_eq!(
            EXPENSE_COLUMNS,
            ["Date", "Category", "Description", "Amount"]
        );
        assert!(!path.exists());
    }

    #[test]
    fn test_empty_save_writes_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.csv");
        Ledger::load(&path).unwrap().save().unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "Date,Category,Description,Amount\n");
        assert!(Ledger::load(&path).unwrap().is_empty());
    }

    #[test]
    fn test_add_rewrites_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.csv");
        let mut ledger = Ledger::load(&path).unwrap();
        ledger
            .add(expense("2025-09-01", Category::Food, "groceries", "$1,050.5"))
            .unwrap();
        ledger
            .add(expense("2025-09-02", Category::Transport, "bus, return", "2.75"))
            .unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "Date,Category,Description,Amount\n\
             2025-09-01,Food,groceries,1050.50\n\
             2025-09-02,Transport,\"bus, return\",2.75\n"
        );
    }

    #[test]
    fn test_round_trip_preserves_order_and_amounts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.csv");
        let mut ledger = Ledger::load(&path).unwrap();
        let added = vec![
            expense("2025-09-03", Category::Rent, "september", "1200"),
            expense("2025-09-01", Category::Food, "lunch", "12.40"),
            expense("2025-09-02", Category::Food, "dinner", "30"),
            expense("", Category::Other, "", "0"),
        ];
        for e in &added {
            ledger.add(e.clone()).unwrap();
        }

        let reloaded = Ledger::load(&path).unwrap();
        let pairs: Vec<_> = reloaded
            .expenses()
            .iter()
            .map(|e| (e.category(), e.amount()))
            .collect();
        let expected: Vec<_> = added.iter().map(|e| (e.category(), e.amount())).collect();
        assert_eq!(pairs, expected);
        assert_eq!(reloaded.expenses(), ledger.expenses());
    }

    #[test]
    fn test_summary_matches_records_after_each_add() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.csv");
        let mut ledger = Ledger::load(&path).unwrap();
        let mut running = Decimal::ZERO;
        for (category, amount) in [
            (Category::Food, "50"),
            (Category::Food, "75"),
            (Category::Entertainment, "19.99"),
        ] {
            let e = expense("2025-09-01", category, "", amount);
            running += e.amount().value();
            ledger.add(e).unwrap();
            assert_eq!(total(&ledger.summary()), running);
            assert_eq!(total(&Ledger::load(&path).unwrap().summary()), running);
        }
        assert_eq!(ledger.summary()[&Category::Food], Decimal::from(125));
    }

    #[test]
    fn test_load_unknown_category_as_other() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.csv");
        fs::write(
            &path,
            "Date,Category,Description,Amount\n2025-01-01,Groceries,milk,3.5\n",
        )
        .unwrap();
        let ledger = Ledger::load(&path).unwrap();
        assert_eq!(ledger.expenses()[0].category(), Category::Other);
        assert_eq!(ledger.expenses()[0].description(), "milk");
    }

    #[test]
    fn test_load_negative_amount_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.csv");
        fs::write(
            &path,
            "Date,Category,Description,Amount\n2025-01-01,Food,refund,-3.5\n",
        )
        .unwrap();
        let err = Ledger::load(&path).unwrap_err();
        assert!(err.to_string().contains("Bad row 2"));
    }

    #[test]
    fn test_add_failure_keeps_memory_and_file_in_step() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be makes the write fail
        let path = dir.path().join("expenses.csv");
        fs::create_dir_all(&path).unwrap();
        let mut ledger = Ledger {
            path: path.clone(),
            expenses: Vec::new(),
        };
        assert!(ledger
            .add(expense("2025-09-01", Category::Food, "", "1"))
            .is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_display() {
        let dir = TempDir::new().unwrap();
        let mut ledger = Ledger::load(dir.path().join("e.csv")).unwrap();
        ledger
            .add(expense("2025-09-01", Category::Food, "groceries", "42"))
            .unwrap();
        let text = ledger.to_string();
        assert!(text.starts_with("Date"));
        assert!(text.contains("groceries"));
        assert!(text.contains("$42.00"));
    }

    #[test]
    fn test_display_is_the_same_after_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("e.csv");
        let mut ledger = Ledger::load(&path).unwrap();
        ledger
            .add(expense("2025-09-01", Category::Rent, "crème brûlée café", "$1,200"))
            .unwrap();
        ledger
            .add(expense("2025-09-02", Category::Food, "tea", "3"))
            .unwrap();
        let before = ledger.to_string();
        assert!(before.contains("$1,200.00"));
        assert_eq!(Ledger::load(&path).unwrap().to_string(), before);

        // Padding counts characters, not bytes
        let expected = 12 + 15 + "crème brûlée café".chars().count() + 2 + 12;
        for line in before.lines() {
            assert_eq!(line.chars().count(), expected, "{line}");
        }
    }

    #[test]
    fn test_extra_decimals_survive_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.csv");
        let mut ledger = Ledger::load(&path).unwrap();
        ledger
            .add(expense("2025-09-01", Category::Food, "", "12.345"))
            .unwrap();
        ledger
            .add(expense("2025-09-02", Category::Food, "", "0.004"))
            .unwrap();
        assert_eq!(ledger.summary()[&Category::Food], Decimal::from_str("12.349").unwrap());

        let reloaded = Ledger::load(&path).unwrap();
        assert_eq!(reloaded.summary(), ledger.summary());
        assert_eq!(reloaded.expenses(), ledger.expenses());
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains(",12.345\n"));
        assert!(contents.contains(",0.004\n"));
    }

    #[test]
    fn test_format_summary() {
        let mut summary = BTreeMap::new();
        summary.insert(Category::Food, Decimal::from(125));
        summary.insert(Category::Rent, Decimal::from(1200));
        let text = format_summary(&summary);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Rent"));
        assert!(lines[0].ends_with("$1,200.00"));
        assert!(lines[1].starts_with("Food"));
    }
}
