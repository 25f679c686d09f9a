//! Budget vs actual comparison.

use crate::model::{Amount, Category};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// One line of the budget vs actual report.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize)]
pub struct VarianceRow {
    pub budget: Decimal,
    pub actual: Decimal,
    /// `actual - budget`. Positive means the category is over budget.
    pub variance: Decimal,
}

impl VarianceRow {
    pub fn new(budget: Decimal, actual: Decimal) -> Self {
        Self {
            budget,
            actual,
            variance: actual - budget,
        }
    }

    pub fn is_overspent(&self) -> bool {
        self.variance > Decimal::ZERO
    }
}

/// Merges planned and actual amounts over the union of their keys. A key missing from either
/// side counts as zero on that side.
pub fn variance<K>(
    budget: &BTreeMap<K, Decimal>,
    actual: &BTreeMap<K, Decimal>,
) -> BTreeMap<K, VarianceRow>
where
    K: Ord + Clone,
{
    budget
        .keys()
        .chain(actual.keys())
        .map(|k| {
            let planned = budget.get(k).copied().unwrap_or_default();
            let spent = actual.get(k).copied().unwrap_or_default();
            (k.clone(), VarianceRow::new(planned, spent))
        })
        .collect()
}

/// The budget vs actual report for a session.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct VarianceReport {
    rows: BTreeMap<Category, VarianceRow>,
}

impl VarianceReport {
    pub fn new(budget: &BTreeMap<Category, Decimal>, actual: &BTreeMap<Category, Decimal>) -> Self {
        Self {
            rows: variance(budget, actual),
        }
    }

    pub fn rows(&self) -> &BTreeMap<Category, VarianceRow> {
        &self.rows
    }

    pub fn get(&self, category: Category) -> Option<&VarianceRow> {
        self.rows.get(&category)
    }

    /// The rows with a positive variance.
    pub fn overspent(&self) -> impl Iterator<Item = (&Category, &VarianceRow)> {
        self.rows.iter().filter(|(_, row)| row.is_overspent())
    }

    /// All rows added together.
    pub fn totals(&self) -> VarianceRow {
        let budget = self.rows.values().map(|r| r.budget).sum();
        let actual = self.rows.values().map(|r| r.actual).sum();
        VarianceRow::new(budget, actual)
    }
}

impl Display for VarianceReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "===== Budget vs Actual Report =====")?;
        writeln!(
            f,
            "{:<15}{:>14}{:>14}{:>14}",
            "Category", "Budget", "Actual", "Variance"
        )?;
        for (category, row) in &self.rows {
            write_row(f, &category.to_string(), row)?;
        }
        write_row(f, "Total", &self.totals())?;

        let mut overspent = self.overspent().peekable();
        if overspent.peek().is_some() {
            writeln!(f)?;
            writeln!(f, "Categories over budget:")?;
            for (category, row) in overspent {
                writeln!(
                    f,
                    "{:<15}{:>14}",
                    category.to_string(),
                    Amount::new(row.variance).money().to_string()
                )?;
            }
        }
        Ok(())
    }
}

fn write_row(f: &mut Formatter<'_>, label: &str, row: &VarianceRow) -> std::fmt::Result {
    writeln!(
        f,
        "{:<15}{:>14}{:>14}{:>14}",
        label,
        Amount::new(row.budget).money().to_string(),
        Amount::new(row.actual).money().to_string(),
        Amount::new(row.variance).money().to_string(),
    )
}
