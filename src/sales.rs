//! The sales dashboard's dataset and the figures derived from it.

use crate::aggregate::{aggregate_by, cumulative, top, total};
use crate::model::{Amount, Sale, SALE_COLUMNS};
use crate::{fs, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Rows written to a new sales file so that the dashboard has something to show.
pub fn sample_sales() -> Vec<Sale> {
    [
        ("2025-09-01", "North", "Product A", 500),
        ("2025-09-02", "South", "Product B", 700),
        ("2025-09-03", "East", "Product A", 450),
        ("2025-09-04", "West", "Product C", 600),
        ("2025-09-05", "North", "Product B", 550),
        ("2025-09-06", "South", "Product A", 650),
    ]
    .into_iter()
    .map(|(date, region, product, sales)| {
        Sale::new(date, region, product, Amount::new(Decimal::from(sales)))
    })
    .collect()
}

/// The rows of a sales file.
#[derive(Debug, Clone)]
pub struct SalesData {
    path: PathBuf,
    sales: Vec<Sale>,
    seeded: bool,
}

impl SalesData {
    /// Loads the sales file at `path`. If there is no file, one is created with `sample_sales`.
    pub fn load_or_seed(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.is_file() {
            let sales: Vec<Sale> = fs::read_csv(&path)?;
            debug!("Loaded {} sales rows from {}", sales.len(), path.display());
            return Ok(Self {
                path,
                sales,
                seeded: false,
            });
        }

        info!("Sales file not found, creating sample {}", path.display());
        let sales = sample_sales();
        fs::write_csv(&path, &SALE_COLUMNS, &sales)?;
        Ok(Self {
            path,
            sales,
            seeded: true,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// True if the file did not exist and was created from the sample rows.
    pub fn seeded(&self) -> bool {
        self.seeded
    }

    pub fn report(&self) -> SalesReport {
        SalesReport::new(&self.sales)
    }
}

/// Totals for the dashboard.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct SalesReport {
    pub total: Decimal,
    pub by_region: BTreeMap<String, Decimal>,
    pub by_product: BTreeMap<String, Decimal>,
    /// Sales per date. Dates are ordered as text, which is chronological for `YYYY-MM-DD`.
    pub by_date: BTreeMap<String, Decimal>,
    pub cumulative: Vec<(String, Decimal)>,
    pub top_product: Option<String>,
    pub top_region: Option<String>,
}

impl SalesReport {
    pub fn new(sales: &[Sale]) -> Self {
        let amount = |s: &Sale| s.sales();
        let by_region = aggregate_by(sales, |s| s.region().to_string(), amount);
        let by_product = aggregate_by(sales, |s| s.product().to_string(), amount);
        let by_date = aggregate_by(sales, |s| s.date().to_string(), amount);
        Self {
            total: total(&by_date),
            cumulative: cumulative(&by_date),
            top_product: top(&by_product),
            top_region: top(&by_region),
            by_region,
            by_product,
            by_date,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

impl Display for SalesReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "===== Sales Dashboard =====")?;
        if self.is_empty() {
            return writeln!(f, "No sales data.");
        }
        writeln!(f, "Total Sales: {}", Amount::new(self.total).money())?;
        writeln!(
            f,
            "Top Product: {}",
            self.top_product.as_deref().unwrap_or_default()
        )?;
        writeln!(
            f,
            "Top Region: {}",
            self.top_region.as_deref().unwrap_or_default()
        )?;
        writeln!(f)?;
        writeln!(f, "Sales by Region:")?;
        write_group(f, &self.by_region)?;
        writeln!(f)?;
        writeln!(f, "Sales by Product:")?;
        write_group(f, &self.by_product)
    }
}

fn write_group(f: &mut Formatter<'_>, group: &BTreeMap<String, Decimal>) -> std::fmt::Result {
    for (key, value) in group {
        writeln!(
            f,
            "{:<15}{:>14}",
            key,
            Amount::new(*value).money().to_string()
        )?;
    }
    Ok(())
}
