use crate::model::Amount;
use crate::validate::check_limit;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// The column headers of the sales file, in order.
pub const SALE_COLUMNS: [&str; 4] = ["Date", "Region", "Product", "Sales"];

/// A row of the sales file.
// "Date","Region","Product","Sales"
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Sale {
    date: String,
    region: String,
    product: String,
    #[serde(deserialize_with = "bounded_amount")]
    sales: Amount,
}

impl Sale {
    pub fn new(
        date: impl Into<String>,
        region: impl Into<String>,
        product: impl Into<String>,
        sales: Amount,
    ) -> Self {
        Self {
            date: date.into(),
            region: region.into(),
            product: product.into(),
            sales,
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn sales(&self) -> Amount {
        self.sales
    }
}

fn bounded_amount<'de, D>(deserializer: D) -> Result<Amount, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let amount = Amount::from_str(&s).map_err(serde::de::Error::custom)?;
    check_limit(amount, s.trim()).map_err(serde::de::Error::custom)
}
