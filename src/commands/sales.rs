use crate::chart::{self, Series};
use crate::commands::{ChartsDir, Out};
use crate::console::Console;
use crate::sales::{SalesData, SalesReport};
use crate::{Config, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::warn;

/// Loads the sales file named in `config`, creating it with sample rows if it does not exist,
/// then prints the dashboard and writes its charts.
///
/// # Errors
/// - Returns an error if the sales file cannot be read or a row does not parse.
/// - Returns an error if the sample file or a chart cannot be written.
pub fn sales<C: Console>(
    config: &Config,
    console: &mut C,
    charts: &ChartsDir,
) -> Result<Out<SalesReport>> {
    let data = SalesData::load_or_seed(config.sales_path())?;
    if data.seeded() {
        console.say("CSV file not found. Creating sample sales.csv...")?;
        console.say("Sample CSV created successfully.")?;
    }

    let report = data.report();
    console.say(report.to_string().trim_end())?;

    if report.is_empty() {
        warn!("No sales data in {}, no charts drawn", data.path().display());
        return Ok(Out::new("No sales data", report));
    }

    let written = write_charts(&report, charts)?;
    let mut message = format!(
        "Sales dashboard for {} rows from {}",
        data.sales().len(),
        data.path().display()
    );
    if written > 0 {
        if let Some(dir) = charts.path() {
            message.push_str(&format!(", {written} charts written to {}", dir.display()));
        }
    }
    Ok(Out::new(message, report))
}

fn write_charts(report: &SalesReport, charts: &ChartsDir) -> Result<usize> {
    let dates = keys(&report.by_date);
    let over_time = chart::line_chart(
        "Sales Over Time",
        &dates,
        &[
            Series::new("Daily Sales", values(&report.by_date)),
            Series::new(
                "Cumulative Sales",
                report.cumulative.iter().map(|(_, v)| to_f64(*v)),
            ),
        ],
    );

    let by_region = chart::bar_chart(
        "Total Sales by Region",
        &keys(&report.by_region),
        &[Series::new("Sales", values(&report.by_region))],
    );

    let products = keys(&report.by_product);
    let by_product = chart::bar_chart(
        "Total Sales by Product",
        &products,
        &[Series::new("Sales", values(&report.by_product))],
    );
    let share = chart::pie_chart(
        "Product Sales Share",
        &products,
        &values(&report.by_product).collect::<Vec<_>>(),
    );

    let mut written = 0;
    for (name, document) in [
        ("sales_over_time", &over_time),
        ("sales_by_region", &by_region),
        ("sales_by_product", &by_product),
        ("product_share", &share),
    ] {
        if charts.write(name, document)?.is_some() {
            written += 1;
        }
    }
    Ok(written)
}

fn keys(map: &BTreeMap<String, Decimal>) -> Vec<String> {
    map.keys().cloned().collect()
}

fn values(map: &BTreeMap<String, Decimal>) -> impl Iterator<Item = f64> + '_ {
    map.values().map(|v| to_f64(*v))
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use crate::test::TestEnv;
    use std::str::FromStr;

    #[test]
    fn test_first_run_seeds_sample_data() {
        let env = TestEnv::new();
        let mut console = ScriptedConsole::default();
        let out = sales(env.config(), &mut console, &env.charts()).unwrap();

        let output = console.output();
        assert!(output.starts_with("CSV file not found. Creating sample sales.csv..."));
        assert!(output.contains("Sample CSV created successfully."));
        assert!(output.contains("Total Sales: $3,450.00"));
        assert!(env.config().sales_path().is_file());

        let report = out.structure().unwrap();
        assert_eq!(report.total, Decimal::from(3450));
        assert_eq!(report.by_product["Product A"], Decimal::from(1600));
        assert_eq!(report.by_region["South"], Decimal::from(1350));
        assert_eq!(report.top_product.as_deref(), Some("Product A"));
        assert!(out.message().contains("4 charts written"));

        for name in [
            "sales_over_time",
            "sales_by_region",
            "sales_by_product",
            "product_share",
        ] {
            let path = env.config().charts_dir().join(format!("{name}.svg"));
            assert!(path.is_file(), "missing {}", path.display());
        }
    }

    #[test]
    fn test_second_run_reads_existing_file() {
        let env = TestEnv::new();
        sales(env.config(), &mut ScriptedConsole::default(), &ChartsDir::disabled()).unwrap();

        let mut console = ScriptedConsole::default();
        let out = sales(env.config(), &mut console, &ChartsDir::disabled()).unwrap();
        assert!(!console.output().contains("CSV file not found"));
        assert_eq!(out.structure().unwrap().total, Decimal::from(3450));
        assert!(!out.message().contains("charts written"));
    }

    #[test]
    fn test_user_data() {
        let env = TestEnv::new();
        env.write_sales(
            "Date,Region,Product,Sales\n\
             2025-10-02,North,Widget,10.50\n\
             2025-10-01,North,Gadget,4\n\
             2025-10-02,South,Widget,1.25\n",
        );
        let mut console = ScriptedConsole::default();
        let out = sales(env.config(), &mut console, &ChartsDir::disabled()).unwrap();
        let report = out.structure().unwrap();
        assert_eq!(report.total, Decimal::from_str("15.75").unwrap());
        assert_eq!(
            report.cumulative,
            vec![
                ("2025-10-01".to_string(), Decimal::from(4)),
                ("2025-10-02".to_string(), Decimal::from_str("15.75").unwrap()),
            ]
        );
        assert_eq!(report.top_region.as_deref(), Some("North"));
    }

    #[test]
    fn test_header_only_file() {
        let env = TestEnv::new();
        env.write_sales("Date,Region,Product,Sales\n");
        let mut console = ScriptedConsole::default();
        let out = sales(env.config(), &mut console, &env.charts()).unwrap();
        assert_eq!(out.message(), "No sales data");
        assert!(console.output().contains("No sales data."));
        assert!(!env.config().charts_dir().join("product_share.svg").exists());
    }

    #[test]
    fn test_bad_sales_value_fails() {
        let env = TestEnv::new();
        env.write_sales("Date,Region,Product,Sales\n2025-10-01,North,Widget,lots\n");
        let err = sales(
            env.config(),
            &mut ScriptedConsole::default(),
            &ChartsDir::disabled(),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("Bad row 2"));
    }

    #[test]
    fn test_huge_sales_value_fails() {
        let env = TestEnv::new();
        env.write_sales(
            "Date,Region,Product,Sales\n\
             2025-10-01,North,Widget,50000000000000000000000000000\n\
             2025-10-02,North,Widget,50000000000000000000000000000\n",
        );
        let err = sales(
            env.config(),
            &mut ScriptedConsole::default(),
            &ChartsDir::disabled(),
        )
        .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("Bad row 2"));
        assert!(message.contains("too large"));
    }
}
