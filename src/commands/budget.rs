//! The interactive budget vs actual analyzer.
//!
//! The user enters a planned amount for every category, then any number of transactions. The
//! transactions are summed per category and compared with the plan.

use crate::aggregate::{aggregate, fill};
use crate::chart::{self, Series};
use crate::commands::{ChartsDir, Out};
use crate::console::Console;
use crate::model::{Amount, Category, Expense};
use crate::validate::{is_done, parse_amount, parse_category};
use crate::variance::VarianceReport;
use crate::Result;
use anyhow::bail;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Runs a budget session on `console` and writes the charts to `charts`.
pub fn budget<C: Console>(console: &mut C, charts: &ChartsDir) -> Result<Out<VarianceReport>> {
    let report = run_budget_session(console)?;

    let labels: Vec<String> = Category::ALL.iter().map(|c| c.to_string()).collect();
    let row = |c: &Category| report.get(*c).copied().unwrap_or_default();
    let budget: Vec<f64> = Category::ALL.iter().map(|c| to_f64(row(c).budget)).collect();
    let actual: Vec<f64> = Category::ALL.iter().map(|c| to_f64(row(c).actual)).collect();

    let bar = chart::bar_chart(
        "Budget vs Actual Spending by Category",
        &labels,
        &[
            Series::new("Budget", budget),
            Series::new("Actual", actual.clone()),
        ],
    );
    let pie = chart::pie_chart("Actual Spending by Category", &labels, &actual);
    let mut written = Vec::new();
    written.extend(charts.write("budget_vs_actual", &bar)?);
    written.extend(charts.write("actual_by_category", &pie)?);

    let over = report.overspent().count();
    let mut message = format!("Budget report complete, {over} categories over budget");
    if !written.is_empty() {
        message.push_str(&format!(", charts written to {}", display_dir(charts)));
    }
    Ok(Out::new(message, report))
}

/// Prompts for the budget and the transactions, prints the report and returns it.
///
/// Input that does not validate is never fatal: a bad budget amount is asked for again, and a
/// transaction with a bad category or amount is discarded. The end of input while entering
/// transactions behaves like `done`.
///
/// # Errors
/// - Returns an error if the input ends before every category has a budget.
pub fn run_budget_session<C: Console>(console: &mut C) -> Result<VarianceReport> {
    let planned = prompt_budget(console)?;
    let transactions = prompt_transactions(console)?;
    info!("Entered {} transactions", transactions.len());

    let actual = aggregate(&transactions);
    let report = VarianceReport::new(&fill(planned, Category::ALL), &actual);

    console.say("")?;
    if transactions.is_empty() {
        console.say("No transactions were entered.")?;
    }
    console.say(report.to_string().trim_end())?;
    Ok(report)
}

fn prompt_budget<C: Console>(console: &mut C) -> Result<BTreeMap<Category, Decimal>> {
    let mut planned = BTreeMap::new();
    console.say("Enter your planned budget for each category:")?;
    for category in Category::ALL {
        loop {
            let Some(line) = console.prompt(&format!("{category}: $"))? else {
                bail!("Input ended before a budget was entered for {category}");
            };
            match parse_amount(&line) {
                Ok(amount) => {
                    planned.insert(category, amount.value());
                    break;
                }
                Err(e) => {
                    debug!("Rejected budget for {category}: {e}");
                    console.say("Please enter a valid positive number.")?;
                }
            }
        }
    }
    Ok(planned)
}

fn prompt_transactions<C: Console>(console: &mut C) -> Result<Vec<Expense>> {
    let mut transactions = Vec::new();
    console.say("")?;
    console.say("Enter your expense transactions. Type 'done' when finished.")?;
    let category_prompt = format!("Category ({}): ", Category::choices());
    loop {
        let Some(date) = console.prompt("Date (YYYY-MM-DD) or 'done' to finish: ")? else {
            break;
        };
        if is_done(&date) {
            break;
        }

        let Some(category) = console.prompt(&category_prompt)? else {
            break;
        };
        let category = match parse_category(&category) {
            Ok(category) => category,
            Err(e) => {
                debug!("Discarding transaction: {e}");
                console.say("Invalid category, try again.")?;
                continue;
            }
        };

        let Some(amount) = console.prompt("Amount ($): ")? else {
            break;
        };
        match parse_amount(&amount) {
            Ok(amount) => transactions.push(Expense::new(date.trim(), category, "", amount)),
            Err(e) => {
                debug!("Discarding transaction: {e}");
                console.say("Please enter a valid positive number.")?;
            }
        }
    }
    Ok(transactions)
}

fn to_f64(value: Decimal) -> f64 {
    Amount::new(value).to_f64()
}

fn display_dir(charts: &ChartsDir) -> String {
    charts
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}
