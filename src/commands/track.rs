//! The expense tracker: an interactive menu plus one-shot `add`, `view` and `summary` commands,
//! all working on the ledger file named in the config.

use crate::args::AddArgs;
use crate::commands::Out;
use crate::console::Console;
use crate::error::Rejection;
use crate::ledger::{format_summary, Ledger};
use crate::model::{Category, Expense};
use crate::validate::{parse_amount, parse_category};
use crate::{Config, Result};
use anyhow::Context;
use chrono::Local;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use tracing::debug;

const NO_EXPENSES: &str = "No expenses recorded yet.";

/// The entries of the tracker's menu.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MenuChoice {
    Add,
    View,
    Summary,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 4] = [
        MenuChoice::Add,
        MenuChoice::View,
        MenuChoice::Summary,
        MenuChoice::Exit,
    ];

    fn number(&self) -> usize {
        match self {
            MenuChoice::Add => 1,
            MenuChoice::View => 2,
            MenuChoice::Summary => 3,
            MenuChoice::Exit => 4,
        }
    }
}

impl Display for MenuChoice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MenuChoice::Add => "Add Expense",
            MenuChoice::View => "View All Expenses",
            MenuChoice::Summary => "Summary by Category",
            MenuChoice::Exit => "Exit",
        };
        write!(f, "{}. {label}", self.number())
    }
}

/// Accepts the menu number, or the command word (`add`, `view`, `summary`, `exit`).
impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "add" => Ok(MenuChoice::Add),
            "2" | "view" => Ok(MenuChoice::View),
            "3" | "summary" => Ok(MenuChoice::Summary),
            "4" | "exit" | "quit" => Ok(MenuChoice::Exit),
            other => Err(format!("Invalid menu choice '{other}'")),
        }
    }
}

/// Runs the interactive tracker on the configured ledger.
pub fn track<C: Console>(config: &Config, console: &mut C) -> Result<Out<usize>> {
    let mut ledger = Ledger::load(config.expenses_path())?;
    let added = run_tracker_session(&mut ledger, console)?;
    Ok(Out::new(
        format!(
            "Added {added} expenses, {} in {}",
            ledger.len(),
            ledger.path().display()
        ),
        added,
    ))
}

/// Shows the menu and dispatches choices until the user exits or the input ends. Returns the
/// number of expenses added.
pub fn run_tracker_session<C: Console>(ledger: &mut Ledger, console: &mut C) -> Result<usize> {
    let mut added = 0;
    loop {
        console.say("Expense Tracker Menu:")?;
        for choice in MenuChoice::ALL {
            console.say(&choice.to_string())?;
        }
        let Some(line) = console.prompt("Choose an option (1-4): ")? else {
            break;
        };
        match MenuChoice::from_str(&line) {
            Ok(MenuChoice::Add) => {
                if prompt_expense(ledger, console)? {
                    added += 1;
                }
            }
            Ok(MenuChoice::View) => show_expenses(ledger, console)?,
            Ok(MenuChoice::Summary) => show_summary(ledger, console)?,
            Ok(MenuChoice::Exit) => {
                console.say("Goodbye!")?;
                break;
            }
            Err(e) => {
                debug!("{e}");
                console.say("Invalid choice. Please try again.\n")?;
            }
        }
    }
    Ok(added)
}

/// Adds one expense from the command line arguments.
pub fn add_expense(config: &Config, args: AddArgs) -> Result<Out<Expense>> {
    let mut ledger = Ledger::load(config.expenses_path())?;
    let expense = Expense::new(
        args.date().map(str::to_string).unwrap_or_else(today),
        args.category(),
        args.description(),
        args.amount(),
    );
    ledger.add(expense.clone())?;
    Ok(Out::new(
        format!("Expense added and saved to {}", ledger.path().display()),
        expense,
    ))
}

/// Prints every expense in the ledger.
pub fn view_expenses<C: Console>(config: &Config, console: &mut C) -> Result<Out<Vec<Expense>>> {
    let ledger = Ledger::load(config.expenses_path())?;
    show_expenses(&ledger, console)?;
    Ok(Out::new(
        format!("{} expenses", ledger.len()),
        ledger.expenses().to_vec(),
    ))
}

/// Prints the total per category.
pub fn summarize_expenses<C: Console>(
    config: &Config,
    console: &mut C,
) -> Result<Out<BTreeMap<Category, Decimal>>> {
    let ledger = Ledger::load(config.expenses_path())?;
    show_summary(&ledger, console)?;
    let summary = ledger.summary();
    Ok(Out::new(
        format!("{} categories with expenses", summary.len()),
        summary,
    ))
}

/// Prompts for an expense and appends it to the ledger. Returns false if the expense was
/// discarded.
fn prompt_expense<C: Console>(ledger: &mut Ledger, console: &mut C) -> Result<bool> {
    let Some(date) = console.prompt("Enter date (YYYY-MM-DD), blank for today: ")? else {
        return Ok(false);
    };
    let date = match date.trim() {
        "" => today(),
        d => d.to_string(),
    };

    let category_prompt = format!("Enter category ({}): ", Category::choices());
    let category = loop {
        let Some(line) = console.prompt(&category_prompt)? else {
            return Ok(false);
        };
        match parse_category(&line) {
            Ok(category) => break category,
            Err(e) => console.say(&format!("{e}"))?,
        }
    };

    let Some(description) = console.prompt("Enter description: ")? else {
        return Ok(false);
    };

    let Some(amount) = console.prompt("Enter amount: ")? else {
        return Ok(false);
    };
    let amount = match parse_amount(&amount) {
        Ok(amount) => amount,
        Err(e) => {
            debug!("Discarding expense: {e}");
            let hint = match e {
                Rejection::Negative(_) => "Invalid amount! Please enter a positive number.",
                _ => "Invalid amount! Please enter a number.",
            };
            console.say(hint)?;
            return Ok(false);
        }
    };

    ledger
        .add(Expense::new(date, category, description.trim(), amount))
        .context("The expense was not added")?;
    console.say("Expense added and saved successfully!\n")?;
    Ok(true)
}

fn show_expenses<C: Console>(ledger: &Ledger, console: &mut C) -> Result<()> {
    if ledger.is_empty() {
        return console.say(&format!("{NO_EXPENSES}\n"));
    }
    console.say("\nAll Expenses:")?;
    console.say(&ledger.to_string())
}

fn show_summary<C: Console>(ledger: &Ledger, console: &mut C) -> Result<()> {
    if ledger.is_empty() {
        return console.say(&format!("{NO_EXPENSES}\n"));
    }
    console.say("\nExpense Summary by Category:")?;
    console.say(&format!("{}\n", format_summary(&ledger.summary())))
}

/// Today's date in YYYY-MM-DD format.
fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
