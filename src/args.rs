//! These structs provide the CLI interface for the pennywise CLI.

use crate::model::{Amount, Category};
use crate::validate::parse_amount;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// pennywise: Small personal finance tools for the command line.
///
/// Compare a monthly budget with what you actually spent, keep a running ledger of expenses in a
/// CSV file, and summarize a sales CSV into a dashboard. Reports are printed to the terminal and
/// charts are written as SVG files to the charts directory.
///
/// Run `pennywise init` once to create the data directory before using the other commands.
#[derive(Debug, Parser, Clone)]
#[command(name = "pennywise", version)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and its config.json.
    ///
    /// The data directory defaults to $HOME/pennywise. Pass --home or set PENNYWISE_HOME to put
    /// it somewhere else.
    Init,
    /// Enter a budget for each category and a list of transactions, then see how they compare.
    Budget,
    /// Record expenses in the ledger, list them, or total them by category.
    ///
    /// Without a subcommand an interactive menu is shown.
    Track(TrackArgs),
    /// Summarize the sales file by region, product and date.
    ///
    /// If the sales file does not exist, it is created with sample rows.
    Sales,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where pennywise data and configuration is held. Defaults to ~/pennywise
    #[arg(long, env = "PENNYWISE_HOME", default_value_t = default_pennywise_home())]
    home: DisplayPath,

    /// Do not write SVG charts.
    #[arg(long)]
    no_charts: bool,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }

    pub fn no_charts(&self) -> bool {
        self.no_charts
    }
}

/// (Not shown): Args for the `pennywise track` command.
#[derive(Debug, Parser, Clone)]
pub struct TrackArgs {
    #[command(subcommand)]
    action: Option<TrackSubcommand>,
}

impl TrackArgs {
    pub fn action(&self) -> Option<&TrackSubcommand> {
        self.action.as_ref()
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum TrackSubcommand {
    /// Add one expense to the ledger.
    Add(AddArgs),
    /// List every expense in the ledger.
    View,
    /// Show the total spent in each category.
    Summary,
}

/// (Not shown): Args for the `pennywise track add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// The date of the expense, YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    date: Option<String>,

    /// One of: Rent, Food, Transport, Entertainment, Other (any letter case)
    #[arg(long)]
    category: Category,

    /// What the money was spent on.
    #[arg(long, default_value = "")]
    description: String,

    /// The amount spent, e.g. 12.50 or $1,200
    #[arg(long, value_parser = parse_amount)]
    amount: Amount,
}

impl AddArgs {
    pub fn new(
        date: Option<String>,
        category: Category,
        description: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self {
            date,
            category,
            description: description.into(),
            amount,
        }
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
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

fn default_pennywise_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("pennywise"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or PENNYWISE_HOME instead of relying on the default \
                pennywise directory.",
            );
            PathBuf::from("pennywise")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
