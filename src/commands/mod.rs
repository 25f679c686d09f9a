//! Command handlers for the pennywise CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod budget;
mod init;
mod sales;
mod track;

use crate::{chart, Result};
use serde::Serialize;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use svg::Document;
use tracing::{debug, info};

pub use budget::{budget, run_budget_session};
pub use init::init;
pub use sales::sales;
pub use track::{
    add_expense, run_tracker_session, summarize_expenses, track, view_expenses, MenuChoice,
};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data that callers and tests can inspect.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Where charts go, or `None` when chart rendering is turned off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartsDir(Option<PathBuf>);

impl ChartsDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self(Some(dir.into()))
    }

    pub fn disabled() -> Self {
        Self(None)
    }

    pub fn path(&self) -> Option<&Path> {
        self.0.as_deref()
    }

    /// Saves `document` as `{name}.svg` and returns the path, or does nothing when disabled.
    pub(crate) fn write(&self, name: &str, document: &Document) -> Result<Option<PathBuf>> {
        let Some(dir) = self.path() else {
            return Ok(None);
        };
        let path = dir.join(format!("{name}.svg"));
        chart::save(&path, document)?;
        debug!("Wrote chart {}", path.display());
        Ok(Some(path))
    }
}
