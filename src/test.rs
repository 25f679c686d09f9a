//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::commands::ChartsDir;
use crate::Config;
use tempfile::TempDir;

/// Test environment with an initialized pennywise home in a temporary directory.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::create(temp_dir.path().join("pennywise")).unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Charts enabled, written to the configured charts directory.
    pub fn charts(&self) -> ChartsDir {
        ChartsDir::new(self.config.charts_dir())
    }

    /// Writes the expenses file. `rows` may omit the header.
    pub fn write_expenses(&self, rows: &str) {
        let contents = if rows.starts_with("Date,") {
            rows.to_string()
        } else {
            format!("Date,Category,Description,Amount\n{rows}")
        };
        std::fs::write(self.config.expenses_path(), contents).unwrap();
    }

    /// Writes the sales file verbatim.
    pub fn write_sales(&self, contents: &str) {
        std::fs::write(self.config.sales_path(), contents).unwrap();
    }
}
