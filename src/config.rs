//! Configuration file handling for pennywise.
//!
//! The configuration file is stored at `$PENNYWISE_HOME/config.json` and says where the expenses
//! file, the sales file and the rendered charts live.

use crate::{fs, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "pennywise";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const EXPENSES_CSV: &str = "expenses.csv";
const SALES_CSV: &str = "sales.csv";
const CHARTS: &str = "charts";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$PENNYWISE_HOME` and from there it loads `$PENNYWISE_HOME/config.json`. It
/// provides the paths of the data files, which are either configured or found in their default
/// location within the home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory and an initial `config.json` with default settings.
    ///
    /// # Errors
    /// - Returns an error if a `config.json` already exists in `dir`.
    /// - Returns an error if any file operations fail.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        fs::create_dir_all(&maybe_relative).context("Unable to create the pennywise home")?;
        let root = canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A config file already exists at '{}'",
                config_path.display()
            )
        }

        let config_file = ConfigFile::default();
        config_file.save(&config_path)?;

        let config = Self {
            root,
            config_path,
            config_file,
        };
        fs::create_dir_all(config.charts_dir())?;
        Ok(config)
    }

    /// This will
    /// - validate that the home directory exists and that the config file exists
    /// - load and validate the config file
    /// - return the loaded configuration object
    pub fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        if !maybe_relative.is_dir() {
            bail!(
                "The pennywise home '{}' is missing, run `pennywise init` first",
                maybe_relative.display()
            )
        }
        let root = canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', run `pennywise init` first",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path)?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The expense tracker's ledger file.
    pub fn expenses_path(&self) -> PathBuf {
        self.resolve(self.config_file.expenses_file())
    }

    /// The sales dashboard's data file.
    pub fn sales_path(&self) -> PathBuf {
        self.resolve(self.config_file.sales_file())
    }

    /// The directory that charts are written to.
    pub fn charts_dir(&self) -> PathBuf {
        self.resolve(self.config_file.charts_dir())
    }

    /// Checks if `p` is relative, and if so, resolves it against the home directory.
    fn resolve(&self, p: PathBuf) -> PathBuf {
        if p.is_absolute() {
            return p;
        }
        self.root.join(p)
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "pennywise",
///   "config_version": 1,
///   "expenses_file": "expenses.csv",
///   "sales_file": "/srv/reports/sales.csv",
///   "charts_dir": "charts"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "pennywise"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Path to the expenses CSV (optional, relative to the home directory or absolute)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expenses_file: Option<PathBuf>,

    /// Path to the sales CSV (optional, relative to the home directory or absolute)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sales_file: Option<PathBuf>,

    /// Directory for rendered charts (optional, relative to the home directory or absolute)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    charts_dir: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            expenses_file: None,
            sales_file: None,
            charts_dir: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or names another application
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        fs::write(p, data).context("Unable to write config file")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.expenses_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(EXPENSES_CSV))
    }

    pub fn sales_file(&self) -> PathBuf {
        self.sales_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(SALES_CSV))
    }

    pub fn charts_dir(&self) -> PathBuf {
        self.charts_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(CHARTS))
    }
}

fn canonicalize(path: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(path).context(format!("Unable to resolve path {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("pennywise_home");

        let config = Config::create(&home).unwrap();

        assert!(config.config_path().is_file());
        assert!(config.charts_dir().is_dir());
        assert_eq!(config.expenses_path(), config.root().join("expenses.csv"));
        assert_eq!(config.sales_path(), config.root().join("sales.csv"));

        let loaded = Config::load(&home).unwrap();
        assert_eq!(loaded.root(), config.root());
    }

    #[test]
    fn test_config_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path()).unwrap();
        let err = Config::create(dir.path()).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("pennywise init"));
    }

    #[test]
    fn test_config_load_missing_config_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("config file is missing"));
    }

    #[test]
    fn test_config_file_default() {
        let config = ConfigFile::default();
        assert_eq!(config.app_name, "pennywise");
        assert_eq!(config.expenses_file(), PathBuf::from(EXPENSES_CSV));
        assert_eq!(config.sales_file(), PathBuf::from(SALES_CSV));
        assert_eq!(config.charts_dir(), PathBuf::from(CHARTS));
    }

    #[test]
    fn test_config_file_serialization_omits_none_fields() {
        let json = serde_json::to_string(&ConfigFile::default()).unwrap();
        assert!(!json.contains("expenses_file"));
        assert!(!json.contains("charts_dir"));
    }

    #[test]
    fn test_config_file_paths_resolve() {
        let dir = TempDir::new().unwrap();
        let elsewhere = dir.path().join("elsewhere.csv");
        let json = format!(
            r#"{{
                "app_name": "pennywise",
                "config_version": 1,
                "expenses_file": "data/mine.csv",
                "sales_file": {}
            }}"#,
            serde_json::to_string(&elsewhere).unwrap()
        );
        fs::write(dir.path().join(CONFIG_JSON), json).unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(
            config.expenses_path(),
            config.root().join("data").join("mine.csv")
        );
        assert_eq!(config.sales_path(), elsewhere);
        assert_eq!(config.charts_dir(), config.root().join(CHARTS));
    }

    #[test]
    fn test_config_file_load_invalid_app_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        fs::write(&path, r#"{ "app_name": "wrong_app", "config_version": 1 }"#).unwrap();
        let err = ConfigFile::load(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid app_name"));
    }

    #[test]
    fn test_config_file_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        let original = ConfigFile {
            charts_dir: Some(PathBuf::from("out")),
            ..ConfigFile::default()
        };
        original.save(&path).unwrap();
        assert_eq!(ConfigFile::load(&path).unwrap(), original);
    }
}
