use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Creates the data directory and an initial `config.json` with default settings.
///
/// # Arguments
/// - `home` - The directory that will be the root of data directory, e.g. `$HOME/pennywise`
///
/// # Errors
/// - Returns an error if the directory is already initialized or any file operations fail.
pub fn init(home: &Path) -> Result<Out<PathBuf>> {
    let config = Config::create(home).context("Unable to create the data directory and config")?;
    Ok(Out::new(
        format!(
            "Successfully created the pennywise directory at {}",
            config.root().display()
        ),
        config.config_path().to_path_buf(),
    ))
}
