use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the finance home directory, its data directory and an initial `config.json` file with
/// default settings.
///
/// # Arguments
/// - `finance_home` - The directory that will be the root of the home directory, e.g.
///   `$HOME/finance`
///
/// # Errors
/// - Returns an error if the directory has already been initialized.
/// - Returns an error if any file operations fail.
pub async fn init(finance_home: &Path) -> Result<Out<()>> {
    let config = Config::create(finance_home)
        .await
        .context("Unable to create the finance directory and config")?;
    Ok(format!(
        "Successfully created the finance directory at '{}'",
        config.root().display()
    )
    .into())
}
