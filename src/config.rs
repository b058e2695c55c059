//! Configuration file handling.
//!
//! The configuration file is stored at `$FINANCE_HOME/config.json` and holds display settings and
//! the location of the directory where the transaction and goal collections are kept.

use crate::kv::FileStore;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "finance";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DATA_DIR: &str = "data";
const DEFAULT_CURRENCY: &str = "Kz";
const DEFAULT_RECENT_COUNT: usize = 5;

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$FINANCE_HOME` and from there it loads `$FINANCE_HOME/config.json`. It provides
/// the paths of items that are either configurable or are expected in a certain location within
/// the home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    data_dir: PathBuf,
}

impl Config {
    /// Creates the home directory, its data directory and an initial `config.json` with default
    /// settings.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of the home directory, e.g. `$HOME/finance`
    ///
    /// # Errors
    /// - Returns an error if a `config.json` already exists in `dir`.
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the finance home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A config file already exists at '{}'",
                config_path.display()
            )
        }

        let config_file = ConfigFile::default();
        config_file.save(&config_path).await?;

        let data_dir = resolve(&root, config_file.data_dir());
        utils::make_dir(&data_dir).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
            data_dir,
        })
    }

    /// This will
    /// - validate that the home directory and the config file exist
    /// - load the config file
    /// - validate that the data directory exists
    /// - return the loaded configuration object
    pub async fn load(finance_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = finance_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The finance home directory is missing, run 'finance init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let data_dir = resolve(&root, config_file.data_dir());
        if !data_dir.is_dir() {
            bail!("The data directory is missing '{}'", data_dir.display())
        }

        Ok(Self {
            root,
            config_path,
            config_file,
            data_dir,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The prefix shown in front of amounts, e.g. `Kz`.
    pub fn currency(&self) -> &str {
        &self.config_file.currency
    }

    /// How many transactions the summary lists.
    pub fn recent_count(&self) -> usize {
        self.config_file.recent_count
    }

    /// The key-value store that holds the collections.
    pub fn store(&self) -> FileStore {
        FileStore::new(&self.data_dir)
    }
}

/// Returns `p` unchanged if it is absolute, otherwise resolves it against `root`.
fn resolve(root: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() {
        return p;
    }
    root.join(p)
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "finance",
///   "config_version": 1,
///   "currency": "Kz",
///   "recent_count": 5,
///   "data_dir": "data"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "finance"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Prefix shown in front of amounts
    #[serde(default = "default_currency")]
    currency: String,

    /// Number of transactions shown by the summary
    #[serde(default = "default_recent_count")]
    recent_count: usize,

    /// Directory holding the stored collections (optional, relative to the home directory or
    /// absolute). Defaults to $FINANCE_HOME/data if not specified
    #[serde(skip_serializing_if = "Option::is_none")]
    data_dir: Option<PathBuf>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_recent_count() -> usize {
    DEFAULT_RECENT_COUNT
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            currency: default_currency(),
            recent_count: DEFAULT_RECENT_COUNT,
            data_dir: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path).await?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.config_version == CONFIG_VERSION,
            "Unsupported config_version {} in config file. Is a newer version of finance available?",
            config.config_version
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    /// Gets the data directory path.
    ///
    /// If the path is relative, it should be interpreted as relative to the home directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATA_DIR))
    }
}
