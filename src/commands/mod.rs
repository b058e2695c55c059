//! Command handlers for the finance CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod add;
mod init;
mod list;
mod summary;

use crate::kv::FileStore;
use crate::model::{Amount, Transaction};
use crate::{App, Config};
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use add::{add_goal, add_transaction};
pub use init::init;
pub use list::{categories, goals, transactions, CategoryList, GoalView};
pub use summary::{summary, Summary};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
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

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
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

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
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

/// Starts the app against the data directory named by `config`.
async fn open(config: &Config) -> App<FileStore> {
    App::start(config.store()).await
}

/// Formats an amount with the configured currency prefix, e.g. `Kz 2750.00`.
fn money(config: &Config, amount: Amount) -> String {
    format!("{} {amount}", config.currency())
}

/// One line of a transaction listing, signed by type.
fn transaction_line(config: &Config, transaction: &Transaction) -> String {
    let description = if transaction.description().is_empty() {
        transaction.category()
    } else {
        transaction.description()
    };
    format!(
        "{}  {:<14} {:<24} {} {}",
        transaction.date(),
        transaction.category(),
        description,
        transaction.r#type().sign(),
        money(config, transaction.amount()),
    )
}
