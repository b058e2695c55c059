//! These structs provide the CLI interface for the finance CLI.

use crate::model::{GoalDraft, TransactionDraft, TransactionType};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// finance: A command-line tool for tracking income, expenses and savings goals.
///
/// Transactions and goals are kept in a data directory on this machine. Every change is written
/// immediately. The first time you look at your data you will see a handful of sample
/// transactions and goals so that the summaries have something to show.
#[derive(Debug, Parser, Clone)]
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
    /// Create the data directory and initialize the configuration file.
    ///
    /// This is the first command you should run. By default the data directory is
    /// $HOME/finance; pass --finance-home or set FINANCE_HOME to put it somewhere else.
    Init,
    /// Show the balance, income, expenses, spending per category and the latest transactions.
    Summary,
    /// List every transaction, most recent first.
    Transactions,
    /// List every savings goal with its progress.
    Goals,
    /// List the categories that can be used for each transaction type.
    Categories(CategoriesArgs),
    /// Record a new transaction or savings goal.
    Add(AddArgs),
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

    /// The directory where finance data and configuration is held. Defaults to ~/finance
    #[arg(long, env = "FINANCE_HOME", default_value_t = default_finance_home())]
    finance_home: DisplayPath,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn finance_home(&self) -> &DisplayPath {
        &self.finance_home
    }
}

/// (Not shown): Args for the `finance categories` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct CategoriesArgs {
    /// Only list the categories for this transaction type.
    #[arg(long = "type", value_enum)]
    pub r#type: Option<TransactionType>,
}

/// (Not shown): Args for the `finance add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    #[command(subcommand)]
    entity: AddSubcommand,
}

impl AddArgs {
    pub fn entity(&self) -> &AddSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum AddSubcommand {
    /// Record an income or expense.
    Transaction(AddTransactionArgs),
    /// Create a savings goal.
    Goal(AddGoalArgs),
}

/// (Not shown): Args for the `finance add transaction` command.
#[derive(Debug, Parser, Clone)]
pub struct AddTransactionArgs {
    /// Whether this is income or an expense.
    #[arg(long = "type", value_enum, default_value_t = TransactionType::Expense)]
    pub r#type: TransactionType,

    /// One of the categories listed by `finance categories` for the chosen type.
    #[arg(long)]
    pub category: String,

    /// The amount, e.g. 150 or 1,200.50. Must be greater than zero.
    #[arg(long)]
    pub amount: String,

    /// Free text describing the transaction.
    #[arg(long)]
    pub description: Option<String>,

    /// The date of the transaction as YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

impl AddTransactionArgs {
    /// Builds a draft, filling in today's date when none was given.
    pub fn into_draft(self, today: NaiveDate) -> TransactionDraft {
        TransactionDraft {
            r#type: self.r#type,
            category: self.category,
            amount: self.amount,
            description: self.description.unwrap_or_default(),
            date: self.date.unwrap_or(today),
        }
    }
}

/// (Not shown): Args for the `finance add goal` command.
#[derive(Debug, Parser, Clone)]
pub struct AddGoalArgs {
    /// What you are saving for.
    #[arg(long)]
    pub title: String,

    /// The amount you want to reach. Must be greater than zero.
    #[arg(long)]
    pub target: String,

    /// The amount already saved. Defaults to zero.
    #[arg(long)]
    pub current: Option<String>,

    /// When you want to reach the goal, as YYYY-MM-DD.
    #[arg(long)]
    pub deadline: Option<NaiveDate>,

    /// Free text describing the goal.
    #[arg(long)]
    pub description: Option<String>,
}

impl AddGoalArgs {
    pub fn into_draft(self) -> GoalDraft {
        GoalDraft {
            title: self.title,
            target_amount: self.target,
            current_amount: self.current.unwrap_or_default(),
            deadline: self.deadline,
            description: self.description.unwrap_or_default(),
        }
    }
}

fn default_finance_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("finance"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --finance-home or FINANCE_HOME instead of relying on the \
                default finance home directory. If you continue using the program right now, you \
                may have problems!",
            );
            PathBuf::from("finance")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

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
