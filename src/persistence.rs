//! Moves the transaction and goal collections between the `Store` and a `KeyValueStore`.
//!
//! Each collection lives under its own key as a JSON array. Loading never fails: a key that was
//! never written yields the built-in sample data, a key holding malformed data yields an empty
//! collection, and a key that could not be read at all yields an empty collection that must not be
//! written back. Saving always writes the whole collection.

use crate::kv::KeyValueStore;
use crate::model::{Amount, Goal, Transaction, TransactionType};
use crate::Result;
use anyhow::Context;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// The key holding the transaction collection.
pub const TRANSACTIONS: &str = "transactions";

/// The key holding the goal collection.
pub const GOALS: &str = "goals";

/// Where a loaded collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Parsed from the stored value.
    Stored,
    /// Nothing was stored, so the sample collection was used.
    Sample,
    /// The stored value could not be parsed, so the collection starts empty.
    Reset,
    /// The stored value could not be read, so the collection starts empty. Whatever is stored is
    /// left in place.
    Unreadable,
}

impl Source {
    /// Returns false when writing the collection back could destroy data that was never read.
    pub fn is_writable(&self) -> bool {
        !matches!(self, Source::Unreadable)
    }
}

serde_plain::derive_display_from_serialize!(Source);

/// A collection produced by `Persistence::load` along with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    pub source: Source,
}

/// Both collections as read at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub transactions: Loaded<Transaction>,
    pub goals: Loaded<Goal>,
}

/// Reads and writes the two collections through a `KeyValueStore`.
#[derive(Debug)]
pub struct Persistence<S> {
    kv: S,
}

impl<S> Persistence<S>
where
    S: KeyValueStore,
{
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Loads both collections. A failure with one key does not affect the other.
    pub async fn load(&mut self) -> Snapshot {
        let transactions = self.load_transactions().await;
        let goals = self.load_goals().await;
        Snapshot {
            transactions,
            goals,
        }
    }

    pub async fn load_transactions(&mut self) -> Loaded<Transaction> {
        load_collection(&mut self.kv, TRANSACTIONS, sample_transactions).await
    }

    pub async fn load_goals(&mut self) -> Loaded<Goal> {
        load_collection(&mut self.kv, GOALS, sample_goals).await
    }

    /// Overwrites the stored transaction collection with `transactions`.
    pub async fn save_transactions(&mut self, transactions: &[Transaction]) -> Result<()> {
        save_collection(&mut self.kv, TRANSACTIONS, transactions).await
    }

    /// Overwrites the stored goal collection with `goals`.
    pub async fn save_goals(&mut self, goals: &[Goal]) -> Result<()> {
        save_collection(&mut self.kv, GOALS, goals).await
    }
}

async fn load_collection<S, T>(kv: &mut S, key: &str, sample: fn() -> Vec<T>) -> Loaded<T>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let stored = match kv.get(key).await {
        Ok(stored) => stored,
        Err(e) => {
            error!("Unable to read '{key}' from storage, starting with none: {e:#}");
            return Loaded {
                records: Vec::new(),
                source: Source::Unreadable,
            };
        }
    };

    let Some(text) = stored else {
        info!("Nothing stored under '{key}', using sample data");
        return Loaded {
            records: sample(),
            source: Source::Sample,
        };
    };

    match serde_json::from_str::<Vec<T>>(&text) {
        Ok(records) => {
            debug!("Loaded {} records from '{key}'", records.len());
            Loaded {
                records,
                source: Source::Stored,
            }
        }
        Err(e) => {
            error!("Unable to parse the data stored under '{key}', starting with none: {e}");
            Loaded {
                records: Vec::new(),
                source: Source::Reset,
            }
        }
    }
}

async fn save_collection<S, T>(kv: &mut S, key: &str, records: &[T]) -> Result<()>
where
    S: KeyValueStore,
    T: Serialize,
{
    let json = serde_json::to_string(records)
        .with_context(|| format!("Unable to serialize '{key}'"))?;
    kv.set(key, &json)
        .await
        .with_context(|| format!("Unable to save '{key}'"))?;
    debug!("Saved {} records to '{key}'", records.len());
    Ok(())
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// The transactions shown on first run.
pub fn sample_transactions() -> Vec<Transaction> {
    use TransactionType::{Expense, Income};
    vec![
        Transaction::new(1, Income, "Salário", Amount::from(3500), "Salário mensal", date(2023, 10, 5)),
        Transaction::new(2, Expense, "Alimentação", Amount::from(150), "Supermercado", date(2023, 10, 7)),
        Transaction::new(3, Expense, "Transporte", Amount::from(200), "Combustível", date(2023, 10, 8)),
        Transaction::new(4, Expense, "Moradia", Amount::from(1200), "Aluguel", date(2023, 10, 1)),
        Transaction::new(5, Income, "Freelance", Amount::from(800), "Projeto freelance", date(2023, 10, 15)),
    ]
}

/// The goals shown on first run.
pub fn sample_goals() -> Vec<Goal> {
    vec![
        Goal::new(
            1,
            "Viagem à Praia",
            Amount::from(2000),
            Amount::from(1200),
            Some(date(2023, 12, 31)),
            "Meta para Dezembro/2023",
        ),
        Goal::new(
            2,
            "Notebook Novo",
            Amount::from(3000),
            Amount::from(800),
            Some(date(2024, 3, 31)),
            "Meta para Março/2024",
        ),
    ]
}
