//! The application controller. It owns the `Store` and the `Persistence` adapter and guarantees
//! that every successful mutation is flushed before the call returns.

use crate::kv::KeyValueStore;
use crate::model::{Goal, GoalDraft, Rejection, Transaction, TransactionDraft};
use crate::persistence::{Persistence, Source};
use crate::store::Store;
use crate::Result;
use anyhow::bail;
use tracing::{debug, warn};

/// The outcome of an insert that did not hit a storage error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insert<T> {
    /// The record was added to the front of its collection and saved.
    Added(T),
    /// The draft was refused and nothing changed.
    Rejected(Rejection),
}

impl<T> Insert<T> {
    pub fn added(&self) -> Option<&T> {
        match self {
            Insert::Added(record) => Some(record),
            Insert::Rejected(_) => None,
        }
    }
}

/// Owns the state of a running tracker and the storage it is flushed to.
#[derive(Debug)]
pub struct App<S> {
    store: Store,
    persistence: Persistence<S>,
    transactions_source: Source,
    goals_source: Source,
}

impl<S> App<S>
where
    S: KeyValueStore,
{
    /// Loads both collections from `kv`, hydrates the store and writes the result back, so that
    /// sample data is persisted on first run. A collection that could not be read is not written
    /// back. A failure during that first write is logged and does not prevent startup.
    pub async fn start(kv: S) -> Self {
        let mut persistence = Persistence::new(kv);
        let snapshot = persistence.load().await;
        let mut store = Store::new();
        store.hydrate(snapshot.transactions.records, snapshot.goals.records);
        let mut app = Self {
            store,
            persistence,
            transactions_source: snapshot.transactions.source,
            goals_source: snapshot.goals.source,
        };
        if let Err(e) = app.flush_writable().await {
            warn!("Unable to write the initial state: {e:#}");
        }
        app
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    /// Where the transactions came from at startup.
    pub fn transactions_source(&self) -> Source {
        self.transactions_source
    }

    /// Where the goals came from at startup.
    pub fn goals_source(&self) -> Source {
        self.goals_source
    }

    /// Adds a transaction and saves the transaction collection.
    ///
    /// # Errors
    /// - Returns an error if the stored transactions could not be read at startup. Nothing changes.
    /// - Returns an error if the collection cannot be saved. The transaction remains in memory.
    pub async fn add_transaction(&mut self, draft: TransactionDraft) -> Result<Insert<Transaction>> {
        if !self.transactions_source.is_writable() {
            bail!("The stored transactions could not be read, refusing to overwrite them")
        }
        let transaction = match self.store.add_transaction(draft) {
            Ok(transaction) => transaction.clone(),
            Err(rejection) => {
                debug!("Transaction rejected: {rejection}");
                return Ok(Insert::Rejected(rejection));
            }
        };
        self.persistence
            .save_transactions(self.store.transactions())
            .await?;
        Ok(Insert::Added(transaction))
    }

    /// Adds a goal and saves the goal collection.
    ///
    /// # Errors
    /// - Returns an error if the stored goals could not be read at startup. Nothing changes.
    /// - Returns an error if the collection cannot be saved. The goal remains in memory.
    pub async fn add_goal(&mut self, draft: GoalDraft) -> Result<Insert<Goal>> {
        if !self.goals_source.is_writable() {
            bail!("The stored goals could not be read, refusing to overwrite them")
        }
        let goal = match self.store.add_goal(draft) {
            Ok(goal) => goal.clone(),
            Err(rejection) => {
                debug!("Goal rejected: {rejection}");
                return Ok(Insert::Rejected(rejection));
            }
        };
        self.persistence.save_goals(self.store.goals()).await?;
        Ok(Insert::Added(goal))
    }

    /// Writes every collection whose stored value was read at startup.
    async fn flush_writable(&mut self) -> Result<()> {
        if self.transactions_source.is_writable() {
            self.persistence
                .save_transactions(self.store.transactions())
                .await?;
        }
        if self.goals_source.is_writable() {
            self.persistence.save_goals(self.store.goals()).await?;
        }
        Ok(())
    }
}
