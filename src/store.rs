//! The in-memory authoritative transaction collection for the session.

use crate::api::TransactionApi;
use crate::model::{Transaction, TransactionData};
use crate::Result;
use tracing::debug;

/// The single source of truth that the `report` views read from.
///
/// The store belongs to an authenticated session: commands construct it with
/// an API client carrying the session token, fill it with [`refresh`], and
/// drop it when they finish. Every mutation is one request/response round
/// trip against the remote API, and the in-memory list changes only with the
/// server-confirmed result. A failed call leaves the last-known-good
/// snapshot untouched, and nothing is retried automatically.
///
/// [`refresh`]: TransactionStore::refresh
pub struct TransactionStore {
    api: Box<dyn TransactionApi>,
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    /// Creates an empty store backed by `api`.
    pub fn new(api: Box<dyn TransactionApi>) -> Self {
        Self {
            api,
            transactions: Vec::new(),
        }
    }

    /// The current snapshot. Derived views take this as input and recompute
    /// whenever they need a fresh result.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Replaces the snapshot with the server's current transaction list.
    pub async fn refresh(&mut self) -> Result<()> {
        self.transactions = self.api.list_transactions().await?;
        debug!("refreshed {} transactions", self.transactions.len());
        Ok(())
    }

    /// Creates a transaction remotely and inserts the confirmed result at
    /// the front of the snapshot, newest first.
    pub async fn add(&mut self, data: TransactionData) -> Result<Transaction> {
        let created = self.api.create_transaction(&data).await?;
        self.transactions.insert(0, created.clone());
        Ok(created)
    }

    /// Updates a transaction remotely and replaces the matching snapshot
    /// entry with the confirmed result.
    pub async fn update(&mut self, id: &str, data: TransactionData) -> Result<Transaction> {
        let updated = self.api.update_transaction(id, &data).await?;
        if let Some(slot) = self.transactions.iter_mut().find(|t| t.id() == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// Deletes a transaction remotely, then removes it from the snapshot.
    pub async fn delete(&mut self, id: &str) -> Result<()> {
        self.api.delete_transaction(id).await?;
        self.transactions.retain(|t| t.id() != id);
        Ok(())
    }

    /// Fetches a single transaction by id. Does not touch the snapshot.
    pub async fn get(&self, id: &str) -> Result<Transaction> {
        self.api.get_transaction(id).await
    }
}
