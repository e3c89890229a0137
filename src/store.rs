// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The transaction ledger.
//!
//! Transactions are kept newest-first and mirrored, as one JSON array, under
//! the `transactions` key of the backing [`KeyValueStore`]. Storage that is
//! missing, unreadable or malformed loads as an empty ledger; failed writes
//! are logged and the in-memory ledger stays authoritative.

use tracing::{debug, warn};

use crate::models::Transaction;
use crate::storage::KeyValueStore;

pub const STORAGE_KEY: &str = "transactions";

type Observer = Box<dyn Fn(&[Transaction])>;

pub struct TransactionStore<S: KeyValueStore> {
    storage: S,
    ledger: Vec<Transaction>,
    revision: u64,
    observers: Vec<Observer>,
}

impl<S: KeyValueStore> TransactionStore<S> {
    pub fn open(storage: S) -> Self {
        let ledger = load(&storage);
        debug!(count = ledger.len(), "ledger loaded");
        Self {
            storage,
            ledger,
            revision: 0,
            observers: Vec::new(),
        }
    }

    pub fn list(&self) -> &[Transaction] {
        &self.ledger
    }

    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    /// Newest entry carrying `id`.
    pub fn find(&self, id: &str) -> Option<&Transaction> {
        self.ledger.iter().find(|t| t.id == id)
    }

    /// Bumped once per successful save, delete or clear.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: Fn(&[Transaction]) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn save(&mut self, transaction: Transaction) {
        debug!(id = %transaction.id, "saving transaction");
        self.ledger.insert(0, transaction);
        self.commit();
    }

    /// Removes every entry whose id matches. Unknown ids leave the ledger,
    /// the revision and the backing store untouched.
    pub fn delete(&mut self, transaction_id: &str) {
        let before = self.ledger.len();
        self.ledger.retain(|t| t.id != transaction_id);
        let removed = before - self.ledger.len();
        if removed == 0 {
            debug!(id = transaction_id, "delete: no matching transaction");
            return;
        }
        debug!(id = transaction_id, removed, "transactions deleted");
        self.commit();
    }

    pub fn clear(&mut self) {
        self.ledger.clear();
        self.commit();
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn commit(&mut self) {
        self.persist();
        self.revision += 1;
        for observer in &self.observers {
            observer(&self.ledger);
        }
    }

    fn persist(&mut self) {
        let body = match serde_json::to_string(&self.ledger) {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "could not serialize ledger; backing store left as is");
                return;
            }
        };
        if let Err(e) = self.storage.set(STORAGE_KEY, &body) {
            warn!(error = %e, "could not persist ledger");
        }
    }
}

fn load<S: KeyValueStore>(storage: &S) -> Vec<Transaction> {
    let raw = match storage.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, "ledger storage unavailable; starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_str::<Vec<Transaction>>(&raw) {
        Ok(ledger) => ledger,
        Err(e) => {
            warn!(error = %e, "stored ledger is malformed; starting empty");
            Vec::new()
        }
    }
}
