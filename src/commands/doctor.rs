// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::cipher::CodeCipher;
use crate::db::SqliteStorage;
use crate::models::Transaction;
use crate::store::TransactionStore;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use std::collections::HashMap;

pub fn handle(conn: &Connection, cipher: &CodeCipher) -> Result<()> {
    let store = TransactionStore::open(SqliteStorage::new(conn));
    let rows = inspect(store.list(), cipher);
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

pub fn inspect(ledger: &[Transaction], cipher: &CodeCipher) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    for t in ledger {
        if t.created_at.is_unknown() {
            rows.push(vec!["unknown_created_at".into(), t.id.clone()]);
        }
        if t.id != t.cus.original {
            rows.push(vec![
                "id_cus_mismatch".into(),
                format!("{} != {}", t.id, t.cus.original),
            ]);
        }
        // Also flags ledgers written under a different secret
        if cipher.decrypt(&t.cus.encrypted) != t.cus.original {
            rows.push(vec!["cus_not_decryptable".into(), t.id.clone()]);
        }
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for t in ledger {
        *seen.entry(t.id.as_str()).or_default() += 1;
    }
    let mut dups: Vec<(&str, usize)> = seen.into_iter().filter(|(_, n)| *n > 1).collect();
    dups.sort();
    for (id, n) in dups {
        rows.push(vec!["duplicate_id".into(), format!("{} x{}", id, n)]);
    }

    rows
}
