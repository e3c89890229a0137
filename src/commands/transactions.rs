// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::assembler::TransactionAssembler;
use crate::cipher::CodeCipher;
use crate::db::SqliteStorage;
use crate::directory::UserDirectory;
use crate::models::Transaction;
use crate::storage::KeyValueStore;
use crate::store::TransactionStore;
use crate::utils::{fmt_amount, maybe_print_json, parse_amount, pretty_table, required_arg};
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, cipher: &CodeCipher, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("create", sub)) => {
            let tx = create(conn, cipher, sub)?;
            println!(
                "Recorded {} for {} ({})",
                fmt_amount(&tx.amount),
                tx.user.name,
                tx.user.id
            );
            println!("CUS:           {}", tx.cus.original);
            println!("CUS encrypted: {}", tx.cus.encrypted);
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("delete", sub)) => {
            let id = required_arg(sub, "id")?;
            let removed = delete(conn, id);
            if removed == 0 {
                println!("No transaction with id '{}'", id);
            } else {
                println!("Deleted {} transaction(s) with id '{}'", removed, id);
            }
        }
        Some(("clear", _)) => {
            TransactionStore::open(SqliteStorage::new(conn)).clear();
            println!("All transactions cleared");
        }
        _ => {}
    }
    Ok(())
}

pub fn create(conn: &Connection, cipher: &CodeCipher, sub: &clap::ArgMatches) -> Result<Transaction> {
    let user_id = required_arg(sub, "user")?;
    let amount = parse_amount(required_arg(sub, "amount")?)?;

    let directory = UserDirectory::open(SqliteStorage::new(conn));
    let user = directory.find(user_id).cloned().with_context(|| {
        format!(
            "User '{}' not found; run `cusledger users fetch` first",
            user_id
        )
    })?;

    let mut store = TransactionStore::open(SqliteStorage::new(conn));
    let tx = TransactionAssembler::new(cipher, &mut store).create_transaction(&user, amount)?;
    Ok(tx)
}

/// Returns how many entries were removed.
pub fn delete(conn: &Connection, id: &str) -> usize {
    let mut store = TransactionStore::open(SqliteStorage::new(conn));
    let before = store.len();
    store.delete(id);
    before - store.len()
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let store = TransactionStore::open(SqliteStorage::new(conn));
    let data = query_rows(&store, sub);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.created_at.clone(),
                    r.user.clone(),
                    r.amount.clone(),
                    r.cus.clone(),
                    r.cus_encrypted.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Created", "User", "Amount", "CUS", "Encrypted"], rows)
        );
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_arg(sub, "id")?;
    let store = TransactionStore::open(SqliteStorage::new(conn));
    let tx = store
        .find(id)
        .with_context(|| format!("Transaction '{}' not found", id))?;
    if !maybe_print_json(sub.get_flag("json"), false, tx)? {
        let rows = vec![
            vec!["Id".into(), tx.id.clone()],
            vec!["User".into(), format!("{} ({})", tx.user.name, tx.user.id)],
            vec!["Email".into(), tx.user.email.clone()],
            vec![
                "Location".into(),
                format!("{}, {}", tx.user.city, tx.user.country),
            ],
            vec!["Amount".into(), fmt_amount(&tx.amount)],
            vec!["CUS".into(), tx.cus.original.clone()],
            vec!["CUS encrypted".into(), tx.cus.encrypted.clone()],
            vec!["Created".into(), tx.created_at.to_string()],
        ];
        println!("{}", pretty_table(&["Field", "Value"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub user: String,
    pub amount: String,
    pub cus: String,
    pub cus_encrypted: String,
    pub created_at: String,
}

pub fn query_rows<S: KeyValueStore>(
    store: &TransactionStore<S>,
    sub: &clap::ArgMatches,
) -> Vec<TransactionRow> {
    let limit = sub
        .get_one::<usize>("limit")
        .copied()
        .unwrap_or(usize::MAX);
    store
        .list()
        .iter()
        .take(limit)
        .map(|t| TransactionRow {
            id: t.id.clone(),
            user: t.user.name.clone(),
            amount: fmt_amount(&t.amount),
            cus: t.cus.original.clone(),
            cus_encrypted: t.cus.encrypted.clone(),
            created_at: t.created_at.to_string(),
        })
        .collect()
}
