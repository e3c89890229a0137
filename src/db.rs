// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::{KeyValueStore, StorageError};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Cusledger", "cusledger"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("cusledger.sqlite"))
}

pub fn open_or_init(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS kv(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}

/// Key-value slots in the `kv` table of an open connection.
#[derive(Debug, Clone, Copy)]
pub struct SqliteStorage<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStorage<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteStorage<'_> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let v: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}
