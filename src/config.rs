// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use crate::catalog::DEFAULT_USERS_API;
use crate::cipher::DEFAULT_SECRET;
use crate::db;
use crate::logging::LogFormat;

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub users_api: String,
    pub secret: String,
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl Config {
    /// Global options come from flags first, then their environment variables
    /// (resolved by clap), then defaults.
    pub fn from_matches(m: &clap::ArgMatches) -> Result<Config> {
        let db_path = match m.get_one::<String>("db") {
            Some(p) => PathBuf::from(p),
            None => db::db_path()?,
        };
        let users_api = m
            .get_one::<String>("users-api")
            .cloned()
            .unwrap_or_else(|| DEFAULT_USERS_API.to_string());
        let secret = m
            .get_one::<String>("secret")
            .cloned()
            .unwrap_or_else(|| DEFAULT_SECRET.to_string());
        let log_filter = m
            .get_one::<String>("log")
            .cloned()
            .unwrap_or_else(|| "warn".to_string());
        let log_format = m
            .get_one::<String>("log-format")
            .map(|s| LogFormat::from_str_lossy(s))
            .unwrap_or_default();

        Ok(Config {
            db_path,
            users_api,
            secret,
            log_filter,
            log_format,
        })
    }
}
