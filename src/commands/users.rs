// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::{DEFAULT_LIMIT, RandomUserCatalog};
use crate::config::Config;
use crate::db::SqliteStorage;
use crate::directory::{UserDirectory, UserPage};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, config: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("fetch", sub)) => {
            let limit = sub
                .get_one::<usize>("limit")
                .copied()
                .unwrap_or(DEFAULT_LIMIT);
            let catalog = RandomUserCatalog::new(&config.users_api)?;
            let mut directory = UserDirectory::open(SqliteStorage::new(conn));
            let n = directory
                .refresh(&catalog, limit)
                .context("Error loading users")?;
            println!("Fetched {} users", n);
            if let Some(page) = directory.page(1) {
                print_page(&page);
            }
        }
        Some(("list", sub)) => {
            let n = sub.get_one::<usize>("page").copied().unwrap_or(1);
            let directory = UserDirectory::open(SqliteStorage::new(conn));
            let page = directory.page(n).with_context(|| {
                format!("Page {} out of range (1..={})", n, directory.total_pages())
            })?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &page)? {
                print_page(&page);
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn page_rows(page: &UserPage<'_>) -> Vec<Vec<String>> {
    page.users
        .iter()
        .map(|u| {
            vec![
                u.id.clone(),
                u.name.clone(),
                u.email.clone(),
                format!("{}, {}", u.city, u.country),
                u.phone.clone(),
            ]
        })
        .collect()
}

fn print_page(page: &UserPage<'_>) {
    println!(
        "{}",
        pretty_table(&["Id", "Name", "Email", "Location", "Phone"], page_rows(page))
    );
    println!("Page {} of {}", page.page, page.total_pages.max(1));
}
