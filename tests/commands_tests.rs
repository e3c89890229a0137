// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cusledger::catalog::DEFAULT_USERS_API;
use cusledger::cipher::{CodeCipher, DEFAULT_SECRET};
use cusledger::cli;
use cusledger::commands::{cus, users};
use cusledger::config::Config;
use cusledger::db::{self, SqliteStorage};
use cusledger::directory::USERS_KEY;
use cusledger::logging::LogFormat;
use cusledger::storage::KeyValueStore;
use rusqlite::Connection;
use serde_json::json;
use std::path::PathBuf;

fn matches_for(group: &str, args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["cusledger", group];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some((name, m)) if name == group => m.clone(),
        _ => panic!("no {} subcommand", group),
    }
}

fn config() -> Config {
    Config {
        db_path: PathBuf::from(":memory:"),
        users_api: DEFAULT_USERS_API.to_string(),
        secret: DEFAULT_SECRET.to_string(),
        log_filter: "warn".to_string(),
        log_format: LogFormat::Pretty,
    }
}

fn seeded(count: usize) -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let users: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "id": format!("u{}", i), "name": format!("User {}", i),
                "email": format!("u{}@example.com", i), "city": "Bogota",
                "country": "Colombia", "phone": "555-0100", "picture": "t.jpg"
            })
        })
        .collect();
    SqliteStorage::new(&conn)
        .set(USERS_KEY, &json!(users).to_string())
        .unwrap();
    conn
}

#[test]
fn cus_decrypt_of_foreign_input_prints_empty_line() {
    let cipher = CodeCipher::default();
    for input in ["invalid-string", "AAAA", "u1-1700000000000"] {
        let m = matches_for("cus", &["decrypt", input]);
        assert_eq!(cus::output(&cipher, &m).unwrap().as_deref(), Some(""));
        cus::handle(&cipher, &m).unwrap();
    }
}

#[test]
fn cus_decrypt_with_other_secret_prints_empty_line() {
    let encrypted = CodeCipher::with_secret("another-secret")
        .encrypt("u1-1700000000000")
        .unwrap();
    let m = matches_for("cus", &["decrypt", encrypted.as_str()]);
    assert_eq!(
        cus::output(&CodeCipher::default(), &m).unwrap().as_deref(),
        Some("")
    );
}

#[test]
fn cus_encrypt_then_decrypt_through_the_cli() {
    let cipher = CodeCipher::default();
    let encrypted = cus::output(&cipher, &matches_for("cus", &["encrypt", "u1-42"]))
        .unwrap()
        .unwrap();
    assert_ne!(encrypted, "u1-42");

    let plain = cus::output(&cipher, &matches_for("cus", &["decrypt", encrypted.as_str()])).unwrap();
    assert_eq!(plain.as_deref(), Some("u1-42"));
}

#[test]
fn cus_generate_prefixes_the_base() {
    let code = cus::output(&CodeCipher::default(), &matches_for("cus", &["generate", "u1"]))
        .unwrap()
        .unwrap();
    let millis = code.strip_prefix("u1-").unwrap();
    assert!(millis.parse::<i64>().unwrap() > 0);
}

#[test]
fn users_list_rejects_out_of_range_pages() {
    let conn = seeded(2);
    for page in ["0", "2", "5"] {
        let m = matches_for("users", &["list", "--page", page]);
        let err = users::handle(&conn, &config(), &m).unwrap_err();
        assert!(err.to_string().contains("out of range"), "{}", err);
        assert!(err.to_string().contains(&format!("Page {}", page)));
    }
}

#[test]
fn users_list_serves_existing_pages() {
    let conn = seeded(13);
    for page in ["1", "2"] {
        let m = matches_for("users", &["list", "--page", page, "--json"]);
        users::handle(&conn, &config(), &m).unwrap();
    }
    let m = matches_for("users", &["list", "--page", "3"]);
    let err = users::handle(&conn, &config(), &m).unwrap_err();
    assert!(err.to_string().contains("(1..=2)"));
}

#[test]
fn users_list_on_empty_directory_serves_first_page() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let m = matches_for("users", &["list"]);
    users::handle(&conn, &config(), &m).unwrap();
}
