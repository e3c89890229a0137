// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cusledger::catalog::DEFAULT_LIMIT;
use cusledger::cli;
use cusledger::config::Config;
use cusledger::logging::LogFormat;
use std::path::PathBuf;

#[test]
fn flags_override_defaults() {
    let matches = cli::build_cli().get_matches_from([
        "cusledger",
        "--db",
        "/tmp/ledger-test.sqlite",
        "--users-api",
        "http://localhost:9000/api/",
        "--secret",
        "s3cret",
        "--log",
        "cusledger=debug",
        "--log-format",
        "json",
        "tx",
        "list",
    ]);
    let config = Config::from_matches(&matches).unwrap();
    assert_eq!(config.db_path, PathBuf::from("/tmp/ledger-test.sqlite"));
    assert_eq!(config.users_api, "http://localhost:9000/api/");
    assert_eq!(config.secret, "s3cret");
    assert_eq!(config.log_filter, "cusledger=debug");
    assert_eq!(config.log_format, LogFormat::Json);
}

#[test]
fn global_flags_work_after_subcommand() {
    let matches = cli::build_cli().get_matches_from([
        "cusledger",
        "tx",
        "list",
        "--db",
        "/tmp/after.sqlite",
    ]);
    let config = Config::from_matches(&matches).unwrap();
    assert_eq!(config.db_path, PathBuf::from("/tmp/after.sqlite"));
}

#[test]
fn unknown_log_format_is_rejected() {
    let res = cli::build_cli().try_get_matches_from(["cusledger", "--log-format", "xml", "doctor"]);
    assert!(res.is_err());
}

#[test]
fn users_fetch_asks_for_ten_by_default() {
    let matches = cli::build_cli().get_matches_from(["cusledger", "users", "fetch"]);
    let fetch = matches
        .subcommand_matches("users")
        .and_then(|m| m.subcommand_matches("fetch"))
        .unwrap();
    assert_eq!(fetch.get_one::<usize>("limit").copied(), Some(10));
    assert_eq!(DEFAULT_LIMIT, 10);
}
