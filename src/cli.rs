// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .help("Print pretty JSON")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .help("Print one JSON object per line")
            .action(ArgAction::SetTrue)
            .conflicts_with("json"),
    )
}

pub fn build_cli() -> Command {
    Command::new("cusledger")
        .version(clap::crate_version!())
        .about("Record transactions for fetched users, each tagged with an encrypted CUS")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("CUSLEDGER_DB")
                .value_name("PATH")
                .help("SQLite database file"),
        )
        .arg(
            Arg::new("users-api")
                .long("users-api")
                .global(true)
                .env("CUSLEDGER_USERS_API")
                .value_name("URL")
                .help("Base URL of the random user API"),
        )
        .arg(
            Arg::new("secret")
                .long("secret")
                .global(true)
                .env("CUSLEDGER_SECRET")
                .hide_env_values(true)
                .help("Secret the CUS encryption key is derived from"),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .global(true)
                .env("RUST_LOG")
                .value_name("FILTER")
                .help("Log filter directives, e.g. cusledger=debug"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .global(true)
                .env("CUSLEDGER_LOG_FORMAT")
                .value_parser(["pretty", "json"]),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("users")
                .about("Fetch and browse selectable users")
                .subcommand(
                    Command::new("fetch")
                        .about("Fetch users from the API and cache them")
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize))
                                .default_value("10"),
                        ),
                )
                .subcommand(json_args(
                    Command::new("list").about("Show cached users, 12 per page").arg(
                        Arg::new("page")
                            .long("page")
                            .value_parser(value_parser!(usize))
                            .default_value("1"),
                    ),
                )),
        )
        .subcommand(
            Command::new("tx")
                .about("Create and manage transactions")
                .subcommand(
                    Command::new("create")
                        .about("Create a transaction for a cached user")
                        .arg(Arg::new("user").long("user").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(json_args(
                    Command::new("list").about("List transactions, newest first").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                ))
                .subcommand(
                    Command::new("show")
                        .about("Show one transaction")
                        .arg(Arg::new("id").required(true))
                        .arg(
                            Arg::new("json")
                                .long("json")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete every transaction with this id")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(Command::new("clear").about("Delete all transactions")),
        )
        .subcommand(
            Command::new("cus")
                .about("CUS helpers")
                .subcommand(
                    Command::new("generate")
                        .about("Generate a CUS for a base string")
                        .arg(Arg::new("base").required(true)),
                )
                .subcommand(
                    Command::new("encrypt")
                        .about("Encrypt a value")
                        .arg(Arg::new("value").required(true)),
                )
                .subcommand(
                    Command::new("decrypt")
                        .about("Decrypt a value")
                        .arg(Arg::new("value").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check the ledger for inconsistencies"))
}
