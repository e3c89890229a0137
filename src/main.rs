// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use cusledger::cipher::CodeCipher;
use cusledger::config::Config;
use cusledger::{cli, commands, db, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let config = Config::from_matches(&matches)?;
    logging::init_logging(&config.log_filter, config.log_format);

    let conn = db::open_or_init(&config.db_path)?;
    let cipher = CodeCipher::with_secret(&config.secret);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", config.db_path.display());
        }
        Some(("users", sub)) => commands::users::handle(&conn, &config, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&conn, &cipher, sub)?,
        Some(("cus", sub)) => commands::cus::handle(&cipher, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn, &cipher)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
