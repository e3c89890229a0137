// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::cipher::CodeCipher;
use crate::utils::required_arg;
use anyhow::Result;

pub fn handle(cipher: &CodeCipher, m: &clap::ArgMatches) -> Result<()> {
    if let Some(line) = output(cipher, m)? {
        if line.is_empty() && matches!(m.subcommand_name(), Some("decrypt")) {
            eprintln!("Not a CUS ciphertext for the configured secret");
        }
        println!("{}", line);
    }
    Ok(())
}

/// Line printed by a `cus` subcommand. Decrypting foreign input yields "".
pub fn output(cipher: &CodeCipher, m: &clap::ArgMatches) -> Result<Option<String>> {
    let line = match m.subcommand() {
        Some(("generate", sub)) => cipher.generate_code(required_arg(sub, "base")?),
        Some(("encrypt", sub)) => cipher.encrypt(required_arg(sub, "value")?)?,
        Some(("decrypt", sub)) => cipher.decrypt(required_arg(sub, "value")?),
        _ => return Ok(None),
    };
    Ok(Some(line))
}
