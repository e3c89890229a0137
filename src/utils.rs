// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use reqwest::header::{HeaderMap, HeaderValue};
use rust_decimal::{Decimal, RoundingStrategy};

const UA: &str = concat!(
    "cusledger/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/cusledger)"
);

pub fn http_client() -> reqwest::Result<reqwest::blocking::Client> {
    let mut headers = HeaderMap::new();
    headers.insert("x-frontend-version", HeaderValue::from_static("1.0"));
    reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .default_headers(headers)
        .build()
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Amounts entered by the operator must be strictly positive.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d <= Decimal::ZERO {
        bail!("Amount must be greater than zero, got {}", d);
    }
    Ok(d)
}

/// Whole-unit currency display: `$50,000`. Fractions round half away from zero.
pub fn fmt_amount(d: &Decimal) -> String {
    let whole = d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = whole.abs().trunc().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if whole.is_sign_negative() && !whole.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${}", sign, grouped)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn required_arg<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("Missing required argument '{}'", name))
}
