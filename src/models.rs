// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub city: String,
    pub country: String,
    pub phone: String,
    pub picture: String,
}

/// Correlation code pair attached to every transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cus {
    pub original: String,
    pub encrypted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user: User,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub cus: Cus,
    #[serde(default)]
    pub created_at: CreatedAt,
}

/// Creation time of a transaction.
///
/// `Unknown` is the placeholder used when a persisted record carries a date
/// that cannot be read back; the rest of the record is still usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreatedAt {
    Known(DateTime<Utc>),
    #[default]
    Unknown,
}

impl CreatedAt {
    pub fn known(&self) -> Option<DateTime<Utc>> {
        match self {
            CreatedAt::Known(dt) => Some(*dt),
            CreatedAt::Unknown => None,
        }
    }

    pub fn timestamp_millis(&self) -> Option<i64> {
        self.known().map(|dt| dt.timestamp_millis())
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, CreatedAt::Unknown)
    }

    /// Accepts RFC 3339 strings, bare `YYYY-MM-DD` dates and epoch milliseconds.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => parse_date_str(s),
            serde_json::Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .and_then(DateTime::from_timestamp_millis)
                .map_or(CreatedAt::Unknown, CreatedAt::Known),
            _ => CreatedAt::Unknown,
        }
    }
}

fn parse_date_str(s: &str) -> CreatedAt {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s.trim()) {
        return CreatedAt::Known(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map_or(CreatedAt::Unknown, |naive| CreatedAt::Known(naive.and_utc()))
}

impl fmt::Display for CreatedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreatedAt::Known(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            CreatedAt::Unknown => f.write_str("Invalid Date"),
        }
    }
}

impl Serialize for CreatedAt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CreatedAt::Known(dt) => {
                serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            CreatedAt::Unknown => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for CreatedAt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(CreatedAt::from_json(&raw))
    }
}
