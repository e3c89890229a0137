// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, TimeZone, Utc};
use cusledger::assembler::TransactionAssembler;
use cusledger::cipher::CodeCipher;
use cusledger::clock::ManualClock;
use cusledger::models::User;
use cusledger::storage::MemoryStorage;
use cusledger::store::TransactionStore;
use rust_decimal::Decimal;
use std::sync::Arc;

fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        name: "Jane Smith".into(),
        email: "jane@example.com".into(),
        city: "London".into(),
        country: "UK".into(),
        phone: "987-654-3210".into(),
        picture: "thumbnail2.jpg".into(),
    }
}

#[test]
fn full_cycle() {
    let cipher = CodeCipher::default();
    let mut store = TransactionStore::open(MemoryStorage::new());

    let tx = TransactionAssembler::new(&cipher, &mut store)
        .create_transaction(&user("u1"), Decimal::from(50000))
        .unwrap();

    assert_eq!(tx.id, tx.cus.original);
    assert!(tx.cus.original.starts_with("u1-"));
    assert_ne!(tx.cus.encrypted, tx.cus.original);
    assert_eq!(cipher.decrypt(&tx.cus.encrypted), tx.cus.original);
    assert_eq!(tx.amount, Decimal::from(50000));
    assert_eq!(tx.user, user("u1"));
    assert_eq!(store.list()[0].id, tx.id);
    assert_eq!(store.list()[0], tx);
}

#[test]
fn stamps_creation_time_from_cipher_clock() {
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();
    let clock = Arc::new(ManualClock::new(start));
    let cipher = CodeCipher::new("test-secret", clock.clone());
    let mut store = TransactionStore::open(MemoryStorage::new());

    let tx = TransactionAssembler::new(&cipher, &mut store)
        .create_transaction(&user("u1"), Decimal::new(1250, 2))
        .unwrap();

    assert_eq!(tx.id, "u1-1735725600000");
    assert_eq!(tx.created_at.known(), Some(start));
}

#[test]
fn each_call_saves_exactly_once() {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let cipher = CodeCipher::new("test-secret", clock.clone());
    let mut store = TransactionStore::open(MemoryStorage::new());

    let first = TransactionAssembler::new(&cipher, &mut store)
        .create_transaction(&user("u1"), Decimal::from(10))
        .unwrap();
    assert_eq!(store.revision(), 1);

    clock.advance(Duration::milliseconds(3));
    let second = TransactionAssembler::new(&cipher, &mut store)
        .create_transaction(&user("u2"), Decimal::from(20))
        .unwrap();
    assert_eq!(store.revision(), 2);

    let ids: Vec<&str> = store.list().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
}

#[test]
fn created_transaction_survives_reopen() {
    let cipher = CodeCipher::default();
    let mut store = TransactionStore::open(MemoryStorage::new());
    let tx = TransactionAssembler::new(&cipher, &mut store)
        .create_transaction(&user("u1"), Decimal::from(50000))
        .unwrap();

    let reopened = TransactionStore::open(store.into_storage());
    let loaded = &reopened.list()[0];
    assert_eq!(loaded.id, tx.id);
    assert_eq!(loaded.amount, tx.amount);
    assert_eq!(
        loaded.created_at.timestamp_millis(),
        tx.created_at.timestamp_millis()
    );
    assert_eq!(cipher.decrypt(&loaded.cus.encrypted), tx.id);
}
