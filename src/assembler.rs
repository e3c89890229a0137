// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use tracing::info;

use crate::cipher::{CipherError, CodeCipher};
use crate::models::{CreatedAt, Cus, Transaction, User};
use crate::storage::KeyValueStore;
use crate::store::TransactionStore;

pub struct TransactionAssembler<'a, S: KeyValueStore> {
    cipher: &'a CodeCipher,
    store: &'a mut TransactionStore<S>,
}

impl<'a, S: KeyValueStore> TransactionAssembler<'a, S> {
    pub fn new(cipher: &'a CodeCipher, store: &'a mut TransactionStore<S>) -> Self {
        Self { cipher, store }
    }

    /// Builds a transaction for `user`, saves it and returns it.
    ///
    /// `amount` is taken as given; callers check it is positive. The
    /// transaction id is the plain CUS.
    pub fn create_transaction(
        &mut self,
        user: &User,
        amount: Decimal,
    ) -> Result<Transaction, CipherError> {
        let original = self.cipher.generate_code(&user.id);
        let encrypted = self.cipher.encrypt(&original)?;

        let transaction = Transaction {
            id: original.clone(),
            user: user.clone(),
            amount,
            cus: Cus {
                original,
                encrypted,
            },
            created_at: CreatedAt::Known(self.cipher.now()),
        };
        self.store.save(transaction.clone());
        info!(id = %transaction.id, user = %user.id, %amount, "transaction created");
        Ok(transaction)
    }
}
