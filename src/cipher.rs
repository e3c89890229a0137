// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! CUS generation and the reversible transform applied to it.
//!
//! Ciphertexts are base64 of `[version_byte][nonce(12)][ciphertext+tag]`,
//! AES-256-GCM keyed by the SHA-256 digest of a fixed secret. The secret is a
//! constant shared by every process, so this obscures codes rather than
//! protecting them.

use aes_gcm::Aes256Gcm;
use aes_gcm::aead::{Aead, KeyInit};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use chrono::{DateTime, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use thiserror::Error;
use tracing::debug;

use crate::clock::{Clock, SystemClock};

pub const DEFAULT_SECRET: &str = "cusledger-secret-key";

const VERSION: u8 = 0x01;
const NONCE_LEN: usize = 12;

type Nonce = [u8; NONCE_LEN];

#[derive(Debug, Error)]
pub enum CipherError {
    #[error("Encryption failed: {0}")]
    Encryption(String),
    #[error("Decryption failed: {0}")]
    Decryption(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Base64 decode error: {0}")]
    Base64Decode(String),
    #[error("UTF-8 conversion error: {0}")]
    Utf8(String),
}

pub struct CodeCipher {
    cipher: Aes256Gcm,
    clock: Arc<dyn Clock>,
    last_millis: AtomicI64,
}

impl CodeCipher {
    pub fn new(secret: &str, clock: Arc<dyn Clock>) -> Self {
        let key = Sha256::digest(secret.as_bytes());
        Self {
            cipher: Aes256Gcm::new(&key),
            clock,
            last_millis: AtomicI64::new(i64::MIN),
        }
    }

    pub fn with_secret(secret: &str) -> Self {
        Self::new(secret, Arc::new(SystemClock))
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Returns `"{base}-{millis}"`.
    ///
    /// The millisecond part never decreases for a given cipher: if the clock
    /// steps backwards the last emitted value is reused. Two calls inside the
    /// same millisecond produce the same code.
    pub fn generate_code(&self, base: &str) -> String {
        let now = self.clock.now().timestamp_millis();
        let prev = self.last_millis.fetch_max(now, Ordering::SeqCst);
        format!("{}-{}", base, prev.max(now))
    }

    pub fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        let mut nonce_bytes: Nonce = [0u8; NONCE_LEN];
        rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt((&nonce_bytes).into(), plaintext.as_bytes())
            .map_err(|e| CipherError::Encryption(e.to_string()))?;

        let mut out = Vec::with_capacity(1 + NONCE_LEN + ciphertext.len());
        out.push(VERSION);
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(out))
    }

    /// Inverse of [`CodeCipher::encrypt`]. Anything that is not a ciphertext
    /// produced under this key yields an empty string.
    pub fn decrypt(&self, encrypted: &str) -> String {
        match self.try_decrypt(encrypted) {
            Ok(plain) => plain,
            Err(e) => {
                debug!(error = %e, "CUS ciphertext rejected");
                String::new()
            }
        }
    }

    pub fn try_decrypt(&self, encrypted: &str) -> Result<String, CipherError> {
        let data = BASE64
            .decode(encrypted)
            .map_err(|e| CipherError::Base64Decode(e.to_string()))?;

        if data.len() < 1 + NONCE_LEN {
            return Err(CipherError::InvalidData(format!(
                "need at least {} bytes, got {}",
                1 + NONCE_LEN,
                data.len()
            )));
        }
        if data[0] != VERSION {
            return Err(CipherError::InvalidData(format!(
                "Unsupported encryption version: {}",
                data[0]
            )));
        }

        let nonce: Nonce = data[1..1 + NONCE_LEN]
            .try_into()
            .map_err(|_| CipherError::InvalidData("Failed to extract nonce".to_string()))?;
        let plaintext = self
            .cipher
            .decrypt((&nonce).into(), &data[1 + NONCE_LEN..])
            .map_err(|e| CipherError::Decryption(e.to_string()))?;

        String::from_utf8(plaintext).map_err(|e| CipherError::Utf8(e.to_string()))
    }
}

impl Default for CodeCipher {
    fn default() -> Self {
        Self::with_secret(DEFAULT_SECRET)
    }
}

impl fmt::Debug for CodeCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeCipher")
            .field("last_millis", &self.last_millis.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt() {
        let cipher = CodeCipher::default();
        let encrypted = cipher.encrypt("MySecret123").expect("Encryption failed");
        assert_ne!(encrypted, "MySecret123");
        assert_eq!(cipher.decrypt(&encrypted), "MySecret123");
    }

    #[test]
    fn test_different_nonces() {
        let cipher = CodeCipher::default();
        let first = cipher.encrypt("u1-1735725600000").unwrap();
        let second = cipher.encrypt("u1-1735725600000").unwrap();

        assert_ne!(first, second);
        assert_eq!(cipher.decrypt(&first), "u1-1735725600000");
        assert_eq!(cipher.decrypt(&second), "u1-1735725600000");
    }

    #[test]
    fn test_rejects_wrong_version() {
        let cipher = CodeCipher::default();
        let mut raw = BASE64.decode(cipher.encrypt("abc").unwrap()).unwrap();
        raw[0] = 0x02;
        let err = cipher.try_decrypt(&BASE64.encode(raw)).unwrap_err();
        assert!(matches!(err, CipherError::InvalidData(_)));
    }

    #[test]
    fn test_rejects_short_input() {
        let cipher = CodeCipher::default();
        let err = cipher.try_decrypt(&BASE64.encode([VERSION, 1, 2])).unwrap_err();
        assert!(matches!(err, CipherError::InvalidData(_)));
    }
}
