// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::{CatalogError, UserCatalog};
use crate::models::User;
use crate::storage::KeyValueStore;

pub const USERS_KEY: &str = "users";
pub const PAGE_SIZE: usize = 12;

#[derive(Debug, Serialize)]
pub struct UserPage<'a> {
    pub page: usize,
    pub total_pages: usize,
    pub users: &'a [User],
}

/// Last fetched user list, cached in the backing store so a later
/// invocation can pick a user by id.
pub struct UserDirectory<S: KeyValueStore> {
    storage: S,
    users: Vec<User>,
}

impl<S: KeyValueStore> UserDirectory<S> {
    pub fn open(storage: S) -> Self {
        let users = match storage.get(USERS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "cached users are malformed; ignoring");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "user cache unavailable");
                Vec::new()
            }
        };
        Self { storage, users }
    }

    /// Replaces the cached list. On failure the previous list is kept.
    pub fn refresh(
        &mut self,
        catalog: &dyn UserCatalog,
        limit: usize,
    ) -> Result<usize, CatalogError> {
        let users = catalog.fetch_users(limit)?;
        self.users = users;
        match serde_json::to_string(&self.users) {
            Ok(body) => {
                if let Err(e) = self.storage.set(USERS_KEY, &body) {
                    warn!(error = %e, "could not cache users");
                }
            }
            Err(e) => warn!(error = %e, "could not serialize users"),
        }
        info!(count = self.users.len(), "user directory refreshed");
        Ok(self.users.len())
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn total_pages(&self) -> usize {
        self.users.len().div_ceil(PAGE_SIZE)
    }

    /// 1-based. Page 1 always exists, even when the directory is empty.
    pub fn page(&self, page: usize) -> Option<UserPage<'_>> {
        let total_pages = self.total_pages();
        if page == 0 || (page > total_pages && page != 1) {
            return None;
        }
        let start = ((page - 1) * PAGE_SIZE).min(self.users.len());
        let end = (start + PAGE_SIZE).min(self.users.len());
        Some(UserPage {
            page,
            total_pages,
            users: &self.users[start..end],
        })
    }
}
