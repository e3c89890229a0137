// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::models::User;
use crate::utils::http_client;

pub const DEFAULT_USERS_API: &str = "https://randomuser.me/api/";
pub const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("user API request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected user API payload: {0}")]
    Decode(#[from] serde_json::Error),
}

pub trait UserCatalog {
    fn fetch_users(&self, limit: usize) -> Result<Vec<User>, CatalogError>;
}

/// randomuser.me client.
pub struct RandomUserCatalog {
    client: reqwest::blocking::Client,
    api_url: String,
}

impl RandomUserCatalog {
    pub fn new(api_url: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            client: http_client()?,
            api_url: api_url.to_string(),
        })
    }
}

impl UserCatalog for RandomUserCatalog {
    fn fetch_users(&self, limit: usize) -> Result<Vec<User>, CatalogError> {
        let url = format!("{}?results={}", self.api_url, limit);
        debug!(%url, "fetching users");
        let body = self.client.get(url).send()?.error_for_status()?.text()?;
        parse_users(&body)
    }
}

#[derive(Debug, Deserialize)]
struct RandomUserResponse {
    results: Vec<RandomUser>,
}

#[derive(Debug, Deserialize)]
struct RandomUser {
    login: Login,
    name: Name,
    email: String,
    location: Location,
    phone: String,
    picture: Picture,
}

#[derive(Debug, Deserialize)]
struct Login {
    uuid: String,
}

#[derive(Debug, Deserialize)]
struct Name {
    first: String,
    last: String,
}

#[derive(Debug, Deserialize)]
struct Location {
    city: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct Picture {
    thumbnail: String,
}

impl From<RandomUser> for User {
    fn from(u: RandomUser) -> Self {
        User {
            id: u.login.uuid,
            name: format!("{} {}", u.name.first, u.name.last),
            email: u.email,
            city: u.location.city,
            country: u.location.country,
            phone: u.phone,
            picture: u.picture.thumbnail,
        }
    }
}

pub fn parse_users(body: &str) -> Result<Vec<User>, CatalogError> {
    let resp: RandomUserResponse = serde_json::from_str(body)?;
    Ok(resp.results.into_iter().map(User::from).collect())
}
