use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    Res,
    config::CREDENTIALS_KEY,
    host::{Cookie, KeyValueStorage},
    utils,
};

/// Refresh this long before the token expires.
pub const REFRESH_LEAD_MS: i64 = 60_000;

/// A complete web player session. Always replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub cookies: Vec<Cookie>,
    pub access_token: String,
    /// Expiration as epoch milliseconds.
    pub expiration: i64,
}

impl Credentials {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() > self.expiration
    }

    /// Milliseconds until the refresh should fire, negative once overdue.
    pub fn expiration_duration_at(&self, now: DateTime<Utc>) -> i64 {
        self.expiration
            .saturating_sub(now.timestamp_millis())
            .saturating_sub(REFRESH_LEAD_MS)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.expiration)
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        utils::cookie_value(&self.cookies, name)
    }
}

/// Persists [`Credentials`] under a single storage key.
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl CredentialStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    pub async fn load(&self) -> Res<Option<Credentials>> {
        match self.storage.get_item(CREDENTIALS_KEY).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub async fn persist(&self, credentials: &Credentials) -> Res<()> {
        let json = serde_json::to_string(credentials)?;
        self.storage.set_item(CREDENTIALS_KEY, &json).await
    }

    pub async fn clear(&self) -> Res<()> {
        self.storage.remove_item(CREDENTIALS_KEY).await
    }
}
