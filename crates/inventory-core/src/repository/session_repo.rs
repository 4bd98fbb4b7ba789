//! Session Repository
//!
//! Current user and organization, one key each.

use super::traits::KeyValueStore;
use crate::domain::{Organization, Session, User};
use crate::error::{AppError, AppResult};

pub const AUTH_USER_KEY: &str = "inventory_pro_user_v2";
pub const AUTH_ORG_KEY: &str = "inventory_pro_org_v2";

pub struct SessionRepository<S> {
    store: S,
}

impl<S: KeyValueStore> SessionRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The saved session, if both halves are present and readable
    pub fn load(&self) -> Option<Session> {
        let user = self.read::<User>(AUTH_USER_KEY)?;
        let organization = self.read::<Organization>(AUTH_ORG_KEY)?;
        Some(Session { user, organization })
    }

    pub fn save(&self, session: &Session) -> AppResult<()> {
        let user = serde_json::to_string(&session.user).map_err(|e| AppError::Storage(e.to_string()))?;
        let org = serde_json::to_string(&session.organization).map_err(|e| AppError::Storage(e.to_string()))?;
        self.store.set(AUTH_USER_KEY, &user)?;
        self.store.set(AUTH_ORG_KEY, &org)?;
        Ok(())
    }

    pub fn clear(&self) -> AppResult<()> {
        self.store.remove(AUTH_USER_KEY)?;
        self.store.remove(AUTH_ORG_KEY)
    }

    fn read<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("reading {} failed: {}", key, e);
                return None;
            }
        };
        serde_json::from_str(&raw)
            .map_err(|e| log::warn!("discarding unreadable {}: {}", key, e))
            .ok()
    }
}
