//! Locally persisted login session

use super::User;
use crate::platform::{KeyValueStore, StorageError};

pub const TOKEN_KEY: &str = "access_token";
pub const USER_KEY: &str = "currentUser";

/// Bearer token and user record kept in a key-value store.
/// Both must be present for the session to count as authenticated.
#[derive(Debug, Clone, Default)]
pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn token(&self) -> Result<Option<String>, StorageError> {
        Ok(self.store.get(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    /// Stored user record. An unreadable record counts as no user.
    pub fn current_user(&self) -> Result<Option<User>, StorageError> {
        match self.store.get_json::<User>(USER_KEY) {
            Ok(user) => Ok(user),
            Err(StorageError::Serialization(e)) => {
                log::warn!("Discarding unreadable user record: {}", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn is_authenticated(&self) -> Result<bool, StorageError> {
        Ok(self.token()?.is_some() && self.current_user()?.is_some())
    }

    pub fn save_login(&mut self, token: &str, user: &User) -> Result<(), StorageError> {
        self.store.set(TOKEN_KEY, token)?;
        self.save_user(user)
    }

    pub fn save_user(&mut self, user: &User) -> Result<(), StorageError> {
        self.store.set_json(USER_KEY, user)
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)
    }
}
