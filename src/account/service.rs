//! Account flows behind the sign-in, sign-up and profile screens

use std::time::Duration;

use thiserror::Error;

use super::api::{ApiError, AuthApi, ProfileUpdate};
use super::session::SessionStore;
use super::User;
use crate::platform::{KeyValueStore, StorageError};

/// Pause before the single login retry
pub const LOGIN_RETRY_BACKOFF: Duration = Duration::from_millis(1500);

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Session expired, please sign in again")]
    SessionExpired,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Could not save session: {0}")]
    Storage(#[from] StorageError),
}

/// Blocking delay, injectable so tests don't wait
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(AuthError::Validation("Email and password are required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), AuthError> {
        let fields = [
            &self.name,
            &self.email,
            &self.password,
            &self.confirm_password,
        ];
        if fields.iter().any(|f| f.is_empty()) {
            return Err(AuthError::Validation("All fields are required"));
        }
        if self.password != self.confirm_password {
            return Err(AuthError::Validation("Passwords do not match"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    /// Data URL of the chosen photo
    pub photo: Option<String>,
    /// Optional; only checked against the confirmation
    pub new_password: String,
    pub confirm_password: String,
}

impl ProfileForm {
    /// Prefill from the stored user
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            photo: user.photo.clone(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        if !self.new_password.is_empty() && self.new_password != self.confirm_password {
            return Err(AuthError::Validation("Passwords do not match"));
        }
        Ok(())
    }
}

pub struct AccountService<A, S, Z = ThreadSleeper> {
    api: A,
    session: SessionStore<S>,
    sleeper: Z,
    login_backoff: Duration,
}

impl<A: AuthApi, S: KeyValueStore> AccountService<A, S, ThreadSleeper> {
    pub fn new(api: A, store: S) -> Self {
        Self::with_sleeper(api, store, ThreadSleeper)
    }
}

impl<A: AuthApi, S: KeyValueStore, Z: Sleeper> AccountService<A, S, Z> {
    pub fn with_sleeper(api: A, store: S, sleeper: Z) -> Self {
        Self {
            api,
            session: SessionStore::new(store),
            sleeper,
            login_backoff: LOGIN_RETRY_BACKOFF,
        }
    }

    pub fn set_login_backoff(&mut self, backoff: Duration) {
        self.login_backoff = backoff;
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    pub fn sleeper(&self) -> &Z {
        &self.sleeper
    }

    pub fn current_user(&self) -> Result<Option<User>, AuthError> {
        Ok(self.session.current_user()?)
    }

    pub fn is_authenticated(&self) -> Result<bool, AuthError> {
        Ok(self.session.is_authenticated()?)
    }

    /// Sign in and persist the session. A network failure is retried once
    /// after the backoff; any other failure is returned immediately.
    pub fn login(&mut self, form: &LoginForm) -> Result<User, AuthError> {
        form.validate()?;

        let response = match self.api.login(&form.email, &form.password) {
            Err(e) if e.is_network() => {
                log::warn!("Login failed ({}), retrying in {:?}", e, self.login_backoff);
                self.sleeper.sleep(self.login_backoff);
                self.api.login(&form.email, &form.password)?
            }
            other => other?,
        };

        self.session
            .save_login(&response.access_token, &response.user)?;
        log::info!("Signed in as {}", response.user.email);
        Ok(response.user)
    }

    /// Register a new account. Does not sign in.
    pub fn signup(&self, form: &SignupForm) -> Result<(), AuthError> {
        form.validate()?;
        self.api.signup(&form.name, &form.email, &form.password)?;
        log::info!("Registered {}", form.email);
        Ok(())
    }

    /// Tell the backend, then always drop local credentials
    pub fn logout(&mut self) -> Result<(), AuthError> {
        if let Some(token) = self.session.token()? {
            if let Err(e) = self.api.logout(&token) {
                log::warn!("Logout request failed, clearing locally: {}", e);
            }
        }
        self.session.clear()?;
        log::info!("Signed out");
        Ok(())
    }

    /// Fetch the profile from the backend and store it
    pub fn refresh_profile(&mut self) -> Result<User, AuthError> {
        let token = self.session.token()?.ok_or(AuthError::NotAuthenticated)?;
        let user = self.api.get_profile(&token)?;
        self.session.save_user(&user)?;
        Ok(user)
    }

    /// Save the profile screen. Without a token the session is expired and
    /// local credentials are cleared.
    pub fn update_profile(&mut self, form: &ProfileForm) -> Result<User, AuthError> {
        form.validate()?;

        let Some(token) = self.session.token()? else {
            log::warn!("Profile update without a token");
            self.session.clear()?;
            return Err(AuthError::SessionExpired);
        };

        let update = ProfileUpdate {
            name: form.name.clone(),
            email: form.email.clone(),
            photo: form.photo.clone(),
        };
        let stored = self.session.current_user()?.unwrap_or_default();

        let user = match self.api.update_profile(&token, &update)? {
            Some(user) => user,
            None => User {
                initials: Some(stored.profile_initials(&form.name)),
                name: update.name,
                email: update.email,
                photo: update.photo,
                ..stored
            },
        };

        self.session.save_user(&user)?;
        log::info!("Profile updated for {}", user.email);
        Ok(user)
    }
}
