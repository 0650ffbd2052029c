//! User accounts
//!
//! - `session`: locally persisted token and user record
//! - `api`: auth backend client over an injected HTTP transport
//! - `service`: form validation and login/logout/profile flows

pub mod api;
pub mod service;
pub mod session;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use api::{
    ApiError, ApiRequest, ApiResponse, AuthApi, Endpoints, HttpMethod, HttpTransport,
    LoginResponse, ProfileUpdate, RestAuthApi, TransportError,
};
pub use service::{
    AccountService, AuthError, LoginForm, ProfileForm, SignupForm, Sleeper, ThreadSleeper,
};
pub use session::SessionStore;

/// Backend user id; arrives as either a string or a number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Profile photo as a data URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl User {
    /// Short text for the avatar badge
    pub fn avatar_text(&self) -> String {
        non_empty(&self.avatar)
            .or_else(|| non_empty(&self.initials))
            .unwrap_or("U")
            .to_string()
    }

    /// Badge text on the profile screen, where the name may be mid-edit
    pub fn profile_initials(&self, name: &str) -> String {
        if let Some(text) = non_empty(&self.initials).or_else(|| non_empty(&self.avatar)) {
            return text.to_string();
        }
        let name = if name.is_empty() { self.name.as_str() } else { name };
        make_initials(name)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Two-letter initials: first letters of the first two words, or the first
/// two letters of a single word. Missing letters fall back to "A" and "U".
pub fn make_initials(name: &str) -> String {
    let mut words = name.split_whitespace();
    let first = words.next();
    let second = words.next();

    let a = first.and_then(|w| w.chars().next()).unwrap_or('A');
    let b = second
        .and_then(|w| w.chars().next())
        .or_else(|| first.and_then(|w| w.chars().nth(1)))
        .unwrap_or('U');

    a.to_uppercase().chain(b.to_uppercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_initials() {
        assert_eq!(make_initials("aulia rahma putri"), "AR");
        assert_eq!(make_initials("  newton  "), "NE");
        assert_eq!(make_initials("x"), "XU");
        assert_eq!(make_initials(""), "AU");
    }

    #[test]
    fn test_avatar_text_fallbacks() {
        let mut user = User {
            name: "Isaac Newton".into(),
            ..Default::default()
        };
        assert_eq!(user.avatar_text(), "U");

        user.initials = Some("IN".into());
        assert_eq!(user.avatar_text(), "IN");

        user.avatar = Some(String::new());
        assert_eq!(user.avatar_text(), "IN");

        user.avatar = Some("🍎".into());
        assert_eq!(user.avatar_text(), "🍎");
    }

    #[test]
    fn test_profile_initials_prefers_stored_initials() {
        let mut user = User {
            name: "Isaac Newton".into(),
            ..Default::default()
        };
        assert_eq!(user.profile_initials(""), "IN");
        assert_eq!(user.profile_initials("Galileo Galilei"), "GG");

        user.initials = Some("ZZ".into());
        assert_eq!(user.profile_initials("Galileo Galilei"), "ZZ");
    }

    #[test]
    fn test_user_id_string_or_number() {
        let a: User = serde_json::from_str(r#"{"id":42,"name":"A","email":"a@x"}"#).unwrap();
        assert_eq!(a.id, Some(UserId::Number(42)));
        assert_eq!(a.id.unwrap().to_string(), "42");

        let b: User = serde_json::from_str(r#"{"id":"u-7","name":"B","email":"b@x"}"#).unwrap();
        assert_eq!(b.id, Some(UserId::Text("u-7".into())));

        let c: User = serde_json::from_str(r#"{"name":"C"}"#).unwrap();
        assert_eq!(c.id, None);
        assert_eq!(c.email, "");
        assert!(!serde_json::to_string(&c).unwrap().contains("photo"));
    }
}
