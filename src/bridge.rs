//! Messages from the embedded lab page
//!
//! The lab runs in a web view and posts plain strings back to the host:
//! navigation commands, error reports and progress counters. Counters are
//! persisted per user so progress survives across launches.

use serde::Deserialize;
use serde_json::Value;

use crate::account::User;
use crate::platform::{KeyValueStore, StorageError};

const STORAGE_PREFIX: &str = "sim:newton";
/// Key used when no user is stored; the lab shows a placeholder named "User"
const ANONYMOUS_USER: &str = "User";

/// Progress counters the lab page keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum StatKey {
    #[serde(rename = "simulationCount")]
    SimulationCount,
    #[serde(rename = "totalTime")]
    TotalTime,
}

impl StatKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatKey::SimulationCount => "simulationCount",
            StatKey::TotalTime => "totalTime",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeMessage {
    GoBack,
    OpenProfile,
    WebError(String),
    StatsUpdate { key: StatKey, value: String },
    StatsRemove { key: StatKey },
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum StatsPayload {
    #[serde(rename = "STATS_UPDATE")]
    Update {
        key: StatKey,
        #[serde(default)]
        value: Value,
    },
    #[serde(rename = "STATS_REMOVE")]
    Remove { key: StatKey },
}

impl BridgeMessage {
    /// Parse a posted string. Unknown or malformed messages yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "GO_BACK" => return Some(BridgeMessage::GoBack),
            "OPEN_PROFILE" => return Some(BridgeMessage::OpenProfile),
            _ => {}
        }
        if let Some(text) = raw.strip_prefix("WEB_ERROR:") {
            return Some(BridgeMessage::WebError(text.to_string()));
        }

        match serde_json::from_str::<StatsPayload>(raw).ok()? {
            StatsPayload::Update { key, value } => Some(BridgeMessage::StatsUpdate {
                key,
                value: stat_text(&value),
            }),
            StatsPayload::Remove { key } => Some(BridgeMessage::StatsRemove { key }),
        }
    }
}

/// Counters arrive as strings or numbers; absent means zero
fn stat_text(value: &Value) -> String {
    match value {
        Value::Null => "0".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Storage-safe key for a user: id, email, name or "User", with anything
/// outside `[A-Za-z0-9._-]` replaced by `_`
pub fn safe_user_key(user: Option<&User>) -> String {
    let raw = user
        .and_then(|u| {
            u.id.as_ref()
                .map(|id| id.to_string())
                .filter(|s| !s.is_empty())
                .or_else(|| Some(u.email.clone()).filter(|s| !s.is_empty()))
                .or_else(|| Some(u.name.clone()).filter(|s| !s.is_empty()))
        })
        .unwrap_or_else(|| ANONYMOUS_USER.to_string());

    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub fn storage_key(user_key: &str, key: StatKey) -> String {
    format!("{}:{}:{}", STORAGE_PREFIX, user_key, key.as_str())
}

/// What the host screen should do after a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Back,
    Profile,
}

/// Per-user lab progress backed by a key-value store
#[derive(Debug)]
pub struct SimulationStats<S> {
    store: S,
    user_key: String,
    simulation_count: String,
    total_time: String,
}

impl<S: KeyValueStore> SimulationStats<S> {
    /// Load the saved counters for `user`
    pub fn load(store: S, user: Option<&User>) -> Result<Self, StorageError> {
        let user_key = safe_user_key(user);
        let read = |key| -> Result<String, StorageError> {
            Ok(store
                .get(&storage_key(&user_key, key))?
                .unwrap_or_else(|| "0".to_string()))
        };
        let simulation_count = read(StatKey::SimulationCount)?;
        let total_time = read(StatKey::TotalTime)?;

        Ok(Self {
            store,
            user_key,
            simulation_count,
            total_time,
        })
    }

    pub fn user_key(&self) -> &str {
        &self.user_key
    }

    pub fn value(&self, key: StatKey) -> &str {
        match key {
            StatKey::SimulationCount => &self.simulation_count,
            StatKey::TotalTime => &self.total_time,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply one posted message
    pub fn handle(&mut self, raw: &str) -> Result<Option<Navigation>, StorageError> {
        let Some(message) = BridgeMessage::parse(raw) else {
            log::debug!("Ignoring lab message {:?}", raw);
            return Ok(None);
        };

        match message {
            BridgeMessage::GoBack => return Ok(Some(Navigation::Back)),
            BridgeMessage::OpenProfile => return Ok(Some(Navigation::Profile)),
            BridgeMessage::WebError(text) => log::warn!("Lab page error: {}", text),
            BridgeMessage::StatsUpdate { key, value } => {
                self.store.set(&storage_key(&self.user_key, key), &value)?;
                *self.slot(key) = value;
            }
            BridgeMessage::StatsRemove { key } => {
                self.store.remove(&storage_key(&self.user_key, key))?;
                *self.slot(key) = "0".to_string();
            }
        }
        Ok(None)
    }

    fn slot(&mut self, key: StatKey) -> &mut String {
        match key {
            StatKey::SimulationCount => &mut self.simulation_count,
            StatKey::TotalTime => &mut self.total_time,
        }
    }
}
