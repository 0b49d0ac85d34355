use std::{fmt, str::FromStr};

use chrono::Local;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::RequestViolation;

static SESSION_ID_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("SESSION_ID_REGEX is a valid regex pattern")
});

/// Key of a persisted conversation. Doubles as the file stem on disk, so only
/// a path-safe alphabet is accepted.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    pub fn parse(value: &str) -> Result<Self, RequestViolation> {
        let value = value.trim();
        if SESSION_ID_REGEX.is_match(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(RequestViolation::InvalidSessionId(value.to_string()))
        }
    }

    /// Parses a caller-supplied id, generating a fresh one when absent or blank.
    pub fn resolve(value: Option<&str>) -> Result<Self, RequestViolation> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => Self::parse(value),
            None => Ok(Self::generate()),
        }
    }

    /// Timestamp-based id, e.g. `2025-01-31_14-05-09-123456`.
    pub fn generate() -> Self {
        Self(Local::now().format("%Y-%m-%d_%H-%M-%S-%6f").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SessionId {
    type Err = RequestViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SessionId {
    type Error = RequestViolation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}
