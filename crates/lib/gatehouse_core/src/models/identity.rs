//! Identity domain models.
//!
//! These are internal domain models, distinct from the API wire models in
//! `gatehouse_api` (which carry `#[serde(rename)]` for camelCase etc.).

use serde::{Deserialize, Serialize};

/// Upstream OAuth identity provider.
///
/// Stored as lowercase text; `(external_id, provider)` is the natural key
/// of a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Google,
    Github,
    Facebook,
}

impl Provider {
    /// Lowercase name as stored in the database and used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Github => "github",
            Provider::Facebook => "facebook",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "google" => Ok(Provider::Google),
            "github" => Ok(Provider::Github),
            "facebook" => Ok(Provider::Facebook),
            other => Err(format!("unknown provider '{other}'")),
        }
    }
}

/// Verified external identity, as produced by a completed provider handshake.
///
/// Some providers omit email and avatar; an absent email normalizes to an
/// empty string, an absent avatar to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub external_id: String,
    pub provider: Provider,
    pub display_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn provider_round_trips_through_str() {
        for p in [Provider::Google, Provider::Github, Provider::Facebook] {
            assert_eq!(Provider::from_str(p.as_str()), Ok(p));
        }
    }

    #[test]
    fn unknown_provider_is_rejected() {
        assert!(Provider::from_str("myspace").is_err());
        assert!(Provider::from_str("Google").is_err());
    }
}
