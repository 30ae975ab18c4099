//! Wire models for the HTTP API (camelCase on the wire, distinct from the
//! domain models in `gatehouse_core::models`).

use gatehouse_core::auth::session::Principal;
use serde::{Deserialize, Serialize};

/// Body of `POST /auth/sessions`: the normalized outcome of a completed
/// provider handshake plus the user's "stay signed in" choice.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    /// Provider name (`google`, `github`, `facebook`).
    pub provider: String,
    /// Raw profile payload as returned by the provider.
    pub profile: serde_json::Value,
    /// Whether the user opted in to remember-me persistence.
    #[serde(default)]
    pub remember: bool,
}

/// Principal as exposed on the wire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalBody {
    pub external_id: String,
    pub provider: String,
    pub display_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Whether the session was resumed from a remember-me token.
    pub resumed: bool,
}

impl From<Principal> for PrincipalBody {
    fn from(p: Principal) -> Self {
        Self {
            external_id: p.identity.external_id,
            provider: p.identity.provider.to_string(),
            display_name: p.identity.display_name,
            email: p.identity.email,
            avatar_url: p.identity.avatar_url,
            resumed: p.resumed,
        }
    }
}

/// Response for session creation and session reads.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<PrincipalBody>,
    /// Whether a remember-me credential backs this session.
    pub remembered: bool,
}

impl SessionResponse {
    /// The "no session" answer — used for absent, expired, and failed
    /// lookups alike.
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            principal: None,
            remembered: false,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub db_connected: bool,
    pub version: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
