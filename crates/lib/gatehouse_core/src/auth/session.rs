//! Session bridge.
//!
//! Translates between the authenticated-identity world and the token
//! ledger: a freshly authenticated identity becomes a session principal
//! (plus an optional remember-me token), and a presented cookie token
//! becomes a principal again on a later visit.
//!
//! Persistence is an enhancement, not a precondition of login: ledger
//! failures on this path are logged and downgraded, never surfaced to the
//! user.

use serde::Serialize;
use tracing::{debug, warn};

use super::remember_tokens::TokenLedger;
use crate::models::Identity;

/// The authenticated identity associated with a request/session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub identity: Identity,
    /// Whether this principal was re-established from a remember-me token
    /// rather than a fresh provider handshake.
    pub resumed: bool,
}

/// Result of a completed login: the session principal, plus the issued
/// remember-me token when the caller opted in and issuance succeeded.
#[derive(Debug, Clone)]
pub struct SessionLogin {
    pub principal: Principal,
    pub remember_token: Option<String>,
}

/// Bridge between the request layer and the token ledger.
#[derive(Clone)]
pub struct SessionBridge {
    ledger: TokenLedger,
    remember_days: u32,
}

impl SessionBridge {
    pub fn new(ledger: TokenLedger, remember_days: u32) -> Self {
        Self {
            ledger,
            remember_days,
        }
    }

    pub fn ledger(&self) -> &TokenLedger {
        &self.ledger
    }

    /// Complete a login for a freshly authenticated identity.
    ///
    /// Always yields a principal. Issues a remember-me token iff
    /// `wants_persistence`; an issuance failure is downgraded to "login
    /// succeeded, persistence skipped".
    pub async fn on_authenticated(
        &self,
        identity: Identity,
        wants_persistence: bool,
    ) -> SessionLogin {
        let remember_token = if wants_persistence {
            match self
                .ledger
                .create_token(&identity, self.remember_days)
                .await
            {
                Ok(token) => Some(token),
                Err(e) => {
                    warn!(error = %e, provider = %identity.provider,
                          "remember-me issuance failed; login continues without persistence");
                    None
                }
            }
        } else {
            None
        };

        SessionLogin {
            principal: Principal {
                identity,
                resumed: false,
            },
            remember_token,
        }
    }

    /// Materialize a principal from a presented remember-me cookie.
    ///
    /// `None` means "fall through to normal OAuth login" — it covers
    /// absent, expired, and malformed tokens as well as storage outages,
    /// and is never an error shown to the user.
    pub async fn on_cookie_presented(&self, token: &str) -> Option<Principal> {
        match self.ledger.validate_token(token).await {
            Ok(Some(identity)) => Some(Principal {
                identity,
                resumed: true,
            }),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "remember-me validation failed; falling through to login");
                None
            }
        }
    }

    /// Tear down persistence on logout. Best-effort: logout must succeed
    /// for the user even if token deletion fails.
    pub async fn on_logout(&self, token: Option<&str>) {
        let Some(token) = token else { return };
        match self.ledger.delete_token(token).await {
            Ok(removed) => debug!(removed, "remember token deleted on logout"),
            Err(e) => warn!(error = %e, "failed to delete remember token on logout"),
        }
    }
}
