//! Remember-me token ledger.
//!
//! Long-lived bearer tokens that let a returning browser re-establish a
//! session without repeating the provider handshake. The ledger owns the
//! `remember_tokens` table exclusively and enforces at most one live token
//! per `(external_id, provider)`:
//!
//! - issuance deletes any existing rows for the identity and inserts the
//!   new one in a single transaction;
//! - validation self-heals expiry (an expired row is removed on the spot)
//!   and touches `last_used_at` best-effort;
//! - a sweep bulk-removes expired rows at startup and on an interval.
//!
//! Expiry is fixed at issuance. Validation never extends it.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Days, Utc};
use rand::RngCore;
use tracing::{info, warn};

use super::AuthError;
use crate::db::Store;
use crate::models::{Identity, Provider};

/// Default remember-me lifetime in days.
pub const DEFAULT_REMEMBER_DAYS: u32 = 30;

/// Generate a random bearer token: 256 bits from the OS-seeded CSPRNG,
/// base64url-encoded without padding (43 chars).
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Expiry timestamp for a token issued at `now`, using calendar-day
/// arithmetic. `None` only on unrepresentable dates.
fn expiry_after(now: DateTime<Utc>, remember_days: u32) -> Option<DateTime<Utc>> {
    now.checked_add_days(Days::new(u64::from(remember_days)))
}

/// The remember-me token ledger.
///
/// Stateless between calls; all state lives in the injected [`Store`].
/// Cheap to clone, safe to invoke concurrently.
#[derive(Clone)]
pub struct TokenLedger {
    store: Store,
}

impl TokenLedger {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Confirm connectivity, bootstrap the schema, and run the startup
    /// sweep. Await before serving traffic that depends on persistence;
    /// a failure here degrades the remember-me feature, it must not abort
    /// the process.
    pub async fn initialize(&self) -> Result<(), AuthError> {
        self.store.ping().await?;
        crate::migrate::migrate(self.store.pool()).await?;
        let swept = self.sweep_expired().await?;
        if swept > 0 {
            info!(swept, "removed expired remember tokens at startup");
        }
        Ok(())
    }

    /// Issue a fresh token for `identity`, replacing any existing token
    /// for the same `(external_id, provider)`.
    ///
    /// Delete-then-insert runs in one transaction: either both commit or
    /// neither does. Returns the opaque token string; transport (cookie
    /// issuance) is the caller's concern.
    pub async fn create_token(
        &self,
        identity: &Identity,
        remember_days: u32,
    ) -> Result<String, AuthError> {
        if identity.external_id.is_empty() {
            return Err(AuthError::Validation("identity has empty external_id".into()));
        }
        if remember_days == 0 {
            return Err(AuthError::Validation("remember_days must be at least 1".into()));
        }

        let token = generate_token();
        let now = Utc::now();
        let expires_at = expiry_after(now, remember_days)
            .ok_or_else(|| AuthError::Validation("remember_days out of range".into()))?;

        let mut tx = self.store.pool().begin().await?;

        // Replace, not accumulate. When two issuances for one identity
        // race, the delete each runs against current state; the loser's
        // insert then trips the unique identity index and the whole
        // attempt rolls back — at most one token per identity survives.
        // No internal retry; retry policy belongs to the caller.
        sqlx::query("DELETE FROM remember_tokens WHERE external_id = $1 AND provider = $2")
            .bind(&identity.external_id)
            .bind(identity.provider.as_str())
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO remember_tokens \
             (token, external_id, provider, email, display_name, avatar_url, \
              expires_at, created_at, last_used_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)",
        )
        .bind(&token)
        .bind(&identity.external_id)
        .bind(identity.provider.as_str())
        .bind(&identity.email)
        .bind(&identity.display_name)
        .bind(&identity.avatar_url)
        .bind(expires_at)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(token)
    }

    /// Look up a token. `Ok(None)` is the normal "no session" outcome for
    /// absent or expired tokens, never an error.
    ///
    /// An expired row is deleted on the spot. A live row gets a
    /// best-effort `last_used_at` touch — a touch failure is logged and
    /// does not fail the validation, since the token is still valid.
    pub async fn validate_token(&self, token: &str) -> Result<Option<Identity>, AuthError> {
        if token.is_empty() {
            return Err(AuthError::Validation("empty token".into()));
        }

        let row = sqlx::query_as::<
            _,
            (
                String,
                String,
                String,
                String,
                Option<String>,
                DateTime<Utc>,
            ),
        >(
            "SELECT external_id, provider, display_name, email, avatar_url, expires_at \
             FROM remember_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(self.store.pool())
        .await?;

        let Some((external_id, provider, display_name, email, avatar_url, expires_at)) = row
        else {
            return Ok(None);
        };

        let now = Utc::now();
        if expires_at < now {
            sqlx::query("DELETE FROM remember_tokens WHERE token = $1")
                .bind(token)
                .execute(self.store.pool())
                .await?;
            return Ok(None);
        }

        if let Err(e) = sqlx::query("UPDATE remember_tokens SET last_used_at = $2 WHERE token = $1")
            .bind(token)
            .bind(now)
            .execute(self.store.pool())
            .await
        {
            warn!(error = %e, "failed to touch last_used_at; token remains valid");
        }

        let provider = provider
            .parse::<Provider>()
            .map_err(AuthError::Internal)?;

        Ok(Some(Identity {
            external_id,
            provider,
            display_name,
            email,
            avatar_url,
        }))
    }

    /// Unconditional delete by token value. Returns whether a row was
    /// actually removed; never errors on "not found".
    pub async fn delete_token(&self, token: &str) -> Result<bool, AuthError> {
        if token.is_empty() {
            return Ok(false);
        }
        let result = sqlx::query("DELETE FROM remember_tokens WHERE token = $1")
            .bind(token)
            .execute(self.store.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Bulk-delete expired rows. Housekeeping — validation already
    /// self-heals — but bounds storage growth from abandoned tokens.
    pub async fn sweep_expired(&self) -> Result<u64, AuthError> {
        let result = sqlx::query("DELETE FROM remember_tokens WHERE expires_at < $1")
            .bind(Utc::now())
            .execute(self.store.pool())
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn generated_tokens_are_43_chars_of_base64url() {
        let token = generate_token();
        assert_eq!(token.len(), 43);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn generated_tokens_do_not_repeat() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(generate_token()));
        }
    }

    #[test]
    fn expiry_is_calendar_days_ahead() {
        let issued = Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap();
        let expires = expiry_after(issued, 30).unwrap();
        assert_eq!(expires, Utc.with_ymd_and_hms(2026, 2, 14, 9, 30, 0).unwrap());
        // Day arithmetic follows the calendar across month lengths.
        let expires = expiry_after(Utc.with_ymd_and_hms(2026, 1, 31, 0, 0, 0).unwrap(), 1).unwrap();
        assert_eq!(expires, Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn expiry_is_fixed_at_issuance_not_sliding() {
        let issued = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let a = expiry_after(issued, 30).unwrap();
        let b = expiry_after(issued, 30).unwrap();
        assert_eq!(a, b);
    }
}
