//! Provider profile normalization.
//!
//! The OAuth handshake itself is delegated upstream; what arrives here is
//! the raw profile payload a completed handshake yields. Each provider
//! names the same facts differently (`sub` vs `id`, `picture` vs
//! `avatar_url`, `name` vs `login`), so this module maps them into the
//! canonical [`Identity`] shape the session bridge consumes.
//!
//! Absent email/avatar are tolerated — some providers omit them. Email
//! normalizes to an empty string, avatar to `None`.

use gatehouse_core::models::{Identity, Provider};
use serde_json::Value;

use crate::error::AppError;

/// Normalize a provider profile payload into a canonical identity.
///
/// Fails only when the payload lacks a subject identifier — everything
/// else degrades to an empty/absent field.
pub fn normalize_profile(provider: Provider, profile: &Value) -> Result<Identity, AppError> {
    let external_id = subject_id(provider, profile).ok_or_else(|| {
        AppError::Validation(format!("{provider} profile is missing a subject identifier"))
    })?;

    let display_name = display_name(provider, profile).unwrap_or_else(|| external_id.clone());
    let email = profile
        .get("email")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let avatar_url = avatar_url(provider, profile);

    Ok(Identity {
        external_id,
        provider,
        display_name,
        email,
        avatar_url,
    })
}

fn subject_id(provider: Provider, profile: &Value) -> Option<String> {
    match provider {
        // OpenID Connect subject claim.
        Provider::Google => profile.get("sub").and_then(Value::as_str).map(str::to_string),
        // GitHub's `id` is numeric.
        Provider::Github => profile.get("id").and_then(|id| match id {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }),
        Provider::Facebook => profile.get("id").and_then(Value::as_str).map(str::to_string),
    }
}

fn display_name(provider: Provider, profile: &Value) -> Option<String> {
    let name = profile.get("name").and_then(Value::as_str);
    match provider {
        // GitHub's `name` is nullable; `login` always exists.
        Provider::Github => name
            .or_else(|| profile.get("login").and_then(Value::as_str))
            .map(str::to_string),
        _ => name.map(str::to_string),
    }
}

fn avatar_url(provider: Provider, profile: &Value) -> Option<String> {
    match provider {
        Provider::Google => profile.get("picture").and_then(Value::as_str).map(str::to_string),
        Provider::Github => profile
            .get("avatar_url")
            .and_then(Value::as_str)
            .map(str::to_string),
        // Facebook nests the picture: {"picture": {"data": {"url": ...}}}.
        Provider::Facebook => profile
            .pointer("/picture/data/url")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}
