//! Remember-me cookie construction.
//!
//! Transport contract: HTTP-only, `SameSite=Lax`, `Secure` when configured,
//! `Max-Age` equal to the token lifetime, path `/`.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

pub const REMEMBER_COOKIE_NAME: &str = "gatehouse_remember";

/// Create the remember-me cookie for a freshly issued token.
pub fn remember_cookie(token: &str, remember_days: u32, secure: bool) -> Cookie<'static> {
    Cookie::build((REMEMBER_COOKIE_NAME, token.to_string()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::days(i64::from(remember_days)))
        .build()
}

/// Create a removal cookie for the remember-me token.
pub fn clear_remember_cookie() -> Cookie<'static> {
    Cookie::build((REMEMBER_COOKIE_NAME, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remember_cookie_carries_the_transport_contract() {
        let cookie = remember_cookie("tok-value", 30, true);
        let rendered = cookie.to_string();
        assert!(rendered.starts_with("gatehouse_remember=tok-value"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("Secure"));
        assert!(rendered.contains("SameSite=Lax"));
        assert!(rendered.contains("Path=/"));
        assert_eq!(cookie.max_age(), Some(Duration::days(30)));
    }

    #[test]
    fn secure_flag_is_configurable() {
        let rendered = remember_cookie("t", 30, false).to_string();
        assert!(!rendered.contains("Secure"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_remember_cookie();
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(cookie.value(), "");
    }
}
