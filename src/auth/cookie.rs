//! Cookie carrying the session token.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::config::SessionConfig;

pub const AUTHORIZATION_TOKEN: &str = "authorizationToken";

/// Adds the session cookie, valid for the configured session lifetime.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use diet_tracker::auth::cookie::{set_session_cookie, AUTHORIZATION_TOKEN};
/// use diet_tracker::config::SessionConfig;
///
/// let cfg = SessionConfig { ttl_days: 30, cookie_secure: false };
/// let jar = set_session_cookie(CookieJar::new(), "abc".to_string(), &cfg);
/// let cookie = jar.get(AUTHORIZATION_TOKEN).unwrap();
/// assert_eq!(cookie.value(), "abc");
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::days(30)));
/// ```
pub fn set_session_cookie(jar: CookieJar, token: String, cfg: &SessionConfig) -> CookieJar {
    let cookie = Cookie::build((AUTHORIZATION_TOKEN, token))
        .path("/")
        .max_age(Duration::days(cfg.ttl_days))
        .http_only(true)
        .secure(cfg.cookie_secure)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Overwrites the session cookie with an empty, already expired one.
pub fn clear_session_cookie(jar: CookieJar, cfg: &SessionConfig) -> CookieJar {
    let cookie = Cookie::build((AUTHORIZATION_TOKEN, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(cfg.cookie_secure)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(AUTHORIZATION_TOKEN)
        .map(|c| c.value().trim().to_string())
        .filter(|v| !v.is_empty())
}
