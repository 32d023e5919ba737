//! Client-side sessions kept in a signed cookie.
//!
//! The cookie value is base64url-encoded JSON holding the user id, the
//! display name and an absolute expiry. Nothing is stored server-side, so
//! ending a session only means dropping the cookie.

use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use cookie::time::Duration as CookieDuration;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const SESSION_COOKIE: &str = "osint_session";
pub const SESSION_TTL_DAYS: i64 = 7;
pub const LOGIN_REQUIRED_REDIRECT: &str = "/login_register?status=login_required";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: i64,
    pub username: String,
    pub expires_at: i64,
}

impl SessionUser {
    pub fn new(user_id: i64, username: impl Into<String>) -> Self {
        Self::issued_at(user_id, username, Utc::now())
    }

    pub fn issued_at(user_id: i64, username: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            username: username.into(),
            expires_at: (now + ChronoDuration::days(SESSION_TTL_DAYS)).timestamp(),
        }
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now.timestamp()
    }

    fn encode(&self) -> Result<String, serde_json::Error> {
        let payload = serde_json::to_vec(self)?;
        Ok(URL_SAFE_NO_PAD.encode(payload))
    }

    fn decode(value: &str) -> Option<Self> {
        let payload = URL_SAFE_NO_PAD.decode(value).ok()?;
        serde_json::from_slice(&payload).ok()
    }
}

fn session_cookie(value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

pub fn start_session(
    jar: SignedCookieJar,
    user: &SessionUser,
) -> Result<SignedCookieJar, serde_json::Error> {
    let mut cookie = session_cookie(user.encode()?);
    cookie.set_max_age(CookieDuration::days(SESSION_TTL_DAYS));
    Ok(jar.add(cookie))
}

pub fn end_session(jar: SignedCookieJar) -> SignedCookieJar {
    let mut removal = session_cookie(String::new());
    removal.set_max_age(CookieDuration::seconds(0));
    jar.remove(removal)
}

/// Returns the session carried by a correctly signed, unexpired cookie.
pub fn current_session(jar: &SignedCookieJar) -> Option<SessionUser> {
    let cookie = jar.get(SESSION_COOKIE)?;
    let Some(user) = SessionUser::decode(cookie.value()) else {
        debug!("discarding undecodable session cookie");
        return None;
    };

    if !user.is_valid_at(Utc::now()) {
        debug!(user_id = user.user_id, "session expired");
        return None;
    }

    Some(user)
}

pub fn is_authenticated(jar: &SignedCookieJar) -> bool {
    current_session(jar).is_some()
}

pub fn require_session(jar: &SignedCookieJar) -> Result<SessionUser, Redirect> {
    current_session(jar).ok_or_else(|| Redirect::to(LOGIN_REQUIRED_REDIRECT))
}
