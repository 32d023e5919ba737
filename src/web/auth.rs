use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use axum::{
    extract::{Form, Query, State},
    response::{Html, Redirect},
};
use axum_extra::extract::cookie::SignedCookieJar;
use rand_core::OsRng;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::web::{
    AppState,
    data::{self, AccountError, NewUser},
    flash::FlashQuery,
    render_login_register_page,
    session::{self, SessionUser},
};

const LOGIN_PAGE: &str = "/login_register";
const DASHBOARD_PAGE: &str = "/dashboard";

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn home(jar: SignedCookieJar) -> Redirect {
    if session::is_authenticated(&jar) {
        Redirect::to(DASHBOARD_PAGE)
    } else {
        Redirect::to(LOGIN_PAGE)
    }
}

pub async fn login_register_page(
    jar: SignedCookieJar,
    Query(params): Query<FlashQuery>,
) -> Result<Html<String>, Redirect> {
    if session::is_authenticated(&jar) {
        return Err(Redirect::to(DASHBOARD_PAGE));
    }

    Ok(Html(render_login_register_page(&params.render())))
}

pub async fn process_register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Redirect {
    let new_user = NewUser {
        username: &form.username,
        email: &form.email,
        password: &form.password,
    };

    match data::register_user(state.pool_ref(), new_user).await {
        Ok(user_id) => {
            info!(user_id, username = form.username.trim(), "registered new user");
            Redirect::to("/login_register?status=registered")
        }
        Err(err) => {
            match &err {
                AccountError::HashFailure(_) | AccountError::PersistenceFailure(_) => {
                    error!(?err, "registration failed")
                }
                _ => info!(reason = %err, "registration rejected"),
            }
            Redirect::to(&format!("/login_register?error={}#register", err.code()))
        }
    }
}

pub async fn process_login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> (SignedCookieJar, Redirect) {
    let user = match data::authenticate_user(state.pool_ref(), &form.username, &form.password).await
    {
        Ok(user) => user,
        Err(AccountError::MissingField) => {
            return (jar, Redirect::to("/login_register?error=missing_credentials"));
        }
        Err(err @ AccountError::PersistenceFailure(_)) => {
            error!(?err, "failed to fetch user during login");
            return (jar, Redirect::to("/login_register?error=persistence"));
        }
        Err(err) => {
            warn!(username = form.username.trim(), "failed login attempt");
            return (
                jar,
                Redirect::to(&format!("/login_register?error={}", err.code())),
            );
        }
    };

    let session_user = SessionUser::new(user.id, user.username);
    match session::start_session(jar.clone(), &session_user) {
        Ok(jar) => {
            info!(user_id = session_user.user_id, "user logged in");
            (jar, Redirect::to("/dashboard?status=logged_in"))
        }
        Err(err) => {
            error!(?err, "failed to encode session");
            (jar, Redirect::to("/login_register?error=persistence"))
        }
    }
}

pub async fn logout(jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    if let Some(user) = session::current_session(&jar) {
        info!(user_id = user.user_id, "user logged out");
    }

    (
        session::end_session(jar),
        Redirect::to("/login_register?status=logged_out"),
    )
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let parsed = PasswordHash::new(password_hash);
    match parsed {
        Ok(hash) => Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok(),
        Err(_) => false,
    }
}
