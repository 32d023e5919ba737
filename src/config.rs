use std::{
    env,
    net::SocketAddr,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use axum_extra::extract::cookie::Key;
use tracing::warn;

pub const DATA_FILE_NAME: &str = "arf.json";
pub const INSTANCE_DIR_NAME: &str = "instance";
pub const DATABASE_FILE_NAME: &str = "users.db";
const DEFAULT_PORT: u16 = 5000;
const MIN_SECRET_KEY_LEN: usize = 32;

#[derive(Clone)]
pub struct AppConfig {
    app_root: PathBuf,
    port: u16,
    cookie_key: Key,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let app_root = match env::var("APP_ROOT") {
            Ok(root) if !root.trim().is_empty() => PathBuf::from(root),
            _ => env::current_dir().context("failed to resolve current directory")?,
        };

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let cookie_key = match env::var("SECRET_KEY") {
            Ok(secret) => cookie_key_from_secret(&secret)?,
            Err(_) => {
                warn!("SECRET_KEY is not set; generated an ephemeral key, sessions will not survive restarts");
                Key::generate()
            }
        };

        Ok(Self::new(app_root, port, cookie_key))
    }

    pub fn new(app_root: impl Into<PathBuf>, port: u16, cookie_key: Key) -> Self {
        Self {
            app_root: app_root.into(),
            port,
            cookie_key,
        }
    }

    pub fn app_root(&self) -> &Path {
        &self.app_root
    }

    pub fn data_file_path(&self) -> PathBuf {
        self.app_root.join(DATA_FILE_NAME)
    }

    pub fn instance_dir(&self) -> PathBuf {
        self.app_root.join(INSTANCE_DIR_NAME)
    }

    pub fn database_path(&self) -> PathBuf {
        self.instance_dir().join(DATABASE_FILE_NAME)
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    pub fn cookie_key(&self) -> Key {
        self.cookie_key.clone()
    }
}

/// Expands an operator-supplied secret into a signing key. Short secrets are rejected.
pub fn cookie_key_from_secret(secret: &str) -> Result<Key> {
    let secret = secret.trim();
    if secret.len() < MIN_SECRET_KEY_LEN {
        bail!("SECRET_KEY must be at least {MIN_SECRET_KEY_LEN} bytes long");
    }
    Ok(Key::derive_from(secret.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_secret_is_rejected() {
        assert!(cookie_key_from_secret("too-short").is_err());
    }

    #[test]
    fn same_secret_derives_same_key() {
        let secret = "0123456789abcdef0123456789abcdef-osint";
        let first = cookie_key_from_secret(secret).expect("derive first");
        let second = cookie_key_from_secret(secret).expect("derive second");
        assert_eq!(first.master(), second.master());
    }

    #[test]
    fn paths_are_relative_to_app_root() {
        let config = AppConfig::new("/srv/osint", 5000, Key::generate());
        assert_eq!(config.data_file_path(), PathBuf::from("/srv/osint/arf.json"));
        assert_eq!(
            config.database_path(),
            PathBuf::from("/srv/osint/instance/users.db")
        );
        assert_eq!(config.listen_addr().port(), 5000);
    }
}
