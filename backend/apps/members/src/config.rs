//! Server configuration, read from the environment once at startup.

use anyhow::{Context, anyhow, bail};
use auth::AuthConfig;
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

pub struct AppConfig {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    /// Directory served under `/static`
    pub public_dir: PathBuf,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), cfg!(debug_assertions))
    }

    /// `development` allows a missing `SESSION_SECRET` and plain-HTTP cookies.
    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        development: bool,
    ) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let host = var("APP_HOST")
            .unwrap_or_else(|| "0.0.0.0".to_string())
            .parse()
            .context("APP_HOST must be an IP address")?;

        let port = var("PORT")
            .unwrap_or_else(|| "8000".to_string())
            .parse()
            .context("PORT must be a port number")?;

        let public_dir = PathBuf::from(var("PUBLIC_DIR").unwrap_or_else(|| "public".to_string()));

        let mut auth = if development {
            AuthConfig::development()
        } else {
            AuthConfig::default()
        };

        match var("SESSION_SECRET") {
            Some(secret) => auth.session_secret = decode_secret(&secret)?,
            None if development => {
                tracing::warn!("SESSION_SECRET not set, using a random key; sessions end on restart");
            }
            None => bail!("SESSION_SECRET must be set in production"),
        }

        auth.password_pepper = var("PASSWORD_PEPPER").map(|pepper| Arc::from(pepper.into_bytes()));

        Ok(Self {
            database_url,
            host,
            port,
            public_dir,
            auth,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn decode_secret(secret: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = platform::crypto::from_base64(secret.trim()).context("SESSION_SECRET must be base64")?;
    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| anyhow!("SESSION_SECRET must decode to 32 bytes, got {}", bytes.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://db")]), true).unwrap();
        assert_eq!(config.addr().to_string(), "0.0.0.0:8000");
        assert_eq!(config.public_dir, PathBuf::from("public"));
        assert!(config.auth.password_pepper.is_none());
        assert!(!config.auth.cookie_secure);
    }

    #[test]
    fn test_database_url_required() {
        assert!(AppConfig::from_lookup(lookup(&[]), true).is_err());
    }

    #[test]
    fn test_secret_required_in_production() {
        let err = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://db")]), false)
            .err()
            .unwrap();
        assert!(err.to_string().contains("SESSION_SECRET"));
    }

    #[test]
    fn test_production_config() {
        let secret = platform::crypto::to_base64(&[7u8; 32]);
        let config = AppConfig::from_lookup(
            lookup(&[
                ("DATABASE_URL", "postgres://db"),
                ("SESSION_SECRET", &secret),
                ("PASSWORD_PEPPER", "pepper"),
                ("APP_HOST", "127.0.0.1"),
                ("PORT", "9000"),
            ]),
            false,
        )
        .unwrap();
        assert_eq!(config.auth.session_secret, [7u8; 32]);
        assert_eq!(config.auth.password_pepper.as_deref(), Some(&b"pepper"[..]));
        assert!(config.auth.cookie_secure);
        assert_eq!(config.addr().to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn test_secret_must_be_32_bytes() {
        let short = platform::crypto::to_base64(&[1u8; 16]);
        let result = AppConfig::from_lookup(
            lookup(&[("DATABASE_URL", "postgres://db"), ("SESSION_SECRET", &short)]),
            true,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_port() {
        let result = AppConfig::from_lookup(
            lookup(&[("DATABASE_URL", "postgres://db"), ("PORT", "eighty")]),
            true,
        );
        assert!(result.is_err());
    }
}
