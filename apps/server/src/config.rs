use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use rand::{rngs::OsRng, RngCore};
use terravest_core::constants::DEFAULT_ACCESS_TOKEN_TTL_SECS;

use crate::auth::decode_secret_key;

/// Administrator account created on startup when it does not exist yet.
#[derive(Clone, Debug)]
pub struct AdminBootstrap {
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
}

#[derive(Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub jwt_secret: Vec<u8>,
    pub access_token_ttl: Duration,
    pub admin: Option<AdminBootstrap>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("TV_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid TV_LISTEN_ADDR")?;
        let db_path = std::env::var("TV_DB_PATH").unwrap_or_else(|_| "./db/terravest.db".into());
        let cors_allow = parse_origins(
            &std::env::var("TV_CORS_ALLOW_ORIGINS").unwrap_or_else(|_| "*".into()),
        );
        let timeout_ms: u64 = std::env::var("TV_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let ttl_secs: u64 = std::env::var("TV_ACCESS_TOKEN_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_ACCESS_TOKEN_TTL_SECS);

        let jwt_secret = match std::env::var("TV_JWT_SECRET") {
            Ok(raw) => decode_secret_key(&raw).context("Invalid TV_JWT_SECRET")?,
            Err(_) => {
                tracing::warn!(
                    "TV_JWT_SECRET is not set; using an ephemeral key, tokens will not survive a restart"
                );
                let mut bytes = vec![0u8; 32];
                OsRng.fill_bytes(&mut bytes);
                bytes
            }
        };

        let admin = match (
            std::env::var("TV_ADMIN_EMAIL"),
            std::env::var("TV_ADMIN_PASSWORD_HASH"),
        ) {
            (Ok(email), Ok(password_hash)) => Some(AdminBootstrap {
                email,
                password_hash,
            }),
            (Ok(_), Err(_)) | (Err(_), Ok(_)) => {
                anyhow::bail!("TV_ADMIN_EMAIL and TV_ADMIN_PASSWORD_HASH must be set together")
            }
            _ => None,
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            access_token_ttl: Duration::from_secs(ttl_secs),
            admin,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
