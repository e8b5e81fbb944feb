use std::{net::SocketAddr, time::Duration};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("SF_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid SF_LISTEN_ADDR");
        let db_path = std::env::var("SF_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = std::env::var("SF_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("SF_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let jwt_secret = std::env::var("SF_JWT_SECRET").expect("SF_JWT_SECRET must be set");
        let token_ttl_secs: u64 = std::env::var("SF_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "86400".into())
            .parse()
            .unwrap_or(86400);
        Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            token_ttl: Duration::from_secs(token_ttl_secs),
        }
    }
}
