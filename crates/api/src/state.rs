use std::sync::Arc;

use crate::config::ServerConfig;
use crate::email::EmailDelivery;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ccb_db::DbPool,
    /// Server configuration (JWT secrets, cookie flags, upload directory).
    pub config: Arc<ServerConfig>,
    /// Verification mailer; `None` when SMTP is not configured.
    pub mailer: Option<Arc<EmailDelivery>>,
}

impl AppState {
    /// Build state from a pool and configuration, creating the mailer when
    /// email delivery is configured.
    pub fn new(pool: ccb_db::DbPool, config: ServerConfig) -> Self {
        let mailer = config
            .email
            .clone()
            .map(|email| Arc::new(EmailDelivery::new(email)));
        Self {
            pool,
            config: Arc::new(config),
            mailer,
        }
    }
}
