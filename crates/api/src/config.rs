use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;
use crate::email::EmailConfig;

/// Default upload directory for marriage documents.
const DEFAULT_UPLOAD_DIR: &str = "uploads/marriage_documents";

/// Deployment environment, read from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Production,
    /// Relaxes cookie flags so the API works over plain HTTP on localhost.
    Development,
}

impl AppEnv {
    /// Parse `APP_ENV`. Anything other than `development` (or `dev`) is production.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Self::Development,
            _ => Self::Production,
        }
    }

    /// Whether auth cookies carry `Secure; SameSite=None`.
    pub fn secure_cookies(self) -> bool {
        self == Self::Production
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secrets have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub app_env: AppEnv,
    /// Directory holding uploaded marriage documents.
    pub upload_dir: PathBuf,
    /// Base URL of the web client, used for links in emails.
    pub frontend_url: String,
    /// JWT token configuration (secrets, expiry durations).
    pub jwt: JwtConfig,
    /// SMTP settings; `None` disables verification emails.
    pub email: Option<EmailConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                         |
    /// |------------------------|-------------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                       |
    /// | `PORT`                 | `5000`                                          |
    /// | `CORS_ORIGINS`         | `http://localhost:5173,http://localhost:4200`   |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                            |
    /// | `APP_ENV`              | `production`                                    |
    /// | `UPLOAD_DIR`           | `uploads/marriage_documents`                    |
    /// | `FRONTEND_URL`         | `http://localhost:5173`                         |
    ///
    /// # Panics
    ///
    /// Panics on unparseable values and when the JWT secrets are missing.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173,http://localhost:4200".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let app_env = AppEnv::parse(&std::env::var("APP_ENV").unwrap_or_default());

        let upload_dir = PathBuf::from(
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.into()),
        );

        let frontend_url = std::env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .trim_end_matches('/')
            .to_string();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            app_env,
            upload_dir,
            frontend_url,
            jwt: JwtConfig::from_env(),
            email: EmailConfig::from_env(),
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// Pool size (default: `10`).
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Resolve the connection URL.
    ///
    /// `DATABASE_URL` wins; otherwise the URL is assembled from `DB_HOST`,
    /// `DB_PORT` (default `5432`), `DB_USER`, `DB_PASSWORD` and `DB_NAME`.
    ///
    /// # Panics
    ///
    /// Panics if neither `DATABASE_URL` nor the `DB_*` variables are set.
    pub fn from_env() -> Self {
        let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
            let var = |name: &str| {
                std::env::var(name)
                    .unwrap_or_else(|_| panic!("DATABASE_URL or {name} must be set"))
            };
            assemble_database_url(
                &var("DB_HOST"),
                &std::env::var("DB_PORT").unwrap_or_else(|_| "5432".into()),
                &var("DB_USER"),
                &std::env::var("DB_PASSWORD").unwrap_or_default(),
                &var("DB_NAME"),
            )
        });

        let max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        Self {
            url,
            max_connections,
        }
    }
}

fn assemble_database_url(host: &str, port: &str, user: &str, password: &str, name: &str) -> String {
    if password.is_empty() {
        format!("postgres://{user}@{host}:{port}/{name}")
    } else {
        format!("postgres://{user}:{password}@{host}:{port}/{name}")
    }
}
