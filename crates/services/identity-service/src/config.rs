//! Identity service configuration.

use std::env;
use std::fmt;

use common::{DatabaseConfig, ServiceConfig};

const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

/// Identity service configuration.
#[derive(Clone)]
pub struct IdentityServiceConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    /// Project identifier attached to outbound integrations
    pub project_id: String,
    /// Application secret
    pub secret_key: String,
    /// Origins allowed by CORS
    pub frontend_urls: Vec<String>,
}

impl IdentityServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = DatabaseConfig::default();

        Self {
            service: ServiceConfig {
                service_name: "identity-service".to_string(),
                env: env::var("ENV").unwrap_or_else(|_| "dev".to_string()),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or(defaults.url),
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|n| n.parse().ok())
                    .unwrap_or(defaults.max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|n| n.parse().ok())
                    .unwrap_or(defaults.min_connections),
            },
            project_id: env::var("PROJECTID").unwrap_or_default(),
            secret_key: env::var("SECRET").unwrap_or_default(),
            frontend_urls: parse_origins(
                &env::var("FRONTEND_URLS").unwrap_or_else(|_| DEFAULT_FRONTEND_URL.to_string()),
            ),
        }
    }
}

/// Split a comma separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl Default for IdentityServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "identity-service".to_string(),
                ..ServiceConfig::default()
            },
            database: DatabaseConfig::default(),
            project_id: String::new(),
            secret_key: String::new(),
            frontend_urls: vec![DEFAULT_FRONTEND_URL.to_string()],
        }
    }
}

impl fmt::Debug for IdentityServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityServiceConfig")
            .field("service", &self.service)
            .field("database", &self.database)
            .field("project_id", &self.project_id)
            .field("secret_key", &"[REDACTED]")
            .field("frontend_urls", &self.frontend_urls)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://a.example, https://b.example ,,"),
            vec!["http://a.example", "https://b.example"]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_secret_is_redacted() {
        let config = IdentityServiceConfig {
            secret_key: "hunter2".to_string(),
            ..Default::default()
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("hunter2"));
        assert_eq!(config.frontend_urls, vec!["http://localhost:3000"]);
    }
}
