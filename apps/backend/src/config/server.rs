use std::env;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Empty means any origin is allowed.
    pub cors_allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(
            env::var("BACKEND_HOST").ok(),
            env::var("BACKEND_PORT").ok(),
            env::var("CORS_ALLOWED_ORIGINS").ok(),
        )
    }

    fn from_vars(
        host: Option<String>,
        port: Option<String>,
        origins: Option<String>,
    ) -> Result<Self, AppError> {
        let host = host
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match port.filter(|p| !p.trim().is_empty()) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a port number, got '{raw}'"))
            })?,
            None => DEFAULT_PORT,
        };

        let cors_allowed_origins = origins
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != "null")
            .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
            .map(str::to_string)
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::ServerConfig;

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = ServerConfig::from_vars(None, None, None).unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8080);
        assert!(cfg.cors_allowed_origins.is_empty());
    }

    #[test]
    fn origins_are_filtered() {
        let cfg = ServerConfig::from_vars(
            Some("127.0.0.1".into()),
            Some("9000".into()),
            Some("http://a.test, null, ftp://b.test,,https://c.test".into()),
        )
        .unwrap();
        assert_eq!(cfg.bind_addr(), ("127.0.0.1".to_string(), 9000));
        assert_eq!(
            cfg.cors_allowed_origins,
            vec!["http://a.test".to_string(), "https://c.test".to_string()]
        );
    }

    #[test]
    fn bad_port_is_config_error() {
        let err = ServerConfig::from_vars(None, Some("eighty".into()), None).unwrap_err();
        assert_eq!(err.code(), crate::errors::ErrorCode::ConfigError);
    }
}
