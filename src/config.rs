//! Service configuration from environment variables (a `.env` file is honored by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SCHEMA: &str = "public";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    /// Schema holding the dealership tables; set as `search_path` on every pooled connection.
    pub schema: String,
    pub cors_origins: Vec<String>,
    pub body_limit_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|_| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid { key: "DB_MAX_CONNECTIONS", value: v })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let schema = get("DEALERSHIP_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.to_string());
        if !is_identifier(&schema) {
            return Err(ConfigError::Invalid { key: "DEALERSHIP_SCHEMA", value: schema });
        }

        let mut cors_origins: Vec<String> = get("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(host) = get("VERCEL_URL") {
            cors_origins.push(format!("https://{}", host));
        }

        let body_limit_bytes = match get("BODY_LIMIT_BYTES") {
            Some(v) => v
                .parse::<usize>()
                .map_err(|_| ConfigError::Invalid { key: "BODY_LIMIT_BYTES", value: v })?,
            None => DEFAULT_BODY_LIMIT,
        };

        Ok(AppConfig {
            database_url,
            bind_addr,
            max_connections,
            schema,
            cors_origins,
            body_limit_bytes,
        })
    }
}

/// Lowercase PostgreSQL identifier: letter or underscore first, then letters, digits, underscores.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    s.len() <= 63 && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let cfg = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/dealership")])).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8000".parse().unwrap());
        assert_eq!(cfg.max_connections, 5);
        assert_eq!(cfg.schema, "public");
        assert_eq!(cfg.cors_origins, vec!["http://localhost:5173".to_string()]);
        assert_eq!(cfg.body_limit_bytes, 1024 * 1024);
    }

    #[test]
    fn database_url_is_required() {
        let err = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn vercel_host_is_appended_to_cors_origins() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/x"),
            ("CORS_ORIGINS", "http://a.test, http://b.test"),
            ("VERCEL_URL", "shop.vercel.app"),
        ]))
        .unwrap();
        assert_eq!(
            cfg.cors_origins,
            vec!["http://a.test", "http://b.test", "https://shop.vercel.app"]
        );
    }

    #[test]
    fn rejects_bad_values() {
        let base = ("DATABASE_URL", "postgres://db/x");
        assert!(AppConfig::from_lookup(lookup(&[base, ("DB_MAX_CONNECTIONS", "0")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[base, ("BIND_ADDR", "nowhere")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[base, ("DEALERSHIP_SCHEMA", "drop table;")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[base, ("DEALERSHIP_SCHEMA", "test_ab12")])).is_ok());
    }
}
