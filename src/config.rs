use crate::store::OwnershipScope;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub store_backend: StoreBackend,
    pub database_path: Option<String>,
    pub ownership_scope: OwnershipScope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Memory,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Sqlite => "sqlite",
            StoreBackend::Memory => "memory",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let store_backend = match env_map
            .get("STORE_BACKEND")
            .map(|s| s.as_str())
            .unwrap_or("sqlite")
        {
            "sqlite" => StoreBackend::Sqlite,
            "memory" => StoreBackend::Memory,
            other => {
                return Err(ConfigError::InvalidValue(
                    "STORE_BACKEND".to_string(),
                    format!("must be sqlite or memory, got {}", other),
                ))
            }
        };

        let database_path = env_map.get("DATABASE_PATH").cloned();
        if store_backend == StoreBackend::Sqlite && database_path.is_none() {
            return Err(ConfigError::MissingEnv("DATABASE_PATH".to_string()));
        }

        let ownership_scope = env_map
            .get("OWNERSHIP_SCOPE")
            .map(|s| s.as_str())
            .unwrap_or("scoped")
            .parse::<OwnershipScope>()
            .map_err(|msg| ConfigError::InvalidValue("OWNERSHIP_SCOPE".to_string(), msg))?;

        Ok(Config {
            port,
            store_backend,
            database_path,
            ownership_scope,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_required_env() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("DATABASE_PATH".to_string(), "/tmp/roster.db".to_string());
        map
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(setup_required_env()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.store_backend, StoreBackend::Sqlite);
        assert_eq!(config.database_path.as_deref(), Some("/tmp/roster.db"));
        assert_eq!(config.ownership_scope, OwnershipScope::Scoped);
    }

    #[test]
    fn test_missing_database_path() {
        let result = Config::from_env_map(HashMap::new());
        match result {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "DATABASE_PATH"),
            _ => panic!("Expected MissingEnv error"),
        }
    }

    #[test]
    fn test_memory_backend_needs_no_database_path() {
        let mut env_map = HashMap::new();
        env_map.insert("STORE_BACKEND".to_string(), "memory".to_string());
        env_map.insert("OWNERSHIP_SCOPE".to_string(), "shared".to_string());
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.ownership_scope, OwnershipScope::Shared);
        assert!(config.database_path.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let mut env_map = setup_required_env();
        env_map.insert("PORT".to_string(), "not_a_number".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "PORT"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_store_backend() {
        let mut env_map = setup_required_env();
        env_map.insert("STORE_BACKEND".to_string(), "postgres".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "STORE_BACKEND"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_ownership_scope() {
        let mut env_map = setup_required_env();
        env_map.insert("OWNERSHIP_SCOPE".to_string(), "global".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, msg)) => {
                assert_eq!(k, "OWNERSHIP_SCOPE");
                assert!(msg.contains("global"));
            }
            _ => panic!("Expected InvalidValue error"),
        }
    }
}
