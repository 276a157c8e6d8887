//! Server configuration
//!
//! Read once at startup from `TODO_*` environment variables.

use std::path::PathBuf;

use anyhow::Context;

use todo_core::{Format, IdStrategy};

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:9986";
pub const DEFAULT_READ_BUFFER_BYTES: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub data_dir: PathBuf,
    pub listen_addr: String,
    pub serialization_mode: Format,
    pub id_strategy: IdStrategy,
    /// Upper bound of the single request read
    pub read_buffer_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".todo-data"),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            serialization_mode: Format::Json,
            id_strategy: IdStrategy::LastLine,
            read_buffer_bytes: DEFAULT_READ_BUFFER_BYTES,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source; unset or blank values keep defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = get("TODO_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(addr) = get("TODO_LISTEN_ADDR") {
            config.listen_addr = addr.trim().to_string();
        }
        if let Some(mode) = get("TODO_SERIALIZATION_MODE") {
            config.serialization_mode = mode
                .parse::<Format>()
                .context("TODO_SERIALIZATION_MODE must be 'text' or 'json'")?;
        }
        if let Some(strategy) = get("TODO_ID_STRATEGY") {
            config.id_strategy = strategy
                .parse::<IdStrategy>()
                .context("TODO_ID_STRATEGY must be 'last-line' or 'max-scan'")?;
        }
        if let Some(bytes) = get("TODO_READ_BUFFER_BYTES") {
            let bytes: usize = bytes
                .trim()
                .parse()
                .with_context(|| format!("TODO_READ_BUFFER_BYTES is not a number: {}", bytes))?;
            anyhow::ensure!(bytes > 0, "TODO_READ_BUFFER_BYTES must be positive");
            config.read_buffer_bytes = bytes;
        }

        Ok(config)
    }

    pub fn task_path(&self) -> PathBuf {
        self.data_dir.join("task.txt")
    }

    pub fn category_path(&self) -> PathBuf {
        self.data_dir.join("category.txt")
    }

    pub fn user_path(&self) -> PathBuf {
        self.data_dir.join("user.txt")
    }
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
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.listen_addr, "0.0.0.0:9986");
        assert_eq!(config.serialization_mode, Format::Json);
        assert_eq!(config.task_path(), PathBuf::from(".todo-data/task.txt"));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("TODO_DATA_DIR", "/tmp/todo"),
            ("TODO_LISTEN_ADDR", "127.0.0.1:7000"),
            ("TODO_SERIALIZATION_MODE", "text"),
            ("TODO_ID_STRATEGY", "max-scan"),
            ("TODO_READ_BUFFER_BYTES", "4096"),
        ]))
        .unwrap();

        assert_eq!(config.user_path(), PathBuf::from("/tmp/todo/user.txt"));
        assert_eq!(config.listen_addr, "127.0.0.1:7000");
        assert_eq!(config.serialization_mode, Format::Text);
        assert_eq!(config.id_strategy, IdStrategy::MaxScan);
        assert_eq!(config.read_buffer_bytes, 4096);
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config =
            ServerConfig::from_lookup(lookup(&[("TODO_SERIALIZATION_MODE", "  ")])).unwrap();
        assert_eq!(config.serialization_mode, Format::Json);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(ServerConfig::from_lookup(lookup(&[("TODO_SERIALIZATION_MODE", "yaml")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("TODO_READ_BUFFER_BYTES", "0")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("TODO_READ_BUFFER_BYTES", "lots")])).is_err());
    }
}
