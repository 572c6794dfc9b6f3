//! Server configuration: command-line arguments and the files they point to.

use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{domain::EmissionFactorTable, infrastructure::auth::UserRecord};

/// Command-line arguments of `verdant-server`
#[derive(Debug, Clone, Parser)]
#[command(name = "verdant-server", version, about = "Realtime event server for Verdant")]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// JSON file with `[{"token", "id", "display_name"}]` entries
    #[arg(long, value_name = "FILE")]
    pub users: Option<PathBuf>,

    /// JSON file with `{"<category>": {"<unit>": factor}}`; replaces the built-in table
    #[arg(long, value_name = "FILE")]
    pub emission_factors: Option<PathBuf>,

    /// Bearer token required on `POST /api/events`
    #[arg(long, value_name = "TOKEN")]
    pub publish_token: Option<String>,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid user record: {0}")]
    InvalidUser(#[from] crate::domain::ValueObjectError),
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: String,
    pub users: Vec<UserRecord>,
    pub emission_factors: EmissionFactorTable,
    pub publish_token: Option<String>,
}

impl ServerConfig {
    /// Resolve arguments, reading the referenced files.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a file cannot be read or parsed.
    pub fn from_args(args: &ServerArgs) -> Result<Self, ConfigError> {
        let users = match &args.users {
            Some(path) => read_json(path)?,
            None => Vec::new(),
        };
        let emission_factors = match &args.emission_factors {
            Some(path) => read_json(path)?,
            None => EmissionFactorTable::default(),
        };
        let publish_token = args
            .publish_token
            .as_ref()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        Ok(Self {
            addr: format!("{}:{}", args.host, args.port),
            users,
            emission_factors,
            publish_token,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ActivityCategory;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "verdant-config-{}-{}",
            std::process::id(),
            name
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_args() {
        // テスト項目: 引数なしのときのデフォルト設定
        // given (前提条件):
        let args = ServerArgs::parse_from(["verdant-server"]);

        // when (操作):
        let config = ServerConfig::from_args(&args).unwrap();

        // then (期待する結果):
        assert_eq!(config.addr, "127.0.0.1:8080");
        assert!(config.users.is_empty());
        assert_eq!(config.emission_factors, EmissionFactorTable::default());
        assert_eq!(config.publish_token, None);
    }

    #[test]
    fn test_reads_users_and_factors_files() {
        // テスト項目: ユーザーファイルと排出係数ファイルを読み込める
        // given (前提条件):
        let users = temp_file(
            "users.json",
            r#"[{"token": "t-1", "id": "1", "display_name": "Alice"}]"#,
        );
        let factors = temp_file("factors.json", r#"{"transportation": {"car_km": 0.3}}"#);
        let args = ServerArgs::parse_from([
            "verdant-server",
            "--port",
            "9000",
            "--users",
            users.to_str().unwrap(),
            "--emission-factors",
            factors.to_str().unwrap(),
            "--publish-token",
            "  secret  ",
        ]);

        // when (操作):
        let config = ServerConfig::from_args(&args).unwrap();

        // then (期待する結果):
        assert_eq!(config.addr, "127.0.0.1:9000");
        assert_eq!(config.users.len(), 1);
        assert_eq!(config.users[0].display_name, "Alice");
        assert_eq!(
            config
                .emission_factors
                .factor(ActivityCategory::Transportation, "car_km"),
            Some(0.3)
        );
        assert_eq!(config.publish_token.as_deref(), Some("secret"));

        fs::remove_file(users).ok();
        fs::remove_file(factors).ok();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        // テスト項目: 存在しないファイルは Io エラー
        // given (前提条件):
        let args = ServerArgs::parse_from([
            "verdant-server",
            "--users",
            "/nonexistent/verdant/users.json",
        ]);

        // when (操作):
        let result = ServerConfig::from_args(&args);

        // then (期待する結果):
        assert!(matches!(result.unwrap_err(), ConfigError::Io { .. }));
    }

    #[test]
    fn test_malformed_file_is_json_error() {
        // テスト項目: JSON として不正なファイルは Json エラー
        // given (前提条件):
        let factors = temp_file("broken.json", "{not json");
        let args = ServerArgs::parse_from([
            "verdant-server",
            "--emission-factors",
            factors.to_str().unwrap(),
        ]);

        // when (操作):
        let result = ServerConfig::from_args(&args);

        // then (期待する結果):
        assert!(matches!(result.unwrap_err(), ConfigError::Json { .. }));
        fs::remove_file(factors).ok();
    }
}
