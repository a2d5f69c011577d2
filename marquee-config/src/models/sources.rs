use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::util::{parse_bool_var, parse_csv_var, parse_number_var, string_var};

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub database: FileDatabaseConfig,
    #[serde(default)]
    pub query: FileQueryConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors_allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileDatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileQueryConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_missing_overlays: Option<bool>,
}

/// Overrides read from the process environment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub database_url: Option<String>,
    pub db_max_connections: Option<u32>,
    pub query_default_limit: Option<u32>,
    pub query_max_limit: Option<u32>,
    pub query_create_missing_overlays: Option<bool>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self {
            config_path: string_var("MARQUEE_CONFIG_PATH").map(PathBuf::from),
            server_host: string_var("SERVER_HOST"),
            server_port: parse_number_var("SERVER_PORT"),
            cors_allowed_origins: parse_csv_var("CORS_ALLOWED_ORIGINS"),
            database_url: string_var("DATABASE_URL"),
            db_max_connections: parse_number_var("DB_MAX_CONNECTIONS"),
            query_default_limit: parse_number_var("QUERY_DEFAULT_LIMIT"),
            query_max_limit: parse_number_var("QUERY_MAX_LIMIT"),
            query_create_missing_overlays: parse_bool_var("QUERY_CREATE_MISSING_OVERLAYS"),
        }
    }
}
