use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

use crate::models::{
    Config, ConfigMetadata, DatabaseConfig, QueryConfig, ServerConfig,
    sources::{EnvConfig, FileConfig},
};
use crate::validation::{self, ConfigGuardRailError, ConfigWarnings};

const DEFAULT_CONFIG_LOCATIONS: [&str; 2] = ["marquee.toml", "config/marquee.toml"];

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    /// Titles are served from memory, so no database URL is needed.
    pub in_memory: bool,
    /// Directory the default config locations are resolved against.
    pub search_root: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn in_memory(mut self, in_memory: bool) -> Self {
        self.options.in_memory = in_memory;
        self
    }

    pub fn with_search_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.options.search_root = Some(root.into());
        self
    }

    /// Load `.env`, read the process environment, then resolve the file.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                dotenvy::Error::Io(_) => Ok(false),
                _ => Err(err),
            })?,
        };

        let mut load = self.load_from(EnvConfig::gather())?;
        load.config.metadata.env_file_loaded = env_file_loaded;
        Ok(load)
    }

    /// Resolve against an already gathered environment. Does not touch
    /// `.env` or the process environment.
    pub fn load_from(&self, env: EnvConfig) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let mut warnings = ConfigWarnings::default();

        if config_path.is_none() {
            warnings.push_with_hint(
                "No marquee.toml detected; using environment variables and defaults",
                "Pass --config or set MARQUEE_CONFIG_PATH to use a file",
            );
        }

        let config = self.compose_config(file_config.unwrap_or_default(), env, config_path);

        validation::check(&config)?;

        if config.database.url.is_none() && !self.options.in_memory {
            warnings.push_with_hint(
                "No database URL configured",
                "Set DATABASE_URL or database.url, or run with --in-memory",
            );
        }

        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let mut source = ConfigPathSource::default();

        if let Some(explicit) = &self.options.config_path {
            source.explicit = Some(explicit.clone());
        } else if let Some(from_env) = &env.config_path {
            source.env = Some(from_env.clone());
        } else {
            let root = self.options.search_root.as_deref().unwrap_or(Path::new(""));
            source.default = DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(|candidate| root.join(candidate))
                .find(|candidate| candidate.exists());
        }

        let Some((path, provenance)) = source.resolved_path() else {
            return Ok((None, None));
        };

        if !path.exists() {
            if provenance.is_explicit() {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        debug!(path = %path.display(), ?provenance, "reading configuration file");

        let contents = fs::read_to_string(&path).map_err(|err| ConfigLoadError::Io {
            path: path.clone(),
            source: err,
        })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
                path: path.clone(),
                source: err,
            })?;

        Ok((Some(file_config), Some(path)))
    }

    fn compose_config(
        &self,
        file: FileConfig,
        env: EnvConfig,
        config_path: Option<PathBuf>,
    ) -> Config {
        let FileConfig {
            server: file_server,
            database: file_database,
            query: file_query,
        } = file;
        let server_defaults = ServerConfig::default();
        let database_defaults = DatabaseConfig::default();
        let query_defaults = QueryConfig::default();

        let server = ServerConfig {
            host: env
                .server_host
                .or(file_server.host)
                .unwrap_or(server_defaults.host),
            port: env
                .server_port
                .or(file_server.port)
                .unwrap_or(server_defaults.port),
            cors_allowed_origins: env
                .cors_allowed_origins
                .or(file_server.cors_allowed_origins)
                .unwrap_or(server_defaults.cors_allowed_origins),
        };

        let database = DatabaseConfig {
            url: env.database_url.or(file_database.url),
            max_connections: env
                .db_max_connections
                .or(file_database.max_connections)
                .unwrap_or(database_defaults.max_connections),
        };

        let query = QueryConfig {
            default_limit: env
                .query_default_limit
                .or(file_query.default_limit)
                .unwrap_or(query_defaults.default_limit),
            max_limit: env
                .query_max_limit
                .or(file_query.max_limit)
                .unwrap_or(query_defaults.max_limit),
            create_missing_overlays: env
                .query_create_missing_overlays
                .or(file_query.create_missing_overlays)
                .unwrap_or(query_defaults.create_missing_overlays),
        };

        Config {
            server,
            database,
            query,
            metadata: ConfigMetadata {
                config_path,
                env_file_loaded: false,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file {path} does not exist")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

#[derive(Debug, Default)]
struct ConfigPathSource {
    explicit: Option<PathBuf>,
    env: Option<PathBuf>,
    default: Option<PathBuf>,
}

impl ConfigPathSource {
    fn resolved_path(&self) -> Option<(PathBuf, ConfigPathProvenance)> {
        if let Some(path) = &self.explicit {
            return Some((path.clone(), ConfigPathProvenance::Explicit));
        }
        if let Some(path) = &self.env {
            return Some((path.clone(), ConfigPathProvenance::Env));
        }
        if let Some(path) = &self.default {
            return Some((path.clone(), ConfigPathProvenance::Default));
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigPathProvenance {
    Explicit,
    Env,
    Default,
}

impl ConfigPathProvenance {
    fn is_explicit(self) -> bool {
        matches!(self, ConfigPathProvenance::Explicit | ConfigPathProvenance::Env)
    }
}
