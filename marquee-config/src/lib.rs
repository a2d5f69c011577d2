//! Configuration for the Marquee server.
//!
//! Values come from a TOML file, a `.env` file, and the process
//! environment. Environment values win over the file.

pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader, ConfigLoaderOptions};
pub use models::sources::{EnvConfig, FileConfig};
pub use models::{Config, ConfigMetadata, DatabaseConfig, QueryConfig, ServerConfig};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
