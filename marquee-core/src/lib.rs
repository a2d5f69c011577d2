//! Title query-and-overlay engine for the Marquee media catalog.
//!
//! The crate turns a flat set of browse parameters into a validated
//! [`query::QuerySpec`], composes it with the caller's per-user overlay, and
//! runs a counted, paginated fetch against a [`database::ports`] title store.

pub mod database;
pub mod error;
pub mod overlay;
pub mod query;

pub use error::{CatalogError, Result};
pub use marquee_model as model;

pub use overlay::{OverlaySets, UserOverlayResolver};
pub use query::engine::{EngineConfig, TitleQueryEngine};
pub use query::types::{QuerySpec, SeenState, TitleQueryBuilder, TitleQueryParams};

#[cfg(feature = "postgres")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
