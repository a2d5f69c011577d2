//! Convenience re-exports for callers of the query engine.

pub use super::engine::{EngineConfig, TitleQueryEngine};
pub use super::predicate::{Clause, Predicate};
pub use super::sorting::{SortOrder, TitleOrdering, TitleSortField, compile};
pub use super::types::{QuerySpec, SeenState, TitleQueryBuilder, TitleQueryParams};
pub use crate::error::{CatalogError, Result};
pub use marquee_model::{Page, TitleWithOverlay, Viewer};
