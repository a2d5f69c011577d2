//! Title browsing: parameters, predicates, ordering, and the query engine.

pub mod builder;
pub mod engine;
pub mod filtering;
pub mod page;
pub mod params;
pub mod predicate;
pub mod prelude;
pub mod sorting;
pub mod types;

pub use engine::{EngineConfig, TitleQueryEngine};
pub use filtering::FilterPredicateBuilder;
pub use predicate::{Clause, Predicate, RangeField, TagField};
pub use sorting::{SortCriterion, SortFieldSet, SortOrder, SortSpec, TitleOrdering, TitleSortField};
pub use types::{PageWindow, QuerySpec, SeenState, TitleQueryBuilder, TitleQueryParams};
