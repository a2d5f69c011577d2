//! Sort expression compiler.
//!
//! A sort expression is a comma-separated list of `field.direction` tokens,
//! e.g. `year.desc,title.asc`. The first token is the primary key. Each
//! sortable entity declares its own allow-list through [`SortFieldSet`].

pub mod compiler;
pub mod fields;

pub use compiler::compile;
pub use fields::{
    EpisodeSortField, LinkSortField, SeasonSortField, TitleSortField,
    UserSortField,
};

use std::{fmt, hash::Hash};

/// Allow-list of sortable fields for one entity.
pub trait SortFieldSet:
    Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static
{
    /// Entity name used in error messages.
    const ENTITY: &'static str;

    /// Field used when no expression is supplied.
    const DEFAULT: Self;

    const ALL: &'static [Self];

    /// Key as it appears in a sort expression.
    fn key(&self) -> &'static str;

    /// Storage column backing the field.
    fn column(&self) -> &'static str;

    fn parse(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.key() == key)
    }

    fn allowed_keys() -> String {
        Self::ALL
            .iter()
            .map(|field| field.key())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Some(SortOrder::Ascending)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(SortOrder::Descending)
        } else {
            None
        }
    }

    pub const fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }

    pub fn apply(&self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortCriterion<F> {
    pub field: F,
    pub order: SortOrder,
}

impl<F> SortCriterion<F> {
    pub fn new(field: F, order: SortOrder) -> Self {
        Self { field, order }
    }
}

/// A compiled, non-empty ordering. Earlier criteria take precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec<F> {
    criteria: Vec<SortCriterion<F>>,
}

impl<F: SortFieldSet> SortSpec<F> {
    pub(crate) fn from_criteria(criteria: Vec<SortCriterion<F>>) -> Self {
        debug_assert!(!criteria.is_empty());
        Self { criteria }
    }

    pub fn criteria(&self) -> &[SortCriterion<F>] {
        &self.criteria
    }

    pub fn primary(&self) -> SortCriterion<F> {
        self.criteria[0]
    }

    pub fn pairs(&self) -> Vec<(F, SortOrder)> {
        self.criteria.iter().map(|c| (c.field, c.order)).collect()
    }
}

impl<F: SortFieldSet> Default for SortSpec<F> {
    fn default() -> Self {
        Self {
            criteria: vec![SortCriterion::new(F::DEFAULT, SortOrder::Descending)],
        }
    }
}

/// Ordering accepted by title stores.
pub type TitleOrdering = SortSpec<TitleSortField>;
