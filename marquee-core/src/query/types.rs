use crate::error::{CatalogError, Result};

pub use super::builder::TitleQueryBuilder;
pub use super::params::TitleQueryParams;

/// Relational filter on the user's seen/unseen lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SeenState {
    Seen,
    Unseen,
    #[default]
    Any,
}

impl SeenState {
    /// Wire form: `1` seen, `-1` unseen, `0` any.
    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            1 => Some(SeenState::Seen),
            -1 => Some(SeenState::Unseen),
            0 => Some(SeenState::Any),
            _ => None,
        }
    }
}

/// One browse request after parsing.
///
/// `page` and `limit` stay `None` until the engine applies its configured
/// defaults and bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub search: Option<String>,
    pub genres: Vec<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub include_movies: bool,
    pub include_tv: bool,
    pub starred_only: bool,
    pub favourite_only: bool,
    pub seen_state: SeenState,
    pub age_gte: Option<u8>,
    pub age_lte: Option<u8>,
    pub sort_by: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            search: None,
            genres: Vec::new(),
            language: None,
            country: None,
            include_movies: true,
            include_tv: true,
            starred_only: false,
            favourite_only: false,
            seen_state: SeenState::Any,
            age_gte: None,
            age_lte: None,
            sort_by: None,
            page: None,
            limit: None,
        }
    }
}

impl QuerySpec {
    pub fn builder() -> TitleQueryBuilder {
        TitleQueryBuilder::new()
    }

    /// True when any clause depends on the user's overlay.
    pub fn uses_overlay(&self) -> bool {
        self.starred_only
            || self.favourite_only
            || self.seen_state != SeenState::Any
    }
}

/// Effective pagination window after defaults and clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub limit: u32,
}

impl PageWindow {
    /// Page 0 or unset becomes 1, limit 0 or unset becomes `default_limit`,
    /// and limits above `max_limit` are clamped.
    pub fn resolve(
        page: Option<u32>,
        limit: Option<u32>,
        default_limit: u32,
        max_limit: u32,
    ) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(default_limit)
            .min(max_limit)
            .max(1);
        Self { page, limit }
    }

    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

pub(crate) fn invalid_query(
    field: &'static str,
    reason: impl Into<String>,
) -> CatalogError {
    CatalogError::InvalidQuery {
        field,
        reason: reason.into(),
    }
}

pub(crate) fn ensure(
    condition: bool,
    field: &'static str,
    reason: impl FnOnce() -> String,
) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(invalid_query(field, reason()))
    }
}
