use marquee_model::{ModelError, TitleID, UserID};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid sort expression `{expression}`: {reason}")]
    InvalidSortExpression { expression: String, reason: String },

    #[error("Invalid {field} range: gte {gte} is greater than lte {lte}")]
    InvalidRange { field: &'static str, gte: i64, lte: i64 },

    #[error("Invalid query parameter `{field}`: {reason}")]
    InvalidQuery { field: &'static str, reason: String },

    #[error("No overlay record for user {0}")]
    UserOverlayMissing(UserID),

    #[error("Title not found: {0}")]
    TitleNotFound(TitleID),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl CatalogError {
    /// True for errors caused by the request itself, detected before any
    /// store access.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CatalogError::InvalidSortExpression { .. }
                | CatalogError::InvalidRange { .. }
                | CatalogError::InvalidQuery { .. }
        )
    }

    pub(crate) fn invalid_sort(
        expression: &str,
        reason: impl Into<String>,
    ) -> Self {
        CatalogError::InvalidSortExpression {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<ModelError> for CatalogError {
    fn from(err: ModelError) -> Self {
        CatalogError::InvalidQuery {
            field: "id",
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
