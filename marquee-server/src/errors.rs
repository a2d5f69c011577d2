use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use marquee_core::CatalogError;
use serde_json::json;
use std::fmt;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "message": self.message,
                "status": self.status.as_u16(),
            }
        }));

        (self.status, body).into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            err if err.is_validation() => Self::bad_request(err.to_string()),
            CatalogError::TitleNotFound(id) => Self::not_found(format!("Title {} not found", id)),
            err => {
                tracing::error!(error = %err, "catalog operation failed");
                Self::internal("Internal server error")
            }
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(err: QueryRejection) -> Self {
        Self::bad_request(err.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_model::TitleID;

    #[test]
    fn catalog_errors_map_to_statuses() {
        let invalid = CatalogError::InvalidSortExpression {
            expression: "year.sideways".into(),
            reason: "bad direction".into(),
        };
        assert_eq!(AppError::from(invalid).status, StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::from(CatalogError::TitleNotFound(TitleID::new())).status,
            StatusCode::NOT_FOUND
        );
        let store = AppError::from(CatalogError::StoreUnavailable("password=hunter2".into()));
        assert_eq!(store.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!store.message.contains("hunter2"));
    }
}
