use axum::{extract::FromRequestParts, http::request::Parts};
use marquee_model::{AccessLevel, UserID, UserRole, Viewer};

use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Caller identity asserted by the authentication gateway in front of the
/// server. Browsing requires [`AccessLevel::LevelOne`].
#[derive(Debug, Clone, Copy)]
pub struct TrustedViewer(pub Viewer);

impl<S> FromRequestParts<S> for TrustedViewer
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };

        let user_id: UserID = header(USER_ID_HEADER)
            .ok_or_else(|| AppError::unauthorized("Missing user identity"))?
            .parse()
            .map_err(|_| AppError::unauthorized("Malformed user identity"))?;
        let role: UserRole = header(USER_ROLE_HEADER)
            .ok_or_else(|| AppError::unauthorized("Missing user role"))?
            .parse()
            .map_err(|_| AppError::unauthorized("Malformed user role"))?;

        let viewer = Viewer::new(user_id, role);
        if !viewer.can(AccessLevel::LevelOne) {
            return Err(AppError::forbidden("Insufficient permissions"));
        }
        Ok(TrustedViewer(viewer))
    }
}
