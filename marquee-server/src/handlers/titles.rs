use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use base64::{
    Engine,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use marquee_core::TitleQueryParams;
use marquee_model::{Page, TitleID, TitleWithOverlay};
use tracing::instrument;

use crate::{
    AppState,
    errors::{AppError, AppResult},
    identity::TrustedViewer,
};

/// Title ids travel base64url-encoded; padding is optional.
const TITLE_ID_ENCODING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub fn encode_title_id(id: TitleID) -> String {
    TITLE_ID_ENCODING.encode(id.to_string())
}

pub fn decode_title_id(raw: &str) -> Option<TitleID> {
    let bytes = TITLE_ID_ENCODING.decode(raw).ok()?;
    String::from_utf8(bytes).ok()?.parse().ok()
}

/// Browse titles with filters, ordering, and pagination.
#[instrument(skip_all, fields(user_id = %viewer.user_id))]
pub async fn list_titles_handler(
    State(state): State<AppState>,
    TrustedViewer(viewer): TrustedViewer,
    params: Result<Query<TitleQueryParams>, QueryRejection>,
) -> AppResult<Json<Page<TitleWithOverlay>>> {
    let Query(params) = params?;
    let page = state
        .engine
        .find_all_titles_for_user(params, &viewer)
        .await?;
    Ok(Json(page))
}

/// Title detail with the caller's flags.
#[instrument(skip_all, fields(user_id = %viewer.user_id))]
pub async fn get_title_handler(
    State(state): State<AppState>,
    TrustedViewer(viewer): TrustedViewer,
    Path(encoded): Path<String>,
) -> AppResult<Json<TitleWithOverlay>> {
    let id = decode_title_id(&encoded).ok_or_else(|| AppError::bad_request("Invalid id"))?;
    let title = state.engine.find_one(id, &viewer).await?;
    Ok(Json(title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_with_or_without_padding() {
        let id = TitleID::new();
        let encoded = encode_title_id(id);
        assert_eq!(decode_title_id(&encoded), Some(id));
        assert_eq!(decode_title_id(encoded.trim_end_matches('=')), Some(id));
    }

    #[test]
    fn garbage_ids_are_rejected() {
        assert_eq!(decode_title_id("!!!"), None);
        assert_eq!(decode_title_id(&TITLE_ID_ENCODING.encode("not-a-uuid")), None);
    }
}
