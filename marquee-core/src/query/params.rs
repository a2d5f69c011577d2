use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::types::{QuerySpec, SeenState, ensure, invalid_query};
use crate::error::Result;

/// Accepted bounds for `age.gte` / `age.lte`.
pub const AGE_BOUNDS: std::ops::RangeInclusive<u8> = 2..=26;

/// Flat browse parameters exactly as they arrive on the query string.
///
/// Values may arrive as strings, numbers or booleans. Each is kept as text
/// so that malformed input is reported per field by
/// [`TitleQueryParams::into_spec`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleQueryParams {
    #[serde(deserialize_with = "scalar")]
    pub search: Option<String>,
    /// Comma-separated list of genres.
    #[serde(deserialize_with = "scalar")]
    pub genre: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub language: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub movie: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub tv: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub starred: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub favourite: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub seen: Option<String>,
    #[serde(rename = "age.gte", deserialize_with = "scalar")]
    pub age_gte: Option<String>,
    #[serde(rename = "age.lte", deserialize_with = "scalar")]
    pub age_lte: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub country: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub sort_by: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub limit: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub page: Option<String>,
}

impl TitleQueryParams {
    /// Validate and convert into a [`QuerySpec`].
    ///
    /// Only the shape of each value is checked here. Cross-field rules such
    /// as `age.gte <= age.lte` are enforced by the filter builder.
    pub fn into_spec(self) -> Result<QuerySpec> {
        let seen_state = match non_empty(self.seen) {
            None => SeenState::Any,
            Some(raw) => {
                let code: i8 = parse_number("seen", &raw)?;
                SeenState::from_code(code).ok_or_else(|| {
                    invalid_query("seen", format!("expected -1, 0 or 1, got {raw}"))
                })?
            }
        };

        Ok(QuerySpec {
            search: non_empty(self.search),
            genres: non_empty(self.genre)
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|g| !g.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            language: non_empty(self.language),
            country: non_empty(self.country),
            include_movies: parse_flag("movie", self.movie, true)?,
            include_tv: parse_flag("tv", self.tv, true)?,
            starred_only: parse_flag("starred", self.starred, false)?,
            favourite_only: parse_flag("favourite", self.favourite, false)?,
            seen_state,
            age_gte: parse_age("age.gte", self.age_gte)?,
            age_lte: parse_age("age.lte", self.age_lte)?,
            sort_by: non_empty(self.sort_by),
            page: non_empty(self.page)
                .map(|raw| parse_number("page", &raw))
                .transpose()?,
            limit: non_empty(self.limit)
                .map(|raw| parse_number("limit", &raw))
                .transpose()?,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Bool(bool),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

fn scalar<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
        Scalar::Text(text) => text,
        Scalar::Bool(flag) => flag.to_string(),
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Signed(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
    }))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number<T: FromStr>(field: &'static str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| invalid_query(field, format!("`{raw}` is not a valid number")))
}

fn parse_flag(
    field: &'static str,
    value: Option<String>,
    default: bool,
) -> Result<bool> {
    let Some(raw) = non_empty(value) else {
        return Ok(default);
    };
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(invalid_query(field, format!("expected 0, 1, true or false, got {raw}"))),
    }
}

fn parse_age(field: &'static str, value: Option<String>) -> Result<Option<u8>> {
    let Some(raw) = non_empty(value) else {
        return Ok(None);
    };
    let age: u8 = parse_number(field, &raw)?;
    ensure(AGE_BOUNDS.contains(&age), field, || {
        format!(
            "{age} is outside {}..={}",
            AGE_BOUNDS.start(),
            AGE_BOUNDS.end()
        )
    })?;
    Ok(Some(age))
}
