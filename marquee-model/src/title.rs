use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::{error::ModelError, ids::TitleID};

/// Kind of catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ContentType {
    Movie,
    Tv,
}

impl ContentType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Tv => "tv",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "movie" => Ok(ContentType::Movie),
            "tv" => Ok(ContentType::Tv),
            _ => Err(ModelError::UnknownVariant {
                kind: "content type",
                value: s.to_string(),
            }),
        }
    }
}

/// A catalog record. Never mutated by the query engine.
///
/// `languages` hold ISO 639-1 codes, `countries` hold ISO 3166-1 alpha-2
/// codes. Both are tag lists: a filter matches when any tag equals the
/// requested value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Title {
    #[cfg_attr(feature = "serde", serde(rename = "_id"))]
    pub id: TitleID,
    pub title: String,
    pub original_title: String,
    #[cfg_attr(feature = "serde", serde(rename = "title_type"))]
    pub content_type: ContentType,
    pub languages: Vec<String>,
    pub genres: Vec<String>,
    pub countries: Vec<String>,
    #[cfg_attr(feature = "serde", serde(rename = "ratting"))]
    pub rating: f32,
    pub age_rating: u8,
    pub year: u16,
    #[cfg_attr(feature = "serde", serde(rename = "createdAt"))]
    pub created_at: DateTime<Utc>,
    #[cfg_attr(feature = "serde", serde(rename = "updatedAt"))]
    pub updated_at: DateTime<Utc>,
    /// Free-form catalog metadata (posters, overview, cast...). Opaque here.
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: serde_json::Value,
}

impl Title {
    /// Create a title with empty tags and `created_at = updated_at = now`.
    pub fn new(title: impl Into<String>, content_type: ContentType) -> Self {
        let title = title.into();
        let now = Utc::now();
        Self {
            id: TitleID::new(),
            original_title: title.clone(),
            title,
            content_type,
            languages: Vec::new(),
            genres: Vec::new(),
            countries: Vec::new(),
            rating: 0.0,
            age_rating: 0,
            year: 0,
            created_at: now,
            updated_at: now,
            metadata: serde_json::Value::Null,
        }
    }

    pub fn with_original_title(mut self, original: impl Into<String>) -> Self {
        self.original_title = original.into();
        self
    }

    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = countries.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_age_rating(mut self, age: u8) -> Self {
        self.age_rating = age;
        self
    }

    pub fn with_year(mut self, year: u16) -> Self {
        self.year = year;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }

    pub fn is_movie(&self) -> bool {
        self.content_type == ContentType::Movie
    }
}
