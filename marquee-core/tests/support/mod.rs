#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use marquee_core::database::{InMemoryTitleRepository, InMemoryUserOverlayRepository};
use marquee_core::{EngineConfig, TitleQueryEngine};
use marquee_model::{ContentType, Title, UserID, UserRole, Viewer};

/// Twelve titles with distinct creation times, one day apart. The last
/// entry is the newest.
pub fn catalog() -> Vec<Title> {
    use ContentType::{Movie, Tv};

    let rows: [(&str, ContentType, &[&str], &str, &str, u8, u16, f32); 12] = [
        ("Drishyam", Movie, &["Thriller", "Drama"], "hi", "IN", 16, 2015, 8.2),
        ("Kaithi", Movie, &["Action", "Thriller"], "ta", "IN", 16, 2019, 8.5),
        ("Panchayat", Tv, &["Comedy", "Drama"], "hi", "IN", 7, 2020, 9.0),
        ("Dark", Tv, &["Sci-Fi", "Thriller"], "de", "DE", 16, 2017, 8.7),
        ("Amélie", Movie, &["Romance", "Comedy"], "fr", "FR", 12, 2001, 8.3),
        ("Spirited Away", Movie, &["Animation", "Fantasy"], "ja", "JP", 7, 2001, 8.6),
        ("The Office", Tv, &["Comedy"], "en", "US", 12, 2005, 9.0),
        ("Parasite", Movie, &["Thriller", "Drama"], "ko", "KR", 18, 2019, 8.5),
        ("Kota Factory", Tv, &["Drama"], "hi", "IN", 12, 2019, 9.0),
        ("Lagaan", Movie, &["Drama", "Sport"], "hi", "IN", 7, 2001, 8.1),
        ("Money Heist", Tv, &["Crime", "Thriller"], "es", "ES", 18, 2017, 8.2),
        ("100% Love", Movie, &["Romance"], "te", "IN", 12, 2011, 6.9),
    ];

    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    rows.into_iter()
        .enumerate()
        .map(|(i, (name, kind, genres, lang, country, age, year, rating))| {
            Title::new(name, kind)
                .with_genres(genres.iter().copied())
                .with_languages([lang])
                .with_countries([country])
                .with_age_rating(age)
                .with_year(year)
                .with_rating(rating)
                .with_created_at(base + Duration::days(i as i64))
        })
        .collect()
}

pub fn by_name<'a>(titles: &'a [Title], name: &str) -> &'a Title {
    titles
        .iter()
        .find(|t| t.title == name)
        .unwrap_or_else(|| panic!("fixture {name} missing"))
}

pub fn viewer() -> Viewer {
    Viewer::new(UserID::new(), UserRole::User)
}

pub struct Harness {
    pub engine: TitleQueryEngine,
    pub titles: Arc<InMemoryTitleRepository>,
    pub overlays: Arc<InMemoryUserOverlayRepository>,
    pub catalog: Vec<Title>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let catalog = catalog();
        let titles = Arc::new(InMemoryTitleRepository::with_titles(catalog.clone()));
        let overlays = Arc::new(InMemoryUserOverlayRepository::new());
        let engine = TitleQueryEngine::new(titles.clone(), overlays.clone(), config);
        Self {
            engine,
            titles,
            overlays,
            catalog,
        }
    }

    pub fn title(&self, name: &str) -> &Title {
        by_name(&self.catalog, name)
    }
}
