use super::types::{QuerySpec, SeenState};

/// Fluent API for building title queries
#[derive(Debug, Clone, Default)]
pub struct TitleQueryBuilder {
    spec: QuerySpec,
}

impl TitleQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // === Catalog filters ===

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.spec.search = Some(term.into());
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.spec.genres.push(genre.into());
        self
    }

    pub fn genres(mut self, genres: Vec<String>) -> Self {
        self.spec.genres = genres;
        self
    }

    pub fn language(mut self, code: impl Into<String>) -> Self {
        self.spec.language = Some(code.into());
        self
    }

    pub fn country(mut self, code: impl Into<String>) -> Self {
        self.spec.country = Some(code.into());
        self
    }

    pub fn movies_only(mut self) -> Self {
        self.spec.include_movies = true;
        self.spec.include_tv = false;
        self
    }

    pub fn tv_only(mut self) -> Self {
        self.spec.include_movies = false;
        self.spec.include_tv = true;
        self
    }

    pub fn include_movies(mut self, include: bool) -> Self {
        self.spec.include_movies = include;
        self
    }

    pub fn include_tv(mut self, include: bool) -> Self {
        self.spec.include_tv = include;
        self
    }

    pub fn age_between(mut self, gte: u8, lte: u8) -> Self {
        self.spec.age_gte = Some(gte);
        self.spec.age_lte = Some(lte);
        self
    }

    pub fn age_at_least(mut self, gte: u8) -> Self {
        self.spec.age_gte = Some(gte);
        self
    }

    pub fn age_at_most(mut self, lte: u8) -> Self {
        self.spec.age_lte = Some(lte);
        self
    }

    // === Overlay filters ===

    pub fn starred_only(mut self) -> Self {
        self.spec.starred_only = true;
        self
    }

    pub fn favourite_only(mut self) -> Self {
        self.spec.favourite_only = true;
        self
    }

    pub fn seen(mut self, state: SeenState) -> Self {
        self.spec.seen_state = state;
        self
    }

    // === Ordering and window ===

    pub fn sort_by(mut self, expression: impl Into<String>) -> Self {
        self.spec.sort_by = Some(expression.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.spec.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.spec.limit = Some(limit);
        self
    }

    pub fn build(self) -> QuerySpec {
        self.spec
    }
}
