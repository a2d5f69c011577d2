use marquee_model::ContentType;

use super::predicate::{Clause, Predicate, RangeField, TagField};
use super::types::QuerySpec;
use crate::error::{CatalogError, Result};

/// Translates the catalog half of a [`QuerySpec`] into a [`Predicate`].
///
/// Overlay filters (starred, favourite, seen) are added separately by
/// [`crate::overlay::OverlaySets::predicate_for`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterPredicateBuilder;

impl FilterPredicateBuilder {
    pub fn build(spec: &QuerySpec) -> Result<Predicate> {
        let mut predicate = Predicate::all();

        if let Some(term) = spec.search.as_deref().map(str::trim)
            && !term.is_empty()
        {
            predicate = predicate.and(Clause::text(term));
        }

        if !spec.genres.is_empty() {
            predicate = predicate.and(Clause::tags(TagField::Genres, &spec.genres));
        }

        if let Some(language) = spec.language.as_deref() {
            predicate = predicate.and(Clause::tags(TagField::Languages, [language]));
        }

        if let Some(country) = spec.country.as_deref() {
            predicate = predicate.and(Clause::tags(TagField::Countries, [country]));
        }

        predicate = match (spec.include_movies, spec.include_tv) {
            (true, true) => predicate,
            (true, false) => predicate.and(Clause::ContentTypeMatch(ContentType::Movie)),
            (false, true) => predicate.and(Clause::ContentTypeMatch(ContentType::Tv)),
            (false, false) => predicate.and(Clause::MatchNone),
        };

        if let Some(clause) = Self::age_clause(spec)? {
            predicate = predicate.and(clause);
        }

        Ok(predicate)
    }

    fn age_clause(spec: &QuerySpec) -> Result<Option<Clause>> {
        let field = RangeField::AgeRating;
        match (spec.age_gte, spec.age_lte) {
            (None, None) => Ok(None),
            (Some(gte), Some(lte)) if gte > lte => Err(CatalogError::InvalidRange {
                field: field.name(),
                gte: i64::from(gte),
                lte: i64::from(lte),
            }),
            (gte, lte) => Ok(Some(Clause::RangeMatch {
                field,
                gte: gte.map(i64::from),
                lte: lte.map(i64::from),
            })),
        }
    }
}
