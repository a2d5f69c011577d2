//! Predicates over [`Title`] expressed as data.
//!
//! A [`Predicate`] is a conjunction of [`Clause`]s. Stores translate it to
//! their own query language; [`Predicate::matches`] evaluates it in memory.

use std::collections::BTreeSet;

use marquee_model::{ContentType, OverlayList, Title, TitleID};

/// Tag-list columns of a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagField {
    Genres,
    Languages,
    Countries,
}

impl TagField {
    pub const fn column(&self) -> &'static str {
        match self {
            TagField::Genres => "genres",
            TagField::Languages => "languages",
            TagField::Countries => "countries",
        }
    }

    pub fn values<'a>(&self, title: &'a Title) -> &'a [String] {
        match self {
            TagField::Genres => &title.genres,
            TagField::Languages => &title.languages,
            TagField::Countries => &title.countries,
        }
    }
}

/// Numeric columns that accept range filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeField {
    AgeRating,
}

impl RangeField {
    pub const fn column(&self) -> &'static str {
        match self {
            RangeField::AgeRating => "age_rating",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            RangeField::AgeRating => "age",
        }
    }

    pub fn value(&self, title: &Title) -> i64 {
        match self {
            RangeField::AgeRating => i64::from(title.age_rating),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Case-insensitive literal substring of the title or original title.
    TextMatch { needle: String },
    /// Inclusive bounds; a missing bound is unconstrained.
    RangeMatch {
        field: RangeField,
        gte: Option<i64>,
        lte: Option<i64>,
    },
    /// Any tag equals any of the lowercase values.
    TagMembership { field: TagField, any_of: Vec<String> },
    /// Title id is in the user's list.
    SetMembership {
        list: OverlayList,
        ids: BTreeSet<TitleID>,
    },
    ContentTypeMatch(ContentType),
    MatchNone,
}

impl Clause {
    pub fn text(needle: impl Into<String>) -> Self {
        Clause::TextMatch {
            needle: needle.into(),
        }
    }

    pub fn tags<I, S>(field: TagField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Clause::TagMembership {
            field,
            any_of: values
                .into_iter()
                .map(|v| v.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn matches(&self, title: &Title) -> bool {
        match self {
            Clause::TextMatch { needle } => {
                let needle = needle.to_lowercase();
                title.title.to_lowercase().contains(&needle)
                    || title.original_title.to_lowercase().contains(&needle)
            }
            Clause::RangeMatch { field, gte, lte } => {
                let value = field.value(title);
                gte.is_none_or(|min| value >= min)
                    && lte.is_none_or(|max| value <= max)
            }
            Clause::TagMembership { field, any_of } => field
                .values(title)
                .iter()
                .any(|tag| any_of.contains(&tag.to_lowercase())),
            Clause::SetMembership { ids, .. } => ids.contains(&title.id),
            Clause::ContentTypeMatch(content_type) => {
                title.content_type == *content_type
            }
            Clause::MatchNone => false,
        }
    }

    /// True when no title can satisfy the clause.
    pub fn is_unsatisfiable(&self) -> bool {
        match self {
            Clause::MatchNone => true,
            Clause::SetMembership { ids, .. } => ids.is_empty(),
            Clause::TagMembership { any_of, .. } => any_of.is_empty(),
            Clause::RangeMatch {
                gte: Some(min),
                lte: Some(max),
                ..
            } => min > max,
            _ => false,
        }
    }
}

/// Conjunction of clauses. The empty predicate matches every title.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn and_all(mut self, other: Predicate) -> Self {
        self.clauses.extend(other.clauses);
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, title: &Title) -> bool {
        self.clauses.iter().all(|clause| clause.matches(title))
    }

    pub fn is_unsatisfiable(&self) -> bool {
        self.clauses.iter().any(Clause::is_unsatisfiable)
    }
}

impl FromIterator<Clause> for Predicate {
    fn from_iter<T: IntoIterator<Item = Clause>>(iter: T) -> Self {
        Self {
            clauses: iter.into_iter().collect(),
        }
    }
}
