use std::cmp::Ordering;

use marquee_model::Title;

use super::{SortFieldSet, SortSpec};

macro_rules! sort_fields {
    (
        $(#[$meta:meta])*
        $name:ident, entity = $entity:literal, default = $default:ident {
            $($variant:ident => ($key:literal, $column:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl SortFieldSet for $name {
            const ENTITY: &'static str = $entity;
            const DEFAULT: Self = $name::$default;
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn key(&self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            fn column(&self) -> &'static str {
                match self {
                    $($name::$variant => $column),+
                }
            }
        }
    };
}

sort_fields! {
    /// Sortable title fields.
    TitleSortField, entity = "title", default = CreatedAt {
        CreatedAt => ("createdAt", "created_at"),
        UpdatedAt => ("updatedAt", "updated_at"),
        Year => ("year", "year"),
        Rating => ("ratting", "rating"),
        Title => ("title", "title"),
        OriginalTitle => ("original_title", "original_title"),
        AgeRating => ("age_rating", "age_rating"),
    }
}

// Allow-lists for the season, episode, link and user listings. Those
// listings share the compiler but are served by plain CRUD stores.

sort_fields! {
    SeasonSortField, entity = "season", default = CreatedAt {
        CreatedAt => ("createdAt", "created_at"),
        UpdatedAt => ("updatedAt", "updated_at"),
        AirDate => ("air_date", "air_date"),
        SeasonNumber => ("season_number", "season_number"),
        Name => ("name", "name"),
    }
}

sort_fields! {
    EpisodeSortField, entity = "episode", default = CreatedAt {
        CreatedAt => ("createdAt", "created_at"),
        UpdatedAt => ("updatedAt", "updated_at"),
        AirDate => ("air_date", "air_date"),
        EpisodeNumber => ("episode_number", "episode_number"),
        Name => ("name", "name"),
    }
}

sort_fields! {
    LinkSortField, entity = "link", default = CreatedAt {
        CreatedAt => ("createdAt", "created_at"),
        UpdatedAt => ("updatedAt", "updated_at"),
        Title => ("title", "title"),
    }
}

sort_fields! {
    UserSortField, entity = "user", default = CreatedAt {
        CreatedAt => ("createdAt", "created_at"),
        UpdatedAt => ("updatedAt", "updated_at"),
        UserName => ("userName", "user_name"),
        Email => ("email", "email"),
        Role => ("role", "role"),
        Status => ("status", "status"),
    }
}

impl TitleSortField {
    /// Ascending comparison of two titles on this field.
    pub fn compare(&self, a: &Title, b: &Title) -> Ordering {
        match self {
            TitleSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            TitleSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            TitleSortField::Year => a.year.cmp(&b.year),
            TitleSortField::Rating => a.rating.total_cmp(&b.rating),
            TitleSortField::Title => cmp_caseless(&a.title, &b.title),
            TitleSortField::OriginalTitle => {
                cmp_caseless(&a.original_title, &b.original_title)
            }
            TitleSortField::AgeRating => a.age_rating.cmp(&b.age_rating),
        }
    }
}

impl SortSpec<TitleSortField> {
    /// Total order over titles: the compiled criteria, then id ascending.
    pub fn compare(&self, a: &Title, b: &Title) -> Ordering {
        self.criteria()
            .iter()
            .map(|c| c.order.apply(c.field.compare(a, b)))
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| a.id.cmp(&b.id))
    }
}

fn cmp_caseless(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}
