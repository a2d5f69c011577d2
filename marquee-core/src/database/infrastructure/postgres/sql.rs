//! Translation of predicates and orderings into Postgres SQL fragments.

use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::query::predicate::{Clause, Predicate};
use crate::query::sorting::{SortFieldSet, TitleOrdering, TitleSortField};

pub(crate) const TITLE_COLUMNS: &str = "id, title, original_title, content_type, \
     languages, genres, countries, rating, age_rating, year, metadata, \
     created_at, updated_at";

/// Appends ` WHERE ...` for every clause of `predicate`.
pub(crate) fn push_where(qb: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate) {
    qb.push(" WHERE TRUE");
    for clause in predicate.clauses() {
        qb.push(" AND ");
        push_clause(qb, clause);
    }
}

fn push_clause(qb: &mut QueryBuilder<'_, Postgres>, clause: &Clause) {
    match clause {
        Clause::TextMatch { needle } => {
            let pattern = format!("%{}%", escape_like_literal(needle));
            qb.push("(title ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" ESCAPE E'\\\\' OR original_title ILIKE ");
            qb.push_bind(pattern);
            qb.push(" ESCAPE E'\\\\')");
        }
        Clause::RangeMatch { field, gte, lte } => {
            qb.push("(TRUE");
            if let Some(min) = gte {
                qb.push(format!(" AND {} >= ", field.column()));
                qb.push_bind(*min);
            }
            if let Some(max) = lte {
                qb.push(format!(" AND {} <= ", field.column()));
                qb.push_bind(*max);
            }
            qb.push(")");
        }
        Clause::TagMembership { field, any_of } => {
            qb.push(format!(
                "EXISTS (SELECT 1 FROM unnest({}) AS tag WHERE lower(tag) = ANY(",
                field.column()
            ));
            qb.push_bind(any_of.clone());
            qb.push("))");
        }
        Clause::SetMembership { ids, .. } => {
            let ids: Vec<Uuid> = ids.iter().map(|id| id.to_uuid()).collect();
            qb.push("id = ANY(");
            qb.push_bind(ids);
            qb.push(")");
        }
        Clause::ContentTypeMatch(content_type) => {
            qb.push("content_type = ");
            qb.push_bind(content_type.as_str());
        }
        Clause::MatchNone => {
            qb.push("FALSE");
        }
    }
}

/// Appends ` ORDER BY ...` with title id as the final tie-breaker.
pub(crate) fn push_order_by(qb: &mut QueryBuilder<'_, Postgres>, ordering: &TitleOrdering) {
    qb.push(" ORDER BY ");
    for criterion in ordering.criteria() {
        qb.push(sort_expression(criterion.field));
        qb.push(" ");
        qb.push(criterion.order.as_sql());
        qb.push(", ");
    }
    qb.push("id ASC");
}

fn sort_expression(field: TitleSortField) -> String {
    match field {
        // Byte order so Postgres pages agree with the in-memory store.
        TitleSortField::Title | TitleSortField::OriginalTitle => {
            format!("lower({}) COLLATE \"C\"", field.column())
        }
        _ => field.column().to_string(),
    }
}

pub(crate) fn escape_like_literal(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '%' => out.push_str("\\%"),
            '_' => out.push_str("\\_"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::predicate::{RangeField, TagField};
    use crate::query::sorting::compile;
    use marquee_model::{ContentType, OverlayList, TitleID};

    fn where_sql(predicate: &Predicate) -> String {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT id FROM titles");
        push_where(&mut qb, predicate);
        qb.sql().to_string()
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like_literal("100%_a\\b"), "100\\%\\_a\\\\b");
    }

    #[test]
    fn empty_predicate_is_unconstrained() {
        assert_eq!(where_sql(&Predicate::all()), "SELECT id FROM titles WHERE TRUE");
    }

    #[test]
    fn clauses_are_conjoined_with_placeholders() {
        let predicate = Predicate::all()
            .and(Clause::text("love"))
            .and(Clause::tags(TagField::Genres, ["Drama"]))
            .and(Clause::RangeMatch {
                field: RangeField::AgeRating,
                gte: Some(12),
                lte: None,
            })
            .and(Clause::SetMembership {
                list: OverlayList::Starred,
                ids: [TitleID::new()].into_iter().collect(),
            })
            .and(Clause::ContentTypeMatch(ContentType::Tv));

        let sql = where_sql(&predicate);
        assert!(sql.contains("(title ILIKE $1 ESCAPE E'\\\\' OR original_title ILIKE $2 ESCAPE E'\\\\')"));
        assert!(sql.contains("EXISTS (SELECT 1 FROM unnest(genres) AS tag WHERE lower(tag) = ANY($3))"));
        assert!(sql.contains("(TRUE AND age_rating >= $4)"));
        assert!(sql.contains("id = ANY($5)"));
        assert!(sql.contains("content_type = $6"));
    }

    #[test]
    fn match_none_renders_false() {
        assert!(where_sql(&Predicate::all().and(Clause::MatchNone)).ends_with("AND FALSE"));
    }

    #[test]
    fn ordering_ends_with_id_tie_breaker() {
        let ordering = compile::<TitleSortField>(Some("year.desc,title.asc")).unwrap();
        let mut qb = QueryBuilder::<Postgres>::new("SELECT id FROM titles");
        push_order_by(&mut qb, &ordering);
        assert_eq!(
            qb.sql(),
            "SELECT id FROM titles ORDER BY year DESC, lower(title) COLLATE \"C\" ASC, id ASC"
        );
    }
}
