use std::collections::HashSet;

use super::{SortCriterion, SortFieldSet, SortOrder, SortSpec};
use crate::error::{CatalogError, Result};

/// Compile a sort expression against the allow-list of `F`.
///
/// A missing or blank expression yields `[(F::DEFAULT, desc)]`.
pub fn compile<F: SortFieldSet>(expression: Option<&str>) -> Result<SortSpec<F>> {
    let Some(raw) = expression.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(SortSpec::default());
    };

    let mut seen = HashSet::new();
    let mut criteria = Vec::new();

    for token in raw.split(',').map(str::trim) {
        if token.is_empty() {
            return Err(CatalogError::invalid_sort(raw, "empty sort token"));
        }

        let parts: Vec<&str> = token.split('.').map(str::trim).collect();
        let [key, direction] = parts.as_slice() else {
            return Err(CatalogError::invalid_sort(
                raw,
                format!("`{token}` is not of the form field.direction"),
            ));
        };

        let field = F::parse(key).ok_or_else(|| {
            CatalogError::invalid_sort(
                raw,
                format!(
                    "`{key}` is not a sortable {} field (allowed: {})",
                    F::ENTITY,
                    F::allowed_keys()
                ),
            )
        })?;

        let order = SortOrder::parse(direction).ok_or_else(|| {
            CatalogError::invalid_sort(
                raw,
                format!("`{direction}` is not a direction (use asc or desc)"),
            )
        })?;

        if !seen.insert(field) {
            return Err(CatalogError::invalid_sort(
                raw,
                format!("`{key}` appears more than once"),
            ));
        }

        criteria.push(SortCriterion::new(field, order));
    }

    Ok(SortSpec::from_criteria(criteria))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::sorting::{
        LinkSortField, SeasonSortField, TitleSortField, UserSortField,
    };

    #[test]
    fn compiles_in_precedence_order() {
        let spec = compile::<TitleSortField>(Some("year.desc,title.asc")).unwrap();
        assert_eq!(
            spec.pairs(),
            vec![
                (TitleSortField::Year, SortOrder::Descending),
                (TitleSortField::Title, SortOrder::Ascending),
            ]
        );
    }

    #[test]
    fn missing_or_blank_uses_created_at_desc() {
        for expr in [None, Some(""), Some("   ")] {
            let spec = compile::<TitleSortField>(expr).unwrap();
            assert_eq!(
                spec.pairs(),
                vec![(TitleSortField::CreatedAt, SortOrder::Descending)]
            );
        }
    }

    #[test]
    fn direction_is_case_insensitive_and_tokens_are_trimmed() {
        let spec = compile::<TitleSortField>(Some(" ratting.DESC , createdAt.Asc ")).unwrap();
        assert_eq!(
            spec.pairs(),
            vec![
                (TitleSortField::Rating, SortOrder::Descending),
                (TitleSortField::CreatedAt, SortOrder::Ascending),
            ]
        );
    }

    #[test]
    fn rejects_malformed_tokens() {
        for expr in [
            "year.sideways",
            "year",
            "year.desc.extra",
            "budget.desc",
            "year.desc,",
            "year.desc,year.asc",
        ] {
            let err = compile::<TitleSortField>(Some(expr)).unwrap_err();
            assert!(
                matches!(err, CatalogError::InvalidSortExpression { .. }),
                "{expr} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn allow_lists_are_per_entity() {
        assert!(compile::<LinkSortField>(Some("year.desc")).is_err());
        assert!(compile::<UserSortField>(Some("userName.asc")).is_ok());
        assert!(compile::<TitleSortField>(Some("userName.asc")).is_err());
    }

    #[test]
    fn duplicate_fields_are_rejected_for_every_entity() {
        let err = compile::<UserSortField>(Some("email.asc,email.desc")).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidSortExpression { .. }));

        let spec =
            compile::<SeasonSortField>(Some("season_number.asc,air_date.desc")).unwrap();
        assert_eq!(spec.pairs().len(), 2);
    }
}
