use std::sync::Arc;

use marquee_model::{Page, TitleID, TitleWithOverlay, Viewer};
use tracing::{debug, instrument, warn};

use super::filtering::FilterPredicateBuilder;
use super::page::assemble;
use super::sorting::{TitleSortField, compile};
use super::types::{PageWindow, QuerySpec, TitleQueryParams};
use crate::database::ports::{TitleRepository, UserOverlayRepository};
use crate::error::{CatalogError, Result};
use crate::overlay::UserOverlayResolver;

pub const DEFAULT_LIMIT: u32 = 5;
pub const DEFAULT_MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Page size when the request gives none (or 0).
    pub default_limit: u32,
    /// Larger page sizes are clamped to this.
    pub max_limit: u32,
    /// Persist an empty overlay record for users seen without one.
    pub create_missing_overlays: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
            create_missing_overlays: false,
        }
    }
}

/// Answers browse requests: filter, order, paginate, and annotate titles
/// with the viewer's overlay flags.
///
/// Stateless; share it behind an `Arc`.
#[derive(Clone)]
pub struct TitleQueryEngine {
    titles: Arc<dyn TitleRepository>,
    overlays: UserOverlayResolver,
    config: EngineConfig,
}

impl std::fmt::Debug for TitleQueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TitleQueryEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TitleQueryEngine {
    pub fn new(
        titles: Arc<dyn TitleRepository>,
        overlays: Arc<dyn UserOverlayRepository>,
        config: EngineConfig,
    ) -> Self {
        Self {
            titles,
            overlays: UserOverlayResolver::new(overlays, config.create_missing_overlays),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parse raw browse parameters and run [`find_all`](Self::find_all).
    pub async fn find_all_titles_for_user(
        &self,
        params: TitleQueryParams,
        viewer: &Viewer,
    ) -> Result<Page<TitleWithOverlay>> {
        let spec = params.into_spec()?;
        self.find_all(&spec, viewer).await
    }

    #[instrument(
        skip(self, spec, viewer),
        fields(user_id = %viewer.user_id, page = ?spec.page, limit = ?spec.limit)
    )]
    pub async fn find_all(
        &self,
        spec: &QuerySpec,
        viewer: &Viewer,
    ) -> Result<Page<TitleWithOverlay>> {
        // Validation happens before any store is touched.
        let ordering = compile::<TitleSortField>(spec.sort_by.as_deref())?;
        let catalog = FilterPredicateBuilder::build(spec)?;
        let window = PageWindow::resolve(
            spec.page,
            spec.limit,
            self.config.default_limit,
            self.config.max_limit,
        );

        let overlay = self.overlays.resolve_or_empty(viewer.user_id).await?;
        let predicate = catalog.and_all(overlay.predicate_for(spec));

        if predicate.is_unsatisfiable() {
            debug!("predicate matches nothing; skipping title store");
            return Ok(assemble(Vec::new(), 0, window.page, window.limit));
        }

        let (total, titles) = tokio::try_join!(
            self.titles.count(&predicate),
            self.titles
                .find(&predicate, &ordering, window.skip(), window.limit),
        )
        .inspect_err(|err| warn!(error = %err, "title store query failed"))?;

        debug!(total_results = total, returned = titles.len(), "title query complete");

        let results = titles
            .into_iter()
            .map(|title| overlay.annotate(title))
            .collect();
        Ok(assemble(results, total, window.page, window.limit))
    }

    /// Single title with the viewer's flags.
    #[instrument(skip(self, viewer), fields(user_id = %viewer.user_id))]
    pub async fn find_one(
        &self,
        id: TitleID,
        viewer: &Viewer,
    ) -> Result<TitleWithOverlay> {
        let (title, overlay) = tokio::try_join!(
            self.titles.get(id),
            self.overlays.resolve_or_empty(viewer.user_id),
        )?;
        let title = title.ok_or(CatalogError::TitleNotFound(id))?;
        Ok(overlay.annotate(title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::ports::titles::MockTitleRepository;
    use crate::database::ports::user_overlays::MockUserOverlayRepository;
    use crate::overlay::OverlaySets;
    use crate::query::types::TitleQueryBuilder;
    use marquee_model::{ContentType, Title, UserID, UserRole};

    fn viewer() -> Viewer {
        Viewer::new(UserID::new(), UserRole::User)
    }

    fn untouched_stores() -> (MockTitleRepository, MockUserOverlayRepository) {
        let mut titles = MockTitleRepository::new();
        titles.expect_count().times(0);
        titles.expect_find().times(0);
        titles.expect_get().times(0);
        let mut overlays = MockUserOverlayRepository::new();
        overlays.expect_get_by_user_id().times(0);
        overlays.expect_ensure().times(0);
        (titles, overlays)
    }

    fn engine(
        titles: MockTitleRepository,
        overlays: MockUserOverlayRepository,
    ) -> TitleQueryEngine {
        TitleQueryEngine::new(Arc::new(titles), Arc::new(overlays), EngineConfig::default())
    }

    #[tokio::test]
    async fn invalid_sort_never_touches_a_store() {
        let (titles, overlays) = untouched_stores();
        let spec = TitleQueryBuilder::new().sort_by("year.sideways").build();
        let err = engine(titles, overlays)
            .find_all(&spec, &viewer())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidSortExpression { .. }));
    }

    #[tokio::test]
    async fn invalid_range_never_touches_a_store() {
        let (titles, overlays) = untouched_stores();
        let spec = TitleQueryBuilder::new().age_between(18, 12).build();
        let err = engine(titles, overlays)
            .find_all(&spec, &viewer())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRange { .. }));
    }

    #[tokio::test]
    async fn malformed_params_never_touch_a_store() {
        let (titles, overlays) = untouched_stores();
        let params = TitleQueryParams {
            movie: Some("2".into()),
            ..TitleQueryParams::default()
        };
        let err = engine(titles, overlays)
            .find_all_titles_for_user(params, &viewer())
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn store_failure_surfaces_unchanged() {
        let mut titles = MockTitleRepository::new();
        titles
            .expect_count()
            .returning(|_| Err(CatalogError::StoreUnavailable("connection reset".into())));
        titles.expect_find().returning(|_, _, _, _| Ok(Vec::new()));
        let mut overlays = MockUserOverlayRepository::new();
        overlays
            .expect_get_by_user_id()
            .returning(|_| Ok(Some(OverlaySets::empty())));

        let err = engine(titles, overlays)
            .find_all(&QuerySpec::default(), &viewer())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::StoreUnavailable(msg) if msg == "connection reset"));
    }

    #[tokio::test]
    async fn window_is_passed_to_the_store() {
        let mut titles = MockTitleRepository::new();
        titles.expect_count().returning(|_| Ok(12));
        titles
            .expect_find()
            .withf(|_, ordering, skip, limit| {
                ordering.primary().field == TitleSortField::CreatedAt && *skip == 10 && *limit == 5
            })
            .times(1)
            .returning(|_, _, _, _| Ok(vec![Title::new("Vikram", ContentType::Movie)]));
        let mut overlays = MockUserOverlayRepository::new();
        overlays.expect_get_by_user_id().returning(|_| Ok(None));

        let spec = TitleQueryBuilder::new().page(3).build();
        let page = engine(titles, overlays)
            .find_all(&spec, &viewer())
            .await
            .unwrap();
        assert_eq!((page.page, page.total_pages, page.total_results), (3, 3, 12));
        assert_eq!(page.results.len(), 1);
    }

    #[tokio::test]
    async fn empty_starred_list_skips_the_title_store() {
        let mut titles = MockTitleRepository::new();
        titles.expect_count().times(0);
        titles.expect_find().times(0);
        let mut overlays = MockUserOverlayRepository::new();
        overlays
            .expect_get_by_user_id()
            .returning(|_| Ok(Some(OverlaySets::empty())));

        let spec = TitleQueryBuilder::new().starred_only().build();
        let page = engine(titles, overlays)
            .find_all(&spec, &viewer())
            .await
            .unwrap();
        assert_eq!(page.total_results, 0);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn find_one_reports_missing_titles() {
        let mut titles = MockTitleRepository::new();
        titles.expect_get().returning(|_| Ok(None));
        let mut overlays = MockUserOverlayRepository::new();
        overlays.expect_get_by_user_id().returning(|_| Ok(None));

        let id = TitleID::new();
        let err = engine(titles, overlays)
            .find_one(id, &viewer())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::TitleNotFound(missing) if missing == id));
    }
}
