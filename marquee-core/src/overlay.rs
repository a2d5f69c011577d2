//! Per-user relational state layered over catalog results.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use marquee_model::{OverlayFlags, OverlayList, Title, TitleID, TitleWithOverlay, UserID};
use tracing::{debug, warn};

use crate::database::ports::UserOverlayRepository;
use crate::error::{CatalogError, Result};
use crate::query::predicate::{Clause, Predicate};
use crate::query::types::{QuerySpec, SeenState};

/// A user's four title lists. `seen` and `unseen` may overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlaySets {
    pub seen: HashSet<TitleID>,
    pub unseen: HashSet<TitleID>,
    pub starred: HashSet<TitleID>,
    pub favourite: HashSet<TitleID>,
}

impl OverlaySets {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn list(&self, list: OverlayList) -> &HashSet<TitleID> {
        match list {
            OverlayList::Seen => &self.seen,
            OverlayList::Unseen => &self.unseen,
            OverlayList::Starred => &self.starred,
            OverlayList::Favourite => &self.favourite,
        }
    }

    pub fn list_mut(&mut self, list: OverlayList) -> &mut HashSet<TitleID> {
        match list {
            OverlayList::Seen => &mut self.seen,
            OverlayList::Unseen => &mut self.unseen,
            OverlayList::Starred => &mut self.starred,
            OverlayList::Favourite => &mut self.favourite,
        }
    }

    pub fn contains(&self, list: OverlayList, id: &TitleID) -> bool {
        self.list(list).contains(id)
    }

    pub fn flags_for(&self, id: &TitleID) -> OverlayFlags {
        OverlayFlags {
            is_seen: self.seen.contains(id),
            is_unseen: self.unseen.contains(id),
            is_starred: self.starred.contains(id),
            is_favourite: self.favourite.contains(id),
        }
    }

    pub fn annotate(&self, title: Title) -> TitleWithOverlay {
        let flags = self.flags_for(&title.id);
        TitleWithOverlay { title, flags }
    }

    /// Membership clauses for the relational filters of `spec`.
    pub fn predicate_for(&self, spec: &QuerySpec) -> Predicate {
        let mut lists = Vec::new();
        if spec.starred_only {
            lists.push(OverlayList::Starred);
        }
        if spec.favourite_only {
            lists.push(OverlayList::Favourite);
        }
        match spec.seen_state {
            SeenState::Seen => lists.push(OverlayList::Seen),
            SeenState::Unseen => lists.push(OverlayList::Unseen),
            SeenState::Any => {}
        }

        lists
            .into_iter()
            .map(|list| Clause::SetMembership {
                list,
                ids: self.list(list).iter().copied().collect::<BTreeSet<_>>(),
            })
            .collect()
    }
}

/// Loads overlay sets for a user through the overlay store port.
#[derive(Clone)]
pub struct UserOverlayResolver {
    store: Arc<dyn UserOverlayRepository>,
    create_missing: bool,
}

impl std::fmt::Debug for UserOverlayResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserOverlayResolver")
            .field("create_missing", &self.create_missing)
            .finish_non_exhaustive()
    }
}

impl UserOverlayResolver {
    pub fn new(store: Arc<dyn UserOverlayRepository>, create_missing: bool) -> Self {
        Self {
            store,
            create_missing,
        }
    }

    /// Fails with [`CatalogError::UserOverlayMissing`] when the user has no
    /// record.
    pub async fn resolve(&self, user_id: UserID) -> Result<OverlaySets> {
        self.store
            .get_by_user_id(user_id)
            .await?
            .ok_or(CatalogError::UserOverlayMissing(user_id))
    }

    /// Like [`resolve`](Self::resolve) but a missing record reads as four
    /// empty sets. When configured, an empty record is persisted; failures
    /// of that write are logged only.
    pub async fn resolve_or_empty(&self, user_id: UserID) -> Result<OverlaySets> {
        match self.resolve(user_id).await {
            Ok(sets) => Ok(sets),
            Err(CatalogError::UserOverlayMissing(_)) => {
                debug!(user_id = %user_id, "no overlay record; using empty sets");
                if self.create_missing
                    && let Err(err) = self.store.ensure(user_id).await
                {
                    warn!(user_id = %user_id, error = %err, "failed to create overlay record");
                }
                Ok(OverlaySets::empty())
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::ports::user_overlays::MockUserOverlayRepository;
    use marquee_model::ContentType;

    fn sets_with(list: OverlayList, ids: &[TitleID]) -> OverlaySets {
        let mut sets = OverlaySets::empty();
        sets.list_mut(list).extend(ids.iter().copied());
        sets
    }

    #[test]
    fn flags_are_set_lookups() {
        let title = Title::new("Kaithi", ContentType::Movie);
        let mut sets = sets_with(OverlayList::Seen, &[title.id]);
        sets.unseen.insert(title.id);
        let annotated = sets.annotate(title);
        assert!(annotated.flags.is_seen);
        assert!(annotated.flags.is_unseen);
        assert!(!annotated.flags.is_starred);
        assert!(!annotated.flags.is_favourite);
    }

    #[test]
    fn predicate_covers_requested_lists_only() {
        let id = TitleID::new();
        let sets = sets_with(OverlayList::Starred, &[id]);
        let spec = QuerySpec {
            starred_only: true,
            seen_state: SeenState::Seen,
            ..QuerySpec::default()
        };
        let predicate = sets.predicate_for(&spec);
        assert_eq!(predicate.clauses().len(), 2);
        assert!(predicate.is_unsatisfiable());
        assert!(sets.predicate_for(&QuerySpec::default()).is_empty());
    }

    #[tokio::test]
    async fn missing_record_is_reported_by_resolve() {
        let mut store = MockUserOverlayRepository::new();
        store.expect_get_by_user_id().returning(|_| Ok(None));
        let resolver = UserOverlayResolver::new(Arc::new(store), false);
        let user = UserID::new();
        let err = resolver.resolve(user).await.unwrap_err();
        assert!(matches!(err, CatalogError::UserOverlayMissing(id) if id == user));
    }

    #[tokio::test]
    async fn missing_record_reads_as_empty_without_writing() {
        let mut store = MockUserOverlayRepository::new();
        store.expect_get_by_user_id().returning(|_| Ok(None));
        store.expect_ensure().times(0);
        let resolver = UserOverlayResolver::new(Arc::new(store), false);
        let sets = resolver.resolve_or_empty(UserID::new()).await.unwrap();
        assert_eq!(sets, OverlaySets::empty());
    }

    #[tokio::test]
    async fn failed_lazy_creation_does_not_fail_the_read() {
        let mut store = MockUserOverlayRepository::new();
        store.expect_get_by_user_id().returning(|_| Ok(None));
        store
            .expect_ensure()
            .times(1)
            .returning(|_| Err(CatalogError::StoreUnavailable("read-only".into())));
        let resolver = UserOverlayResolver::new(Arc::new(store), true);
        assert!(resolver.resolve_or_empty(UserID::new()).await.is_ok());
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let mut store = MockUserOverlayRepository::new();
        store
            .expect_get_by_user_id()
            .returning(|_| Err(CatalogError::StoreUnavailable("down".into())));
        let resolver = UserOverlayResolver::new(Arc::new(store), true);
        let err = resolver.resolve_or_empty(UserID::new()).await.unwrap_err();
        assert!(matches!(err, CatalogError::StoreUnavailable(_)));
    }
}
