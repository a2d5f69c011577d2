use std::collections::HashMap;

use async_trait::async_trait;
use marquee_model::{OverlayList, TitleID, UserID};
use tokio::sync::RwLock;

use crate::{
    database::ports::user_overlays::UserOverlayRepository, error::Result,
    overlay::OverlaySets,
};

#[derive(Debug, Default)]
pub struct InMemoryUserOverlayRepository {
    records: RwLock<HashMap<UserID, OverlaySets>>,
}

impl InMemoryUserOverlayRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn has_record(&self, user_id: UserID) -> bool {
        self.records.read().await.contains_key(&user_id)
    }
}

#[async_trait]
impl UserOverlayRepository for InMemoryUserOverlayRepository {
    async fn get_by_user_id(&self, user_id: UserID) -> Result<Option<OverlaySets>> {
        Ok(self.records.read().await.get(&user_id).cloned())
    }

    async fn ensure(&self, user_id: UserID) -> Result<()> {
        self.records.write().await.entry(user_id).or_default();
        Ok(())
    }

    async fn add(&self, user_id: UserID, list: OverlayList, title_id: TitleID) -> Result<()> {
        self.records
            .write()
            .await
            .entry(user_id)
            .or_default()
            .list_mut(list)
            .insert(title_id);
        Ok(())
    }

    async fn remove(&self, user_id: UserID, list: OverlayList, title_id: TitleID) -> Result<()> {
        if let Some(sets) = self.records.write().await.get_mut(&user_id) {
            sets.list_mut(list).remove(&title_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn add_creates_the_record_and_remove_is_idempotent() {
        let repo = InMemoryUserOverlayRepository::new();
        let user = UserID::new();
        let title = TitleID::new();

        assert!(repo.get_by_user_id(user).await.unwrap().is_none());
        repo.add(user, OverlayList::Favourite, title).await.unwrap();
        let sets = repo.get_by_user_id(user).await.unwrap().unwrap();
        assert!(sets.contains(OverlayList::Favourite, &title));

        repo.remove(user, OverlayList::Favourite, title).await.unwrap();
        repo.remove(user, OverlayList::Favourite, title).await.unwrap();
        let sets = repo.get_by_user_id(user).await.unwrap().unwrap();
        assert!(sets.favourite.is_empty());
    }

    #[tokio::test]
    async fn ensure_keeps_existing_entries() {
        let repo = InMemoryUserOverlayRepository::new();
        let user = UserID::new();
        let title = TitleID::new();
        repo.add(user, OverlayList::Seen, title).await.unwrap();
        repo.ensure(user).await.unwrap();
        assert!(repo.get_by_user_id(user).await.unwrap().unwrap().seen.contains(&title));
    }
}
