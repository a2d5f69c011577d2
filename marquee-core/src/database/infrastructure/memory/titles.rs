use std::collections::HashMap;

use async_trait::async_trait;
use marquee_model::{Title, TitleID};
use tokio::sync::RwLock;

use crate::{
    database::ports::titles::TitleRepository,
    error::Result,
    query::{Predicate, TitleOrdering},
};

#[derive(Debug, Default)]
pub struct InMemoryTitleRepository {
    titles: RwLock<HashMap<TitleID, Title>>,
}

impl InMemoryTitleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_titles(titles: impl IntoIterator<Item = Title>) -> Self {
        Self {
            titles: RwLock::new(titles.into_iter().map(|t| (t.id, t)).collect()),
        }
    }

    /// Insert or replace by id.
    pub async fn insert(&self, title: Title) {
        self.titles.write().await.insert(title.id, title);
    }

    pub async fn remove(&self, id: TitleID) -> Option<Title> {
        self.titles.write().await.remove(&id)
    }

    pub async fn len(&self) -> usize {
        self.titles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.titles.read().await.is_empty()
    }
}

#[async_trait]
impl TitleRepository for InMemoryTitleRepository {
    async fn count(&self, predicate: &Predicate) -> Result<u64> {
        let titles = self.titles.read().await;
        Ok(titles.values().filter(|t| predicate.matches(t)).count() as u64)
    }

    async fn find(
        &self,
        predicate: &Predicate,
        ordering: &TitleOrdering,
        skip: u64,
        limit: u32,
    ) -> Result<Vec<Title>> {
        let titles = self.titles.read().await;
        let mut matched: Vec<&Title> = titles.values().filter(|t| predicate.matches(t)).collect();
        matched.sort_by(|a, b| ordering.compare(a, b));

        Ok(matched
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn get(&self, id: TitleID) -> Result<Option<Title>> {
        Ok(self.titles.read().await.get(&id).cloned())
    }
}
