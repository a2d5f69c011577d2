use async_trait::async_trait;
use marquee_model::{Title, TitleID};

use crate::error::Result;
use crate::query::{Predicate, TitleOrdering};

/// Read access to the title catalog.
///
/// Implementations must order by `ordering` and then by title id ascending
/// so that windows over the same predicate never overlap.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TitleRepository: Send + Sync {
    async fn count(&self, predicate: &Predicate) -> Result<u64>;

    async fn find(
        &self,
        predicate: &Predicate,
        ordering: &TitleOrdering,
        skip: u64,
        limit: u32,
    ) -> Result<Vec<Title>>;

    async fn get(&self, id: TitleID) -> Result<Option<Title>>;
}
