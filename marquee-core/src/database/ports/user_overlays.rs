use async_trait::async_trait;
use marquee_model::{OverlayList, TitleID, UserID};

use crate::error::Result;
use crate::overlay::OverlaySets;

/// Per-user seen/unseen/starred/favourite lists.
///
/// The query engine only reads. The mutating methods belong to the
/// collaborator that records user activity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserOverlayRepository: Send + Sync {
    async fn get_by_user_id(&self, user_id: UserID) -> Result<Option<OverlaySets>>;

    /// Create an empty record if none exists. Idempotent.
    async fn ensure(&self, user_id: UserID) -> Result<()>;

    /// Add a title to one list, creating the record if needed.
    async fn add(&self, user_id: UserID, list: OverlayList, title_id: TitleID) -> Result<()>;

    /// Remove a title from one list. Missing entries are ignored.
    async fn remove(&self, user_id: UserID, list: OverlayList, title_id: TitleID) -> Result<()>;
}
