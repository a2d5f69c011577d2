use async_trait::async_trait;
use marquee_model::{OverlayList, TitleID, UserID};
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::{
    database::ports::user_overlays::UserOverlayRepository,
    error::{CatalogError, Result},
    overlay::OverlaySets,
};

#[derive(Clone, Debug)]
pub struct PostgresUserOverlayRepository {
    pool: PgPool,
}

impl PostgresUserOverlayRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserOverlayRepository for PostgresUserOverlayRepository {
    async fn get_by_user_id(&self, user_id: UserID) -> Result<Option<OverlaySets>> {
        // The LEFT JOIN yields one all-NULL row for a record with no entries
        // and no rows at all when the record is missing.
        let rows: Vec<(Option<String>, Option<Uuid>)> = sqlx::query_as(
            r#"
            SELECT e.list, e.title_id
            FROM user_overlays o
            LEFT JOIN user_overlay_entries e ON e.user_id = o.user_id
            WHERE o.user_id = $1
            "#,
        )
        .bind(user_id.to_uuid())
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            CatalogError::StoreUnavailable(format!("Failed to load overlay for {}: {}", user_id, e))
        })?;

        if rows.is_empty() {
            return Ok(None);
        }

        let mut sets = OverlaySets::empty();
        for (list, title_id) in rows {
            let (Some(list), Some(title_id)) = (list, title_id) else {
                continue;
            };
            match list.parse::<OverlayList>() {
                Ok(list) => {
                    sets.list_mut(list).insert(TitleID(title_id));
                }
                Err(err) => warn!(user_id = %user_id, error = %err, "skipping overlay entry"),
            }
        }
        Ok(Some(sets))
    }

    async fn ensure(&self, user_id: UserID) -> Result<()> {
        sqlx::query("INSERT INTO user_overlays (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id.to_uuid())
            .execute(self.pool())
            .await
            .map_err(|e| {
                CatalogError::StoreUnavailable(format!(
                    "Failed to create overlay for {}: {}",
                    user_id, e
                ))
            })?;
        Ok(())
    }

    async fn add(&self, user_id: UserID, list: OverlayList, title_id: TitleID) -> Result<()> {
        let mut tx = self.pool().begin().await.map_err(|e| {
            CatalogError::StoreUnavailable(format!("Failed to start transaction: {}", e))
        })?;

        sqlx::query(
            r#"
            INSERT INTO user_overlays (user_id) VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET updated_at = now()
            "#,
        )
        .bind(user_id.to_uuid())
        .execute(&mut *tx)
        .await
        .map_err(|e| CatalogError::StoreUnavailable(format!("Failed to touch overlay: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO user_overlay_entries (user_id, list, title_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, list, title_id) DO NOTHING
            "#,
        )
        .bind(user_id.to_uuid())
        .bind(list.as_str())
        .bind(title_id.to_uuid())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            CatalogError::StoreUnavailable(format!("Failed to add {} to {}: {}", title_id, list, e))
        })?;

        tx.commit().await.map_err(|e| {
            CatalogError::StoreUnavailable(format!("Failed to commit overlay update: {}", e))
        })
    }

    async fn remove(&self, user_id: UserID, list: OverlayList, title_id: TitleID) -> Result<()> {
        sqlx::query(
            r#"
            WITH removed AS (
                DELETE FROM user_overlay_entries
                WHERE user_id = $1 AND list = $2 AND title_id = $3
                RETURNING user_id
            )
            UPDATE user_overlays SET updated_at = now()
            WHERE user_id IN (SELECT user_id FROM removed)
            "#,
        )
        .bind(user_id.to_uuid())
        .bind(list.as_str())
        .bind(title_id.to_uuid())
        .execute(self.pool())
        .await
        .map_err(|e| {
            CatalogError::StoreUnavailable(format!(
                "Failed to remove {} from {}: {}",
                title_id, list, e
            ))
        })?;
        Ok(())
    }
}
