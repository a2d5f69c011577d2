use async_trait::async_trait;
use chrono::{DateTime, Utc};
use marquee_model::{ContentType, Title, TitleID};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use crate::{
    database::{
        infrastructure::postgres::sql::{TITLE_COLUMNS, push_order_by, push_where},
        ports::titles::TitleRepository,
    },
    error::{CatalogError, Result},
    query::{Predicate, TitleOrdering},
};

#[derive(Clone, Debug)]
pub struct PostgresTitleRepository {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct TitleRow {
    id: Uuid,
    title: String,
    original_title: String,
    content_type: String,
    languages: Vec<String>,
    genres: Vec<String>,
    countries: Vec<String>,
    rating: f32,
    age_rating: i16,
    year: i16,
    metadata: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TitleRow> for Title {
    type Error = CatalogError;

    fn try_from(row: TitleRow) -> Result<Self> {
        let corrupt = |what: &str| {
            CatalogError::StoreUnavailable(format!(
                "title {} has an invalid {}",
                row.id, what
            ))
        };
        let content_type: ContentType = row
            .content_type
            .parse()
            .map_err(|_| corrupt("content_type"))?;
        let age_rating = u8::try_from(row.age_rating).map_err(|_| corrupt("age_rating"))?;
        let year = u16::try_from(row.year).map_err(|_| corrupt("year"))?;

        Ok(Title {
            id: TitleID(row.id),
            title: row.title,
            original_title: row.original_title,
            content_type,
            languages: row.languages,
            genres: row.genres,
            countries: row.countries,
            rating: row.rating,
            age_rating,
            year,
            created_at: row.created_at,
            updated_at: row.updated_at,
            metadata: row.metadata,
        })
    }
}

impl PostgresTitleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Insert or replace a catalog title. Used by seeding; the browse path
    /// never writes.
    pub async fn upsert(&self, title: &Title) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO titles (
                id, title, original_title, content_type, languages, genres,
                countries, rating, age_rating, year, metadata, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                original_title = EXCLUDED.original_title,
                content_type = EXCLUDED.content_type,
                languages = EXCLUDED.languages,
                genres = EXCLUDED.genres,
                countries = EXCLUDED.countries,
                rating = EXCLUDED.rating,
                age_rating = EXCLUDED.age_rating,
                year = EXCLUDED.year,
                metadata = EXCLUDED.metadata,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(title.id.to_uuid())
        .bind(&title.title)
        .bind(&title.original_title)
        .bind(title.content_type.as_str())
        .bind(&title.languages)
        .bind(&title.genres)
        .bind(&title.countries)
        .bind(title.rating)
        .bind(i16::from(title.age_rating))
        .bind(i16::try_from(title.year).unwrap_or(i16::MAX))
        .bind(&title.metadata)
        .bind(title.created_at)
        .bind(title.updated_at)
        .execute(self.pool())
        .await
        .map_err(|e| {
            CatalogError::StoreUnavailable(format!("Failed to upsert title {}: {}", title.id, e))
        })?;
        Ok(())
    }
}

#[async_trait]
impl TitleRepository for PostgresTitleRepository {
    async fn count(&self, predicate: &Predicate) -> Result<u64> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM titles");
        push_where(&mut qb, predicate);

        let total: i64 = qb
            .build_query_scalar()
            .fetch_one(self.pool())
            .await
            .map_err(|e| CatalogError::StoreUnavailable(format!("Failed to count titles: {}", e)))?;

        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn find(
        &self,
        predicate: &Predicate,
        ordering: &TitleOrdering,
        skip: u64,
        limit: u32,
    ) -> Result<Vec<Title>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {TITLE_COLUMNS} FROM titles"));
        push_where(&mut qb, predicate);
        push_order_by(&mut qb, ordering);
        qb.push(" LIMIT ");
        qb.push_bind(i64::from(limit));
        qb.push(" OFFSET ");
        qb.push_bind(i64::try_from(skip).unwrap_or(i64::MAX));

        debug!(sql = qb.sql(), "fetching titles");

        let rows: Vec<TitleRow> = qb
            .build_query_as()
            .fetch_all(self.pool())
            .await
            .map_err(|e| CatalogError::StoreUnavailable(format!("Failed to fetch titles: {}", e)))?;

        rows.into_iter().map(Title::try_from).collect()
    }

    async fn get(&self, id: TitleID) -> Result<Option<Title>> {
        let row: Option<TitleRow> = sqlx::query_as(&format!(
            "SELECT {TITLE_COLUMNS} FROM titles WHERE id = $1"
        ))
        .bind(id.to_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| CatalogError::StoreUnavailable(format!("Failed to load title {}: {}", id, e)))?;

        row.map(Title::try_from).transpose()
    }
}
