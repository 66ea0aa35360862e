//! [`store::DocumentStore`] over the `documents` table.
//!
//! Records live in a JSONB column next to their collection name and an opaque text
//! id generated here. Listing returns insertion order (`created_at`, then `id`).

use sqlx::types::Json;
use sqlx::PgPool;
use store::{DocumentStore, Record, StoreError, StoredDocument};

#[derive(Clone, Debug)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unavailable(e: sqlx::Error) -> StoreError {
    tracing::error!("documents query failed: {}", e);
    StoreError::Unavailable(e.to_string())
}

impl DocumentStore for PgDocumentStore {
    async fn insert(&self, collection: &str, record: Record) -> Result<String, StoreError> {
        let id = uuid::Uuid::new_v4().simple().to_string();
        sqlx::query("INSERT INTO documents (id, collection, data) VALUES ($1, $2, $3)")
            .bind(&id)
            .bind(collection)
            .bind(Json(record))
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;
        Ok(id)
    }

    async fn list_all(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let rows: Vec<(String, Json<Record>)> = sqlx::query_as(
            "SELECT id, data FROM documents WHERE collection = $1 ORDER BY created_at, id",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(rows
            .into_iter()
            .map(|(id, Json(record))| StoredDocument { id, record })
            .collect())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, StoreError> {
        let row: Option<(String, Json<Record>)> =
            sqlx::query_as("SELECT id, data FROM documents WHERE collection = $1 AND id = $2")
                .bind(collection)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(unavailable)?;

        Ok(row.map(|(id, Json(record))| StoredDocument { id, record }))
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;
        Ok(())
    }
}
