use crate::record::{decode_list, encode};
use crate::traits::ListStore;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Row, Sqlite};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::{ListId, NewList, TaskList};

const SCHEMA: &str = include_str!("../schema.sql");

fn db_err(e: sqlx::Error) -> TaskboardError {
    TaskboardError::Database(e.to_string())
}

/// SQLite-backed list store: one row per list, the record kept as JSON text.
pub struct SqliteStore {
    path: PathBuf,
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Open (or create) the database and initialize the schema.
    pub async fn open(path: impl AsRef<Path>) -> TaskboardResult<Self> {
        let path = path.as_ref().to_path_buf();
        let unavailable = |e: sqlx::Error| {
            TaskboardError::StoreUnavailable(format!("{}: {}", path.display(), e))
        };

        let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", path.display()))
            .map_err(unavailable)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(unavailable)?;

        sqlx::raw_sql(SCHEMA)
            .execute(&pool)
            .await
            .map_err(unavailable)?;

        tracing::info!("Opened SQLite list store {}", path.display());
        Ok(Self { path, pool })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn to_text<T: serde::Serialize>(list: &T) -> TaskboardResult<String> {
        let value = encode(list)?;
        serde_json::to_string(&value)
            .map_err(|e| TaskboardError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl ListStore for SqliteStore {
    async fn load_all(&self) -> TaskboardResult<Vec<TaskList>> {
        let rows = sqlx::query("SELECT id, record FROM lists ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        let lists = rows
            .into_iter()
            .map(|row| {
                let id: i64 = row.get("id");
                let text: String = row.get("record");
                let value: serde_json::Value = serde_json::from_str(&text)
                    .map_err(|e| TaskboardError::Serialization(e.to_string()))?;
                decode_list(id as ListId, value)
            })
            .collect::<TaskboardResult<Vec<_>>>()?;

        tracing::info!("Loaded {} lists from {}", lists.len(), self.path.display());
        Ok(lists)
    }

    async fn insert(&self, list: &NewList) -> TaskboardResult<ListId> {
        let record = Self::to_text(list)?;
        let id = sqlx::query("INSERT INTO lists (record) VALUES (?1)")
            .bind(record)
            .execute(&self.pool)
            .await
            .map_err(db_err)?
            .last_insert_rowid();
        tracing::debug!("Inserted list {} into {}", id, self.path.display());
        Ok(id as ListId)
    }

    async fn update(&self, list: &TaskList) -> TaskboardResult<()> {
        let record = Self::to_text(list)?;
        let result = sqlx::query("UPDATE lists SET record = ?1 WHERE id = ?2")
            .bind(record)
            .bind(list.id as i64)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(TaskboardError::NotFound(format!("List record {}", list.id)));
        }
        tracing::debug!("Updated list {} in {}", list.id, self.path.display());
        Ok(())
    }

    async fn remove(&self, id: ListId) -> TaskboardResult<()> {
        sqlx::query("DELETE FROM lists WHERE id = ?1")
            .bind(id as i64)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        tracing::debug!("Removed list {} from {}", id, self.path.display());
        Ok(())
    }
}
