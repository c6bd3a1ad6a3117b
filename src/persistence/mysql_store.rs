use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::{MySql, Row, Transaction};
use tracing::{debug, info};

use crate::config::DatabaseSettings;
use crate::persistence::{MessageStore, NewMessage, StoreTransaction, StoredMessage};
use crate::utils::error::StoreError;

const INSERT_MESSAGE: &str = "INSERT INTO messages (name, message, created_at) VALUES (?, ?, ?)";

const SELECT_MESSAGES: &str =
    "SELECT id, name, message, created_at FROM messages ORDER BY created_at, id";

/// Connection options for `settings.database` as the given account.
pub fn connect_options(
    settings: &DatabaseSettings,
    username: &str,
    password: &str,
) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(username)
        .password(password)
        .database(&settings.database)
        .charset("utf8mb4")
}

/// `MessageStore` backed by a MySQL connection pool.
#[derive(Debug, Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Connects as the application user.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        info!(
            "Connecting to database {} at {}:{}",
            settings.database, settings.host, settings.port
        );
        let options = connect_options(settings, &settings.user.name, &settings.user.pass);
        let pool = MySqlPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        debug!("Database connection established");
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl MessageStore for MySqlStore {
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(MySqlTransaction { tx }))
    }

    async fn list(&self) -> Result<Vec<StoredMessage>, StoreError> {
        let rows = sqlx::query(SELECT_MESSAGES).fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| -> Result<StoredMessage, StoreError> {
                let created_at: NaiveDateTime = row.try_get("created_at")?;
                Ok(StoredMessage {
                    id: row.try_get("id")?,
                    author: row.try_get("name")?,
                    body: row.try_get("message")?,
                    created_at: created_at.and_utc(),
                })
            })
            .collect()
    }
}

struct MySqlTransaction {
    tx: Transaction<'static, MySql>,
}

#[async_trait]
impl StoreTransaction for MySqlTransaction {
    async fn insert(&mut self, row: &NewMessage) -> Result<u64, StoreError> {
        let result = sqlx::query(INSERT_MESSAGE)
            .bind(&row.author)
            .bind(&row.body)
            .bind(row.created_at.naive_utc())
            .execute(&mut *self.tx)
            .await?;
        Ok(result.last_insert_id())
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
