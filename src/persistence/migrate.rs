//! Schema migrations, embedded at compile time from `migrations/`.

use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::mysql::MySqlPoolOptions;
use tracing::info;

use crate::config::DatabaseSettings;
use crate::persistence::mysql_store::connect_options;
use crate::utils::error::StoreError;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Waits `settings.wait_secs` for the database to come up, then applies
/// every pending migration as `root`.
pub async fn run_migrations(settings: &DatabaseSettings) -> Result<(), StoreError> {
    if settings.wait_secs > 0 {
        info!("Waiting {}s for the database", settings.wait_secs);
        tokio::time::sleep(Duration::from_secs(settings.wait_secs)).await;
    }

    let options = connect_options(settings, "root", &settings.root_pass);
    let pool = MySqlPoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;
    info!("Applied migrations up to version {}", latest_version());

    pool.close().await;
    Ok(())
}

/// Version of the newest embedded migration, 0 when there are none.
pub fn latest_version() -> i64 {
    MIGRATOR.iter().map(|m| m.version).max().unwrap_or(0)
}
