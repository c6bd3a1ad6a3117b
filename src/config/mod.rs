mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{
    AppSettings, DatabaseSettings, LogSettings, QueueSettings, Settings, UserCredentials,
    WorkerSettings,
};

/// Loads the configuration from the default file and environment variables
/// Merges the configuration with default values
/// Returns a `Settings` struct containing the database, queue and worker configurations
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::default().separator("_"));

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    let db = partial.db.unwrap_or_default();
    let user = db.user.unwrap_or_default();
    let root = db.root.unwrap_or_default();
    let queue = partial.queue.unwrap_or_default();
    let worker = partial.worker.unwrap_or_default();

    Ok(Settings {
        db: DatabaseSettings {
            host: db.host.unwrap_or(default.db.host),
            port: db.port.unwrap_or(default.db.port),
            database: db.database.unwrap_or(default.db.database),
            user: UserCredentials {
                name: user.name.unwrap_or(default.db.user.name),
                pass: user.pass.unwrap_or(default.db.user.pass),
            },
            root_pass: root.pass.unwrap_or(default.db.root_pass),
            wait_secs: db.wait.unwrap_or(default.db.wait_secs),
        },
        queue: QueueSettings {
            url: queue.url.unwrap_or(default.queue.url),
            region: queue.region.unwrap_or(default.queue.region),
            endpoint: queue.endpoint.unwrap_or(default.queue.endpoint),
            wait_secs: queue.wait.unwrap_or(default.queue.wait_secs),
            batch: queue.batch.unwrap_or(default.queue.batch),
        },
        worker: WorkerSettings {
            backoff_secs: worker.backoff.unwrap_or(default.worker.backoff_secs),
            attempts: worker.attempts.or(default.worker.attempts),
        },
        app: AppSettings {
            env: partial
                .app
                .and_then(|a| a.env)
                .unwrap_or(default.app.env),
        },
        log: LogSettings {
            level: partial
                .log
                .and_then(|l| l.level)
                .unwrap_or(default.log.level),
        },
    })
}
