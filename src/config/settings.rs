use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Every field maps onto an environment variable by joining the path with
/// `_`, so `db.user.name` is read from `DB_USER_NAME`.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub db: DatabaseSettings,
    pub queue: QueueSettings,
    pub worker: WorkerSettings,
    pub app: AppSettings,
    pub log: LogSettings,
}

/// Connection settings for the relational store.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: UserCredentials,
    /// Password of the `root` account, used only by the migration runner.
    pub root_pass: String,
    /// Seconds the migration runner waits for the database to come up.
    pub wait_secs: u64,
}

/// Credentials of the application database user.
#[derive(Debug, Deserialize, Clone)]
pub struct UserCredentials {
    pub name: String,
    pub pass: String,
}

/// Settings for the message queue.
#[derive(Debug, Deserialize, Clone)]
pub struct QueueSettings {
    pub url: String,
    pub region: String,
    /// Emulator endpoint, used only when the app runs in the `local` environment.
    pub endpoint: String,
    /// Long-poll wait per receive, in seconds.
    pub wait_secs: i32,
    /// Maximum number of messages requested per receive.
    pub batch: i32,
}

/// Retry behaviour of the worker loop.
#[derive(Debug, Deserialize, Clone)]
pub struct WorkerSettings {
    /// Fixed delay after a failed receive, in seconds.
    pub backoff_secs: u64,
    /// Consecutive receive failures tolerated before giving up. `None` retries forever.
    pub attempts: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
}

impl AppSettings {
    /// `APP_ENV=local` routes queue traffic to the emulator.
    pub fn is_local(&self) -> bool {
        self.env == "local"
    }
}

impl LogSettings {
    /// Parses `LOG_LEVEL` case-insensitively. Unknown names fall back to `info`.
    pub fn tracing_level(&self) -> tracing::Level {
        let level = self.level.trim();
        if level.eq_ignore_ascii_case("warning") {
            return tracing::Level::WARN;
        }
        level.parse().unwrap_or(tracing::Level::INFO)
    }
}

impl Settings {
    /// Endpoint override for the queue client, if any.
    pub fn queue_endpoint(&self) -> Option<&str> {
        if self.app.is_local() {
            Some(self.queue.endpoint.as_str())
        } else {
            None
        }
    }
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PartialSettings {
    pub db: Option<PartialDatabaseSettings>,
    pub queue: Option<PartialQueueSettings>,
    pub worker: Option<PartialWorkerSettings>,
    pub app: Option<PartialAppSettings>,
    pub log: Option<PartialLogSettings>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PartialDatabaseSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
    pub user: Option<PartialUserCredentials>,
    pub root: Option<PartialRootCredentials>,
    pub wait: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PartialUserCredentials {
    pub name: Option<String>,
    pub pass: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PartialRootCredentials {
    pub pass: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PartialQueueSettings {
    pub url: Option<String>,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub wait: Option<i32>,
    pub batch: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PartialWorkerSettings {
    pub backoff: Option<u64>,
    pub attempts: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PartialAppSettings {
    pub env: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PartialLogSettings {
    pub level: Option<String>,
}

/// Provides default values for `Settings`.
///
/// Queue and worker defaults: one message per receive, a 20 second long
/// poll, and a 10 second pause after a failed receive.
impl Default for Settings {
    fn default() -> Self {
        Self {
            db: DatabaseSettings {
                host: "127.0.0.1".to_string(),
                port: 3306,
                database: "bbs".to_string(),
                user: UserCredentials {
                    name: "bbs".to_string(),
                    pass: String::new(),
                },
                root_pass: String::new(),
                wait_secs: 10,
            },
            queue: QueueSettings {
                url: String::new(),
                region: "ap-northeast-1".to_string(),
                endpoint: "http://localstack:4566".to_string(),
                wait_secs: 20,
                batch: 1,
            },
            worker: WorkerSettings {
                backoff_secs: 10,
                attempts: None,
            },
            app: AppSettings { env: String::new() },
            log: LogSettings {
                level: "info".to_string(),
            },
        }
    }
}
