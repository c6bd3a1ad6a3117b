//! CLI for the bulletin board back end
//!
//! Subcommands:
//! - `worker`: consume the queue and store posts
//! - `migrate`: apply database migrations
//! - `publish`: send one post to the queue
//! - `list`: print stored posts, oldest first

use std::sync::Arc;

use bbs_worker::client::Publisher;
use bbs_worker::config::{Settings, load_config};
use bbs_worker::persistence::migrate::run_migrations;
use bbs_worker::persistence::{MessageStore, MySqlStore};
use bbs_worker::processor::{MessageProcessor, ProcessorConfig};
use bbs_worker::queue::SqsQueue;
use bbs_worker::utils::logging;
use clap::Parser;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "bbs")]
enum Command {
    /// Consume the queue and store every post
    Worker,
    /// Wait for the database, then apply pending migrations
    Migrate,
    /// Publish one post to the queue
    Publish {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        message: String,
    },
    /// Print stored posts, oldest first
    List {
        /// Print one JSON object per line
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cmd = Command::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            logging::init(tracing::Level::INFO);
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    logging::init(config.log.tracing_level());

    let result = match cmd {
        Command::Worker => run_worker(config).await,
        Command::Migrate => run_migrate(config).await,
        Command::Publish { name, message } => run_publish(config, name, message).await,
        Command::List { json } => run_list(config, json).await,
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run_worker(config: Settings) -> Result<(), Box<dyn std::error::Error>> {
    // the worker does not start without its store
    let store = MySqlStore::connect(&config.db).await?;
    let queue = SqsQueue::from_settings(&config).await;
    info!("Consuming {}", queue.queue_url());

    let processor = MessageProcessor::new(
        Arc::new(queue),
        Arc::new(store),
        ProcessorConfig::from(&config),
    );

    tokio::select! {
        result = processor.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting.");
        }
    }

    Ok(())
}

async fn run_migrate(config: Settings) -> Result<(), Box<dyn std::error::Error>> {
    run_migrations(&config.db).await?;
    Ok(())
}

async fn run_publish(
    config: Settings,
    name: String,
    message: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let queue = SqsQueue::from_settings(&config).await;
    let publisher = Publisher::new(Arc::new(queue));
    publisher.publish(name, message).await?;
    Ok(())
}

async fn run_list(config: Settings, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = MySqlStore::connect(&config.db).await?;
    let messages = store.list().await?;

    if json {
        for message in &messages {
            println!("{}", serde_json::to_string(message)?);
        }
        return Ok(());
    }

    println!("{} BBS", config.app.env);
    for message in messages {
        println!(
            "{}  {}: {}",
            message.created_at.format("%Y-%m-%d %H:%M:%S"),
            message.author,
            message.body
        );
    }
    Ok(())
}
