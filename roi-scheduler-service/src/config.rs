use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
use serde::Deserialize;
use std::time::Duration;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub scheduler_service_log: String,
    pub sqlx_max_connections: u32,
    pub sqlx_min_connections: Option<u32>,
    pub sqlx_connect_timeout: Option<u64>,
    pub sqlx_idle_timeout: Option<u64>,
    pub sqlx_max_lifetime: Option<u64>,
    pub sqlx_logging: Option<bool>,
    pub sqlx_logging_level: Option<String>,
    /// UTC hour/minute of the scheduled daily distribution.
    pub roi_run_hour: Option<u32>,
    pub roi_run_minute: Option<u32>,
    pub daily_tick_secs: Option<u64>,
    pub release_tick_secs: Option<u64>,
    pub slack_notification: bool,
    pub slack_webhook_url: Option<String>,
    pub slack_channel_id: Option<String>,
}

pub async fn get_db_connection(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let mut options: ConnectOptions = config.database_url.to_owned().into();
    options
        .max_connections(config.sqlx_max_connections)
        .min_connections(match config.sqlx_min_connections {
            Some(v) => v,
            None => 2,
        })
        .connect_timeout(Duration::from_secs(match config.sqlx_connect_timeout {
            Some(v) => v,
            None => 8,
        }))
        .idle_timeout(Duration::from_secs(match config.sqlx_idle_timeout {
            Some(v) => v,
            None => 8,
        }))
        .max_lifetime(Duration::from_secs(match config.sqlx_max_lifetime {
            Some(v) => v,
            None => 8,
        }))
        .sqlx_logging(match config.sqlx_logging {
            Some(v) => v,
            None => false,
        })
        .sqlx_logging_level(
            match config
                .sqlx_logging_level
                .as_deref()
                .unwrap_or("info")
                .parse::<log::LevelFilter>()
            {
                Ok(level) => level,
                Err(_) => log::LevelFilter::Info,
            },
        );

    sea_orm::Database::connect(options).await
}
