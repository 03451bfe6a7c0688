use figment::{
    providers::{Format, Toml},
    Figment,
};
use roi_scheduler_service::{config, scheduler};
use std::error::Error;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config: config::Config = Figment::new().merge(Toml::file("App.toml")).extract()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", &config.rust_log);
    }
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                format!("roi_scheduler_service={}", &config.scheduler_service_log)
                    .parse()
                    .expect("Error parsing directive"),
            ),
        )
        .with_span_events(FmtSpan::FULL)
        .init();

    let db = config::get_db_connection(&config).await?;
    let client = reqwest::Client::builder()
        .build()
        .expect("Reqwest client failed to initialize!");

    let scheduler = scheduler::Scheduler::new(db, client, Arc::new(config));
    scheduler.start();
    info!("Scheduler status: {:?}", scheduler.get_status());

    tokio::signal::ctrl_c().await?;
    scheduler.stop();
    Ok(())
}
