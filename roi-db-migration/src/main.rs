use figment::{
    providers::{Format, Toml},
    Figment,
};
use serde::Deserialize;

#[derive(Deserialize)]
struct MigrationConfig {
    database_url: String,
}

#[tokio::main]
async fn main() {
    // DATABASE_URL from the environment wins over App.toml.
    if std::env::var("DATABASE_URL").is_err() {
        let config: Result<MigrationConfig, _> =
            Figment::new().merge(Toml::file("App.toml")).extract();
        if let Ok(config) = config {
            std::env::set_var("DATABASE_URL", &config.database_url);
        }
    }
    sea_orm_migration::cli::run_cli(roi_db_migration::Migrator).await;
}
