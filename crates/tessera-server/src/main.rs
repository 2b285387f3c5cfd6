use actix_web::{App, HttpServer, web};
use config::Config;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::EnvFilter;

use tessera_persistence::Migrator;
use tessera_server::{model::AppState, routes};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Config::builder()
        .add_source(config::File::with_name("conf/application").required(false))
        .add_source(config::Environment::with_prefix("TESSERA").separator("__"))
        .build()?;

    let address = settings
        .get_string("server.address")
        .unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = settings.get_int("server.port").unwrap_or(8081) as u16;
    let database_url = settings
        .get_string("database.url")
        .unwrap_or_else(|_| "sqlite://tessera.db?mode=rwc".to_string());

    let db = Database::connect(&database_url).await?;
    Migrator::up(&db, None).await?;

    let state = AppState::new(db);

    tracing::info!(%address, port, "starting tessera server");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .service(routes())
    })
    .bind((address, port))?
    .run()
    .await?;

    Ok(())
}
