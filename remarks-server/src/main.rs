use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use common::db::establish_connection;
use remarks_server::{config::Config, configure, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting the remarks service ({} variant)", config.save_variant);
    let pool = establish_connection(&config.database_url).await?;
    info!("Connected to database");

    let app_state = web::Data::new(AppState {
        pool,
        save_variant: config.save_variant,
        reasons: config.reasons.clone(),
    });

    let address = config.server_address();
    info!("Server is running on {}", address);
    // one worker: requests are served strictly one after another
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .configure(configure)
    })
    .workers(1)
    .bind(address)?
    .run()
    .await?;

    Ok(())
}
