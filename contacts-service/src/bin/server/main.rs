use std::sync::Arc;

use anyhow::Context;
use contacts_service::config::Config;
use contacts_service::config::DatabaseDriver;
use contacts_service::inbound::http::router::create_router;
use contacts_service::inbound::http::router::AppState;
use contacts_service::outbound::repositories::InMemoryAccessTokenRepository;
use contacts_service::outbound::repositories::InMemoryContactRepository;
use contacts_service::outbound::repositories::InMemoryUserRepository;
use contacts_service::outbound::repositories::PostgresAccessTokenRepository;
use contacts_service::outbound::repositories::PostgresContactRepository;
use contacts_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contacts_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "contacts-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        driver = ?config.database.driver,
        http_port = config.server.http_port,
        jwt_algorithm = ?config.jwt.algorithm,
        jwt_expiration_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let authenticator = Arc::new(config.jwt.authenticator()?);

    let state = match config.database.driver {
        DatabaseDriver::Postgres => {
            let database_url = config
                .database
                .url
                .as_deref()
                .context("database.url is required for the postgres driver")?;

            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(database_url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            AppState::from_repositories(
                Arc::new(PostgresUserRepository::new(pg_pool.clone())),
                Arc::new(PostgresAccessTokenRepository::new(pg_pool.clone())),
                Arc::new(PostgresContactRepository::new(pg_pool)),
                authenticator,
            )
        }
        DatabaseDriver::Memory => {
            tracing::warn!(database = "memory", "Using in-memory storage; data is lost on exit");

            AppState::from_repositories(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryAccessTokenRepository::new()),
                Arc::new(InMemoryContactRepository::new()),
                authenticator,
            )
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    if let Err(e) = axum::serve(http_listener, create_router(state)).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
