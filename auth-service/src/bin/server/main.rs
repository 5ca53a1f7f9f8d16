use std::sync::Arc;

use auth::Authenticator;
use auth_service::config::Config;
use auth_service::domain::user::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::PostgresUserRepository;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    // Fails fast when jwt.secret is absent: there is no default secret
    let config = Config::load()?;

    tracing::info!(
        port = config.server.port,
        token_lifetime_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        Duration::hours(config.jwt.expiration_hours),
    )?);
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let auth_service = Arc::new(AuthService::new(user_repository, Arc::clone(&authenticator)));

    let http_address = format!("0.0.0.0:{}", config.server.port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, authenticator);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
