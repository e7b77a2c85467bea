use std::sync::Arc;

use auth::Authenticator;
use auth::Clock;
use auth::SystemClock;
use auth_service::config::Config;
use auth_service::domain::user::ports::UserDirectory;
use auth_service::domain::user::service::AuthService;
use auth_service::inbound::http::middleware::AccessGate;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryUserDirectory;
use auth_service::outbound::repositories::PostgresUserDirectory;
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

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_minutes = config.jwt.expiration_minutes,
        database = config.database.is_some(),
        "Configuration loaded"
    );

    let secret = config.jwt.server_secret()?;
    let authenticator = Arc::new(Authenticator::new(&secret, config.jwt.token_ttl()?)?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let user_directory: Arc<dyn UserDirectory> = match &config.database {
        Some(database) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database.url)
                .await?;
            tracing::info!(
                max_connections = 5,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            Arc::new(PostgresUserDirectory::new(pg_pool))
        }
        None => {
            tracing::warn!("No database configured, users are kept in memory");
            Arc::new(InMemoryUserDirectory::new())
        }
    };

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_directory),
        Arc::clone(&authenticator),
        Arc::clone(&clock),
    ));
    let gate = Arc::new(AccessGate::new(
        Arc::clone(&authenticator),
        Arc::clone(&user_directory),
        Arc::clone(&clock),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, gate, clock);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}
