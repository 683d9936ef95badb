use std::sync::Arc;

use auth::AccessGate;
use auth::AdminSecret;
use auth::Authenticator;
use auth::TokenService;
use school_service::config::Config;
use school_service::inbound::http::router::create_router;
use school_service::repositories::PostgresEditRequestRepository;
use school_service::repositories::PostgresSchoolRepository;
use school_service::school::service::SchoolService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "school_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "school-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
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

    let tokens = Arc::new(TokenService::new(config.jwt.secret.as_bytes()));
    let authenticator = Arc::new(Authenticator::new(Arc::clone(&tokens)));
    let access_gate = Arc::new(AccessGate::new(
        tokens,
        AdminSecret::new(config.admin.secret),
    ));

    let school_repository = Arc::new(PostgresSchoolRepository::new(pg_pool.clone()));
    let edit_request_repository = Arc::new(PostgresEditRequestRepository::new(pg_pool));

    let school_service = Arc::new(SchoolService::new(
        school_repository,
        edit_request_repository,
        authenticator,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(school_service, access_gate);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
