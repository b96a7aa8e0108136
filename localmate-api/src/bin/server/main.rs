use std::str::FromStr;
use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use localmate_api::config::Config;
use localmate_api::domain::user::service::UserService;
use localmate_api::inbound::http::router::create_router;
use localmate_api::outbound::repositories::SqliteUserRepository;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "localmate_api=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "localmate-api",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
        token_ttl_minutes = config.jwt.expiration_minutes,
        bcrypt_cost = config.password.bcrypt_cost,
        "Configuration loaded"
    );

    let connect_options =
        SqliteConnectOptions::from_str(&config.database.url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "sqlite",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!(database = "sqlite", "Database migrations completed");

    let password_hasher = PasswordHasher::with_cost(config.password.bcrypt_cost)?;
    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        password_hasher,
        chrono::Duration::minutes(config.jwt.expiration_minutes),
    ));
    let user_repository = Arc::new(SqliteUserRepository::new(pool));
    let user_service = Arc::new(UserService::new(user_repository, Arc::clone(&authenticator)));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, authenticator);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
