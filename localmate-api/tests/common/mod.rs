use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenService;
use chrono::Duration;
use localmate_api::domain::user::service::UserService;
use localmate_api::inbound::http::router::create_router;
use localmate_api::outbound::repositories::user::SqliteUserRepository;
use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
    pub api_client: reqwest::Client,
    pub token_service: TokenService,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // One connection that never expires: every connection to
        // `sqlite::memory:` opens a separate, empty database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(
            JWT_SECRET,
            PasswordHasher::with_cost(4).expect("Minimum bcrypt cost"),
            Duration::minutes(30),
        ));
        let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));
        let user_service = Arc::new(UserService::new(user_repo, Arc::clone(&authenticator)));

        let router = create_router(user_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            pool,
            api_client: reqwest::Client::new(),
            token_service: TokenService::new(JWT_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a user and return the response body
    pub async fn register(&self, username: &str, password: &str) -> serde_json::Value {
        let response = self
            .post("/api/register")
            .json(&json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }
}
