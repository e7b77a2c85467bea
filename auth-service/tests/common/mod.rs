use std::sync::Arc;
use std::sync::Mutex;

use auth::Authenticator;
use auth::Clock;
use auth::ServerSecret;
use auth_service::domain::user::service::AuthService;
use auth_service::inbound::http::middleware::AccessGate;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryUserDirectory;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

pub const TOKEN_TTL_MINUTES: i64 = 60;

/// Clock the tests move forward by hand
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self(Mutex::new(start))
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.0.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub clock: Arc<ManualClock>,
    pub directory: Arc<InMemoryUserDirectory>,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let secret =
            ServerSecret::from_bytes(b"test-secret-key-for-jwt-signing-at-least-32-bytes".to_vec())
                .expect("Invalid test secret");
        let authenticator = Arc::new(
            Authenticator::new(&secret, Duration::minutes(TOKEN_TTL_MINUTES))
                .expect("Failed to create authenticator"),
        );

        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        ));
        let directory = Arc::new(InMemoryUserDirectory::new());

        let auth_service = Arc::new(AuthService::new(
            directory.clone(),
            authenticator.clone(),
            clock.clone(),
        ));
        let gate = Arc::new(AccessGate::new(
            authenticator.clone(),
            directory.clone(),
            clock.clone(),
        ));

        let router = create_router(auth_service, gate, clock.clone());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            clock,
            directory,
            authenticator,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    pub async fn register(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/auth/register")
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/auth/login")
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register and log in, returning the issued token
    pub async fn token_for(&self, username: &str, password: &str) -> String {
        self.register(username, password).await;
        let body: serde_json::Value = self
            .login(username, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");
        body["token"].as_str().expect("Missing token").to_string()
    }
}
