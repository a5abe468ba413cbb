//! Drives the client against a real server on an ephemeral port.

use std::sync::Arc;

use async_trait::async_trait;
use starter_server::config::Config;
use starter_server::models::{NewUser, User};
use starter_server::routes::create_routes;
use starter_server::store::{InMemoryUserStore, StoreError, UserStore};
use starter_web::{ApiClient, ClientConfig, Dashboard, FetchState};
use tokio::net::TcpListener;

/// A store whose every operation fails, so `/api/users` answers 500.
struct BrokenStore;

#[async_trait]
impl UserStore for BrokenStore {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Err(StoreError::IdSpaceExhausted)
    }

    async fn get_by_id(&self, _id: u64) -> Result<Option<User>, StoreError> {
        Err(StoreError::IdSpaceExhausted)
    }

    async fn create(&self, _user: NewUser) -> Result<User, StoreError> {
        Err(StoreError::IdSpaceExhausted)
    }
}

async fn spawn_server() -> String {
    spawn_server_with(Arc::new(InMemoryUserStore::seeded())).await
}

async fn spawn_server_with(store: Arc<dyn UserStore>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_routes(store, &Config::default());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// An address nothing is listening on.
async fn dead_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_load_fetches_greeting_and_users() {
    let base = spawn_server().await;
    let mut dashboard = Dashboard::new(ApiClient::new(&ClientConfig::new(base)));

    dashboard.load().await;

    assert_eq!(
        dashboard.message(),
        &FetchState::Loaded("Hello from Alchemi Express API!".to_string())
    );
    let users = dashboard.users().loaded().unwrap();
    assert_eq!(users.len(), 5);
    assert_eq!(users[0].name, "John Doe");

    let view = dashboard.render();
    assert!(view.contains("Hello from Alchemi Express API!"));
    assert!(view.contains("  - Charlie Wilson <charlie.wilson@example.com>"));
}

#[tokio::test]
async fn test_unreachable_api_fails_without_blocking() {
    let base = dead_address().await;
    let mut dashboard = Dashboard::new(ApiClient::new(&ClientConfig::new(base)));

    dashboard.load().await;

    assert_eq!(
        dashboard.message(),
        &FetchState::Failed("Failed to connect to API".to_string())
    );
    assert!(matches!(dashboard.users(), FetchState::Failed(_)));
    assert!(!dashboard.message().is_loading());
    assert!(!dashboard.users().is_loading());

    let view = dashboard.render();
    assert!(view.contains("Failed to connect to API"));
    assert!(view.contains("No users data available"));
}

#[tokio::test]
async fn test_refresh_users_sees_new_records() {
    let base = spawn_server().await;
    let client = ApiClient::new(&ClientConfig::new(base.clone()));
    let mut dashboard = Dashboard::new(client);

    dashboard.refresh_users().await;
    assert_eq!(dashboard.users().loaded().unwrap().len(), 5);
    assert_eq!(dashboard.message(), &FetchState::Idle);

    let created = reqwest::Client::new()
        .post(format!("{}/api/users", base))
        .json(&serde_json::json!({"name": "Ann", "email": "ann@example.com"}))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), reqwest::StatusCode::CREATED);

    dashboard.refresh_users().await;
    let users = dashboard.users().loaded().unwrap();
    assert_eq!(users.len(), 6);
    assert_eq!(users[5].email, "ann@example.com");
}

#[tokio::test]
async fn test_users_failure_does_not_affect_greeting() {
    let base = spawn_server_with(Arc::new(BrokenStore)).await;
    let mut dashboard = Dashboard::new(ApiClient::new(&ClientConfig::new(base)));

    dashboard.load().await;

    assert_eq!(
        dashboard.message(),
        &FetchState::Loaded("Hello from Alchemi Express API!".to_string())
    );
    assert!(matches!(dashboard.users(), FetchState::Failed(_)));
    assert!(!dashboard.users().is_loading());

    let view = dashboard.render();
    assert!(view.contains("Hello from Alchemi Express API!"));
    assert!(!view.contains("Failed to connect to API"));
    assert!(view.contains("No users data available"));
}
