use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use starter_server::config::{Config, Environment};
use starter_server::routes::create_routes;
use starter_server::store::InMemoryUserStore;

fn init_tracing(environment: Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if environment.is_production() {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("info,tower_http=debug")
        }
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.environment);

    let store = InMemoryUserStore::seeded();
    tracing::info!("Seeded in-memory user store");

    let app = create_routes(Arc::new(store), &config);

    let addr = config.addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(environment = ?config.environment, "🚀 Server running at http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
