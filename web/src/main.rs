use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use starter_web::{ApiClient, ClientConfig, Dashboard};

#[tokio::main]
async fn main() {
    dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ClientConfig::from_env();
    tracing::info!(api_url = %config.api_url, "Loading dashboard");

    let mut dashboard = Dashboard::new(ApiClient::new(&config));
    dashboard.load().await;

    print!("{}", dashboard.render());
}
