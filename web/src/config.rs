use std::env;

const DEFAULT_API_URL: &str = "http://localhost:3001";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::new(env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()))
    }

    pub fn new(api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim().trim_end_matches('/').to_string();
        Self { api_url }
    }
}
