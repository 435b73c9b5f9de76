use super::client::HttpClient;
use async_trait::async_trait;

const USER_AGENT: &str = concat!("mg_accidents/", env!("CARGO_PKG_VERSION"));

/// Plain [`HttpClient`] backed by a shared `reqwest::Client`.
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self(client)
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}
