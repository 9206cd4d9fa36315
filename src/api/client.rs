use async_trait::async_trait;
use reqwest::{Request, Response};

/// Sends a fully built request. Implemented over `reqwest::Client` for real
/// traffic and by in-memory fakes in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
