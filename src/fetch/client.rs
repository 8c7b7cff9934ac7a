use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Method, Request, Response};

/// Anything that can execute a reqwest [`Request`].
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;

    /// GETs `url`, turning non-2xx statuses into errors.
    async fn get(&self, url: &str) -> Result<Response> {
        let req = Request::new(Method::GET, url.parse()?);
        Ok(self.execute(req).await?.error_for_status()?)
    }
}
