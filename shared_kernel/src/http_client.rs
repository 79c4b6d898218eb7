use anyhow::Context;
use lazy_static::lazy_static;
use reqwest::Response;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;
use url::Url;

lazy_static! {
    // No retry middleware: a failed call surfaces exactly once and the
    // caller decides whether the user retries.
    static ref CLIENT: ClientWithMiddleware = ClientBuilder::new(reqwest::Client::new())
        .with(TracingMiddleware::default())
        .build();
}

pub struct HttpClient;

impl HttpClient {
    async fn get(url: Url) -> anyhow::Result<Response> {
        let response = CLIENT
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch request from {url}"))?;
        response
            .error_for_status()
            .with_context(|| format!("Request to {url} returned an error status"))
    }

    pub async fn get_json<DTO: DeserializeOwned>(url: Url) -> anyhow::Result<DTO> {
        let response = Self::get(url.clone()).await?;
        response
            .json::<DTO>()
            .await
            .with_context(|| format!("Failed to deserialize response from {url}"))
    }
}
