// src/fetch.rs
use std::time::Duration;

use crate::error::IngestError;

/// Client signature sent with every plain HTTP request.
pub const USER_AGENT: &str = "Samachar Hub Bot 1.0";

/// Bound on any single feed or page fetch.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared client carrying the signature and timeout. One per engine;
/// reqwest pools connections behind it.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(HTTP_TIMEOUT)
        .build()
        .expect("http client")
}

/// GET `url` as text. Non-success statuses are `Fetch` errors, not bodies.
pub async fn get_text(client: &reqwest::Client, url: &str) -> Result<String, IngestError> {
    let resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(IngestError::fetch(url, format!("http status {status}")));
    }
    Ok(resp.text().await?)
}
