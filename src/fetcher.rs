use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client};
use url::Url;

use crate::config::Config;

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Build the client once, up front. Some shops serve different markup (or
/// nothing at all) to clients without a browser User-Agent and Referer.
pub fn build_client(config: &Config) -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::REFERER,
        config
            .website_url
            .as_str()
            .parse()
            .context("Target URL is not a valid Referer header")?,
    );

    Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(&config.user_agent)
        .default_headers(headers)
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}

pub async fn fetch_page(client: &Client, url: &Url) -> Result<String> {
    let body = client
        .get(url.as_str())
        .send()
        .await
        .with_context(|| format!("Request to {} failed", url))?
        .error_for_status()
        .with_context(|| format!("{} answered with an error status", url))?
        .text()
        .await
        .context("Failed to read response body")?;

    Ok(body)
}
