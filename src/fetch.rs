use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::error::{ReviewError, Result};
use crate::settings::Settings;

/// GET a product page and return its markup. Transport failures and
/// non-success statuses are both [`ReviewError::Retrieval`].
pub async fn fetch_document(url: &str, settings: &Settings) -> Result<String> {
    let client = reqwest::Client::builder()
        .user_agent(settings.user_agent.as_str())
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()
        .map_err(|e| ReviewError::retrieval(url, e))?;

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Fetching {}", url));
    spinner.enable_steady_tick(Duration::from_millis(120));

    info!("Fetching product page: {}", url);
    let start = Instant::now();
    let result = get_text(&client, url).await;
    spinner.finish_and_clear();

    let html = result?;
    info!(
        "Fetched {} bytes in {}ms",
        html.len(),
        start.elapsed().as_millis()
    );
    Ok(html)
}

async fn get_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ReviewError::retrieval(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ReviewError::retrieval(url, format!("HTTP {}", status)));
    }

    response
        .text()
        .await
        .map_err(|e| ReviewError::retrieval(url, e))
}
