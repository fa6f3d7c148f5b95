use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{debug, error, info};
use reqwest::Client;

use crate::config::Config;
use crate::detector::detect;
use crate::email::send_alert;
use crate::fetcher::{build_client, fetch_page};
use crate::logger::init_logger;

/// Wait this long after a failed check before trying again, instead of the
/// configured interval.
const RETRY_DELAY: Duration = Duration::from_secs(300);

pub async fn run_monitor(once: bool, no_email: bool) -> Result<()> {
    // 0) Initialize logger
    init_logger()?;
    debug!("Logger initialized");

    // 1) Load and validate config
    let config = Config::from_env()?;
    debug!("Configuration loaded from environment");

    // 2) Create HTTP client
    let client = build_client(&config)?;
    debug!("HTTP client created");

    info!(
        "Watching {} every {} seconds",
        config.website_url, config.check_interval
    );

    // Only in-memory state: when the last alert went out
    let mut last_sent: Option<DateTime<Utc>> = None;

    // 3) Poll until interrupted
    loop {
        let result = check_and_notify(&config, &client, &mut last_sent, no_email).await;

        if once {
            info!("--once flag set, exiting after a single check");
            return result;
        }

        let delay = match result {
            Ok(()) => Duration::from_secs(config.check_interval),
            Err(e) => {
                error!("Check failed: {e:?}");
                RETRY_DELAY
            }
        };

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
                return Ok(());
            }
        }
    }
}

/// One tick of the pipeline: fetch, detect, and alert if the cooldown allows.
async fn check_and_notify(
    config: &Config,
    client: &Client,
    last_sent: &mut Option<DateTime<Utc>>,
    no_email: bool,
) -> Result<()> {
    let body = fetch_page(client, &config.website_url).await?;
    let found = detect(&body);

    if found.is_empty() {
        info!("No discount found");
        return Ok(());
    }

    info!("Found discount keywords: {}", found.join(", "));

    if no_email {
        info!("--no-email flag set, skipping email notification");
        return Ok(());
    }

    let now = Utc::now();
    if !cooldown_elapsed(*last_sent, now, config.notify_cooldown) {
        info!("Discount still visible, but within the notification cooldown");
        return Ok(());
    }

    send_alert(config, &found).await?;
    *last_sent = Some(now);
    info!("Alert email sent to {}", config.receiver);

    Ok(())
}

fn cooldown_elapsed(
    last_sent: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    cooldown_secs: u64,
) -> bool {
    match last_sent {
        None => true,
        Some(sent) => (now - sent).num_seconds() >= cooldown_secs as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_cooldown_elapsed() {
        let sent = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();

        // Never sent: always allowed
        assert!(cooldown_elapsed(None, sent, 86400));

        // One second short of the cooldown
        let almost = sent + chrono::Duration::seconds(86399);
        assert!(!cooldown_elapsed(Some(sent), almost, 86400));

        // Exactly at the cooldown boundary
        let exact = sent + chrono::Duration::seconds(86400);
        assert!(cooldown_elapsed(Some(sent), exact, 86400));

        // Well past it
        let later = sent + chrono::Duration::days(2);
        assert!(cooldown_elapsed(Some(sent), later, 86400));
    }
}
