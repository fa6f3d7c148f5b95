use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use lettre::{
    message::{header::ContentType, Mailbox, Message},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
};
use std::time::Duration;
use url::Url;

use crate::config::Config;

const SUBJECT: &str = "[Important] Discount spotted!";

pub fn alert_body(url: &Url, keywords: &[&str], detected_at: DateTime<Utc>) -> String {
    format!(
        "<h2>Discount alert!</h2>\n\
         <p>{url} is running a promotion (matched: {keywords}).</p>\n\
         <p>Have a look: <a href=\"{url}\">{url}</a></p>\n\
         <p>Detected at {time} UTC</p>",
        url = url,
        keywords = keywords.join(", "),
        time = detected_at.format("%Y-%m-%d %H:%M:%S"),
    )
}

pub async fn send_alert(config: &Config, keywords: &[&str]) -> Result<()> {
    let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_server)
        .context("Invalid SMTP server")?
        .port(config.smtp_port)
        .credentials(Credentials::new(
            config.email_user.clone(),
            config.email_password.clone(),
        ))
        .timeout(Some(Duration::from_secs(20)))
        .build();

    let email = Message::builder()
        .from(
            format!("Gregory <{}>", config.sender)
                .parse::<Mailbox>()
                .context("Invalid sender address")?,
        )
        .to(config
            .receiver
            .parse::<Mailbox>()
            .context("Invalid recipient address")?)
        .subject(SUBJECT)
        .header(ContentType::TEXT_HTML)
        .body(alert_body(&config.website_url, keywords, Utc::now()))?;

    mailer.send(email).await?;

    Ok(())
}
