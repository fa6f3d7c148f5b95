use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use url::Url;

/// Runtime settings, read from the environment (a `.env` file is honored).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub website_url: Url,
    #[serde(default = "default_check_interval")]
    pub check_interval: u64,
    pub smtp_server: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub email_user: String,
    #[serde(rename = "email_pwd")]
    pub email_password: String,
    pub sender: String,
    pub receiver: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_notify_cooldown")]
    pub notify_cooldown: u64,
}

fn default_check_interval() -> u64 {
    1800
}

fn default_smtp_port() -> u16 {
    587
}

fn default_notify_cooldown() -> u64 {
    86400
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36".into()
}

impl Config {
    pub fn from_env() -> Result<Config> {
        dotenvy::dotenv().ok();
        let config: Config =
            envy::from_env().context("Failed to load configuration from environment")?;
        config.validate()?;
        Ok(config)
    }

    /// Reports every blank required setting at once rather than failing on
    /// the first one.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("SMTP_SERVER", &self.smtp_server),
            ("EMAIL_USER", &self.email_user),
            ("EMAIL_PWD", &self.email_password),
            ("SENDER", &self.sender),
            ("RECEIVER", &self.receiver),
            ("USER_AGENT", &self.user_agent),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(key, _)| *key)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(anyhow!(
                "Configuration values must not be empty: {}",
                missing.join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_env() -> Vec<(String, String)> {
        vec![
            ("WEBSITE_URL".into(), "https://shop.example.com/deals".into()),
            ("SMTP_SERVER".into(), "smtp.example.com".into()),
            ("EMAIL_USER".into(), "bot@example.com".into()),
            ("EMAIL_PWD".into(), "hunter2".into()),
            ("SENDER".into(), "bot@example.com".into()),
            ("RECEIVER".into(), "me@example.com".into()),
        ]
    }

    #[test]
    fn test_defaults_applied() {
        let config: Config = envy::from_iter(base_env()).unwrap();

        assert_eq!(config.check_interval, 1800);
        assert_eq!(config.smtp_port, 587);
        assert_eq!(config.notify_cooldown, 86400);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(config.website_url.host_str(), Some("shop.example.com"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_win_over_defaults() {
        let mut env = base_env();
        env.push(("CHECK_INTERVAL".into(), "60".into()));
        env.push(("SMTP_PORT".into(), "2525".into()));
        env.push(("NOTIFY_COOLDOWN".into(), "3600".into()));

        let config: Config = envy::from_iter(env).unwrap();

        assert_eq!(config.check_interval, 60);
        assert_eq!(config.smtp_port, 2525);
        assert_eq!(config.notify_cooldown, 3600);
    }

    #[test]
    fn test_validate_lists_every_blank_field() {
        let mut env = base_env();
        for entry in env.iter_mut() {
            if entry.0 == "EMAIL_USER" || entry.0 == "RECEIVER" {
                entry.1 = String::new();
            }
        }

        let config: Config = envy::from_iter(env).unwrap();
        let err = config.validate().unwrap_err().to_string();

        assert!(err.contains("EMAIL_USER"));
        assert!(err.contains("RECEIVER"));
        assert!(!err.contains("SENDER"));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let mut env = base_env();
        env[0].1 = "not a url".into();

        assert!(envy::from_iter::<_, Config>(env).is_err());
    }
}
