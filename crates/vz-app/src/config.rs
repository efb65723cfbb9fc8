use std::env;
use std::time::Duration;

use anyhow::Context;
use vz_core::Effect;

pub const DEFAULT_API_BASE: &str = "https://api.chromastudio.ai";
pub const DEFAULT_CONTENT_BASE: &str = "https://contents.maxstudio.ai";
pub const DEFAULT_USER_ID: &str = "DObRu1vyStbUynoQmTcHBlhs55z2";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host serving the upload, job and download-proxy endpoints
    pub api_base: String,
    /// Host serving uploaded files under their generated names
    pub content_base: String,
    pub user_id: String,
    pub effect: Effect,
    pub poll_interval: Duration,
    pub max_polls: u32,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            content_base: DEFAULT_CONTENT_BASE.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            effect: Effect::default(),
            poll_interval: Duration::from_millis(2000),
            max_polls: 60,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let effect = match lookup("VECTORIZE_EFFECT") {
            Some(id) => Effect::from_id(&id)
                .with_context(|| format!("VECTORIZE_EFFECT: unknown effect '{}'", id))?,
            None => defaults.effect,
        };

        let poll_interval = match lookup("VECTORIZE_POLL_INTERVAL_MS") {
            Some(ms) => Duration::from_millis(parse_number(&ms, "VECTORIZE_POLL_INTERVAL_MS")?),
            None => defaults.poll_interval,
        };

        let max_polls = match lookup("VECTORIZE_MAX_POLLS") {
            Some(n) => parse_number(&n, "VECTORIZE_MAX_POLLS")?,
            None => defaults.max_polls,
        };

        let request_timeout = match lookup("VECTORIZE_REQUEST_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(parse_number(&secs, "VECTORIZE_REQUEST_TIMEOUT_SECS")?),
            None => defaults.request_timeout,
        };

        Ok(Self {
            api_base: lookup("VECTORIZE_API_BASE").unwrap_or(defaults.api_base),
            content_base: lookup("VECTORIZE_CONTENT_BASE").unwrap_or(defaults.content_base),
            user_id: lookup("VECTORIZE_USER_ID").unwrap_or(defaults.user_id),
            effect,
            poll_interval,
            max_polls,
            request_timeout,
        })
    }
}

fn parse_number<T: std::str::FromStr>(value: &str, key: &str) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("{} must be a number, got '{}'", key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let conf = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(conf.api_base, DEFAULT_API_BASE);
        assert_eq!(conf.poll_interval, Duration::from_millis(2000));
        assert_eq!(conf.max_polls, 60);
        assert_eq!(conf.effect, Effect::PhotoToVectorArt);
    }

    #[test]
    fn test_overrides() {
        let conf = AppConfig::from_lookup(lookup(&[
            ("VECTORIZE_API_BASE", "http://localhost:9000"),
            ("VECTORIZE_USER_ID", "someone"),
            ("VECTORIZE_POLL_INTERVAL_MS", "250"),
            ("VECTORIZE_MAX_POLLS", " 5 "),
        ]))
        .unwrap();
        assert_eq!(conf.api_base, "http://localhost:9000");
        assert_eq!(conf.user_id, "someone");
        assert_eq!(conf.poll_interval, Duration::from_millis(250));
        assert_eq!(conf.max_polls, 5);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(AppConfig::from_lookup(lookup(&[("VECTORIZE_MAX_POLLS", "many")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("VECTORIZE_EFFECT", "photoToSketch")])).is_err());
    }
}
