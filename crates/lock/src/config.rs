//! Lock configuration.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Configuration for a [`crate::Lock`].
///
/// Deserializes from `{"timeout_ms": 30000, "description": "..."}`, where
/// both fields are optional.  No timeout means acquirers wait forever.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LockConfig {
    /// How long an acquirer may wait before failing.
    #[serde(default, rename = "timeout_ms", deserialize_with = "de_opt_millis")]
    pub timeout: Option<Duration>,

    /// Label included in timeout errors.
    #[serde(default)]
    pub description: Option<String>,
}

impl LockConfig {
    /// Sets the acquisition timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the description used in timeout errors.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

fn de_opt_millis<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
    Ok(Option::<u64>::deserialize(d)?.map(Duration::from_millis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = LockConfig::default()
            .with_timeout(Duration::from_millis(60))
            .with_description("broker 1 dispatch");
        assert_eq!(config.timeout, Some(Duration::from_millis(60)));
        assert_eq!(config.description.as_deref(), Some("broker 1 dispatch"));
    }

    #[test]
    fn test_deserialize_full() {
        let config: LockConfig =
            serde_json::from_str(r#"{"timeout_ms": 30000, "description": "request queue"}"#)
                .unwrap();
        assert_eq!(
            config,
            LockConfig::default()
                .with_timeout(Duration::from_secs(30))
                .with_description("request queue")
        );
    }

    #[test]
    fn test_deserialize_empty_waits_forever() {
        let config: LockConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LockConfig::default());

        let config: LockConfig = serde_json::from_str(r#"{"timeout_ms": null}"#).unwrap();
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let res = serde_json::from_str::<LockConfig>(r#"{"timeout": 5}"#);
        assert!(res.is_err());
    }
}
