use thiserror::Error;

/// Errors from acquiring a [`crate::Lock`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LockError {
    /// The configured timeout elapsed before the lock was granted.
    ///
    /// `waiting` counts the other contenders when we gave up: the current
    /// holder plus whoever is still queued behind it.
    #[error("Timeout while acquiring lock ({waiting} waiting locks){}", describe(.description))]
    Timeout {
        /// Other contenders at the moment of failure.
        waiting: usize,

        /// Description of the lock, if one was configured.
        description: Option<String>,
    },
}

fn describe(description: &Option<String>) -> String {
    match description {
        Some(d) => format!(": \"{d}\""),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_without_description() {
        let err = LockError::Timeout {
            waiting: 2,
            description: None,
        };
        assert_eq!(
            err.to_string(),
            "Timeout while acquiring lock (2 waiting locks)"
        );
    }

    #[test]
    fn test_timeout_message_with_description() {
        let err = LockError::Timeout {
            waiting: 0,
            description: Some("My test mock".to_owned()),
        };
        assert_eq!(
            err.to_string(),
            "Timeout while acquiring lock (0 waiting locks): \"My test mock\""
        );
    }
}
