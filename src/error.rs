//! Errors surfaced by handle operations.

use std::fmt;

/// Error returned when a handle operation cannot be performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The handle's owning consumer has already been released.
    ///
    /// Holding on to a handle past its release is a programming error, so it
    /// is surfaced immediately instead of being ignored or queued.
    UseAfterRelease {
        /// Name of the owning consumer, or `"unknown"` if none was given.
        consumer: String,
        /// The entry id the consumer tried to access.
        id: String,
    },
    /// A live entry for this id holds a different value type than requested.
    TypeMismatch {
        /// The entry id that was accessed.
        id: String,
        /// The requested value type.
        expected: &'static str,
    },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::UseAfterRelease { consumer, id } => write!(
                f,
                "consumer {consumer} has been released and can no longer access state entry \"{id}\""
            ),
            StateError::TypeMismatch { id, expected } => write!(
                f,
                "state entry \"{id}\" already holds a value of a different type than the requested {expected}"
            ),
        }
    }
}

impl std::error::Error for StateError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn use_after_release_names_consumer_and_id() {
        let err = StateError::UseAfterRelease {
            consumer: "Sidebar".to_string(),
            id: "user-1".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("Sidebar"));
        assert!(message.contains("user-1"));
    }

    #[test]
    fn type_mismatch_names_requested_type() {
        let err = StateError::TypeMismatch {
            id: "user-1".to_string(),
            expected: std::any::type_name::<i32>(),
        };
        assert!(err.to_string().contains("i32"));
    }
}
