use thiserror::Error;

/// Errors that can occur during page exploration and click execution
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Failed to launch the browser
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Failed to connect to an existing browser
    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    /// Navigation failed or timed out
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// Tab operation failed
    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    /// The live-page driver rejected an operation
    #[error("Driver operation failed: {0}")]
    DriverFailed(String),

    /// Page content could not be read or parsed
    #[error("Failed to process page content: {0}")]
    DomParseFailed(String),

    /// A candidate id that this snapshot never assigned
    #[error("No candidate with id {0} in this snapshot")]
    CandidateNotFound(u32),

    /// No live element matched any selector
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// The element stayed covered through every scroll-and-retry cycle
    /// and the programmatic fallback
    #[error("Element '{selector}' remained obstructed after {attempts} attempts")]
    ClickObstructed { selector: String, attempts: u32 },

    /// The click deadline elapsed before the element became clickable
    #[error("Click on '{selector}' timed out after {waited_ms}ms")]
    ClickTimeout { selector: String, waited_ms: u64 },

    /// The caller cancelled the operation
    #[error("Operation cancelled")]
    Cancelled,
}

impl ScoutError {
    /// Whether the caller can reasonably retry with a fresh snapshot.
    /// Stale ids, vanished elements and obstruction clear up after the
    /// page settles; browser-level failures do not.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ScoutError::CandidateNotFound(_)
                | ScoutError::ElementNotFound(_)
                | ScoutError::ClickObstructed { .. }
                | ScoutError::ClickTimeout { .. }
        )
    }
}

/// Result type alias using [`ScoutError`]
pub type Result<T> = std::result::Result<T, ScoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScoutError::CandidateNotFound(7);
        assert_eq!(err.to_string(), "No candidate with id 7 in this snapshot");

        let err = ScoutError::ClickObstructed { selector: "#go".to_string(), attempts: 4 };
        assert_eq!(err.to_string(), "Element '#go' remained obstructed after 4 attempts");
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(ScoutError::CandidateNotFound(1).is_recoverable());
        assert!(ScoutError::ElementNotFound("#x".to_string()).is_recoverable());
        assert!(
            ScoutError::ClickTimeout { selector: "#x".to_string(), waited_ms: 5000 }
                .is_recoverable()
        );
        assert!(!ScoutError::LaunchFailed("no chrome".to_string()).is_recoverable());
        assert!(!ScoutError::Cancelled.is_recoverable());
    }
}
