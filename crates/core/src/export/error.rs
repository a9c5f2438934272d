//! Export error types.

use thiserror::Error;

use super::types::WizardStep;

/// Errors from the report registry and report generation.
#[derive(Debug, Error)]
pub enum ExportError {
    /// No handler registered under the requested key.
    #[error("unknown report: {0}")]
    UnknownReport(String),

    /// A handler is already registered under the key.
    #[error("duplicate report registration: {0}")]
    DuplicateReport(String),

    /// Spool file I/O failed.
    #[error("spool I/O error: {0}")]
    Spool(#[from] std::io::Error),

    /// The report handler itself failed.
    #[error("report handler failed: {0}")]
    Handler(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ExportError {
    /// Wraps a handler-internal failure.
    #[must_use]
    pub fn handler(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Handler(err.into())
    }
}

/// Errors from the wizard state machine.
#[derive(Debug, Error)]
pub enum WizardError {
    /// The requested transition is not valid from the current step.
    #[error("cannot {action} from the {from} step")]
    InvalidTransition {
        /// Step the wizard was in.
        from: WizardStep,
        /// Transition that was attempted.
        action: &'static str,
    },

    /// Report generation failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_report_display() {
        let err = ExportError::UnknownReport("party_ledger".into());
        assert_eq!(err.to_string(), "unknown report: party_ledger");
    }

    #[test]
    fn test_invalid_transition_display() {
        let err = WizardError::InvalidTransition {
            from: WizardStep::Done,
            action: "submit",
        };
        assert_eq!(err.to_string(), "cannot submit from the done step");
    }

    #[test]
    fn test_handler_error_preserves_source() {
        let inner = std::io::Error::other("disk full");
        let err = ExportError::handler(inner);
        assert!(err.to_string().contains("disk full"));
    }
}
