use std::error::Error;
use std::fmt;

/// Application-specific error types.
///
/// Every error is handled at the boundary where it occurs; nothing here is
/// fatal to the session.
#[derive(Debug, Clone)]
pub enum AppError {
    /// A required form field is missing or unparseable.
    Validation(String),
    /// The scoring call failed; the message is already user-facing
    /// (server-supplied detail or the fixed generic text).
    Submission(String),
    /// The initial lead-list fetch failed.
    Fetch(String),
    /// Internal setup error (e.g. HTTP client construction).
    Internal(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Submission(msg) => write!(f, "Submission error: {}", msg),
            AppError::Fetch(msg) => write!(f, "Fetch error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::WithContext { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl AppError {
    /// The text placed in the user-visible error slot.
    ///
    /// Unlike `Display`, this carries no variant prefix: the submission and
    /// validation messages are surfaced verbatim.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::Submission(msg)
            | AppError::Fetch(msg)
            | AppError::Internal(msg) => msg.clone(),
            AppError::WithContext { source, .. } => source.user_message(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    /// Converts a `reqwest::Error` into an `AppError`.
    fn from(err: reqwest::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;

    /// Add context lazily (only evaluated on error).
    #[allow(dead_code)]
    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_strips_context_and_prefix() {
        let err: Result<(), AppError> =
            Err(AppError::Submission("Invalid credit score".to_string()));
        let err = err.context("submitting lead").unwrap_err();
        assert_eq!(err.user_message(), "Invalid credit score");
        assert_eq!(
            err.to_string(),
            "submitting lead: Submission error: Invalid credit score"
        );
    }
}
