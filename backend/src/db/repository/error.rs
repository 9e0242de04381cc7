//! Error types for repository operations.
//!
//! Every variant carries a structured [`ErrorContext`] so callers can log
//! where a failure happened without parsing the message.

use std::fmt;

use crate::parsing::ContentLoadError;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Structured context for repository errors.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "store_dataset", "get_dataset")
    pub operation: Option<String>,
    /// The entity type involved (e.g., "dataset", "snapshot")
    pub entity: Option<String>,
    pub entity_id: Option<String>,
    pub details: Option<String>,
    /// Whether this error is retryable
    pub retryable: bool,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Mark this error as retryable.
    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref entity) = self.entity {
            parts.push(format!("entity={}", entity));
        }
        if let Some(ref id) = self.entity_id {
            parts.push(format!("id={}", id));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        if self.retryable {
            parts.push("retryable=true".to_string());
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Requested dataset was not found.
    #[error("Not found: {message} {context}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// Content rejected before it reached storage.
    #[error("Data validation error: {message} {context}")]
    ValidationError {
        message: String,
        context: ErrorContext,
    },

    /// Configuration or initialization error.
    #[error("Configuration error: {message} {context}")]
    ConfigurationError {
        message: String,
        context: ErrorContext,
    },

    /// Snapshot or content file could not be loaded.
    #[error("Load error: {message} {context}")]
    LoadError {
        message: String,
        context: ErrorContext,
    },

    /// Internal/unexpected errors.
    #[error("Internal error: {message} {context}")]
    InternalError {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn not_found_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::NotFound {
            message: message.into(),
            context,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn validation_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::ValidationError {
            message: message.into(),
            context,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn configuration_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            context,
        }
    }

    pub fn load_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::LoadError {
            message: message.into(),
            context,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn internal_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::InternalError {
            message: message.into(),
            context,
        }
    }

    /// Check if this error is retryable.
    ///
    /// I/O failures while reading a snapshot are the only transient case.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::LoadError { context, .. } | Self::InternalError { context, .. } => {
                context.retryable
            }
            _ => false,
        }
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::NotFound { context, .. }
            | Self::ValidationError { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::LoadError { context, .. }
            | Self::InternalError { context, .. } => context,
        }
    }

    /// Add or update the operation in the error context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        match &mut self {
            Self::NotFound { context, .. }
            | Self::ValidationError { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::LoadError { context, .. }
            | Self::InternalError { context, .. } => {
                context.operation = Some(operation.into());
            }
        }
        self
    }
}

impl From<String> for RepositoryError {
    fn from(s: String) -> Self {
        RepositoryError::internal(s)
    }
}

impl From<&str> for RepositoryError {
    fn from(s: &str) -> Self {
        RepositoryError::internal(s.to_string())
    }
}

impl From<ContentLoadError> for RepositoryError {
    fn from(err: ContentLoadError) -> Self {
        let context = ErrorContext::default().with_entity("snapshot");
        match err {
            ContentLoadError::Io { path, source } => {
                let context = context.with_entity_id(path);
                // a missing or unreadable file stays that way
                let context = match source.kind() {
                    std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => context,
                    _ => context.retryable(),
                };
                RepositoryError::load_with_context(source.to_string(), context)
            }
            ContentLoadError::Snapshot { path, message } => RepositoryError::load_with_context(
                message,
                context.with_details(format!("path={}", path)),
            ),
            other => RepositoryError::load_with_context(other.to_string(), context),
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::internal(format!("Serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display() {
        let context = ErrorContext::new("get_dataset")
            .with_entity("dataset")
            .with_entity_id(7);
        assert_eq!(
            context.to_string(),
            "[operation=get_dataset, entity=dataset, id=7]"
        );
        assert_eq!(ErrorContext::default().to_string(), "[]");
    }

    #[test]
    fn test_with_operation_overrides_context() {
        let err = RepositoryError::not_found("dataset 3").with_operation("get_dataset");
        assert_eq!(err.context().operation.as_deref(), Some("get_dataset"));
        assert!(err.to_string().starts_with("Not found: dataset 3"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_transient_io_load_error_is_retryable() {
        let err: RepositoryError = ContentLoadError::Io {
            path: "/mnt/content.json".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::Interrupted, "interrupted"),
        }
        .into();
        assert!(matches!(err, RepositoryError::LoadError { .. }));
        assert!(err.is_retryable());
        assert_eq!(
            err.context().entity_id.as_deref(),
            Some("/mnt/content.json")
        );
    }

    #[test]
    fn test_missing_file_is_not_retryable() {
        let err: RepositoryError = ContentLoadError::Io {
            path: "/tmp/missing.json".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        }
        .into();
        assert!(!err.is_retryable());
        assert_eq!(err.context().entity.as_deref(), Some("snapshot"));
    }

    #[test]
    fn test_snapshot_error_keeps_path() {
        let err: RepositoryError = ContentLoadError::Snapshot {
            path: "movements[0].span".to_string(),
            message: "missing field `start`".to_string(),
        }
        .into();
        assert!(matches!(err, RepositoryError::LoadError { .. }));
        assert_eq!(
            err.context().details.as_deref(),
            Some("path=movements[0].span")
        );
        assert!(!err.is_retryable());
    }
}
