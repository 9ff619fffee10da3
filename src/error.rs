use thiserror::Error;

/// Unified error type for image-publish operations
#[derive(Error, Debug)]
pub enum ImagePublishError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version not found: {0}")]
    VersionNotFound(String),

    #[error("Build failed: {0}")]
    Build(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Tag failed: {0}")]
    Tag(String),

    #[error("Push failed: {0}")]
    Push(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in image-publish
pub type Result<T> = std::result::Result<T, ImagePublishError>;

impl ImagePublishError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ImagePublishError::Config(msg.into())
    }

    /// Create a version-not-found error with context
    pub fn version_not_found(msg: impl Into<String>) -> Self {
        ImagePublishError::VersionNotFound(msg.into())
    }

    /// Create a build error with context
    pub fn build(msg: impl Into<String>) -> Self {
        ImagePublishError::Build(msg.into())
    }

    /// Create an authentication error with context
    pub fn authentication(msg: impl Into<String>) -> Self {
        ImagePublishError::Authentication(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        ImagePublishError::Tag(msg.into())
    }

    /// Create a push error with context
    pub fn push(msg: impl Into<String>) -> Self {
        ImagePublishError::Push(msg.into())
    }

    /// Process exit code reported when this error ends the run.
    pub fn exit_code(&self) -> i32 {
        match self {
            ImagePublishError::Config(_) | ImagePublishError::Io(_) => 1,
            ImagePublishError::VersionNotFound(_) => 3,
            ImagePublishError::Build(_) => 4,
            ImagePublishError::Authentication(_) => 5,
            ImagePublishError::Tag(_) => 6,
            ImagePublishError::Push(_) => 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ImagePublishError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ImagePublishError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ImagePublishError::config("x"), "Configuration error"),
            (ImagePublishError::version_not_found("x"), "Version not found"),
            (ImagePublishError::build("x"), "Build failed"),
            (ImagePublishError::authentication("x"), "Authentication failed"),
            (ImagePublishError::tag("x"), "Tag failed"),
            (ImagePublishError::push("x"), "Push failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_exit_codes_are_distinct_per_stage() {
        let codes = vec![
            ImagePublishError::version_not_found("x").exit_code(),
            ImagePublishError::build("x").exit_code(),
            ImagePublishError::authentication("x").exit_code(),
            ImagePublishError::tag("x").exit_code(),
            ImagePublishError::push("x").exit_code(),
        ];

        assert_eq!(codes, vec![3, 4, 5, 6, 7]);
        assert!(codes.iter().all(|code| *code != 0));
    }
}
