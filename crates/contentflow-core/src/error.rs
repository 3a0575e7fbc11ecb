//! Error types for `contentflow-core`.
//!
//! Validation failures are caught before any network call. Application
//! failures carry the server's own message. Transport failures only escape
//! the raw API layer; the studio absorbs them into demo content.

/// A rejected form, caught before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The topic is empty or whitespace.
    #[error("please enter a content topic")]
    EmptyTopic,

    /// No publishing platform was selected.
    #[error("please select at least one platform")]
    NoPlatforms,

    /// A select field holds a value outside its option list.
    #[error("unknown {field} '{value}'")]
    UnknownOption {
        /// Form field name (`content type`, `audience`, ...).
        field: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// All errors surfaced by the content creation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The form did not pass local validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server answered but signalled failure.
    #[error("{message}")]
    Application {
        /// HTTP status when the failure came from a non-2xx response.
        status: Option<u16>,
        /// Message from the server, or a generic one.
        message: String,
    },

    /// The server answered 2xx with a body that is not a valid envelope.
    #[error("invalid response from content API: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server could not be reached.
    #[error("content API unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    /// Missing or invalid client configuration.
    #[error("contentflow config error: {0}")]
    Config(String),

    /// Writing exported files failed.
    #[error("export failed: {0}")]
    Io(#[from] std::io::Error),

    /// The submission was cancelled before it settled.
    #[error("content creation cancelled")]
    Cancelled,

    /// Another submission is already in flight.
    #[error("a content request is already in progress")]
    Busy,
}

impl ContentError {
    /// Whether this error means the backend never received the request.
    ///
    /// Only these errors trigger the demo fallback.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_error_displays_server_message_only() {
        let err = ContentError::Application {
            status: None,
            message: "quota exceeded".to_owned(),
        };
        assert_eq!(err.to_string(), "quota exceeded");
        assert!(!err.is_unreachable());
    }

    #[test]
    fn validation_errors_read_like_form_hints() {
        let err = ContentError::from(ValidationError::NoPlatforms);
        assert_eq!(err.to_string(), "please select at least one platform");
    }
}
