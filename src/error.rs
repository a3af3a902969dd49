//! Structured failures raised while resolving a preview.
//!
//! Every failure carries its classification from the point where it is
//! raised, so the pipeline boundary only has to switch on [`ErrorKind`].

/// Message surfaced when a page has no usable metadata.
pub const NOT_AVAILABLE: &str = "No preview available";

/// Message surfaced for any failure that is not an upstream or availability problem.
pub const UNKNOWN: &str = "Unknown error";

#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// No title, description or image could be derived from the document.
    #[error("No preview available")]
    NotAvailable,

    /// Upstream answered with a non-2xx status.
    #[error("Request failed with status code {status}")]
    Status { status: u16 },

    /// The request never produced a response (DNS, connect, TLS, reset).
    #[error("{0}")]
    Transport(String),

    /// Upstream answered 2xx but the payload was not what the strategy expected.
    #[error("invalid upstream payload: {0}")]
    Decode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Classification tag used at the pipeline boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotAvailable,
    Upstream,
    Unknown,
}

impl PreviewError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAvailable => ErrorKind::NotAvailable,
            Self::Status { .. } | Self::Transport(_) => ErrorKind::Upstream,
            Self::Decode(_) | Self::Other(_) => ErrorKind::Unknown,
        }
    }

    /// The string callers see in `ResolutionResult::error`.
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::NotAvailable => NOT_AVAILABLE.to_string(),
            ErrorKind::Upstream => self.to_string(),
            ErrorKind::Unknown => UNKNOWN.to_string(),
        }
    }
}

impl From<reqwest::Error> for PreviewError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => Self::Status {
                status: status.as_u16(),
            },
            None if e.is_decode() => Self::Decode(e.to_string()),
            None if e.is_builder() => Self::Other(anyhow::Error::new(e)),
            None => Self::Transport(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for PreviewError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

// ── Tests ──
