use std::fmt;

use serde::{Deserialize, Serialize};

pub type TabId = u32;
pub type CheckId = u64;

/// A browser tab as seen by the engine: an id and the address it shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: TabId,
    pub url: String,
}

/// Decoded markup of a loaded page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    pub url: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    UnknownTab(TabId),
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::UnknownTab(id) => write!(f, "unknown tab {id}"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Why the engine could not produce job text for a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionFailure {
    NoActiveTab,
    RestrictedScheme { url: String },
    ContentNotFound { message: String },
    Runtime(String),
}

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionFailure::NoActiveTab => write!(f, "no active tab"),
            ExtractionFailure::RestrictedScheme { url } => write!(f, "restricted address {url}"),
            ExtractionFailure::ContentNotFound { message } => write!(f, "{message}"),
            ExtractionFailure::Runtime(detail) => write!(f, "{detail}"),
        }
    }
}

/// Reply of the page-side extraction: `{ "error": .. }` or `{ "jobText": .. }`.
///
/// The error shape is tried first so a reply carrying both fields is
/// treated as a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractionReply {
    Missing {
        error: String,
    },
    Found {
        #[serde(rename = "jobText")]
        job_text: String,
    },
}

/// Message sent by the page probe to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ProbeMessage {
    ContentChanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    CheckFinished {
        check_id: CheckId,
        result: Result<String, ExtractionFailure>,
    },
}
