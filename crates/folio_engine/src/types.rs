use std::fmt;

use folio_core::{BlogPost, ContentSource, LoadId};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Listing,
    Downloading,
    Parsing,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadProgress {
    pub load_id: LoadId,
    pub stage: Stage,
    /// Number of post documents being fetched, once known.
    pub documents: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress(LoadProgress),
    LoadCompleted {
        load_id: LoadId,
        source: ContentSource,
        result: Result<Vec<BlogPost>, LoadError>,
    },
}

/// One entry of a content-host directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteFile {
    pub name: String,
    /// Raw content address; absent for directories and submodules.
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub sha: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
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
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
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
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Why a load produced no posts. Every variant collapses to one failed state
/// downstream; the message is kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to fetch blog posts")]
    Listing(#[source] FetchError),
    #[error("Failed to read blog post listing: {0}")]
    MalformedListing(String),
    #[error("Failed to fetch {name}: {error}")]
    Document {
        name: String,
        #[source]
        error: FetchError,
    },
    #[error("Invalid listing address for {0}")]
    InvalidSource(ContentSource),
}
