//! Keeping the CMS in step with the local layout.
//!
//! Nothing in here performs I/O. The editor queues [`OutgoingRequest`]s in an [`Outbox`]; the
//! host takes them, performs the HTTP calls and reports each outcome back by request id. Saves
//! and preview refreshes go through a trailing-edge [`Debouncer`], so a burst of edits produces
//! one request carrying the state after the last edit.

use pagecraft_api::ConflictReport;

mod conflicts;
mod debounce;
mod requests;
mod sequence;

pub use conflicts::{ConflictDiagnostic, Conflicts};
pub use debounce::Debouncer;
pub use requests::{OutgoingRequest, Outbox, Request, RequestKind};
pub use sequence::{RequestId, RequestIds, RequestSequencer};

/// HTTP status the CMS answers with when the stored layout diverged from the client's.
pub const CONFLICT_STATUS: u16 = 409;

/// Why a request did not produce a usable response.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with {status}")]
    Http { status: u16, body: String },
    #[error("the layout was changed elsewhere ({} conflicts)", .0.errors.len())]
    Conflict(ConflictReport),
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

impl RequestError {
    /// Classifies a non-success HTTP response, recognizing conflict reports.
    pub fn from_status(status: u16, body: String) -> Self {
        if status == CONFLICT_STATUS {
            if let Ok(report) = serde_json::from_str::<ConflictReport>(&body) {
                return RequestError::Conflict(report);
            }
        }
        RequestError::Http { status, body }
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::InvalidResponse(err.to_string())
    }
}
