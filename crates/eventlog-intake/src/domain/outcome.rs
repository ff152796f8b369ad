//! Result of processing one intake request.

use serde::Serialize;

/// What the intake handler decided for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeOutcome {
    /// Every event was validated and dispatched. Replied to with `202`.
    Accepted,
    /// An event failed validation. Replied to with `400` and a `Rejection` body.
    Rejected(Rejection),
}

impl IntakeOutcome {
    /// HTTP status code for this outcome.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Accepted => 202,
            Self::Rejected(_) => 400,
        }
    }
}

/// Body of a `400` response.
///
/// `valid_count` is present only for batch payloads, and is the number of
/// leading events dispatched before the first invalid one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    /// Reason given by the sink, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Events accepted before the failure. Batches only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_count: Option<usize>,
}
