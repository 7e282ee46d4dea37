use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Tag attached by the caller to every job-scoped command and echoed back in events.
pub type Generation = u64;

/// Task identifier returned by `POST /sample`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskId(pub String);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `POST /sample`. Dates are `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleParams {
    pub social_group: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_docs: Option<u32>,
}

/// Body of `POST /report_issue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueReport {
    pub email: String,
    pub description: String,
}

/// Response of `GET /progress/{task_id}`. Fields with an unexpected JSON type
/// are dropped to `None` while parsing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatusReport {
    pub stage: Option<String>,
    pub percent: Option<f64>,
    pub eta_human: Option<String>,
    pub eta_seconds: Option<f64>,
    pub download_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    SubmitCompleted {
        generation: Generation,
        result: Result<TaskId, TransportError>,
    },
    PollCompleted {
        generation: Generation,
        result: Result<StatusReport, TransportError>,
    },
    TimerFired {
        generation: Generation,
    },
    IssueReported {
        result: Result<(), TransportError>,
    },
    /// Ctrl-C received while interrupts were being watched.
    Interrupted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: FailureKind,
    pub message: String,
}

impl TransportError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Malformed,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Malformed => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
