use std::fmt;

pub(crate) const INVALID_FIELDS: &str = "Please fill all fields correctly";
pub(crate) const JOB_ALREADY_RUNNING: &str = "A sampling job is already running.";
pub(crate) const SAMPLE_FAILED: &str = "Failed to start job";
pub(crate) const NO_FILES: &str = "No files found for this selection.";
pub(crate) const FILE_READY: &str = "Your file is ready.";
pub(crate) const PROGRESS_FAILED: &str = "Failed to fetch progress.";
pub(crate) const STOPPED: &str = "Stopped.";
pub(crate) const ISSUE_EMPTY: &str = "Please enter an issue description.";
pub(crate) const ISSUE_ALREADY_SENDING: &str = "An issue report is already being sent.";
pub(crate) const ISSUE_SENT: &str = "Issue sent. Thank you!";
pub(crate) const ISSUE_FAILED: &str = "Couldn't send issue.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// User-facing message payload. Rendering is left to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }
}
