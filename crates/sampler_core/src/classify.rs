use crate::RawStatus;

/// Exact stage reported when the selection matched no data.
pub const NO_DATA_STAGE: &str = "No files found";
/// Prefix of stages reporting a server-side failure.
pub const ERROR_STAGE_PREFIX: &str = "Error";

/// What a successful poll means for the active job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollVerdict {
    InProgress,
    NotFound,
    RemoteFailure { message: String },
    Completed { download_link: String },
}

/// Checks run in order: no-data sentinel, error prefix, download link.
pub fn classify(raw: &RawStatus) -> PollVerdict {
    let stage = raw.stage.as_deref().unwrap_or_default();
    if stage == NO_DATA_STAGE {
        return PollVerdict::NotFound;
    }
    if stage.starts_with(ERROR_STAGE_PREFIX) {
        return PollVerdict::RemoteFailure {
            message: stage.to_string(),
        };
    }
    match raw.download_link.as_deref() {
        Some(link) if !link.is_empty() => PollVerdict::Completed {
            download_link: link.to_string(),
        },
        _ => PollVerdict::InProgress,
    }
}
