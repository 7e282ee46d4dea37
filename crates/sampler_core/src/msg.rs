use crate::{Generation, JobHandle, RawStatus, SamplingForm};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User asked to start a sampling job with the current form values.
    SubmitClicked(SamplingForm),
    /// Remote service accepted the job.
    SubmitAccepted {
        generation: Generation,
        handle: JobHandle,
    },
    /// Submit call failed in transport.
    SubmitRejected {
        generation: Generation,
        message: String,
    },
    /// Poll timer for `generation` fired.
    PollTimerFired { generation: Generation },
    /// A poll call returned a status.
    PollSucceeded {
        generation: Generation,
        status: RawStatus,
    },
    /// A poll call failed in transport.
    PollFailed {
        generation: Generation,
        message: String,
    },
    /// User clicked Stop (or interrupted the process).
    CancelClicked,
    /// User submitted the issue report form.
    ReportIssueClicked {
        email: Option<String>,
        description: String,
    },
    /// Issue report call finished.
    IssueReportFinished { result: Result<(), String> },
    /// Fallback for placeholder wiring.
    NoOp,
}
