use std::time::Duration;

use crate::{Generation, JobHandle, Notification, SamplingRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SubmitSample {
        generation: Generation,
        request: SamplingRequest,
    },
    ArmPollTimer {
        generation: Generation,
        period: Duration,
    },
    DisarmPollTimer {
        generation: Generation,
    },
    PollProgress {
        generation: Generation,
        handle: JobHandle,
    },
    SendIssueReport {
        email: String,
        description: String,
    },
    Notify(Notification),
}

impl Effect {
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            Effect::Notify(notification) => Some(notification),
            _ => None,
        }
    }
}
