use std::fmt;
use std::time::Duration;

use crate::effect::Effect;
use crate::view_model::AppViewModel;
use crate::ProgressModel;

/// Fixed delay between two polls of the same job.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Email attached to issue reports when the user is anonymous.
pub const GUEST_EMAIL: &str = "guest@local";

/// Bumped whenever a job starts or is cancelled; tags every async result.
pub type Generation = u64;

/// Opaque task identifier handed out by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Polling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Completed { download_link: String },
    NotFound,
    Failed { message: String },
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum JobSlot {
    #[default]
    Empty,
    Submitting {
        generation: Generation,
    },
    Polling {
        generation: Generation,
        handle: JobHandle,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum PollTimer {
    #[default]
    Disarmed,
    Armed { generation: Generation },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    generation: Generation,
    slot: JobSlot,
    timer: PollTimer,
    progress: Option<ProgressModel>,
    last_outcome: Option<JobOutcome>,
    poll_interval: Duration,
    sending_issue: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_poll_interval(DEFAULT_POLL_INTERVAL)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_poll_interval(poll_interval: Duration) -> Self {
        Self {
            generation: 0,
            slot: JobSlot::Empty,
            timer: PollTimer::Disarmed,
            progress: None,
            last_outcome: None,
            poll_interval,
            sending_issue: false,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::from_state(self)
    }

    pub fn phase(&self) -> Phase {
        match self.slot {
            JobSlot::Empty => Phase::Idle,
            JobSlot::Submitting { .. } => Phase::Submitting,
            JobSlot::Polling { .. } => Phase::Polling,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn handle(&self) -> Option<&JobHandle> {
        match &self.slot {
            JobSlot::Polling { handle, .. } => Some(handle),
            _ => None,
        }
    }

    pub fn progress(&self) -> Option<&ProgressModel> {
        self.progress.as_ref()
    }

    pub fn last_outcome(&self) -> Option<&JobOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn download_link(&self) -> Option<&str> {
        match &self.last_outcome {
            Some(JobOutcome::Completed { download_link }) => Some(download_link),
            _ => None,
        }
    }

    pub fn timer_armed(&self) -> bool {
        matches!(self.timer, PollTimer::Armed { .. })
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn sending_issue(&self) -> bool {
        self.sending_issue
    }

    /// Returns whether the view changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn is_active(&self) -> bool {
        self.slot != JobSlot::Empty
    }

    pub(crate) fn is_submitting(&self, generation: Generation) -> bool {
        self.slot == JobSlot::Submitting { generation }
    }

    /// Handle of the job being polled, if `generation` is still the active one.
    pub(crate) fn polling_handle(&self, generation: Generation) -> Option<&JobHandle> {
        match &self.slot {
            JobSlot::Polling {
                generation: current,
                handle,
            } if *current == generation => Some(handle),
            _ => None,
        }
    }

    /// Starts a fresh job: new generation, progress reset, previous outcome dropped.
    pub(crate) fn begin_submit(&mut self) -> Generation {
        self.generation += 1;
        self.slot = JobSlot::Submitting {
            generation: self.generation,
        };
        self.progress = Some(ProgressModel::initial());
        self.last_outcome = None;
        self.dirty = true;
        self.generation
    }

    /// Moves the submitting job to polling and returns the timer to arm.
    pub(crate) fn begin_polling(&mut self, handle: JobHandle) -> Effect {
        let generation = self.generation;
        debug_assert_eq!(self.timer, PollTimer::Disarmed);
        self.slot = JobSlot::Polling { generation, handle };
        self.timer = PollTimer::Armed { generation };
        self.dirty = true;
        Effect::ArmPollTimer {
            generation,
            period: self.poll_interval,
        }
    }

    pub(crate) fn set_progress(&mut self, progress: ProgressModel) {
        self.progress = Some(progress);
        self.dirty = true;
    }

    /// Ends the active job with `outcome`. Returns the disarm effect when a timer
    /// was armed; the slot and handle are cleared either way.
    pub(crate) fn retire(&mut self, outcome: JobOutcome) -> Option<Effect> {
        if outcome == JobOutcome::Cancelled {
            self.generation += 1;
            self.progress = None;
        }
        self.slot = JobSlot::Empty;
        self.last_outcome = Some(outcome);
        self.dirty = true;
        match std::mem::take(&mut self.timer) {
            PollTimer::Armed { generation } => Some(Effect::DisarmPollTimer { generation }),
            PollTimer::Disarmed => None,
        }
    }

    pub(crate) fn set_sending_issue(&mut self, sending: bool) {
        self.sending_issue = sending;
        self.dirty = true;
    }
}
