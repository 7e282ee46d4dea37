//! Sampler core: pure job lifecycle state machine and progress model.
mod classify;
mod effect;
mod msg;
mod notification;
mod progress;
mod request;
mod state;
mod update;
mod view_model;

pub use classify::{classify, PollVerdict, ERROR_STAGE_PREFIX, NO_DATA_STAGE};
pub use effect::Effect;
pub use msg::Msg;
pub use notification::{Notification, Severity};
pub use progress::{ProgressModel, RawStatus, INITIAL_STAGE};
pub use request::{
    SamplingForm, SamplingRequest, SocialGroup, ValidationError, YearMonth, DATASET_FIRST,
    DATASET_LAST,
};
pub use state::{
    AppState, Generation, JobHandle, JobOutcome, Phase, DEFAULT_POLL_INTERVAL, GUEST_EMAIL,
};
pub use update::update;
pub use view_model::{AppViewModel, ProgressView};
