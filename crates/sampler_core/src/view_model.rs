use crate::{AppState, Phase};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    /// True while a job is submitting or polling (form disabled, Stop shown).
    pub busy: bool,
    pub progress: Option<ProgressView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    pub stage_label: String,
    /// `None` renders as an indeterminate busy indicator.
    pub percent: Option<f64>,
    pub percent_label: String,
    pub eta_label: String,
}

impl AppViewModel {
    pub(crate) fn from_state(state: &AppState) -> Self {
        Self {
            busy: state.phase() != Phase::Idle,
            progress: state.progress().map(|progress| ProgressView {
                stage_label: progress.stage_label(),
                percent: progress.percent,
                percent_label: progress.percent_label(),
                eta_label: progress.eta_label(),
            }),
        }
    }
}
