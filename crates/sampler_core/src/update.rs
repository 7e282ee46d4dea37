use crate::classify::{classify, PollVerdict};
use crate::notification::{
    FILE_READY, INVALID_FIELDS, ISSUE_ALREADY_SENDING, ISSUE_EMPTY, ISSUE_FAILED, ISSUE_SENT,
    JOB_ALREADY_RUNNING, NO_FILES, PROGRESS_FAILED, SAMPLE_FAILED, STOPPED,
};
use crate::{
    AppState, Effect, JobOutcome, Msg, Notification, ProgressModel, SamplingForm, GUEST_EMAIL,
};

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages tagged with a generation other than the active job's are dropped
/// without touching state or emitting effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SubmitClicked(form) => submit(&mut state, &form),
        Msg::SubmitAccepted { generation, handle } => {
            if !state.is_submitting(generation) {
                return (state, Vec::new());
            }
            vec![state.begin_polling(handle)]
        }
        Msg::SubmitRejected {
            generation,
            message,
        } => {
            if !state.is_submitting(generation) {
                return (state, Vec::new());
            }
            let message = format!("{SAMPLE_FAILED}: {message}");
            finish(
                &mut state,
                JobOutcome::Failed {
                    message: message.clone(),
                },
                Notification::error(message),
            )
        }
        Msg::PollTimerFired { generation } => match state.polling_handle(generation) {
            Some(handle) => vec![Effect::PollProgress {
                generation,
                handle: handle.clone(),
            }],
            None => Vec::new(),
        },
        Msg::PollSucceeded { generation, status } => {
            if state.polling_handle(generation).is_none() {
                return (state, Vec::new());
            }
            let verdict = classify(&status);
            state.set_progress(ProgressModel::from_raw(&status));
            match verdict {
                PollVerdict::InProgress => Vec::new(),
                PollVerdict::NotFound => finish(
                    &mut state,
                    JobOutcome::NotFound,
                    Notification::error(NO_FILES),
                ),
                PollVerdict::RemoteFailure { message } => finish(
                    &mut state,
                    JobOutcome::Failed {
                        message: message.clone(),
                    },
                    Notification::error(message),
                ),
                PollVerdict::Completed { download_link } => finish(
                    &mut state,
                    JobOutcome::Completed { download_link },
                    Notification::success(FILE_READY),
                ),
            }
        }
        Msg::PollFailed {
            generation,
            message,
        } => {
            if state.polling_handle(generation).is_none() {
                return (state, Vec::new());
            }
            // No retry: a failed poll abandons the job.
            finish(
                &mut state,
                JobOutcome::Failed {
                    message: format!("Failed to fetch progress: {message}"),
                },
                Notification::error(PROGRESS_FAILED),
            )
        }
        Msg::CancelClicked => {
            if !state.is_active() {
                return (state, Vec::new());
            }
            finish(&mut state, JobOutcome::Cancelled, Notification::info(STOPPED))
        }
        Msg::ReportIssueClicked { email, description } => {
            report_issue(&mut state, email, description)
        }
        Msg::IssueReportFinished { result } => {
            if !state.sending_issue() {
                return (state, Vec::new());
            }
            state.set_sending_issue(false);
            let notification = match result {
                Ok(()) => Notification::success(ISSUE_SENT),
                Err(_) => Notification::error(ISSUE_FAILED),
            };
            vec![Effect::Notify(notification)]
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut AppState, form: &SamplingForm) -> Vec<Effect> {
    // Single-job guard: the caller must cancel or wait for the active job.
    if state.is_active() {
        return vec![Effect::Notify(Notification::info(JOB_ALREADY_RUNNING))];
    }
    match form.validate() {
        Ok(request) => {
            let generation = state.begin_submit();
            vec![Effect::SubmitSample {
                generation,
                request,
            }]
        }
        Err(err) => vec![Effect::Notify(Notification::error(format!(
            "{INVALID_FIELDS} ({err})."
        )))],
    }
}

/// Terminal transition: timer disarm (if armed) first, then the single notification.
fn finish(state: &mut AppState, outcome: JobOutcome, notification: Notification) -> Vec<Effect> {
    let mut effects = Vec::with_capacity(2);
    effects.extend(state.retire(outcome));
    effects.push(Effect::Notify(notification));
    effects
}

fn report_issue(state: &mut AppState, email: Option<String>, description: String) -> Vec<Effect> {
    if state.sending_issue() {
        return vec![Effect::Notify(Notification::info(ISSUE_ALREADY_SENDING))];
    }
    let description = description.trim();
    if description.is_empty() {
        return vec![Effect::Notify(Notification::error(ISSUE_EMPTY))];
    }
    let email = email
        .map(|email| email.trim().to_string())
        .filter(|email| !email.is_empty())
        .unwrap_or_else(|| GUEST_EMAIL.to_string());
    state.set_sending_issue(true);
    vec![Effect::SendIssueReport {
        email,
        description: description.to_string(),
    }]
}
