use std::sync::Once;
use std::time::Duration;

use pretty_assertions::assert_eq;
use sampler_core::{
    update, AppState, Effect, Generation, JobHandle, JobOutcome, Msg, Notification, Phase,
    RawStatus, SamplingForm, Severity, SocialGroup, DEFAULT_POLL_INTERVAL,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(sampler_logging::initialize_for_tests);
}

fn race_form() -> SamplingForm {
    SamplingForm {
        social_group: Some(SocialGroup::Race),
        start: Some("2020-01".parse().unwrap()),
        end: Some("2020-03".parse().unwrap()),
        num_docs: None,
    }
}

fn notifications(effects: &[Effect]) -> Vec<Notification> {
    effects
        .iter()
        .filter_map(Effect::notification)
        .cloned()
        .collect()
}

/// Drives a fresh state through submit and acceptance; returns the polling state.
fn polling_state(task_id: &str) -> (AppState, Generation) {
    let (state, effects) = update(AppState::new(), Msg::SubmitClicked(race_form()));
    let generation = match effects.as_slice() {
        [Effect::SubmitSample { generation, .. }] => *generation,
        other => panic!("expected a single submit effect, got {other:?}"),
    };
    let (state, _) = update(
        state,
        Msg::SubmitAccepted {
            generation,
            handle: JobHandle::new(task_id),
        },
    );
    (state, generation)
}

fn status(stage: &str) -> RawStatus {
    RawStatus {
        stage: Some(stage.to_string()),
        ..RawStatus::default()
    }
}

#[test]
fn valid_submit_issues_one_call_and_arms_one_timer() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::SubmitClicked(race_form()));

    assert_eq!(state.phase(), Phase::Submitting);
    assert!(state.consume_dirty());
    assert_eq!(effects.len(), 1);
    let Effect::SubmitSample {
        generation,
        request,
    } = &effects[0]
    else {
        panic!("expected submit effect, got {effects:?}");
    };
    assert_eq!(request.social_group(), SocialGroup::Race);
    assert_eq!(request.start().to_string(), "2020-01");
    assert_eq!(request.end().to_string(), "2020-03");
    assert_eq!(request.num_docs(), None);
    assert_eq!(
        state.progress().map(|p| p.stage_label()),
        Some("Initializing...".to_string())
    );

    let (state, effects) = update(
        state,
        Msg::SubmitAccepted {
            generation: *generation,
            handle: JobHandle::new("task-1"),
        },
    );
    assert_eq!(state.phase(), Phase::Polling);
    assert!(state.timer_armed());
    assert_eq!(state.handle(), Some(&JobHandle::new("task-1")));
    assert_eq!(
        effects,
        vec![Effect::ArmPollTimer {
            generation: *generation,
            period: DEFAULT_POLL_INTERVAL,
        }]
    );
}

#[test]
fn configured_poll_interval_is_used_for_the_timer() {
    let state = AppState::with_poll_interval(Duration::from_millis(250));
    let (state, effects) = update(state, Msg::SubmitClicked(race_form()));
    let generation = state.generation();
    assert_eq!(effects.len(), 1);

    let (_state, effects) = update(
        state,
        Msg::SubmitAccepted {
            generation,
            handle: JobHandle::new("t"),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::ArmPollTimer {
            generation,
            period: Duration::from_millis(250),
        }]
    );
}

#[test]
fn timer_tick_requests_a_poll_for_the_active_handle() {
    let (state, generation) = polling_state("abc");
    let before = state.clone();

    let (state, effects) = update(state, Msg::PollTimerFired { generation });
    assert_eq!(state, before);
    assert_eq!(
        effects,
        vec![Effect::PollProgress {
            generation,
            handle: JobHandle::new("abc"),
        }]
    );
}

#[test]
fn completed_scenario_records_link_and_notifies_once() {
    init_logging();
    let (state, generation) = polling_state("task-7");
    let mut emitted = Vec::new();

    let (state, effects) = update(state, Msg::PollTimerFired { generation });
    emitted.extend(notifications(&effects));
    let (mut state, effects) = update(
        state,
        Msg::PollSucceeded {
            generation,
            status: RawStatus {
                stage: Some("Processing".into()),
                percent: Some(40.0),
                ..RawStatus::default()
            },
        },
    );
    emitted.extend(notifications(&effects));
    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    assert_eq!(state.phase(), Phase::Polling);
    let view = state.view();
    let progress = view.progress.expect("progress view");
    assert_eq!(progress.stage_label, "Processing");
    assert_eq!(progress.percent, Some(40.0));
    assert_eq!(progress.percent_label, "40%");
    assert_eq!(progress.eta_label, "ETA: --");

    let (state, effects) = update(state, Msg::PollTimerFired { generation });
    emitted.extend(notifications(&effects));
    let (state, effects) = update(
        state,
        Msg::PollSucceeded {
            generation,
            status: RawStatus {
                stage: Some("Done".into()),
                download_link: Some("https://files.example.com/a.zip".into()),
                ..RawStatus::default()
            },
        },
    );
    emitted.extend(notifications(&effects));

    assert_eq!(
        effects,
        vec![
            Effect::DisarmPollTimer { generation },
            Effect::Notify(Notification::success("Your file is ready.")),
        ]
    );
    assert_eq!(state.phase(), Phase::Idle);
    assert!(!state.timer_armed());
    assert_eq!(state.handle(), None);
    assert_eq!(state.download_link(), Some("https://files.example.com/a.zip"));
    assert_eq!(
        state.last_outcome(),
        Some(&JobOutcome::Completed {
            download_link: "https://files.example.com/a.zip".into()
        })
    );
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].severity, Severity::Success);
}

#[test]
fn no_files_found_is_not_found_outcome() {
    let (state, generation) = polling_state("t");
    let (state, effects) = update(
        state,
        Msg::PollSucceeded {
            generation,
            status: status("No files found"),
        },
    );

    assert_eq!(state.last_outcome(), Some(&JobOutcome::NotFound));
    assert_eq!(state.handle(), None);
    assert!(!state.timer_armed());
    assert_eq!(
        effects,
        vec![
            Effect::DisarmPollTimer { generation },
            Effect::Notify(Notification::error("No files found for this selection.")),
        ]
    );
}

#[test]
fn error_stage_is_passed_through_verbatim() {
    let (state, generation) = polling_state("t");
    let (state, effects) = update(
        state,
        Msg::PollSucceeded {
            generation,
            status: status("Error: quota exceeded"),
        },
    );

    assert_eq!(
        state.last_outcome(),
        Some(&JobOutcome::Failed {
            message: "Error: quota exceeded".into()
        })
    );
    assert_eq!(state.phase(), Phase::Idle);
    assert_eq!(
        notifications(&effects),
        vec![Notification::error("Error: quota exceeded")]
    );
}

#[test]
fn poll_transport_failure_is_fatal() {
    let (state, generation) = polling_state("t");
    let (state, effects) = update(
        state,
        Msg::PollFailed {
            generation,
            message: "connection refused".into(),
        },
    );

    assert_eq!(state.phase(), Phase::Idle);
    assert!(!state.timer_armed());
    assert!(matches!(
        state.last_outcome(),
        Some(JobOutcome::Failed { message }) if message.contains("connection refused")
    ));
    assert_eq!(
        effects,
        vec![
            Effect::DisarmPollTimer { generation },
            Effect::Notify(Notification::error("Failed to fetch progress.")),
        ]
    );

    // Further ticks for the retired job do nothing.
    let (_state, effects) = update(state, Msg::PollTimerFired { generation });
    assert!(effects.is_empty());
}

#[test]
fn submit_transport_failure_returns_to_idle_without_timer() {
    let (state, effects) = update(AppState::new(), Msg::SubmitClicked(race_form()));
    let generation = state.generation();
    assert_eq!(effects.len(), 1);

    let (state, effects) = update(
        state,
        Msg::SubmitRejected {
            generation,
            message: "http status 500".into(),
        },
    );

    assert_eq!(state.phase(), Phase::Idle);
    assert_eq!(state.handle(), None);
    assert_eq!(
        effects,
        vec![Effect::Notify(Notification::error(
            "Failed to start job: http status 500"
        ))]
    );
}

#[test]
fn progress_does_not_survive_into_the_next_job() {
    let (state, generation) = polling_state("first");
    let (state, _) = update(
        state,
        Msg::PollSucceeded {
            generation,
            status: RawStatus {
                stage: Some("Error: boom".into()),
                percent: Some(90.0),
                ..RawStatus::default()
            },
        },
    );
    assert_eq!(state.progress().and_then(|p| p.percent), Some(90.0));

    let (state, effects) = update(state, Msg::SubmitClicked(race_form()));
    assert_eq!(effects.len(), 1);
    assert!(state.generation() > generation);
    assert_eq!(state.last_outcome(), None);
    let progress = state.progress().expect("fresh progress");
    assert_eq!(progress.percent, None);
    assert_eq!(progress.stage_label(), "Initializing...");
}

#[test]
fn terminal_transitions_are_exclusive() {
    let (state, generation) = polling_state("t");
    let (state, _) = update(
        state,
        Msg::PollSucceeded {
            generation,
            status: status("No files found"),
        },
    );

    // A late completion or cancellation cannot produce a second outcome.
    let (state, effects) = update(
        state,
        Msg::PollSucceeded {
            generation,
            status: RawStatus {
                download_link: Some("https://files.example.com/late.zip".into()),
                ..RawStatus::default()
            },
        },
    );
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::CancelClicked);
    assert!(effects.is_empty());
    assert_eq!(state.last_outcome(), Some(&JobOutcome::NotFound));
}

#[test]
fn view_is_busy_only_while_a_job_is_tracked() {
    assert!(!AppState::new().view().busy);

    let (state, generation) = polling_state("t");
    assert!(state.view().busy);

    let (state, _) = update(
        state,
        Msg::PollSucceeded {
            generation,
            status: RawStatus {
                stage: Some("Done".into()),
                download_link: Some("https://files.example.com/c.zip".into()),
                ..RawStatus::default()
            },
        },
    );
    let view = state.view();
    assert!(!view.busy);
    assert_eq!(
        view.progress.map(|p| p.stage_label),
        Some("Done".to_string())
    );
}
