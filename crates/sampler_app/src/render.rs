use sampler_core::AppViewModel;

/// One status line per view change while a job is tracked.
pub fn status_line(view: &AppViewModel) -> Option<String> {
    if !view.busy {
        return None;
    }
    let progress = view.progress.as_ref()?;
    let bar = match progress.percent {
        Some(percent) => bar(percent),
        None => "[ ~~~ working ~~~ ]".to_string(),
    };
    Some(format!(
        "{} {} {} ({})",
        bar, progress.percent_label, progress.stage_label, progress.eta_label
    ))
}

fn bar(percent: f64) -> String {
    const WIDTH: usize = 18;
    let filled = ((percent / 100.0) * WIDTH as f64).round() as usize;
    let filled = filled.min(WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use sampler_core::{update, AppState, JobHandle, Msg, RawStatus, SamplingForm, SocialGroup};

    use super::*;

    #[test]
    fn idle_view_has_no_status_line() {
        assert_eq!(status_line(&AppState::new().view()), None);
    }

    #[test]
    fn polling_view_shows_percent_and_stage() {
        let form = SamplingForm {
            social_group: Some(SocialGroup::Race),
            start: Some("2020-01".parse().unwrap()),
            end: Some("2020-02".parse().unwrap()),
            num_docs: None,
        };
        let (state, _) = update(AppState::new(), Msg::SubmitClicked(form));
        let line = status_line(&state.view()).expect("line while submitting");
        assert!(line.contains("Initializing..."));
        assert!(line.contains("--"));

        let generation = state.generation();
        let (state, _) = update(
            state,
            Msg::SubmitAccepted {
                generation,
                handle: JobHandle::new("t"),
            },
        );
        let (state, _) = update(
            state,
            Msg::PollSucceeded {
                generation,
                status: RawStatus {
                    stage: Some("Sampling".into()),
                    percent: Some(50.0),
                    eta_human: Some("1 min".into()),
                    ..RawStatus::default()
                },
            },
        );
        assert_eq!(
            status_line(&state.view()).unwrap(),
            "[#########.........] 50% Sampling (ETA: 1 min)"
        );

        let (state, _) = update(
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
        assert_eq!(status_line(&state.view()), None);
    }
}
