use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use sampler_core::{update, AppState, JobOutcome, Msg, Phase, SamplingForm};
use sampler_engine::EngineHandle;
use sampler_logging::{sampler_debug, sampler_info};

use crate::cli::Command;
use crate::config::SamplerConfig;
use crate::effects::EffectRunner;
use crate::notify::{NotificationSink, TerminalSink};
use crate::render;

/// How long the loop blocks waiting for an engine event.
const EVENT_WAIT: Duration = Duration::from_millis(100);

pub fn run(config: &SamplerConfig, command: Command) -> anyhow::Result<ExitCode> {
    let engine = EngineHandle::new(&config.gateway_settings())
        .with_context(|| format!("starting engine for {}", config.base_url))?;
    let mut session = Session::new(
        AppState::with_poll_interval(config.poll_interval()),
        EffectRunner::new(engine, TerminalSink),
    );

    let success = match command {
        Command::Sample(args) => {
            session.runner.watch_interrupts();
            let form = SamplingForm {
                social_group: args.group,
                start: args.start,
                end: args.end,
                num_docs: args.num_docs,
            };
            session.dispatch(Msg::SubmitClicked(form));
            session.run_until_settled();
            match session.state.last_outcome() {
                Some(JobOutcome::Completed { download_link }) => {
                    println!("{download_link}");
                    true
                }
                _ => false,
            }
        }
        Command::ReportIssue(args) => {
            session.dispatch(Msg::ReportIssueClicked {
                email: args.email,
                description: args.description,
            });
            let sent = session.state.sending_issue();
            session.run_until_settled();
            sent && session.issue_sent
        }
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Owns the controller state and feeds it one message at a time.
struct Session<S> {
    state: AppState,
    runner: EffectRunner<S>,
    issue_sent: bool,
}

impl<S: NotificationSink> Session<S> {
    fn new(state: AppState, runner: EffectRunner<S>) -> Self {
        Self {
            state,
            runner,
            issue_sent: false,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        if let Msg::IssueReportFinished { result } = &msg {
            self.issue_sent = result.is_ok();
        }
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            if let Some(line) = render::status_line(&state.view()) {
                println!("{line}");
            }
        }
        self.state = state;
        self.runner.run(effects);
    }

    fn is_settled(&self) -> bool {
        self.state.phase() == Phase::Idle && !self.state.sending_issue()
    }

    fn run_until_settled(&mut self) {
        while !self.is_settled() {
            if let Some(msg) = self.runner.next_msg(EVENT_WAIT) {
                sampler_debug!("dispatch {:?}", msg);
                self.dispatch(msg);
            }
        }
        sampler_info!("settled: outcome={:?}", self.state.last_outcome());
    }
}
