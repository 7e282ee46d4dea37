use std::time::Duration;

use sampler_core::{Effect, JobHandle, Msg, RawStatus, SamplingRequest};
use sampler_engine::{EngineEvent, EngineHandle, IssueReport, SampleParams, StatusReport, TaskId};
use sampler_logging::{sampler_debug, sampler_info, sampler_warn};

use crate::notify::NotificationSink;

/// Executes controller effects on the engine and turns engine events back into messages.
pub struct EffectRunner<S> {
    engine: EngineHandle,
    sink: S,
}

impl<S: NotificationSink> EffectRunner<S> {
    pub fn new(engine: EngineHandle, sink: S) -> Self {
        Self { engine, sink }
    }

    pub fn watch_interrupts(&self) {
        self.engine.watch_interrupts();
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitSample {
                    generation,
                    request,
                } => {
                    log_submit(generation, &request);
                    self.engine.submit(generation, to_params(&request));
                }
                Effect::ArmPollTimer { generation, period } => {
                    self.engine.arm_timer(generation, period);
                }
                Effect::DisarmPollTimer { generation } => {
                    self.engine.disarm_timer(generation);
                }
                Effect::PollProgress { generation, handle } => {
                    sampler_debug!("PollProgress generation={} task_id={}", generation, handle);
                    self.engine.poll(generation, TaskId(handle.as_str().to_string()));
                }
                Effect::SendIssueReport { email, description } => {
                    sampler_info!("SendIssueReport description_len={}", description.len());
                    self.engine.report_issue(IssueReport { email, description });
                }
                Effect::Notify(notification) => self.sink.notify(&notification),
            }
        }
    }

    /// Waits up to `timeout` for the next engine event.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(to_msg)
    }

    #[cfg(test)]
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

fn log_submit(generation: u64, request: &SamplingRequest) {
    sampler_info!(
        "SubmitSample generation={} group={} range={}..={} num_docs={:?}",
        generation,
        request.social_group(),
        request.start(),
        request.end(),
        request.num_docs()
    );
}

fn to_params(request: &SamplingRequest) -> SampleParams {
    SampleParams {
        social_group: request.social_group().as_str().to_string(),
        start_date: request.start().to_string(),
        end_date: request.end().to_string(),
        num_docs: request.num_docs(),
    }
}

fn to_raw_status(report: StatusReport) -> RawStatus {
    RawStatus {
        stage: report.stage,
        percent: report.percent,
        eta_human: report.eta_human,
        eta_seconds: report.eta_seconds,
        download_link: report.download_link,
    }
}

fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SubmitCompleted { generation, result } => match result {
            Ok(task_id) => Msg::SubmitAccepted {
                generation,
                handle: JobHandle::new(task_id.0),
            },
            Err(err) => {
                sampler_warn!("submit generation={} failed: {}", generation, err);
                Msg::SubmitRejected {
                    generation,
                    message: err.to_string(),
                }
            }
        },
        EngineEvent::PollCompleted { generation, result } => match result {
            Ok(report) => Msg::PollSucceeded {
                generation,
                status: to_raw_status(report),
            },
            Err(err) => {
                sampler_warn!("poll generation={} failed: {}", generation, err);
                Msg::PollFailed {
                    generation,
                    message: err.to_string(),
                }
            }
        },
        EngineEvent::TimerFired { generation } => Msg::PollTimerFired { generation },
        EngineEvent::IssueReported { result } => Msg::IssueReportFinished {
            result: result.map_err(|err| {
                sampler_warn!("issue report failed: {}", err);
                err.to_string()
            }),
        },
        EngineEvent::Interrupted => Msg::CancelClicked,
    }
}

#[cfg(test)]
mod tests {
    use sampler_core::{SocialGroup, YearMonth};
    use sampler_engine::{FailureKind, TransportError};

    use super::*;

    #[test]
    fn request_maps_to_wire_params() {
        let request = SamplingRequest::new(
            SocialGroup::Sexuality,
            YearMonth::new(2019, 2).unwrap(),
            YearMonth::new(2019, 11).unwrap(),
            Some(1000),
        )
        .unwrap();
        assert_eq!(
            to_params(&request),
            SampleParams {
                social_group: "sexuality".into(),
                start_date: "2019-02".into(),
                end_date: "2019-11".into(),
                num_docs: Some(1000),
            }
        );
    }

    #[test]
    fn transport_errors_become_failure_messages() {
        let msg = to_msg(EngineEvent::PollCompleted {
            generation: 4,
            result: Err(TransportError {
                kind: FailureKind::HttpStatus(502),
                message: "502 Bad Gateway".into(),
            }),
        });
        assert_eq!(
            msg,
            Msg::PollFailed {
                generation: 4,
                message: "http status 502: 502 Bad Gateway".into(),
            }
        );
    }

    #[test]
    fn interrupt_cancels() {
        assert_eq!(to_msg(EngineEvent::Interrupted), Msg::CancelClicked);
        assert_eq!(
            to_msg(EngineEvent::TimerFired { generation: 2 }),
            Msg::PollTimerFired { generation: 2 }
        );
    }
}
