use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use sampler_logging::{sampler_debug, sampler_info, sampler_warn};
use tokio::runtime::{Handle, Runtime};

use crate::gateway::{GatewaySettings, RemoteJobGateway, ReqwestGateway};
use crate::timer::PollTimer;
use crate::{EngineEvent, Generation, IssueReport, SampleParams, TaskId};

enum EngineCommand {
    Submit {
        generation: Generation,
        params: SampleParams,
    },
    Poll {
        generation: Generation,
        task_id: TaskId,
    },
    ArmTimer {
        generation: Generation,
        period: Duration,
    },
    DisarmTimer {
        generation: Generation,
    },
    ReportIssue(IssueReport),
    WatchInterrupts,
}

/// Runs gateway calls and the poll timer on a background tokio runtime.
/// Results come back as [`EngineEvent`]s; nothing here interprets them.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: &GatewaySettings) -> io::Result<Self> {
        let gateway = ReqwestGateway::new(settings)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
        Self::with_gateway(Arc::new(gateway))
    }

    pub fn with_gateway(gateway: Arc<dyn RemoteJobGateway>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = Runtime::new()?;

        thread::Builder::new()
            .name("sampler-engine".to_string())
            .spawn(move || run(runtime, gateway, cmd_rx, event_tx))?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, generation: Generation, params: SampleParams) {
        self.send(EngineCommand::Submit { generation, params });
    }

    pub fn poll(&self, generation: Generation, task_id: TaskId) {
        self.send(EngineCommand::Poll {
            generation,
            task_id,
        });
    }

    /// Arms the single poll timer. An armed timer is stopped first.
    pub fn arm_timer(&self, generation: Generation, period: Duration) {
        self.send(EngineCommand::ArmTimer { generation, period });
    }

    pub fn disarm_timer(&self, generation: Generation) {
        self.send(EngineCommand::DisarmTimer { generation });
    }

    pub fn report_issue(&self, report: IssueReport) {
        self.send(EngineCommand::ReportIssue(report));
    }

    /// Emits [`EngineEvent::Interrupted`] on every Ctrl-C from now on.
    pub fn watch_interrupts(&self) {
        self.send(EngineCommand::WatchInterrupts);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            sampler_warn!("engine thread is gone; command dropped");
        }
    }
}

fn run(
    runtime: Runtime,
    gateway: Arc<dyn RemoteJobGateway>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let handle = runtime.handle().clone();
    let mut timer: Option<PollTimer> = None;

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::ArmTimer { generation, period } => {
                if let Some(previous) = timer.take() {
                    sampler_warn!(
                        "arming timer generation={} while generation={} is armed; stopping it",
                        generation,
                        previous.generation()
                    );
                }
                sampler_debug!("arm poll timer generation={} period={:?}", generation, period);
                timer = Some(PollTimer::arm(&handle, generation, period, event_tx.clone()));
            }
            EngineCommand::DisarmTimer { generation } => match timer.take() {
                Some(armed) if armed.generation() == generation => {
                    sampler_debug!("disarm poll timer generation={}", generation);
                }
                other => {
                    sampler_warn!("no armed timer for generation={}", generation);
                    timer = other;
                }
            },
            EngineCommand::WatchInterrupts => watch_interrupts(&handle, event_tx.clone()),
            command => {
                let gateway = gateway.clone();
                let event_tx = event_tx.clone();
                handle.spawn(async move {
                    handle_call(gateway.as_ref(), command, event_tx).await;
                });
            }
        }
    }

    drop(timer);
    runtime.shutdown_background();
}

async fn handle_call(
    gateway: &dyn RemoteJobGateway,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Submit { generation, params } => EngineEvent::SubmitCompleted {
            generation,
            result: gateway.submit(&params).await,
        },
        EngineCommand::Poll {
            generation,
            task_id,
        } => EngineEvent::PollCompleted {
            generation,
            result: gateway.poll(&task_id).await,
        },
        EngineCommand::ReportIssue(report) => EngineEvent::IssueReported {
            result: gateway.report_issue(&report).await,
        },
        EngineCommand::ArmTimer { .. }
        | EngineCommand::DisarmTimer { .. }
        | EngineCommand::WatchInterrupts => return,
    };
    let _ = event_tx.send(event);
}

fn watch_interrupts(handle: &Handle, event_tx: mpsc::Sender<EngineEvent>) {
    handle.spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            sampler_info!("interrupt received");
            if event_tx.send(EngineEvent::Interrupted).is_err() {
                break;
            }
        }
    });
}
