use std::sync::mpsc;
use std::time::Duration;

use sampler_logging::sampler_trace;
use tokio::runtime::Handle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, Generation};

const MIN_PERIOD: Duration = Duration::from_millis(10);

/// Recurring poll timer for one job. The first tick fires one period after arming.
/// Dropping the timer stops it.
pub(crate) struct PollTimer {
    generation: Generation,
    token: CancellationToken,
}

impl PollTimer {
    pub(crate) fn arm(
        runtime: &Handle,
        generation: Generation,
        period: Duration,
        event_tx: mpsc::Sender<EngineEvent>,
    ) -> Self {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let period = period.max(MIN_PERIOD);

        runtime.spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = ticks.tick() => {
                        if event_tx.send(EngineEvent::TimerFired { generation }).is_err() {
                            break;
                        }
                    }
                }
            }
            sampler_trace!("poll timer generation={} stopped", generation);
        });

        Self { generation, token }
    }

    pub(crate) fn generation(&self) -> Generation {
        self.generation
    }
}

impl Drop for PollTimer {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
