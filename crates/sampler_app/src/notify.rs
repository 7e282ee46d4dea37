use sampler_core::{Notification, Severity};
use sampler_logging::{sampler_info, sampler_warn};

/// Receives user-facing messages produced by the controller.
pub trait NotificationSink {
    fn notify(&mut self, notification: &Notification);
}

/// Prints notifications; errors go to stderr.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl NotificationSink for TerminalSink {
    fn notify(&mut self, notification: &Notification) {
        match notification.severity {
            Severity::Success => {
                sampler_info!("notify success: {}", notification.message);
                println!("✔ {}", notification.message);
            }
            Severity::Info => {
                sampler_info!("notify info: {}", notification.message);
                println!("{}", notification.message);
            }
            Severity::Error => {
                sampler_warn!("notify error: {}", notification.message);
                eprintln!("✘ {}", notification.message);
            }
        }
    }
}
