/// Daily reminder scheduling
///
/// The platform notification service is a thin external collaborator; the
/// tracker only needs to schedule one repeating daily notification and to
/// cancel whatever is scheduled. Permission denial is not fatal: the
/// reminder feature degrades to inert and the rest of the app carries on.

use thiserror::Error;

/// Errors that can occur while talking to the notification service
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification permission denied")]
    PermissionDenied,

    #[error("Scheduler error: {0}")]
    Scheduler(String),
}

/// Interface to the platform's local notification scheduler
pub trait Notifier {
    /// Schedule a repeating daily notification at the given wall-clock time
    fn schedule_daily(&mut self, hour: u32, minute: u32) -> Result<(), NotifyError>;

    /// Cancel every scheduled notification
    fn cancel_all(&mut self) -> Result<(), NotifyError>;
}

/// Best-effort local scheduler
///
/// Records the requested schedule and logs it. Platforms with a real
/// notification daemon plug in behind the same trait.
#[derive(Debug, Default)]
pub struct LocalNotifier {
    scheduled: Option<(u32, u32)>,
}

impl LocalNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently scheduled time, if any
    pub fn scheduled(&self) -> Option<(u32, u32)> {
        self.scheduled
    }
}

impl Notifier for LocalNotifier {
    fn schedule_daily(&mut self, hour: u32, minute: u32) -> Result<(), NotifyError> {
        self.scheduled = Some((hour, minute));
        tracing::info!("Scheduled daily reminder at {:02}:{:02}", hour, minute);
        Ok(())
    }

    fn cancel_all(&mut self) -> Result<(), NotifyError> {
        self.scheduled = None;
        tracing::info!("Cancelled all scheduled reminders");
        Ok(())
    }
}
