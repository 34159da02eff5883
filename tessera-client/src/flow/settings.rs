//! Deployment flow settings

use std::time::Duration;
use tessera_core::schedule::ScheduleFrequency;

/// How long the progress overlay stays up after a deploy settles
pub const DEFAULT_OVERLAY_DISMISS_DELAY: Duration = Duration::from_millis(500);

/// Process-wide inputs of the deployment flow
///
/// Passed in explicitly rather than read from global state so a flow can be
/// built anywhere, including tests.
#[derive(Debug, Clone)]
pub struct FlowSettings {
    /// Schedule frequencies allowed by the data-quality feature limits
    pub schedule_options: Option<Vec<ScheduleFrequency>>,

    /// Whether feature limits are enforced on this deployment
    pub limits_enabled: bool,

    /// Delay before the progress overlay is hidden after a deploy settles
    pub overlay_dismiss_delay: Duration,
}

impl FlowSettings {
    /// Allowed schedule frequencies, or `None` when anything goes
    ///
    /// An empty option list is treated as "no restriction".
    pub fn allowed_schedules(&self) -> Option<&[ScheduleFrequency]> {
        self.schedule_options
            .as_deref()
            .filter(|options| !options.is_empty())
    }
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            schedule_options: None,
            limits_enabled: false,
            overlay_dismiss_delay: DEFAULT_OVERLAY_DISMISS_DELAY,
        }
    }
}
