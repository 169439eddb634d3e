// Dashboard domain models

mod chart;
mod probe;
mod target;

pub use chart::{ChartSeries, TargetStatus};
pub use probe::{Hop, PingOutcome, PingSample, TracerouteSnapshot};
pub use target::MonitoredTarget;
