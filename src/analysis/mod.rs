//! Stream health analysis.
//!
//! [`SessionAnalyzer`] folds the parsed records of one transmission session and
//! fuses three signals into a [`HealthReport`]:
//!
//! - frame loss: kept Encoder records reporting lost video frames
//! - frame-size stability: how often the encoder changed its frame size
//! - frame size: time spent at low resolutions, weighted by the best bitrate
//!   the link sustained

pub mod report;
pub mod scoring;
pub mod session;

pub use report::{HealthReport, OverallHealth, TotalTime};
pub use scoring::FrameSizeBuckets;
pub use session::{FrameWindow, SessionAnalyzer};

use std::fmt;

/// Metric whose formula has a zero denominator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    /// Session length is zero seconds
    FrameSizeChange,
    /// No time was recorded in any frame-size bucket
    FrameSize,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::FrameSizeChange => write!(f, "frame size change"),
            Metric::FrameSize => write!(f, "frame size"),
        }
    }
}

/// Errors that can occur when finalizing a session
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// `APP.SHUTDOWN` was never seen
    #[error("incomplete session: no APP.SHUTDOWN record")]
    IncompleteSession,
    #[error("cannot compute {0} metric: zero denominator")]
    DegenerateMetric(Metric),
}
