//! Final stream health report.

use serde::Serialize;
use std::fmt;
use strum::AsRefStr;

/// Score (percent) at or above which a stream is healthy
pub const GOOD_THRESHOLD: f64 = 90.0;
/// Score (percent) at or above which a stream is marginal
pub const MARGINAL_THRESHOLD: f64 = 25.0;

/// Session length in whole minutes and seconds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TotalTime {
    pub minutes: u32,
    pub seconds: u32,
}

impl TotalTime {
    pub fn new(minutes: u32, seconds: u32) -> Self {
        Self { minutes, seconds }
    }

    pub fn from_seconds(total: u32) -> Self {
        Self {
            minutes: total / 60,
            seconds: total % 60,
        }
    }

    pub fn as_seconds(&self) -> u32 {
        self.minutes * 60 + self.seconds
    }
}

impl fmt::Display for TotalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m {:02}s", self.minutes, self.seconds)
    }
}

/// Overall stream health verdict
#[derive(AsRefStr, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum OverallHealth {
    Good,
    Marginal,
    #[default]
    Poor,
}

impl OverallHealth {
    /// Verdict for a composite score in percent
    pub fn from_score(score: f64) -> Self {
        if score >= GOOD_THRESHOLD {
            OverallHealth::Good
        } else if score >= MARGINAL_THRESHOLD {
            OverallHealth::Marginal
        } else {
            OverallHealth::Poor
        }
    }
}

impl fmt::Display for OverallHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Health of one completed transmission session
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HealthReport {
    pub total_time: TotalTime,
    /// Number of kept Encoder records reporting lost video frames
    pub lost_frame_events: u32,
    pub frame_lost_metric: f64,
    pub frame_size_change_metric: f64,
    pub frame_size_metric: f64,
    pub overall_health: OverallHealth,
}

impl HealthReport {
    /// Weakest of the three metrics, in percent
    pub fn score(&self) -> f64 {
        super::scoring::composite_score(
            self.frame_lost_metric,
            self.frame_size_change_metric,
            self.frame_size_metric,
        )
    }
}

impl fmt::Display for HealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stream health: {}", self.overall_health)?;
        writeln!(f, "Total time: {}", self.total_time)?;
        writeln!(f, "Lost Frames: {}", self.lost_frame_events)?;
        writeln!(f, "Frame loss metric: {}", self.frame_lost_metric)?;
        writeln!(f, "Frame size change metric: {}", self.frame_size_change_metric)?;
        write!(f, "Frame size metric: {}", self.frame_size_metric)
    }
}
