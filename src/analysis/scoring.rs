//! Metric formulas fused into the stream health score.
//!
//! Each metric is nominally in `[0, 1]` (1 is best) and none is clamped.

use serde::Serialize;

/// Per-event penalty factor for lost video frames
pub const FRAME_LOSS_BASE: f64 = 0.5;

/// Max received bitrate up to which the low-resolution weight applies
pub const LOW_BITRATE_CEILING: i64 = 500_000;
/// Max received bitrate up to which the medium-resolution weight applies
pub const MEDIUM_BITRATE_CEILING: i64 = 1_100_000;

pub const WEIGHT_180: u64 = 16;
pub const WEIGHT_240: u64 = 8;
pub const WEIGHT_OTHER: u64 = 1;

/// Seconds spent in each frame-size class
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FrameSizeBuckets {
    pub p180: u64,
    pub p240: u64,
    pub other: u64,
}

impl FrameSizeBuckets {
    /// Add `seconds` to the bucket for a frame-size token
    pub fn add(&mut self, token: &str, seconds: u32) {
        let seconds = u64::from(seconds);
        match token {
            "180" => self.p180 += seconds,
            "240" => self.p240 += seconds,
            _ => self.other += seconds,
        }
    }

    /// `16 * p180 + 8 * p240 + other`
    pub fn weighted_seconds(&self) -> u64 {
        WEIGHT_180 * self.p180 + WEIGHT_240 * self.p240 + WEIGHT_OTHER * self.other
    }

    pub fn is_empty(&self) -> bool {
        self.p180 == 0 && self.p240 == 0 && self.other == 0
    }
}

/// `0.5 ^ events`: 1.0 with no loss, halving per event
pub fn frame_lost_metric(lost_frame_events: u32) -> f64 {
    FRAME_LOSS_BASE.powf(f64::from(lost_frame_events))
}

/// Frame-size changes per second of session. `total_seconds` must be non-zero.
pub fn changes_per_second(changes: u32, total_seconds: u32, truncate: bool) -> f64 {
    if truncate {
        f64::from(changes / total_seconds)
    } else {
        f64::from(changes) / f64::from(total_seconds)
    }
}

pub fn frame_size_change_metric(changes_per_second: f64) -> f64 {
    1.0 - changes_per_second
}

/// Expected frame-size weight `k` for the best bitrate the link sustained
pub fn bitrate_weight(max_bitrate: i64) -> u64 {
    if max_bitrate <= LOW_BITRATE_CEILING {
        WEIGHT_180
    } else if max_bitrate <= MEDIUM_BITRATE_CEILING {
        WEIGHT_240
    } else {
        WEIGHT_OTHER
    }
}

/// `k * total_seconds / weighted_seconds`, `None` when no frame-size time was recorded
pub fn frame_size_metric(k: u64, total_seconds: u32, buckets: &FrameSizeBuckets) -> Option<f64> {
    let denominator = buckets.weighted_seconds();
    if denominator == 0 {
        return None;
    }
    Some(k as f64 * f64::from(total_seconds) / denominator as f64)
}

/// Weakest metric, in percent
pub fn composite_score(frame_lost: f64, frame_size_change: f64, frame_size: f64) -> f64 {
    frame_lost.min(frame_size_change).min(frame_size) * 100.0
}
