//! Single-pass session analyzer.
//!
//! Records are folded in input order. For each record:
//!
//! 1. `APP.STARTUP` / `APP.SHUTDOWN` markers are noted, even during warm-up.
//! 2. Records within the warm-up window after startup are otherwise ignored.
//! 3. A record is kept when its category has no kept record yet, or the last
//!    kept one is at least the de-duplication window old. Kept Encoder and
//!    ConnectionTx records feed the frame-loss and bitrate signals.
//! 4. Every non-warm-up Encoder record with a `LiveVideo` value drives the
//!    frame-size windows.
//! 5. Once shutdown is seen, the open frame-size window is closed into its bucket.

use crate::parsers::encoder::{frame_size_token, LIVE_VIDEO, LOST_VIDEO_FRAMES};
use crate::parsers::system::{ACTION_SHUTDOWN, ACTION_STARTUP};
use crate::parsers::transmission::{RECEIVED_BPS_INSTANTANEOUS, RECEIVED_BPS_SMOOTHED};
use crate::parsers::{Category, LogRecord, ParseError, Timestamp};
use crate::settings::{AnalyzerSettings, Compatibility};

use super::report::{HealthReport, OverallHealth, TotalTime};
use super::scoring::{self, FrameSizeBuckets};
use super::{AnalysisError, Metric};

/// Frame size currently reported by the encoder and when it was first seen
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameWindow {
    pub token: String,
    pub start: Timestamp,
}

#[derive(Debug, Default)]
struct SessionState {
    warmup_start: Option<Timestamp>,
    session_end: Option<Timestamp>,
    total_time: Option<TotalTime>,
    last_kept: [Option<Timestamp>; Category::KNOWN],
    lost_frame_events: u32,
    max_bitrate: i64,
    buckets: FrameSizeBuckets,
    frame_size_changes: u32,
    frame_window: Option<FrameWindow>,
}

/// Stateful fold over the records of one transmission session
#[derive(Debug)]
pub struct SessionAnalyzer {
    warmup_secs: u32,
    dedup_secs: u32,
    compatibility: Compatibility,
    state: SessionState,
    kept: Vec<LogRecord>,
}

impl Default for SessionAnalyzer {
    fn default() -> Self {
        Self::new(&AnalyzerSettings::default())
    }
}

impl SessionAnalyzer {
    pub fn new(settings: &AnalyzerSettings) -> Self {
        Self {
            warmup_secs: settings.warmup_secs,
            dedup_secs: settings.dedup_secs,
            compatibility: settings.compatibility,
            state: SessionState::default(),
            kept: Vec::new(),
        }
    }

    /// Parse one line with this session's decoder options and process it
    pub fn process_line(&mut self, line: &str) -> Result<(), ParseError> {
        let record = LogRecord::parse_with(line, &self.compatibility.decode_options())?;
        self.process(record);
        Ok(())
    }

    /// Fold one record into the session
    pub fn process(&mut self, record: LogRecord) {
        let session_ended = self.observe_markers(&record);

        let warming_up = self
            .state
            .warmup_start
            .is_some_and(|start| record.timestamp.is_within(&start, self.warmup_secs));

        let mut keep = false;
        if warming_up {
            tracing::debug!("Warm-up, ignoring {} at {}", record.category.name(), record.timestamp);
        } else {
            keep = self.update_signals(&record);
            self.track_frame_size(&record);
        }

        if self.compatibility.repeat_tail_accumulation {
            if self.state.total_time.is_some() {
                self.close_frame_window(record.timestamp);
            }
        } else if session_ended {
            self.close_frame_window(record.timestamp);
        }

        if keep {
            self.kept.push(record);
        }
    }

    /// Returns true when this record is the first shutdown marker
    fn observe_markers(&mut self, record: &LogRecord) -> bool {
        match record.action() {
            Some(ACTION_STARTUP) if self.state.warmup_start.is_none() => {
                tracing::info!("Session started at {}", record.timestamp);
                self.state.warmup_start = Some(record.timestamp);
                false
            }
            Some(ACTION_SHUTDOWN) if self.state.session_end.is_none() => {
                let start = self.state.warmup_start.unwrap_or_default();
                let total = TotalTime::from_seconds(record.timestamp.seconds_since(&start));
                tracing::info!("Session ended at {} after {}", record.timestamp, total);
                self.state.session_end = Some(record.timestamp);
                self.state.total_time = Some(total);
                true
            }
            _ => false,
        }
    }

    /// De-duplicate per category and update the loss and bitrate signals.
    /// Returns whether the record was kept.
    fn update_signals(&mut self, record: &LogRecord) -> bool {
        let Some(slot) = record.category.slot() else {
            return false;
        };

        if let Some(last) = self.state.last_kept[slot] {
            if record.timestamp.is_within(&last, self.dedup_secs) {
                tracing::debug!(
                    "Dropping {} at {}, last kept {}",
                    record.category.code(),
                    record.timestamp,
                    last
                );
                return false;
            }
        }
        self.state.last_kept[slot] = Some(record.timestamp);

        match record.category {
            Category::Encoder => {
                if record.int_field(LOST_VIDEO_FRAMES) > 0 {
                    self.state.lost_frame_events += 1;
                    tracing::debug!(
                        "Lost video frames at {} (event {})",
                        record.timestamp,
                        self.state.lost_frame_events
                    );
                }
            }
            Category::ConnectionTx => {
                // Compared on the smoothed rate, stored from the instantaneous one
                if record.int_field(RECEIVED_BPS_SMOOTHED) > self.state.max_bitrate {
                    self.state.max_bitrate = record.int_field(RECEIVED_BPS_INSTANTANEOUS);
                }
            }
            _ => {}
        }

        true
    }

    fn track_frame_size(&mut self, record: &LogRecord) {
        if record.category != Category::Encoder {
            return;
        }
        let Some(live_video) = record.field(LIVE_VIDEO) else {
            return;
        };
        let Some(token) = frame_size_token(live_video) else {
            tracing::warn!(
                "No frame size in LiveVideo value {:?} at {}",
                live_video,
                record.timestamp
            );
            return;
        };

        if self.state.frame_window.is_none() {
            self.state.frame_window = Some(FrameWindow {
                token: token.to_string(),
                start: record.timestamp,
            });
            return;
        }

        let freeze_start = self.compatibility.freeze_frame_window_start;
        let Some(window) = self.state.frame_window.as_mut() else {
            return;
        };
        if window.token == token {
            return;
        }

        let seconds = record.timestamp.seconds_since(&window.start);
        self.state.buckets.add(&window.token, seconds);
        self.state.frame_size_changes += 1;
        tracing::debug!(
            "Frame size {} -> {} at {} after {}s",
            window.token,
            token,
            record.timestamp,
            seconds
        );

        window.token = token.to_string();
        if !freeze_start {
            window.start = record.timestamp;
        }
    }

    /// Add the open frame-size window, up to `at`, into its bucket
    fn close_frame_window(&mut self, at: Timestamp) {
        let Some(window) = self.state.frame_window.as_mut() else {
            return;
        };
        let seconds = at.seconds_since(&window.start);
        self.state.buckets.add(&window.token, seconds);
        if !self.compatibility.repeat_tail_accumulation {
            window.start = at;
        }
    }

    pub fn lost_frame_events(&self) -> u32 {
        self.state.lost_frame_events
    }

    /// Session length, known once `APP.SHUTDOWN` has been seen
    pub fn total_time(&self) -> Option<TotalTime> {
        self.state.total_time
    }

    pub fn session_start(&self) -> Option<Timestamp> {
        self.state.warmup_start
    }

    pub fn session_end(&self) -> Option<Timestamp> {
        self.state.session_end
    }

    pub fn is_complete(&self) -> bool {
        self.state.total_time.is_some()
    }

    /// Instantaneous received bitrate stored by the max-bitrate tracker
    pub fn max_bitrate(&self) -> i64 {
        self.state.max_bitrate
    }

    pub fn frame_size_changes(&self) -> u32 {
        self.state.frame_size_changes
    }

    pub fn frame_size_buckets(&self) -> FrameSizeBuckets {
        self.state.buckets
    }

    pub fn frame_window(&self) -> Option<&FrameWindow> {
        self.state.frame_window.as_ref()
    }

    /// Records retained by the de-duplication window, in input order
    pub fn kept_records(&self) -> &[LogRecord] {
        &self.kept
    }

    /// Compute the metrics and verdict for the completed session
    pub fn finalize(self) -> Result<HealthReport, AnalysisError> {
        let total_time = self.state.total_time.ok_or(AnalysisError::IncompleteSession)?;
        let total_seconds = total_time.as_seconds();
        if total_seconds == 0 {
            return Err(AnalysisError::DegenerateMetric(Metric::FrameSizeChange));
        }

        let frame_lost_metric = scoring::frame_lost_metric(self.state.lost_frame_events);

        let rate = scoring::changes_per_second(
            self.state.frame_size_changes,
            total_seconds,
            self.compatibility.truncate_change_rate,
        );
        let frame_size_change_metric = scoring::frame_size_change_metric(rate);

        let k = scoring::bitrate_weight(self.state.max_bitrate);
        let frame_size_metric = scoring::frame_size_metric(k, total_seconds, &self.state.buckets)
            .ok_or(AnalysisError::DegenerateMetric(Metric::FrameSize))?;

        let score = scoring::composite_score(
            frame_lost_metric,
            frame_size_change_metric,
            frame_size_metric,
        );
        let overall_health = OverallHealth::from_score(score);

        tracing::info!(
            "Stream health {} (score {:.1}, {} kept records)",
            overall_health,
            score,
            self.kept.len()
        );

        Ok(HealthReport {
            total_time,
            lost_frame_events: self.state.lost_frame_events,
            frame_lost_metric,
            frame_size_change_metric,
            frame_size_metric,
            overall_health,
        })
    }
}
