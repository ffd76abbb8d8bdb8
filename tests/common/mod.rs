//! Common test utilities shared across all test modules
//!
//! This module provides helper functions for reading example logs,
//! building LiveStats lines, and other common testing operations.

#![allow(dead_code)]

use std::path::Path;

/// Helper function to read a text file, panicking with a clear message if not found.
/// This ensures CI catches missing example files instead of silently skipping tests.
pub fn read_example_file(file_path: &str) -> String {
    std::fs::read_to_string(file_path)
        .unwrap_or_else(|e| panic!("Failed to read example file '{}': {}", file_path, e))
}

/// Check if an example file exists (useful for conditional tests)
pub fn example_file_exists(file_path: &str) -> bool {
    Path::new(file_path).exists()
}

/// Example log file paths
pub mod example_files {
    /// Complete session: startup, a few frame-size changes, shutdown
    pub const SHORT_SESSION: &str = "exampleLogs/livestat/short_session.log";
    /// Session cut off before the shutdown marker
    pub const INCOMPLETE_SESSION: &str = "exampleLogs/livestat/incomplete_session.log";
}

/// LiveStats line builders for synthetic sessions
pub mod lines {
    pub const VERSION: &str = "3.1.0.DEV LVST";

    pub fn line(timestamp: &str, code: &str, payload: &str) -> String {
        format!("{} {} {} {}", timestamp, VERSION, code, payload)
    }

    pub fn startup(timestamp: &str) -> String {
        line(timestamp, "SD", "[Action=APP.STARTUP]")
    }

    pub fn shutdown(timestamp: &str) -> String {
        line(timestamp, "SD", "[Action=APP.SHUTDOWN]")
    }

    /// Encoder line with the given lost-frame count and optional `LiveVideo` value
    pub fn encoder(timestamp: &str, lost_frames: u32, live_video: Option<&str>) -> String {
        let stats = format!(
            "[174|5000000|0|4038667|4009768|128144|0|*|7498|100|0|0|{}|0.831324]",
            lost_frames
        );
        match live_video {
            Some(video) => line(timestamp, "EN", &format!("{} [LiveVideo={}]", stats, video)),
            None => line(timestamp, "EN", &stats),
        }
    }

    /// Encoder line reporting `<width>x<height>t@29.97` video
    pub fn encoder_at(timestamp: &str, width: u32, height: u32) -> String {
        encoder(
            timestamp,
            0,
            Some(&format!("{}x{}t@29.97(30000/1001)|h264|yuv420p", width, height)),
        )
    }

    /// Connection transmission line with the two received-bitrate fields set
    pub fn transmission(timestamp: &str, smoothed: i64, instantaneous: i64) -> String {
        line(
            timestamp,
            "CX",
            &format!(
                "[0|10|6|2500000|44.58|100.00|32.90|0|10|1.0615|5000000|0|{}|{}|1.00]",
                smoothed, instantaneous
            ),
        )
    }
}

/// Session helpers
pub mod session {
    use streamhealth::{AnalyzerSettings, Compatibility, SessionAnalyzer};

    /// Run `lines` through a fresh analyzer
    pub fn analyze<S: AsRef<str>>(lines: &[S], settings: &AnalyzerSettings) -> SessionAnalyzer {
        let mut analyzer = SessionAnalyzer::new(settings);
        for line in lines {
            analyzer
                .process_line(line.as_ref())
                .unwrap_or_else(|e| panic!("Failed to parse '{}': {}", line.as_ref(), e));
        }
        analyzer
    }

    pub fn reference_settings() -> AnalyzerSettings {
        AnalyzerSettings {
            compatibility: Compatibility::reference(),
            ..Default::default()
        }
    }
}

/// Float comparison helpers for testing
pub mod float_cmp {
    /// Check if two floats are approximately equal within a tolerance
    pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    /// Assert that two floats are approximately equal
    pub fn assert_approx_eq(a: f64, b: f64, tolerance: f64) {
        assert!(
            approx_eq(a, b, tolerance),
            "Values not approximately equal: {} vs {} (tolerance: {})",
            a,
            b,
            tolerance
        );
    }

    /// Default tolerance for float comparisons (0.0001)
    pub const DEFAULT_TOLERANCE: f64 = 0.0001;
}
