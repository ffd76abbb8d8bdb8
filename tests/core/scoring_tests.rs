//! Tests for the metric formulas and the health verdict

use crate::common::float_cmp::{assert_approx_eq, DEFAULT_TOLERANCE};
use streamhealth::analysis::scoring::{
    bitrate_weight, changes_per_second, composite_score, frame_lost_metric,
    frame_size_change_metric, frame_size_metric, FrameSizeBuckets,
};
use streamhealth::{HealthReport, OverallHealth, TotalTime};

// ============================================
// Frame Loss
// ============================================

#[test]
fn test_frame_lost_metric_halves_per_event() {
    let mut previous = frame_lost_metric(0);
    assert_eq!(previous, 1.0);
    for events in 1..8 {
        let current = frame_lost_metric(events);
        assert_approx_eq(current, previous / 2.0, 1e-12);
        previous = current;
    }
}

// ============================================
// Frame-Size Buckets
// ============================================

#[test]
fn test_buckets_route_tokens() {
    let mut buckets = FrameSizeBuckets::default();
    buckets.add("180", 3);
    buckets.add("240", 4);
    buckets.add("1080", 5);
    buckets.add("720", 6);

    assert_eq!(buckets.p180, 3);
    assert_eq!(buckets.p240, 4);
    assert_eq!(buckets.other, 11);
    assert_eq!(buckets.weighted_seconds(), 16 * 3 + 8 * 4 + 11);
}

#[test]
fn test_buckets_match_tokens_exactly() {
    let mut buckets = FrameSizeBuckets::default();
    buckets.add("1800", 2);
    buckets.add(" 240", 2);
    assert_eq!(buckets.other, 4);
    assert_eq!(buckets.p180 + buckets.p240, 0);
}

#[test]
fn test_frame_size_metric_without_time_is_none() {
    assert_eq!(frame_size_metric(1, 120, &FrameSizeBuckets::default()), None);
}

#[test]
fn test_frame_size_metric_expected_resolution_scores_one() {
    let buckets = FrameSizeBuckets {
        p180: 0,
        p240: 100,
        other: 0,
    };
    let metric = frame_size_metric(bitrate_weight(800_000), 100, &buckets).unwrap();
    assert_approx_eq(metric, 1.0, DEFAULT_TOLERANCE);
}

// ============================================
// Change Rate
// ============================================

#[test]
fn test_change_metric_can_go_negative() {
    let rate = changes_per_second(300, 120, false);
    assert_approx_eq(frame_size_change_metric(rate), -1.5, DEFAULT_TOLERANCE);
}

#[test]
fn test_truncated_rate_is_whole_number() {
    assert_eq!(changes_per_second(119, 120, true), 0.0);
    assert_eq!(changes_per_second(120, 120, true), 1.0);
    assert_eq!(frame_size_change_metric(changes_per_second(240, 120, true)), -1.0);
}

// ============================================
// Verdict
// ============================================

#[test]
fn test_composite_is_weakest_metric() {
    assert_approx_eq(composite_score(0.5, 0.98, 1.4), 50.0, DEFAULT_TOLERANCE);
    assert_approx_eq(composite_score(1.0, 1.0, 0.2), 20.0, DEFAULT_TOLERANCE);
}

#[test]
fn test_report_display() {
    let report = HealthReport {
        total_time: TotalTime::new(2, 0),
        lost_frame_events: 1,
        frame_lost_metric: 0.5,
        frame_size_change_metric: 1.0,
        frame_size_metric: 1.5,
        overall_health: OverallHealth::Marginal,
    };

    let text = report.to_string();
    assert!(text.starts_with("Stream health: Marginal"));
    assert!(text.contains("Lost Frames: 1"));
    assert!(text.contains("2m 00s"));
    assert_approx_eq(report.score(), 50.0, DEFAULT_TOLERANCE);
}

#[test]
fn test_report_serializes_verdict_name() {
    let report = HealthReport {
        total_time: TotalTime::from_seconds(75),
        lost_frame_events: 0,
        frame_lost_metric: 1.0,
        frame_size_change_metric: 1.0,
        frame_size_metric: 1.0,
        overall_health: OverallHealth::Good,
    };
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["overall_health"], "Good");
    assert_eq!(json["total_time"]["minutes"], 1);
    assert_eq!(json["total_time"]["seconds"], 15);
}
