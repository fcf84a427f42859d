//! Run summary shown after a successful pass.

use crate::mpeg::SummaryHeader;
use crate::trim::{PredictionPolicy, RunStats, TrimWindow};
use serde::Serialize;
use std::time::Duration;

/// Everything worth telling the user about a finished run.
///
/// Durations are whole milliseconds so the JSON form stays flat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnipReport {
    pub start_after_ms: u64,
    pub end_at_ms: u64,
    pub prediction: PredictionPolicy,
    pub frames_encountered: u64,
    pub predicted_frames: u64,
    pub frames_dropped: u64,
    pub frames_included: u64,
    pub cumulative_duration_ms: u64,
    pub output_duration_ms: u64,
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub tags_passed: u64,
    pub tag_bytes: u64,
    pub skipped_bytes: u64,
    pub summary_header: Option<SummaryHeader>,
    /// Frames seen minus frames predicted; positive when the estimate was low.
    pub prediction_error: i64,
    pub elapsed_ms: u64,
    pub dry_run: bool,
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

fn signed(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

impl SnipReport {
    pub fn new(
        window: &TrimWindow,
        prediction: PredictionPolicy,
        stats: &RunStats,
        elapsed: Duration,
    ) -> Self {
        Self {
            start_after_ms: millis(window.start_after),
            end_at_ms: millis(window.end_at),
            prediction,
            frames_encountered: stats.frames_encountered,
            predicted_frames: stats.predicted_frames,
            frames_dropped: stats.frames_dropped,
            frames_included: stats.frames_included,
            cumulative_duration_ms: millis(stats.cumulative_duration),
            output_duration_ms: millis(stats.output_duration),
            input_bytes: stats.input_bytes,
            output_bytes: stats.output_bytes + stats.tag_bytes,
            tags_passed: stats.tags_passed,
            tag_bytes: stats.tag_bytes,
            skipped_bytes: stats.skipped_bytes,
            summary_header: stats.summary_header,
            prediction_error: signed(stats.frames_encountered) - signed(stats.predicted_frames),
            elapsed_ms: millis(elapsed),
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> RunStats {
        RunStats {
            frames_encountered: 100,
            frames_dropped: 26,
            frames_included: 74,
            cumulative_duration: Duration::from_nanos(2_612_244_800),
            output_duration: Duration::from_nanos(1_933_061_152),
            input_bytes: 42_127,
            effective_bytes: 42_117,
            predicted_frames: 101,
            frame_bytes: 41_700,
            output_bytes: 30_858,
            tags_passed: 1,
            tag_bytes: 10,
            skipped_bytes: 0,
            summary_header: Some(SummaryHeader::Xing),
        }
    }

    #[test]
    fn report_converts_durations_to_millis() {
        let window = TrimWindow::new(Duration::from_millis(500), Some(Duration::from_millis(200)));
        let report = SnipReport::new(
            &window,
            PredictionPolicy::FirstFrame,
            &stats(),
            Duration::from_micros(1_500),
        );

        assert_eq!(report.start_after_ms, 500);
        assert_eq!(report.end_at_ms, 200);
        assert_eq!(report.cumulative_duration_ms, 2612);
        assert_eq!(report.output_duration_ms, 1933);
        assert_eq!(report.elapsed_ms, 1);
        // Tags are part of what was written.
        assert_eq!(report.output_bytes, 30_868);
        assert_eq!(report.prediction_error, -1);
        assert!(!report.dry_run);
    }

    #[test]
    fn json_report_has_flat_fields() {
        let report = SnipReport::new(
            &TrimWindow::default(),
            PredictionPolicy::RunningAverage,
            &stats(),
            Duration::ZERO,
        )
        .with_dry_run(true);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["frames_included"], 74);
        assert_eq!(value["prediction"], "running-average");
        assert_eq!(value["summary_header"], "Xing");
        assert_eq!(value["dry_run"], true);
        assert_eq!(value["prediction_error"], -1);
    }
}
