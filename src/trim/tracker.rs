//! Frame timing and total frame count prediction.
//!
//! The total duration of a stream is unknown until its last frame, but its
//! byte size is known upfront. The tracker turns that byte budget into a frame
//! count estimate, which is all tail trimming needs.

use super::stats::RunStats;
use super::window::PredictionPolicy;
use crate::mpeg::Frame;
use std::time::Duration;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Playback time of `sample_count` samples at `sampling_rate`, truncated to
/// whole nanoseconds. A zero rate yields zero.
pub fn frame_duration(sample_count: u32, sampling_rate: u32) -> Duration {
    if sampling_rate == 0 {
        return Duration::ZERO;
    }
    Duration::from_nanos(u64::from(sample_count) * NANOS_PER_SEC / u64::from(sampling_rate))
}

/// What the tracker learned from one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub duration: Duration,
    /// 1-based position of the frame among real frames.
    pub frame_number: u64,
    /// Set when this frame changed `predicted_frames`.
    pub prediction: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Tracker {
    policy: PredictionPolicy,
}

impl Tracker {
    pub fn new(policy: PredictionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> PredictionPolicy {
        self.policy
    }

    /// Remove a tag from the byte budget frames can occupy.
    pub fn deduct_tag(&self, stats: &mut RunStats, tag_len: u64) {
        stats.effective_bytes = stats.effective_bytes.saturating_sub(tag_len);
        stats.tags_passed += 1;
        stats.tag_bytes += tag_len;
    }

    /// Time and count a real frame.
    pub fn observe(&self, stats: &mut RunStats, frame: &Frame) -> Observation {
        let duration = frame_duration(frame.sample_count(), frame.sampling_rate());
        let frame_len = frame.byte_len() as u64;

        stats.cumulative_duration += duration;
        stats.frames_encountered += 1;
        stats.frame_bytes += frame_len;

        let previous = stats.predicted_frames;
        match self.policy {
            PredictionPolicy::FirstFrame => {
                if stats.frames_encountered == 1 && frame_len > 0 {
                    stats.predicted_frames = stats.effective_bytes / frame_len;
                }
            }
            PredictionPolicy::RunningAverage => {
                if stats.frame_bytes > 0 {
                    let estimate = u128::from(stats.effective_bytes)
                        * u128::from(stats.frames_encountered)
                        / u128::from(stats.frame_bytes);
                    stats.predicted_frames = u64::try_from(estimate).unwrap_or(u64::MAX);
                }
            }
        }

        Observation {
            duration,
            frame_number: stats.frames_encountered,
            prediction: (stats.predicted_frames != previous).then_some(stats.predicted_frames),
        }
    }
}
