//! Per-frame keep/drop decisions.
//!
//! Decisions are made in one forward pass and never revisited. The head
//! boundary is fixed by `start_after`. The tail boundary is recomputed for
//! every frame from that frame's own duration, so it can move when frame
//! durations vary; once a frame has fallen in the tail, every later frame is
//! dropped as well.

use super::stats::RunStats;
use super::tracker::{Observation, Tracker};
use super::window::TrimWindow;
use crate::mpeg::Frame;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrimState {
    /// No real frame seen yet.
    Scanning,
    TrimmingHead,
    Passing,
    TrimmingTail,
    Done,
}

impl std::fmt::Display for TrimState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Scanning => "scanning",
            Self::TrimmingHead => "trimming head",
            Self::Passing => "passing",
            Self::TrimmingTail => "trimming tail",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    DropHead,
    DropTail,
    Include,
}

impl Verdict {
    pub fn is_include(&self) -> bool {
        matches!(self, Self::Include)
    }
}

/// The outcome for one frame, with what the tracker observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub verdict: Verdict,
    pub observation: Observation,
}

#[derive(Debug, Clone)]
pub struct TrimEngine {
    window: TrimWindow,
    tracker: Tracker,
    state: TrimState,
}

impl TrimEngine {
    pub fn new(window: TrimWindow, tracker: Tracker) -> Self {
        Self {
            window,
            tracker,
            state: TrimState::Scanning,
        }
    }

    pub fn window(&self) -> &TrimWindow {
        &self.window
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn state(&self) -> TrimState {
        self.state
    }

    /// Mark the pass as over. No frame may be judged afterwards.
    pub fn finish(&mut self) {
        self.state = TrimState::Done;
    }

    /// Last frame number (1-based) still kept for a frame lasting
    /// `frame_duration`, or `None` when tail trimming does not apply.
    pub fn stop_point(&self, stats: &RunStats, frame_duration: Duration) -> Option<u64> {
        if !self.window.trims_tail() || !stats.has_prediction() || frame_duration.is_zero() {
            return None;
        }
        let tail_frames = self.window.end_at.as_nanos() / frame_duration.as_nanos();
        let tail_frames = u64::try_from(tail_frames).unwrap_or(u64::MAX);
        Some(stats.predicted_frames.saturating_sub(tail_frames))
    }

    /// Time `frame`, update the counters and decide whether it is kept.
    ///
    /// The caller writes included frames; the engine only counts them.
    pub fn judge(&mut self, stats: &mut RunStats, frame: &Frame) -> Decision {
        debug_assert!(self.state != TrimState::Done, "frame judged after finish");

        let observation = self.tracker.observe(stats, frame);
        let verdict = self.verdict(stats, observation);

        match verdict {
            Verdict::DropHead => {
                self.state = TrimState::TrimmingHead;
                stats.frames_dropped += 1;
            }
            Verdict::DropTail => {
                self.state = TrimState::TrimmingTail;
                stats.frames_dropped += 1;
            }
            Verdict::Include => {
                self.state = TrimState::Passing;
                stats.frames_included += 1;
                stats.output_duration += observation.duration;
                stats.output_bytes += frame.byte_len() as u64;
            }
        }

        Decision {
            verdict,
            observation,
        }
    }

    fn verdict(&self, stats: &RunStats, observation: Observation) -> Verdict {
        if stats.cumulative_duration < self.window.start_after {
            return Verdict::DropHead;
        }
        if self.state == TrimState::TrimmingTail {
            return Verdict::DropTail;
        }
        match self.stop_point(stats, observation.duration) {
            Some(stop) if observation.frame_number > stop => Verdict::DropTail,
            _ => Verdict::Include,
        }
    }
}
