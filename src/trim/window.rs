use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The span of audio to cut: everything before `start_after` and the final
/// `end_at` of the stream. Immutable for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrimWindow {
    pub start_after: Duration,
    /// Zero disables tail trimming.
    pub end_at: Duration,
}

impl TrimWindow {
    pub fn new(start_after: Duration, end_at: Option<Duration>) -> Self {
        Self {
            start_after,
            end_at: end_at.unwrap_or(Duration::ZERO),
        }
    }

    pub fn trims_tail(&self) -> bool {
        !self.end_at.is_zero()
    }
}

/// How the total frame count used for tail trimming is estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PredictionPolicy {
    /// Divide the tag-free byte budget by the first frame's size, once.
    #[default]
    FirstFrame,
    /// Re-estimate after every frame from the mean observed frame size.
    RunningAverage,
}

impl std::str::FromStr for PredictionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-frame" | "first" => Ok(Self::FirstFrame),
            "running-average" | "average" => Ok(Self::RunningAverage),
            other => Err(format!(
                "unknown prediction policy '{}' (expected first-frame or running-average)",
                other
            )),
        }
    }
}

impl std::fmt::Display for PredictionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstFrame => write!(f, "first-frame"),
            Self::RunningAverage => write!(f, "running-average"),
        }
    }
}
