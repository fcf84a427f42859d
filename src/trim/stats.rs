use crate::mpeg::SummaryHeader;
use std::time::Duration;

/// Counters for one pass over one input.
///
/// `frames_dropped + frames_included == frames_encountered` holds after every
/// frame. Summary headers are never counted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub frames_encountered: u64,
    pub frames_dropped: u64,
    pub frames_included: u64,
    pub cumulative_duration: Duration,
    pub output_duration: Duration,
    /// Size of the whole input.
    pub input_bytes: u64,
    /// Input size minus every tag seen so far.
    pub effective_bytes: u64,
    /// Estimated total frame count; zero until the first real frame.
    pub predicted_frames: u64,
    /// Sum of the sizes of every real frame seen.
    pub frame_bytes: u64,
    /// Sum of the sizes of included frames.
    pub output_bytes: u64,
    pub tags_passed: u64,
    pub tag_bytes: u64,
    pub skipped_bytes: u64,
    pub summary_header: Option<SummaryHeader>,
}

impl RunStats {
    pub fn new(input_bytes: u64) -> Self {
        Self {
            input_bytes,
            effective_bytes: input_bytes,
            ..Self::default()
        }
    }

    pub fn has_prediction(&self) -> bool {
        self.predicted_frames > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_starts_with_full_byte_budget() {
        let stats = RunStats::new(42_127);
        assert_eq!(stats.input_bytes, 42_127);
        assert_eq!(stats.effective_bytes, 42_127);
        assert_eq!(stats.frames_encountered, 0);
        assert!(!stats.has_prediction());
        assert_eq!(stats.summary_header, None);
    }
}
