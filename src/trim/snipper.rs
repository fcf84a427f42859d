//! The single forward pass: pull units, pass tags through, filter the
//! summary header, judge frames and copy the kept ones.

use super::engine::{TrimEngine, TrimState};
use super::events::RunEvent;
use super::stats::RunStats;
use super::tracker::Tracker;
use super::window::{PredictionPolicy, TrimWindow};
use crate::error::{Result, SnipError};
use crate::mpeg::{Frame, Tag, summary_header};
use crate::source::{Unit, UnitSource};
use std::io::Write;

/// Trims one input stream into one output sink.
///
/// The source is read to its end exactly once and the sink receives tags and
/// kept frames in their original order, byte for byte.
pub struct Snipper<S, W> {
    source: S,
    sink: W,
    engine: TrimEngine,
    stats: RunStats,
    event_tx: Option<crossbeam_channel::Sender<RunEvent>>,
}

impl<S: UnitSource, W: Write> Snipper<S, W> {
    /// `input_bytes` is the total size of the input, used to predict how many
    /// frames it holds.
    pub fn new(source: S, sink: W, window: TrimWindow, input_bytes: u64) -> Self {
        Self {
            source,
            sink,
            engine: TrimEngine::new(window, Tracker::default()),
            stats: RunStats::new(input_bytes),
            event_tx: None,
        }
    }

    pub fn with_prediction_policy(mut self, policy: PredictionPolicy) -> Self {
        self.engine = TrimEngine::new(*self.engine.window(), Tracker::new(policy));
        self
    }

    pub fn with_event_sender(mut self, tx: crossbeam_channel::Sender<RunEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Run the pass to end of stream.
    ///
    /// # Returns
    /// The final counters and the sink, or the first read or write error.
    pub fn run(mut self) -> Result<(RunStats, W)> {
        let result = self.pump();

        // Done is reached on a fatal error too.
        let before = self.engine.state();
        self.engine.finish();
        self.emit_transition(before);

        result.map(|()| (self.stats, self.sink))
    }

    /// Pull and handle units until end of stream or the first error.
    fn pump(&mut self) -> Result<()> {
        loop {
            match self.source.next_unit()? {
                Unit::End => return Ok(()),
                Unit::Tag(tag) => self.pass_tag(tag)?,
                Unit::Frame(frame) => self.handle_frame(frame)?,
                Unit::Skipped(bytes) => {
                    self.stats.skipped_bytes += bytes;
                    self.emit(RunEvent::Resynced { bytes });
                }
            }
        }
    }

    fn pass_tag(&mut self, tag: Tag) -> Result<()> {
        self.sink.write_all(&tag.raw).map_err(SnipError::Write)?;
        let bytes = tag.byte_len() as u64;
        self.engine.tracker().deduct_tag(&mut self.stats, bytes);
        self.emit(RunEvent::TagPassed {
            kind: tag.kind,
            bytes,
        });
        Ok(())
    }

    fn handle_frame(&mut self, frame: Frame) -> Result<()> {
        if self.stats.frames_encountered == 0
            && let Some(kind) = summary_header(&frame)
        {
            self.stats.summary_header = Some(kind);
            self.emit(RunEvent::SummaryHeaderSkipped {
                kind,
                bytes: frame.byte_len() as u64,
            });
            return Ok(());
        }

        let before = self.engine.state();
        let decision = self.engine.judge(&mut self.stats, &frame);

        if let Some(frames) = decision.observation.prediction {
            self.emit(RunEvent::Predicted {
                frames,
                effective_bytes: self.stats.effective_bytes,
            });
        }
        self.emit_transition(before);

        if decision.verdict.is_include() {
            self.sink.write_all(&frame.raw).map_err(SnipError::Write)?;
        }
        Ok(())
    }

    fn emit_transition(&self, before: TrimState) {
        let after = self.engine.state();
        if after != before {
            self.emit(RunEvent::StateChanged {
                from: before,
                to: after,
                frame: self.stats.frames_encountered,
                at: self.stats.cumulative_duration,
            });
        }
    }

    fn emit(&self, event: RunEvent) {
        if let Some(ref tx) = self.event_tx
            && tx.try_send(event).is_err()
        {
            // Receiver gone or full - progress output is best effort
        }
    }
}
