//! Streaming trim decisions.
//!
//! `Snipper` drives one pass: it pulls units from a [`UnitSource`], copies
//! tags straight to the sink and asks the [`TrimEngine`] about every frame.
//!
//! [`UnitSource`]: crate::source::UnitSource

pub mod engine;
pub mod events;
pub mod snipper;
pub mod stats;
pub mod tracker;
pub mod window;

pub use engine::{Decision, TrimEngine, TrimState, Verdict};
pub use events::RunEvent;
pub use snipper::Snipper;
pub use stats::RunStats;
pub use tracker::{Tracker, frame_duration};
pub use window::{PredictionPolicy, TrimWindow};
