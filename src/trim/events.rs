use super::engine::TrimState;
use crate::mpeg::{SummaryHeader, TagKind};
use serde::Serialize;
use std::time::Duration;

/// Notable moments of a run, published for progress rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    TagPassed {
        kind: TagKind,
        bytes: u64,
    },
    SummaryHeaderSkipped {
        kind: SummaryHeader,
        bytes: u64,
    },
    Predicted {
        frames: u64,
        effective_bytes: u64,
    },
    Resynced {
        bytes: u64,
    },
    StateChanged {
        from: TrimState,
        to: TrimState,
        /// Real frames seen when the change happened.
        frame: u64,
        #[serde(with = "millis")]
        at: Duration,
    },
}

mod millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}
