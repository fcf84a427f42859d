use crate::error::{Result, SnipError};
use crate::mpeg::{Frame, Tag};
use std::collections::VecDeque;

/// One unit pulled from an input stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unit {
    Frame(Frame),
    Tag(Tag),
    /// Unrecognized bytes the source stepped over; carries no data.
    Skipped(u64),
    /// The input is exhausted. Not an error.
    End,
}

/// Trait for sources of stream units.
///
/// This trait allows swapping implementations (real MPEG reader vs scripted).
pub trait UnitSource {
    /// Pull the next unit.
    ///
    /// # Returns
    /// The next unit, `Unit::End` once exhausted, or an error if reading the
    /// underlying stream failed.
    fn next_unit(&mut self) -> Result<Unit>;
}

impl<S: UnitSource + ?Sized> UnitSource for &mut S {
    fn next_unit(&mut self) -> Result<Unit> {
        (**self).next_unit()
    }
}

/// Scripted unit source for testing.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    units: VecDeque<Unit>,
    fail_after: Option<usize>,
    pulled: usize,
}

impl ScriptedSource {
    /// Create a source that yields `units` and then `Unit::End` forever.
    pub fn new(units: Vec<Unit>) -> Self {
        Self {
            units: units.into(),
            fail_after: None,
            pulled: 0,
        }
    }

    /// Configure the source to fail once `count` units have been pulled.
    pub fn with_read_failure_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }

    /// Number of units handed out so far.
    pub fn pulled(&self) -> usize {
        self.pulled
    }
}

impl UnitSource for ScriptedSource {
    fn next_unit(&mut self) -> Result<Unit> {
        if self.fail_after.is_some_and(|n| self.pulled >= n) {
            return Err(SnipError::Read(std::io::Error::other("scripted read failure")));
        }
        self.pulled += 1;
        Ok(self.units.pop_front().unwrap_or(Unit::End))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mpeg::TagKind;

    #[test]
    fn scripted_source_yields_units_then_end() {
        let tag = Tag {
            kind: TagKind::Id3v2,
            raw: b"ID3".to_vec(),
        };
        let mut source = ScriptedSource::new(vec![Unit::Tag(tag.clone()), Unit::Skipped(3)]);

        assert_eq!(source.next_unit().unwrap(), Unit::Tag(tag));
        assert_eq!(source.next_unit().unwrap(), Unit::Skipped(3));
        assert_eq!(source.next_unit().unwrap(), Unit::End);
        assert_eq!(source.next_unit().unwrap(), Unit::End);
        assert_eq!(source.pulled(), 4);
    }

    #[test]
    fn scripted_source_fails_on_request() {
        let mut source = ScriptedSource::new(vec![Unit::Skipped(1), Unit::Skipped(2)])
            .with_read_failure_after(1);

        assert_eq!(source.next_unit().unwrap(), Unit::Skipped(1));
        let err = source.next_unit().unwrap_err();
        assert!(matches!(err, SnipError::Read(_)));
    }

    #[test]
    fn mutable_reference_is_a_source() {
        fn drain(mut source: impl UnitSource) -> usize {
            let mut n = 0;
            while source.next_unit().unwrap() != Unit::End {
                n += 1;
            }
            n
        }

        let mut source = ScriptedSource::new(vec![Unit::Skipped(1), Unit::Skipped(1)]);
        assert_eq!(drain(&mut source), 2);
        assert_eq!(source.pulled(), 3);
    }
}
