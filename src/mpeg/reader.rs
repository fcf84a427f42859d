//! Streaming splitter turning an MPEG audio byte stream into units.
//!
//! The reader never seeks. A candidate unit is handed out only when all of
//! its bytes are present and it is followed by another unit boundary (frame
//! sync, `ID3`, `TAG`) or by the end of input. A unit may not reach into an
//! ID3v1 tag at the very end of the input. Everything else is stepped over
//! one byte at a time and reported as a single `Unit::Skipped` before the
//! next accepted unit.

use super::header::{FrameHeader, HEADER_LEN};
use super::id3::{self, ID3V1_LEN, ID3V2_HEADER_LEN};
use super::{Frame, Tag, TagKind};
use crate::defaults::IO_BUFFER_BYTES;
use crate::error::{Result, SnipError};
use crate::source::{Unit, UnitSource};
use std::io::{ErrorKind, Read};

enum Pending {
    Frame(FrameHeader),
    Tag(TagKind, usize),
}

impl Pending {
    fn len(&self) -> usize {
        match self {
            Self::Frame(header) => header.frame_length(),
            Self::Tag(_, len) => *len,
        }
    }
}

/// True when `bytes` can begin a frame or a tag.
fn starts_unit(bytes: &[u8; HEADER_LEN]) -> bool {
    FrameHeader::parse(*bytes).is_some()
        || id3::is_id3v2_start(bytes)
        || id3::is_id3v1_start(bytes)
}

pub struct MpegReader<R> {
    reader: R,
    /// Bytes read from `reader`; `window[pos..]` has not been handed out.
    window: Vec<u8>,
    pos: usize,
    eof: bool,
    /// Bytes handed out so far, skipped bytes included.
    consumed: u64,
}

impl<R: Read> MpegReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            window: Vec::with_capacity(ID3V2_HEADER_LEN),
            pos: 0,
            eof: false,
            consumed: 0,
        }
    }

    fn live(&self) -> &[u8] {
        &self.window[self.pos..]
    }

    /// Read until `n` bytes are live. Returns false on end of input, in which
    /// case every remaining byte of the input is live.
    ///
    /// The window grows in bounded chunks as data arrives, so a header
    /// claiming a huge length costs no more memory than the input holds.
    fn fill_to(&mut self, n: usize) -> Result<bool> {
        if self.live().len() >= n {
            return Ok(true);
        }
        if self.eof {
            return Ok(false);
        }
        self.window.drain(..self.pos);
        self.pos = 0;

        while self.window.len() < n {
            let start = self.window.len();
            let want = (n - start).min(IO_BUFFER_BYTES);
            self.window.resize(start + want, 0);
            match self.reader.read(&mut self.window[start..]) {
                Ok(0) => {
                    self.window.truncate(start);
                    self.eof = true;
                    return Ok(false);
                }
                Ok(read) => self.window.truncate(start + read),
                Err(e) if e.kind() == ErrorKind::Interrupted => self.window.truncate(start),
                Err(e) => {
                    self.window.truncate(start);
                    return Err(SnipError::Read(e));
                }
            }
        }
        Ok(true)
    }

    /// Decide what the live bytes start with. Requires `HEADER_LEN` bytes.
    fn recognize(&mut self) -> Result<Option<Pending>> {
        if id3::is_id3v2_start(self.live()) {
            if self.fill_to(ID3V2_HEADER_LEN)? {
                let mut header = [0u8; ID3V2_HEADER_LEN];
                header.copy_from_slice(&self.live()[..ID3V2_HEADER_LEN]);
                if let Some(len) = id3::id3v2_tag_len(&header) {
                    return Ok(Some(Pending::Tag(TagKind::Id3v2, len)));
                }
            }
            return Ok(None);
        }

        if id3::is_id3v1_start(self.live()) {
            return Ok(Some(Pending::Tag(TagKind::Id3v1, ID3V1_LEN)));
        }

        let mut bytes = [0u8; HEADER_LEN];
        bytes.copy_from_slice(&self.live()[..HEADER_LEN]);
        Ok(FrameHeader::parse(bytes).map(Pending::Frame))
    }

    /// Check that `pending` is complete and ends on a unit boundary.
    fn confirm(&mut self, pending: &Pending) -> Result<bool> {
        let len = pending.len();
        if !self.fill_to(len)? {
            // Truncated at end of input.
            return Ok(false);
        }

        // An ID3v2 tag at the very start of the stream is trusted as is;
        // encoders often pad between it and the first frame.
        if self.consumed == 0 && matches!(pending, Pending::Tag(TagKind::Id3v2, _)) {
            return Ok(true);
        }

        if self.fill_to(len + HEADER_LEN)? {
            let mut next = [0u8; HEADER_LEN];
            next.copy_from_slice(&self.live()[len..len + HEADER_LEN]);
            return Ok(starts_unit(&next));
        }

        // Everything left is live: the unit must stop short of a final ID3v1.
        let rest = self.live();
        if rest.len() >= ID3V1_LEN {
            let tag_at = rest.len() - ID3V1_LEN;
            if tag_at > 0 && tag_at < len && id3::is_id3v1_start(&rest[tag_at..]) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn advance(&mut self, len: usize) {
        self.pos += len;
        self.consumed += len as u64;
    }

    fn take(&mut self, len: usize) -> Vec<u8> {
        let raw = self.live()[..len].to_vec();
        self.advance(len);
        raw
    }
}

impl<R: Read> UnitSource for MpegReader<R> {
    fn next_unit(&mut self) -> Result<Unit> {
        let mut skipped = 0u64;
        loop {
            if !self.fill_to(HEADER_LEN)? {
                // Too few bytes left to start anything.
                let rest = self.live().len();
                self.advance(rest);
                skipped += rest as u64;
                return Ok(if skipped > 0 {
                    Unit::Skipped(skipped)
                } else {
                    Unit::End
                });
            }

            let pending = match self.recognize()? {
                Some(pending) if self.confirm(&pending)? => pending,
                _ => {
                    self.advance(1);
                    skipped += 1;
                    continue;
                }
            };

            // Report the gap first; the accepted unit stays live.
            if skipped > 0 {
                return Ok(Unit::Skipped(skipped));
            }

            let raw = self.take(pending.len());
            return Ok(match pending {
                Pending::Frame(header) => Unit::Frame(Frame { header, raw }),
                Pending::Tag(kind, _) => Unit::Tag(Tag { kind, raw }),
            });
        }
    }
}
