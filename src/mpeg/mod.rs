//! MPEG audio stream units: frames, tags and the reader that splits a byte
//! stream into them.

pub mod header;
pub mod id3;
pub mod reader;
pub mod vbr;

pub use header::{ChannelMode, FrameHeader, Layer, MpegVersion};
pub use reader::MpegReader;
pub use vbr::{SummaryHeader, is_summary_header, summary_header};

/// One encoded audio frame, header included, exactly as read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub header: FrameHeader,
    pub raw: Vec<u8>,
}

impl Frame {
    /// Build a frame from raw bytes whose first four bytes are a valid header.
    pub fn from_raw(raw: Vec<u8>) -> Option<Self> {
        let bytes: [u8; header::HEADER_LEN] = raw.get(..header::HEADER_LEN)?.try_into().ok()?;
        let header = FrameHeader::parse(bytes)?;
        Some(Self { header, raw })
    }

    pub fn sample_count(&self) -> u32 {
        self.header.sample_count()
    }

    pub fn sampling_rate(&self) -> u32 {
        self.header.sampling_rate
    }

    /// Length of the frame in bytes as stored in the stream.
    pub fn byte_len(&self) -> usize {
        self.raw.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Id3v2,
    Id3v1,
}

/// An embedded metadata block, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub kind: TagKind,
    pub raw: Vec<u8>,
}

impl Tag {
    pub fn byte_len(&self) -> usize {
        self.raw.len()
    }
}
