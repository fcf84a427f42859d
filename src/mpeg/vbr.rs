//! Detection of encoder summary headers.
//!
//! LAME and most encoders write a Xing (VBR) or Info (CBR) block into an
//! otherwise silent first frame; Fraunhofer encoders write VBRI instead. Such a
//! frame carries no audio and must not be timed or copied.

use super::Frame;
use super::header::{HEADER_LEN, Layer};

/// VBRI sits at a fixed offset: header plus 32 bytes, whatever the mode.
const VBRI_OFFSET: usize = HEADER_LEN + 32;

const CRC_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum SummaryHeader {
    Xing,
    Info,
    Vbri,
}

impl std::fmt::Display for SummaryHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Xing => write!(f, "Xing"),
            Self::Info => write!(f, "Info"),
            Self::Vbri => write!(f, "VBRI"),
        }
    }
}

/// Classify `frame` as a summary header, if it is one.
pub fn summary_header(frame: &Frame) -> Option<SummaryHeader> {
    if frame.header.layer != Layer::III {
        return None;
    }

    let mut xing_offset = HEADER_LEN + frame.header.side_info_len();
    if frame.header.protected {
        xing_offset += CRC_LEN;
    }
    match frame.raw.get(xing_offset..xing_offset + 4) {
        Some(b"Xing") => return Some(SummaryHeader::Xing),
        Some(b"Info") => return Some(SummaryHeader::Info),
        _ => {}
    }

    match frame.raw.get(VBRI_OFFSET..VBRI_OFFSET + 4) {
        Some(b"VBRI") => Some(SummaryHeader::Vbri),
        _ => None,
    }
}

pub fn is_summary_header(frame: &Frame) -> bool {
    summary_header(frame).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with(header: [u8; 4], marker: &[u8], offset: usize) -> Frame {
        let mut raw = vec![0u8; 417];
        raw[..4].copy_from_slice(&header);
        raw[offset..offset + marker.len()].copy_from_slice(marker);
        Frame::from_raw(raw).unwrap()
    }

    const STEREO: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];
    const MONO: [u8; 4] = [0xFF, 0xFB, 0x90, 0xC4];

    #[test]
    fn detects_xing_in_stereo_frame() {
        let frame = frame_with(STEREO, b"Xing", 36);
        assert_eq!(summary_header(&frame), Some(SummaryHeader::Xing));
    }

    #[test]
    fn detects_info_in_mono_frame() {
        let frame = frame_with(MONO, b"Info", 21);
        assert_eq!(summary_header(&frame), Some(SummaryHeader::Info));
    }

    #[test]
    fn xing_offset_shifts_with_crc() {
        let protected = [0xFF, 0xFA, 0x90, 0x64];
        let frame = frame_with(protected, b"Xing", 38);
        assert_eq!(summary_header(&frame), Some(SummaryHeader::Xing));

        let misplaced = frame_with(protected, b"Xing", 36);
        assert_eq!(summary_header(&misplaced), None);
    }

    #[test]
    fn detects_vbri() {
        let frame = frame_with(MONO, b"VBRI", 36);
        assert_eq!(summary_header(&frame), Some(SummaryHeader::Vbri));
        assert!(is_summary_header(&frame));
    }

    #[test]
    fn plain_audio_frame_is_not_a_summary() {
        let frame = frame_with(STEREO, b"\x12\x34", 36);
        assert_eq!(summary_header(&frame), None);
        assert!(!is_summary_header(&frame));
    }

    #[test]
    fn display_names() {
        assert_eq!(SummaryHeader::Vbri.to_string(), "VBRI");
        assert_eq!(SummaryHeader::Xing.to_string(), "Xing");
    }
}
