//! MPEG audio frame header decoding.
//!
//! Only the fields needed to find frame boundaries and time frames are
//! decoded: version, layer, bitrate, sampling rate, padding, CRC flag and
//! channel mode.

/// Length of an MPEG audio frame header in bytes.
pub const HEADER_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MpegVersion {
    Mpeg1,
    Mpeg2,
    Mpeg25,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    I,
    II,
    III,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    Stereo,
    JointStereo,
    DualChannel,
    Mono,
}

/// A decoded 4-byte frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub version: MpegVersion,
    pub layer: Layer,
    /// CRC-16 follows the header.
    pub protected: bool,
    /// Bits per second.
    pub bitrate: u32,
    /// Samples per second.
    pub sampling_rate: u32,
    pub padding: bool,
    pub channel_mode: ChannelMode,
}

// Bitrates in kbps, indexed by the 4-bit bitrate index. Index 0 (free format)
// and 15 (bad) are rejected before lookup.
const BITRATES_V1_L1: [u32; 16] = [
    0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448, 0,
];
const BITRATES_V1_L2: [u32; 16] = [
    0, 32, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384, 0,
];
const BITRATES_V1_L3: [u32; 16] = [
    0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 0,
];
const BITRATES_V2_L1: [u32; 16] = [
    0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256, 0,
];
const BITRATES_V2_L23: [u32; 16] = [
    0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 0,
];

const SAMPLING_RATES_V1: [u32; 3] = [44100, 48000, 32000];
const SAMPLING_RATES_V2: [u32; 3] = [22050, 24000, 16000];
const SAMPLING_RATES_V25: [u32; 3] = [11025, 12000, 8000];

/// True when the first two bytes carry the 11-bit frame sync.
pub fn has_sync(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes[0] == 0xFF && bytes[1] & 0xE0 == 0xE0
}

impl FrameHeader {
    /// Decode a header, returning `None` for anything that is not a
    /// well-formed, fixed-bitrate frame header.
    pub fn parse(bytes: [u8; HEADER_LEN]) -> Option<Self> {
        if !has_sync(&bytes) {
            return None;
        }

        let version = match (bytes[1] >> 3) & 0b11 {
            0b00 => MpegVersion::Mpeg25,
            0b10 => MpegVersion::Mpeg2,
            0b11 => MpegVersion::Mpeg1,
            _ => return None,
        };
        let layer = match (bytes[1] >> 1) & 0b11 {
            0b01 => Layer::III,
            0b10 => Layer::II,
            0b11 => Layer::I,
            _ => return None,
        };
        let protected = bytes[1] & 0x01 == 0;

        let bitrate_index = usize::from(bytes[2] >> 4);
        if bitrate_index == 0 || bitrate_index == 15 {
            return None;
        }
        let table = match (version, layer) {
            (MpegVersion::Mpeg1, Layer::I) => &BITRATES_V1_L1,
            (MpegVersion::Mpeg1, Layer::II) => &BITRATES_V1_L2,
            (MpegVersion::Mpeg1, Layer::III) => &BITRATES_V1_L3,
            (_, Layer::I) => &BITRATES_V2_L1,
            (_, _) => &BITRATES_V2_L23,
        };
        let bitrate = table[bitrate_index] * 1000;

        let rate_index = usize::from((bytes[2] >> 2) & 0b11);
        if rate_index == 3 {
            return None;
        }
        let sampling_rate = match version {
            MpegVersion::Mpeg1 => SAMPLING_RATES_V1[rate_index],
            MpegVersion::Mpeg2 => SAMPLING_RATES_V2[rate_index],
            MpegVersion::Mpeg25 => SAMPLING_RATES_V25[rate_index],
        };

        let padding = (bytes[2] >> 1) & 0x01 == 1;
        let channel_mode = match bytes[3] >> 6 {
            0b00 => ChannelMode::Stereo,
            0b01 => ChannelMode::JointStereo,
            0b10 => ChannelMode::DualChannel,
            _ => ChannelMode::Mono,
        };

        Some(Self {
            version,
            layer,
            protected,
            bitrate,
            sampling_rate,
            padding,
            channel_mode,
        })
    }

    /// Number of PCM samples (per channel) the frame decodes to.
    pub fn sample_count(&self) -> u32 {
        match (self.layer, self.version) {
            (Layer::I, _) => 384,
            (Layer::II, _) => 1152,
            (Layer::III, MpegVersion::Mpeg1) => 1152,
            (Layer::III, _) => 576,
        }
    }

    /// Total frame length in bytes, header included.
    pub fn frame_length(&self) -> usize {
        let pad = u64::from(self.padding);
        let bitrate = u64::from(self.bitrate);
        let rate = u64::from(self.sampling_rate);
        let len = match self.layer {
            Layer::I => (12 * bitrate / rate + pad) * 4,
            _ => u64::from(self.sample_count()) / 8 * bitrate / rate + pad,
        };
        len as usize
    }

    /// Size of the Layer III side information block following the header
    /// (and CRC, if present).
    pub fn side_info_len(&self) -> usize {
        let mono = self.channel_mode == ChannelMode::Mono;
        match (self.version, mono) {
            (MpegVersion::Mpeg1, true) => 17,
            (MpegVersion::Mpeg1, false) => 32,
            (_, true) => 9,
            (_, false) => 17,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mpeg1_layer3_128k_44100() {
        let header = FrameHeader::parse([0xFF, 0xFB, 0x90, 0x64]).unwrap();
        assert_eq!(header.version, MpegVersion::Mpeg1);
        assert_eq!(header.layer, Layer::III);
        assert!(!header.protected);
        assert_eq!(header.bitrate, 128_000);
        assert_eq!(header.sampling_rate, 44100);
        assert!(!header.padding);
        assert_eq!(header.channel_mode, ChannelMode::JointStereo);
        assert_eq!(header.sample_count(), 1152);
        assert_eq!(header.frame_length(), 417);
    }

    #[test]
    fn padding_adds_one_byte_for_layer3() {
        let header = FrameHeader::parse([0xFF, 0xFB, 0x92, 0x64]).unwrap();
        assert!(header.padding);
        assert_eq!(header.frame_length(), 418);
    }

    #[test]
    fn mpeg2_layer3_has_576_samples() {
        // MPEG-2, Layer III, 64 kbps, 22050 Hz
        let header = FrameHeader::parse([0xFF, 0xF3, 0x80, 0xC0]).unwrap();
        assert_eq!(header.version, MpegVersion::Mpeg2);
        assert_eq!(header.sampling_rate, 22050);
        assert_eq!(header.bitrate, 64_000);
        assert_eq!(header.sample_count(), 576);
        assert_eq!(header.channel_mode, ChannelMode::Mono);
        assert_eq!(header.frame_length(), 72 * 64_000 / 22050);
        assert_eq!(header.side_info_len(), 9);
    }

    #[test]
    fn layer1_frame_length_uses_four_byte_slots() {
        // MPEG-1, Layer I, 32 kbps, 48000 Hz
        let header = FrameHeader::parse([0xFF, 0xFF, 0x14, 0x00]).unwrap();
        assert_eq!(header.layer, Layer::I);
        assert_eq!(header.sample_count(), 384);
        assert_eq!(header.frame_length(), (12 * 32_000 / 48000) * 4);
    }

    #[test]
    fn rejects_missing_sync() {
        assert!(FrameHeader::parse([0xFE, 0xFB, 0x90, 0x64]).is_none());
        assert!(FrameHeader::parse([0xFF, 0x1B, 0x90, 0x64]).is_none());
    }

    #[test]
    fn rejects_reserved_fields() {
        // Reserved version
        assert!(FrameHeader::parse([0xFF, 0xEB, 0x90, 0x64]).is_none());
        // Reserved layer
        assert!(FrameHeader::parse([0xFF, 0xF9, 0x90, 0x64]).is_none());
        // Free-format bitrate
        assert!(FrameHeader::parse([0xFF, 0xFB, 0x00, 0x64]).is_none());
        // Bad bitrate
        assert!(FrameHeader::parse([0xFF, 0xFB, 0xF0, 0x64]).is_none());
        // Reserved sampling rate
        assert!(FrameHeader::parse([0xFF, 0xFB, 0x9C, 0x64]).is_none());
    }

    #[test]
    fn crc_flag_is_inverted() {
        let header = FrameHeader::parse([0xFF, 0xFA, 0x90, 0x64]).unwrap();
        assert!(header.protected);
    }

    #[test]
    fn side_info_len_for_mpeg1_stereo() {
        let header = FrameHeader::parse([0xFF, 0xFB, 0x90, 0x64]).unwrap();
        assert_eq!(header.side_info_len(), 32);
    }
}
