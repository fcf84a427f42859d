//! ID3 tag boundary detection.
//!
//! Tags are never interpreted, only measured so their raw bytes can be copied
//! through untouched.

/// Length of the fixed ID3v2 header.
pub const ID3V2_HEADER_LEN: usize = 10;

/// ID3v1 tags are always exactly this long.
pub const ID3V1_LEN: usize = 128;

const ID3V2_FOOTER_FLAG: u8 = 0x10;

/// True when `bytes` starts with the ID3v2 identifier.
pub fn is_id3v2_start(bytes: &[u8]) -> bool {
    bytes.starts_with(b"ID3")
}

/// True when `bytes` starts with the ID3v1 identifier.
pub fn is_id3v1_start(bytes: &[u8]) -> bool {
    bytes.starts_with(b"TAG")
}

/// Total ID3v2 tag length (header, body and optional footer) from its
/// 10-byte header, or `None` if the header is malformed.
pub fn id3v2_tag_len(header: &[u8; ID3V2_HEADER_LEN]) -> Option<usize> {
    if !is_id3v2_start(header) {
        return None;
    }
    // Version bytes are never 0xFF.
    if header[3] == 0xFF || header[4] == 0xFF {
        return None;
    }
    let body = synchsafe(&header[6..10])?;
    let footer = if header[5] & ID3V2_FOOTER_FLAG != 0 {
        ID3V2_HEADER_LEN
    } else {
        0
    };
    Some(ID3V2_HEADER_LEN + body as usize + footer)
}

/// Decode a 28-bit synchsafe integer (7 significant bits per byte).
fn synchsafe(bytes: &[u8]) -> Option<u32> {
    bytes.iter().try_fold(0u32, |acc, &b| {
        if b & 0x80 != 0 {
            None
        } else {
            Some((acc << 7) | u32::from(b))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(flags: u8, size: [u8; 4]) -> [u8; ID3V2_HEADER_LEN] {
        [
            b'I', b'D', b'3', 4, 0, flags, size[0], size[1], size[2], size[3],
        ]
    }

    #[test]
    fn empty_body_is_header_only() {
        assert_eq!(id3v2_tag_len(&header(0, [0, 0, 0, 0])), Some(10));
    }

    #[test]
    fn synchsafe_size_is_decoded() {
        // 0x01 0x7F => (1 << 7) | 127 = 255
        assert_eq!(id3v2_tag_len(&header(0, [0, 0, 0x01, 0x7F])), Some(10 + 255));
    }

    #[test]
    fn footer_flag_adds_ten_bytes() {
        assert_eq!(
            id3v2_tag_len(&header(ID3V2_FOOTER_FLAG, [0, 0, 0, 20])),
            Some(10 + 20 + 10)
        );
    }

    #[test]
    fn rejects_high_bit_in_size() {
        assert_eq!(id3v2_tag_len(&header(0, [0, 0, 0x80, 0])), None);
    }

    #[test]
    fn rejects_bad_version_and_identifier() {
        let mut bad = header(0, [0, 0, 0, 0]);
        bad[3] = 0xFF;
        assert_eq!(id3v2_tag_len(&bad), None);

        let mut not_id3 = header(0, [0, 0, 0, 0]);
        not_id3[0] = b'X';
        assert_eq!(id3v2_tag_len(&not_id3), None);
    }

    #[test]
    fn identifiers() {
        assert!(is_id3v2_start(b"ID3\x04"));
        assert!(!is_id3v2_start(b"ID"));
        assert!(is_id3v1_start(b"TAGtitle"));
        assert!(!is_id3v1_start(b"TAX"));
    }
}
