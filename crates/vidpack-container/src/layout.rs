//! Scratch directory naming.
//!
//! Frames are stored as `frame_0000.png`, `frame_0001.png`, ... The index is
//! zero padded to four digits; larger indices simply grow wider, and readers
//! sort on the parsed number rather than the name.

/// Extension of frame files, without the dot.
pub const FRAME_EXTENSION: &str = "png";

/// printf-style pattern handed to the container tool.
pub const FRAME_PATTERN: &str = "frame_%04d.png";

const FRAME_PREFIX: &str = "frame_";

/// File name for the frame at `index`.
pub fn frame_file_name(index: u32) -> String {
    format!("{FRAME_PREFIX}{index:04}.{FRAME_EXTENSION}")
}

/// Index encoded in a frame file name, or `None` if the name is not a frame.
pub fn parse_frame_index(file_name: &str) -> Option<u32> {
    let digits = file_name
        .strip_prefix(FRAME_PREFIX)?
        .strip_suffix(FRAME_EXTENSION)?
        .strip_suffix('.')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_zero_padded() {
        assert_eq!(frame_file_name(0), "frame_0000.png");
        assert_eq!(frame_file_name(42), "frame_0042.png");
        assert_eq!(frame_file_name(12345), "frame_12345.png");
    }

    #[test]
    fn parse_inverts_name() {
        for index in [0, 7, 9999, 10000, 123456] {
            assert_eq!(parse_frame_index(&frame_file_name(index)), Some(index));
        }
    }

    #[test]
    fn parse_rejects_other_files() {
        assert_eq!(parse_frame_index("meta.json"), None);
        assert_eq!(parse_frame_index("frame_.png"), None);
        assert_eq!(parse_frame_index("frame_0001.jpg"), None);
        assert_eq!(parse_frame_index("frame_00a1.png"), None);
        assert_eq!(parse_frame_index("frame_+001.png"), None);
    }

    #[test]
    fn lexical_and_numeric_order_agree_below_ten_thousand() {
        let mut names: Vec<String> = [3, 100, 20, 9999, 0].map(frame_file_name).to_vec();
        names.sort();
        let indices: Vec<u32> = names.iter().filter_map(|n| parse_frame_index(n)).collect();
        assert_eq!(indices, vec![0, 3, 20, 100, 9999]);
    }
}
