use bytes::{Bytes, BytesMut};
use tracing::debug;

use crate::codec::Frame;
use crate::dims::FrameDimensions;
use crate::error::{FrameError, Result};

/// Rebuild the original payload from an ordered frame sequence.
///
/// Frames are concatenated in slice order after checking that every frame
/// matches `dims` and carries exactly one frame capacity of pixels, and that
/// indices strictly increase. The result is truncated to `original_length`,
/// which drops the trailing padding.
///
/// Returns [`FrameError::TruncatedInput`] if the frames hold fewer than
/// `original_length` bytes. Short output is never returned.
pub fn unpack(frames: &[Frame], dims: FrameDimensions, original_length: usize) -> Result<Bytes> {
    let capacity = dims.capacity()?;

    let mut previous: Option<u32> = None;
    for frame in frames {
        if frame.dims != dims || frame.pixels.len() != capacity {
            return Err(FrameError::MalformedFrame {
                index: frame.index,
                expected: capacity,
                actual: frame.pixels.len(),
            });
        }
        if let Some(previous) = previous {
            if frame.index <= previous {
                return Err(FrameError::OutOfOrder {
                    previous,
                    index: frame.index,
                });
            }
        }
        previous = Some(frame.index);
    }

    let available = frames.len().saturating_mul(capacity);
    if original_length > available {
        return Err(FrameError::TruncatedInput {
            requested: original_length,
            available,
        });
    }

    let mut buf = BytesMut::with_capacity(original_length);
    let mut remaining = original_length;
    for frame in frames {
        if remaining == 0 {
            break;
        }
        let take = remaining.min(capacity);
        buf.extend_from_slice(&frame.pixels[..take]);
        remaining -= take;
    }

    debug!(
        frames = frames.len(),
        original_length,
        discarded_padding = available - original_length,
        %dims,
        "unpacked payload"
    );

    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::pack;

    fn dims(width: u32, height: u32) -> FrameDimensions {
        FrameDimensions::new(width, height).unwrap()
    }

    fn cycling_payload(len: usize) -> Vec<u8> {
        (0..len).map(|i| ((i + 1) % 256) as u8).collect()
    }

    #[test]
    fn vga_scenario_restores_700_bytes() {
        let payload = cycling_payload(700);
        let packed = pack(&payload, FrameDimensions::default()).unwrap();

        let restored = unpack(&packed.frames, FrameDimensions::default(), 700).unwrap();
        assert_eq!(restored.as_ref(), payload.as_slice());
    }

    #[test]
    fn multi_frame_roundtrip() {
        let payload = cycling_payload(1_000);
        let d = dims(7, 5);
        let packed = pack(&payload, d).unwrap();

        assert_eq!(packed.len(), 29);
        let restored = unpack(&packed.frames, d, payload.len()).unwrap();
        assert_eq!(restored.as_ref(), payload.as_slice());
    }

    #[test]
    fn trailing_zero_payload_bytes_survive() {
        let payload = vec![5, 0, 0, 0, 0];
        let d = dims(2, 2);
        let packed = pack(&payload, d).unwrap();

        let restored = unpack(&packed.frames, d, payload.len()).unwrap();
        assert_eq!(restored.as_ref(), payload.as_slice());
    }

    #[test]
    fn empty_payload_from_single_zero_frame() {
        let d = dims(4, 4);
        let packed = pack(&[], d).unwrap();

        let restored = unpack(&packed.frames, d, 0).unwrap();
        assert!(restored.is_empty());
    }

    #[test]
    fn empty_sequence_with_zero_length_is_empty() {
        let restored = unpack(&[], dims(4, 4), 0).unwrap();
        assert!(restored.is_empty());
    }

    #[test]
    fn length_beyond_frames_is_truncated_input() {
        let d = dims(4, 4);
        let packed = pack(&cycling_payload(20), d).unwrap();

        let err = unpack(&packed.frames, d, 33).unwrap_err();
        assert_eq!(
            err,
            FrameError::TruncatedInput {
                requested: 33,
                available: 32
            }
        );
    }

    #[test]
    fn length_equal_to_capacity_is_allowed() {
        let d = dims(4, 4);
        let packed = pack(&cycling_payload(20), d).unwrap();

        let restored = unpack(&packed.frames, d, 32).unwrap();
        assert_eq!(restored.len(), 32);
        assert!(restored[20..].iter().all(|&b| b == 0));
    }

    #[test]
    fn short_frame_is_malformed() {
        let d = dims(4, 4);
        let frames = vec![Frame::new(0, d, vec![1u8; 15])];

        let err = unpack(&frames, d, 10).unwrap_err();
        assert_eq!(
            err,
            FrameError::MalformedFrame {
                index: 0,
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn frame_with_other_dimensions_is_malformed() {
        let frames = vec![Frame::new(0, dims(8, 2), vec![1u8; 16])];

        let err = unpack(&frames, dims(4, 4), 16).unwrap_err();
        assert!(matches!(err, FrameError::MalformedFrame { index: 0, .. }));
    }

    #[test]
    fn reversed_frames_are_rejected() {
        let d = dims(3, 3);
        let payload = cycling_payload(27);
        let mut frames = pack(&payload, d).unwrap().frames;
        frames.reverse();

        let err = unpack(&frames, d, payload.len()).unwrap_err();
        assert_eq!(err, FrameError::OutOfOrder { previous: 2, index: 1 });
    }

    #[test]
    fn reordered_frames_do_not_reproduce_payload() {
        let d = dims(3, 3);
        let payload = cycling_payload(27);
        let mut frames = pack(&payload, d).unwrap().frames;
        frames.reverse();
        for (i, frame) in frames.iter_mut().enumerate() {
            frame.index = i as u32;
        }

        let restored = unpack(&frames, d, payload.len()).unwrap();
        assert_ne!(restored.as_ref(), payload.as_slice());
    }

    #[test]
    fn gaps_in_indices_are_accepted() {
        let d = dims(2, 1);
        let frames = vec![
            Frame::new(1, d, vec![1u8, 2]),
            Frame::new(5, d, vec![3u8, 4]),
        ];

        let restored = unpack(&frames, d, 3).unwrap();
        assert_eq!(restored.as_ref(), &[1, 2, 3]);
    }

    #[test]
    fn invalid_dimensions_rejected_before_reading() {
        let bogus = FrameDimensions {
            width: 0,
            height: 0,
        };
        assert!(matches!(
            unpack(&[], bogus, 0),
            Err(FrameError::InvalidDimensions { .. })
        ));
    }
}
