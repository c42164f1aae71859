use bytes::{BufMut, BytesMut};
use tracing::debug;

use crate::codec::{Frame, PackedFrames, PADDING_BYTE};
use crate::dims::FrameDimensions;
use crate::error::{FrameError, Result};

/// Zero bytes needed to complete the final frame.
///
/// `0` when `len` is already a multiple of the frame capacity. An empty
/// payload still yields one full frame of padding.
pub fn padding_length(len: usize, dims: FrameDimensions) -> Result<usize> {
    let capacity = dims.capacity()?;
    if len == 0 {
        return Ok(capacity);
    }
    Ok((capacity - len % capacity) % capacity)
}

/// Number of frames needed to carry `len` bytes. Never less than one.
pub fn frame_count(len: usize, dims: FrameDimensions) -> Result<usize> {
    let capacity = dims.capacity()?;
    Ok(len.div_ceil(capacity).max(1))
}

/// Lay a payload out as an ordered sequence of fixed-size grayscale frames.
///
/// Byte `i` of the payload lands in frame `i / capacity`, row
/// `(i % capacity) / width`, column `i % width`. The final frame is completed
/// with [`PADDING_BYTE`]. An empty payload produces a single all-zero frame.
pub fn pack(payload: &[u8], dims: FrameDimensions) -> Result<PackedFrames> {
    let capacity = dims.capacity()?;
    let count = frame_count(payload.len(), dims)?;
    let padding = padding_length(payload.len(), dims)?;
    // Frame indices are u32; dimensions this small cannot index the payload.
    if u32::try_from(count).is_err() {
        return Err(FrameError::InvalidDimensions {
            width: dims.width,
            height: dims.height,
        });
    }

    let mut frames = Vec::with_capacity(count);
    let mut chunks = payload.chunks(capacity);
    for index in 0..count {
        let chunk = chunks.next().unwrap_or(&[]);
        let mut buf = BytesMut::with_capacity(capacity);
        buf.put_slice(chunk);
        buf.put_bytes(PADDING_BYTE, capacity - chunk.len());
        frames.push(Frame::new(index as u32, dims, buf.freeze()));
    }

    debug!(
        payload_len = payload.len(),
        frames = frames.len(),
        frame_capacity = capacity,
        padding_length = padding,
        %dims,
        "packed payload"
    );

    Ok(PackedFrames {
        frames,
        frame_capacity: capacity,
        padding_length: padding,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(width: u32, height: u32) -> FrameDimensions {
        FrameDimensions::new(width, height).unwrap()
    }

    fn cycling_payload(len: usize) -> Vec<u8> {
        (0..len).map(|i| ((i + 1) % 256) as u8).collect()
    }

    #[test]
    fn vga_scenario_single_padded_frame() {
        let payload = cycling_payload(700);
        let packed = pack(&payload, FrameDimensions::default()).unwrap();

        assert_eq!(packed.frame_capacity, 307_200);
        assert_eq!(packed.padding_length, 306_500);
        assert_eq!(packed.len(), 1);

        let frame = &packed.frames[0];
        assert_eq!(frame.pixel(0, 0), Some(payload[0]));
        assert_eq!(frame.pixel(1, 0), Some(payload[640]));
        assert_eq!(frame.pixel(1, 59), Some(payload[699]));
        assert_eq!(frame.pixel(1, 60), Some(PADDING_BYTE));
    }

    #[test]
    fn exact_multiple_has_no_padding() {
        let payload = cycling_payload(24);
        let packed = pack(&payload, dims(4, 3)).unwrap();

        assert_eq!(packed.len(), 2);
        assert_eq!(packed.padding_length, 0);
        assert_eq!(packed.frames[1].pixels.as_ref(), &payload[12..]);
    }

    #[test]
    fn partial_final_frame_is_zero_padded() {
        let packed = pack(&[7, 7, 7, 7, 7], dims(2, 2)).unwrap();

        assert_eq!(packed.len(), 2);
        assert_eq!(packed.padding_length, 3);
        assert_eq!(packed.frames[0].pixels.as_ref(), &[7, 7, 7, 7]);
        assert_eq!(packed.frames[1].pixels.as_ref(), &[7, 0, 0, 0]);
    }

    #[test]
    fn empty_payload_is_one_zero_frame() {
        let packed = pack(&[], dims(3, 3)).unwrap();

        assert_eq!(packed.len(), 1);
        assert_eq!(packed.padding_length, 9);
        assert!(packed.frames[0].pixels.iter().all(|&b| b == PADDING_BYTE));
    }

    #[test]
    fn indices_start_at_zero_and_increase() {
        let packed = pack(&cycling_payload(50), dims(4, 4)).unwrap();
        let indices: Vec<u32> = packed.frames.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn frame_count_and_padding_helpers() {
        let d = dims(10, 10);
        assert_eq!(frame_count(0, d).unwrap(), 1);
        assert_eq!(frame_count(1, d).unwrap(), 1);
        assert_eq!(frame_count(100, d).unwrap(), 1);
        assert_eq!(frame_count(101, d).unwrap(), 2);
        assert_eq!(padding_length(101, d).unwrap(), 99);
        assert_eq!(padding_length(200, d).unwrap(), 0);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let bogus = FrameDimensions {
            width: 640,
            height: 0,
        };
        assert_eq!(
            pack(&[1, 2, 3], bogus).unwrap_err(),
            FrameError::InvalidDimensions {
                width: 640,
                height: 0
            }
        );
        assert!(frame_count(3, bogus).is_err());
        assert!(padding_length(3, bogus).is_err());
    }
}
