//! Pack a buffer into frames and unpack it again without touching disk.

use vidpack::frame::{pack, unpack, FrameDimensions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let payload: Vec<u8> = (0..5_000u32).map(|i| (i % 251) as u8).collect();
    let dims = FrameDimensions::new(32, 32)?;

    let packed = pack(&payload, dims)?;
    println!(
        "{} bytes -> {} frames of {} ({} padding bytes)",
        payload.len(),
        packed.len(),
        dims,
        packed.padding_length
    );

    let restored = unpack(&packed.frames, dims, payload.len())?;
    assert_eq!(restored.as_ref(), payload.as_slice());
    println!("restored {} bytes", restored.len());
    Ok(())
}
