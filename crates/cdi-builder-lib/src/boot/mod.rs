//! Flat boot binaries: loading and the slice shuffle the Dreamcast boot ROM expects when a
//! program is booted from a CD.

pub mod error;

use crate::boot::error::{BootError, BootResult};
use log::debug;
use std::path::Path;

const MAX_CHUNK_SIZE: usize = 2 * 1024 * 1024;
const SLICE_SIZE: usize = 32;

pub async fn load_binary(path: impl AsRef<Path>) -> BootResult<Vec<u8>> {
    let path = path.as_ref();
    let data = tokio::fs::read(path).await?;
    if data.is_empty() {
        return Err(BootError::EmptyBinary(path.to_path_buf()));
    }

    debug!("Loaded {} byte binary from {:?}", data.len(), path);
    Ok(data)
}

struct ScrambleRng {
    seed: u32,
}

impl ScrambleRng {
    fn next(&mut self) -> u32 {
        self.seed = (self.seed * 2109 + 9273) & 0x7FFF;
        (self.seed + 0xC000) & 0xFFFF
    }
}

/// Scrambles `data` in chunks of 2 MiB halving down to 32 bytes. Every chunk is cut into
/// 32-byte slices which are emitted in a pseudo-random order; a tail shorter than one slice
/// is copied as is. The output has the same length as the input.
pub fn scramble(data: &[u8]) -> Vec<u8> {
    let mut rng = ScrambleRng {
        seed: (data.len() & 0xFFFF) as u32,
    };
    let mut output = vec![0u8; data.len()];
    let mut position = 0;
    let mut chunk_size = MAX_CHUNK_SIZE;

    while chunk_size >= SLICE_SIZE {
        while data.len() - position >= chunk_size {
            let chunk = position..position + chunk_size;
            scramble_chunk(&mut rng, &mut output[chunk.clone()], &data[chunk]);
            position += chunk_size;
        }
        chunk_size >>= 1;
    }

    output[position..].copy_from_slice(&data[position..]);
    output
}

fn scramble_chunk(rng: &mut ScrambleRng, dest: &mut [u8], src: &[u8]) {
    let slice_count = src.len() / SLICE_SIZE;
    let mut order: Vec<usize> = (0..slice_count).collect();

    for (slot, i) in (0..slice_count).rev().enumerate() {
        let swap = ((rng.next() as usize) * i) >> 16;
        order.swap(i, swap);

        let from = order[i] * SLICE_SIZE;
        let to = slot * SLICE_SIZE;
        dest[to..to + SLICE_SIZE].copy_from_slice(&src[from..from + SLICE_SIZE]);
    }
}
