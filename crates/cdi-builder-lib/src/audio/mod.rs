//! Loads the PCM payload of audio tracks from wave files.

pub mod error;
mod models;

use crate::audio::error::{AudioError, AudioResult};
use crate::audio::models::{
    CHUNK_HEADER_SIZE, ChunkHeader, FORMAT_CHUNK_SIZE, FormatChunk, RiffHeader,
};
use crate::cd::SECTOR_SIZE;
use binrw::BinRead;
use log::debug;
use std::io::Cursor;
use std::path::Path;

pub const CDDA_CHANNELS: u16 = 2;
pub const CDDA_SAMPLE_RATE: u32 = 44100;
pub const CDDA_BITS_PER_SAMPLE: u16 = 16;
pub const CDDA_BYTES_PER_SECOND: usize = 176_400;

/// Shortest audio track accepted, 4 seconds.
pub const MINIMUM_AUDIO_TRACK_SECTORS: usize = 300;

/// Reads a wave file and returns its raw 16-bit stereo 44100 Hz samples.
pub async fn load_wav(path: impl AsRef<Path>) -> AudioResult<Vec<u8>> {
    debug!("Loading wave file: {:?}", path.as_ref());
    let bytes = tokio::fs::read(path).await?;
    parse_wav(&bytes)
}

pub fn parse_wav(bytes: &[u8]) -> AudioResult<Vec<u8>> {
    let mut cursor = Cursor::new(bytes);

    let riff = RiffHeader::read(&mut cursor).map_err(|_| AudioError::NotRiff)?;
    if &riff.id != b"RIFF" {
        return Err(AudioError::NotRiff);
    }
    if &riff.form != b"WAVE" {
        return Err(AudioError::NotWave);
    }

    let mut format_seen = false;

    while cursor.position() as usize + CHUNK_HEADER_SIZE <= bytes.len() {
        let chunk = ChunkHeader::read(&mut cursor)?;
        let start = cursor.position() as usize;
        let end = start
            .checked_add(chunk.size as usize)
            .filter(|end| *end <= bytes.len())
            .ok_or_else(|| {
                AudioError::TruncatedChunk(String::from_utf8_lossy(&chunk.id).into_owned())
            })?;

        match &chunk.id {
            b"fmt " => {
                if chunk.size < FORMAT_CHUNK_SIZE {
                    return Err(AudioError::TruncatedChunk("fmt ".to_string()));
                }
                let format = FormatChunk::read(&mut cursor)?;
                debug!(
                    "Wave format: {} channels, {} Hz, {} bits",
                    format.channels, format.sample_rate, format.bits_per_sample
                );

                if format.channels != CDDA_CHANNELS
                    || format.sample_rate != CDDA_SAMPLE_RATE
                    || format.bits_per_sample != CDDA_BITS_PER_SAMPLE
                {
                    return Err(AudioError::UnsupportedFormat {
                        channels: format.channels,
                        sample_rate: format.sample_rate,
                        bits_per_sample: format.bits_per_sample,
                    });
                }
                format_seen = true;
            }
            b"data" => {
                if !format_seen {
                    return Err(AudioError::MissingFormat);
                }
                return Ok(bytes[start..end].to_vec());
            }
            _ => debug!(
                "Skipping {} byte chunk {:?}",
                chunk.size,
                String::from_utf8_lossy(&chunk.id)
            ),
        }

        // chunks are word aligned
        let next = end + (chunk.size as usize & 1);
        cursor.set_position(next.min(bytes.len()) as u64);
    }

    Err(AudioError::MissingData)
}

/// Rejects audio shorter than [`MINIMUM_AUDIO_TRACK_SECTORS`].
pub fn ensure_minimum_length(pcm: &[u8]) -> AudioResult<()> {
    let minimum = MINIMUM_AUDIO_TRACK_SECTORS * SECTOR_SIZE;
    if pcm.len() < minimum {
        return Err(AudioError::TooShort {
            length: pcm.len(),
            minimum,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn wav(channels: u16, sample_rate: u32, bits: u16, extra_chunk: bool, data: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(b"WAVE");
        if extra_chunk {
            body.extend_from_slice(b"LIST");
            body.extend_from_slice(&3u32.to_le_bytes());
            body.extend_from_slice(&[1, 2, 3, 0]);
        }
        body.extend_from_slice(b"fmt ");
        body.extend_from_slice(&16u32.to_le_bytes());
        body.extend_from_slice(&1u16.to_le_bytes());
        body.extend_from_slice(&channels.to_le_bytes());
        body.extend_from_slice(&sample_rate.to_le_bytes());
        body.extend_from_slice(&(sample_rate * 4).to_le_bytes());
        body.extend_from_slice(&4u16.to_le_bytes());
        body.extend_from_slice(&bits.to_le_bytes());
        body.extend_from_slice(b"data");
        body.extend_from_slice(&(data.len() as u32).to_le_bytes());
        body.extend_from_slice(data);

        let mut file = Vec::new();
        file.extend_from_slice(b"RIFF");
        file.extend_from_slice(&(body.len() as u32).to_le_bytes());
        file.extend_from_slice(&body);
        file
    }

    #[test]
    fn returns_data_chunk() {
        let pcm = [1u8, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(parse_wav(&wav(2, 44100, 16, false, &pcm)).unwrap(), pcm);
    }

    #[test]
    fn skips_unknown_chunks_with_padding() {
        let pcm = [9u8; 12];
        assert_eq!(parse_wav(&wav(2, 44100, 16, true, &pcm)).unwrap(), pcm);
    }

    #[test]
    fn rejects_wrong_format() {
        let result = parse_wav(&wav(1, 22050, 8, false, &[0u8; 4]));
        assert!(matches!(
            result,
            Err(AudioError::UnsupportedFormat {
                channels: 1,
                sample_rate: 22050,
                bits_per_sample: 8
            })
        ));
    }

    #[test]
    fn rejects_non_wave_files() {
        assert!(matches!(parse_wav(b"nope"), Err(AudioError::NotRiff)));
        assert!(matches!(
            parse_wav(b"RIFF\x04\x00\x00\x00AVI "),
            Err(AudioError::NotWave)
        ));
        assert!(matches!(
            parse_wav(b"RIFF\x04\x00\x00\x00WAVE"),
            Err(AudioError::MissingData)
        ));
    }

    #[test]
    fn ignores_trailing_padding_byte() {
        let mut file = wav(2, 44100, 16, false, &[]);
        let data_start = file.len() - 8;
        file.truncate(data_start);
        file.push(0);
        assert!(matches!(parse_wav(&file), Err(AudioError::MissingData)));
    }

    #[test]
    fn rejects_truncated_data() {
        let mut file = wav(2, 44100, 16, false, &[0u8; 16]);
        file.truncate(file.len() - 4);
        assert!(matches!(parse_wav(&file), Err(AudioError::TruncatedChunk(_))));
    }

    #[test]
    fn minimum_length() {
        assert!(ensure_minimum_length(&vec![0u8; SECTOR_SIZE * 300]).is_ok());
        assert!(matches!(
            ensure_minimum_length(&vec![0u8; SECTOR_SIZE * 300 - 1]),
            Err(AudioError::TooShort { .. })
        ));
        assert_eq!(SECTOR_SIZE * 75, CDDA_BYTES_PER_SECOND);
    }

    #[tokio::test]
    async fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&wav(2, 44100, 16, false, &[7u8; 8])).unwrap();

        assert_eq!(load_wav(file.path()).await.unwrap(), vec![7u8; 8]);
        assert!(matches!(
            load_wav(file.path().with_extension("missing")).await,
            Err(AudioError::IoError(_))
        ));
    }
}
