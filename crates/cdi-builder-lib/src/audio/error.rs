use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    #[error("Not a RIFF file")]
    NotRiff,

    #[error("RIFF file is not of WAVE type")]
    NotWave,

    #[error(
        "Unsupported wave format: {channels} channels, {sample_rate} Hz, {bits_per_sample} bits (expected stereo, 44100 Hz, 16 bits)"
    )]
    UnsupportedFormat {
        channels: u16,
        sample_rate: u32,
        bits_per_sample: u16,
    },

    #[error("Wave file has no fmt chunk before its data chunk")]
    MissingFormat,

    #[error("Wave file has no data chunk")]
    MissingData,

    #[error("Chunk {0:?} is larger than the file")]
    TruncatedChunk(String),

    #[error("Audio is too short: {length} bytes, at least {minimum} bytes are required")]
    TooShort { length: usize, minimum: usize },
}

pub type AudioResult<T> = Result<T, AudioError>;
