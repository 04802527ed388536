use thiserror::Error;

#[derive(Debug, Error)]
pub enum CdiError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    #[error("The image has no sessions")]
    EmptyImage,

    #[error("Session {0} has no tracks")]
    EmptySession(usize),

    #[error("The image has {0} sessions, a CDI file holds at most 255")]
    TooManySessions(usize),

    #[error("The image has {0} tracks, a CDI file holds at most 255")]
    TooManyTracks(usize),
}

pub type CdiResult<T> = Result<T, CdiError>;
