use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BootError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("Boot binary is empty: {0:?}")]
    EmptyBinary(PathBuf),
}

pub type BootResult<T> = Result<T, BootError>;
