use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("document store: {0}")]
    Store(#[from] sled::Error),

    #[error("codec: {0}")]
    Codec(#[from] bincode::Error),

    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

pub type Result<T> = std::result::Result<T, Error>;
