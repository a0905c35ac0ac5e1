// Error types shared across the crate

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Private key is not 32 bytes, not 64 hex characters, or not a valid scalar
    #[error("Invalid private key encoding: {0}")]
    InvalidKeyEncoding(String),

    #[error("Invalid Base58 character")]
    InvalidAlphabet,

    #[error("Base58Check checksum mismatch")]
    ChecksumMismatch,

    /// Decoded Base58Check data is too short to carry a version and checksum
    #[error("Base58Check data too short: {0} bytes")]
    MissingChecksum(usize),

    #[error("Invalid hash: {0}")]
    InvalidHash(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Unexpected end of data")]
    UnexpectedEndOfData,

    #[error("Script too large: {len} bytes (max {max})")]
    ScriptTooLarge { len: u64, max: usize },

    /// Data pushed by a script template exceeds a single-byte direct push
    #[error("Script push too large: {len} bytes (max {max})")]
    PushTooLarge { len: usize, max: usize },

    #[error("Merkle tree requires at least one leaf")]
    EmptyInput,

    #[error("IO error: {0}")]
    Io(io::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::UnexpectedEndOfData
        } else {
            Error::Io(err)
        }
    }
}
