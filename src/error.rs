//! Error types for sigma-huffman

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("truncated header: missing {0}")]
    TruncatedHeader(&'static str),

    #[error("truncated payload: decoded {decoded} of {expected} symbols")]
    TruncatedPayload { expected: u64, decoded: u64 },

    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),

    #[error("corrupt payload: bit {bit_offset} selects an unused branch")]
    CorruptPayload { bit_offset: u64 },

    #[error("input exceeds the configured limit of {limit} bytes")]
    InputTooLarge { limit: u64 },

    #[error("input changed between the frequency pass and the encoding pass")]
    InputChanged,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerializationError(String),
}
