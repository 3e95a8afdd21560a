//! Configuration for sigma-huffman

use serde::{Deserialize, Serialize};

use crate::error::CompressError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// Capacity of the buffers wrapping caller streams.
    pub io_buffer_size: usize,
    /// Largest input, in bytes, `encode_buffered` will hold in memory.
    pub max_input_size: u64,
    /// Reject headers whose frequencies do not sum to the declared total.
    pub verify_total: bool,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            io_buffer_size: 64 * 1024,
            max_input_size: 100 * 1024 * 1024, // 100 MB
            verify_total: true,
        }
    }
}

impl CompressionConfig {
    /// Parse a JSON document; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, CompressError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CompressError::SerializationError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CompressError> {
        if self.io_buffer_size == 0 {
            return Err(CompressError::InvalidConfig(
                "io_buffer_size must be non-zero".into(),
            ));
        }
        if self.max_input_size == 0 {
            return Err(CompressError::InvalidConfig(
                "max_input_size must be non-zero".into(),
            ));
        }
        Ok(())
    }
}
