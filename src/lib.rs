//! sigma-huffman: Static Huffman compression engine for the Ryzanstein ecosystem.
//!
//! Compresses byte streams with a fixed 256-symbol Huffman code:
//! - Frequency analysis over the whole input
//! - Deterministic tree construction, reproducible from the frequency table
//! - A self-describing header carrying only the frequencies and symbol total
//! - An MSB-first bit-packed payload
//!
//! The decoder never receives the tree; it rebuilds it from the header.

pub mod bits;
pub mod code_table;
pub mod config;
pub mod entropy;
pub mod error;
pub mod frequency;
pub mod header;
pub mod huffman;
pub mod priority;
pub mod tree;

use std::fmt;
use std::io::{Read, Seek, Write};

use serde::{Deserialize, Serialize};

use crate::code_table::CodeTable;
use crate::config::CompressionConfig;
use crate::error::CompressError;
use crate::frequency::FrequencyTable;
use crate::header::Header;
use crate::tree::HuffmanTree;

pub use crate::huffman::StreamSummary;

/// One present symbol in a compression report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolStat {
    pub symbol: u8,
    pub frequency: u64,
    pub code: String,
}

/// What compressing a buffer would produce, without producing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionReport {
    pub original_size: u64,
    pub compressed_size: u64,
    pub distinct_symbols: usize,
    pub entropy_bits: f64,
    pub average_code_length: f64,
    pub ratio: f64,
    pub symbols: Vec<SymbolStat>,
}

impl CompressionReport {
    pub fn to_json(&self) -> Result<String, CompressError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CompressError::SerializationError(e.to_string()))
    }
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Symbol\tFreq\tCode")?;
        for stat in &self.symbols {
            let c = stat.symbol as char;
            if c.is_ascii_graphic() {
                writeln!(f, "{}\t{}\t{}", c, stat.frequency, stat.code)?;
            } else {
                writeln!(f, "={}\t{}\t{}", stat.symbol, stat.frequency, stat.code)?;
            }
        }
        write!(f, "Total chars = {}", self.original_size)
    }
}

/// The main compressor engine
#[derive(Debug, Clone, Default)]
pub struct Compressor {
    config: CompressionConfig,
}

impl Compressor {
    /// Create a new compressor with the given configuration
    pub fn new(config: CompressionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompressionConfig {
        &self.config
    }

    /// Encode a seekable stream, rewinding it once for the second pass.
    pub fn encode<R: Read + Seek, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<StreamSummary, CompressError> {
        huffman::encode(input, output, &self.config)
    }

    /// Encode a stream that cannot be rewound.
    pub fn encode_buffered<R: Read, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<StreamSummary, CompressError> {
        huffman::encode_buffered(input, output, &self.config)
    }

    pub fn decode<R: Read, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<StreamSummary, CompressError> {
        huffman::decode(input, output, &self.config)
    }

    pub fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressError> {
        huffman::compress(data, &self.config)
    }

    pub fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CompressError> {
        huffman::decompress(data, &self.config)
    }

    /// Describe the code that `compress` would use for `data`.
    pub fn analyze(&self, data: &[u8]) -> CompressionReport {
        let frequencies = FrequencyTable::from_bytes(data);
        let header_bytes = Header::from_table(frequencies.clone()).encoded_len();
        let codes = HuffmanTree::from_frequencies(&frequencies)
            .map(|tree| CodeTable::from_tree(&tree));

        let (symbols, payload_bits, average_code_length) = match &codes {
            Some(codes) => (
                codes
                    .iter()
                    .map(|(symbol, code)| SymbolStat {
                        symbol,
                        frequency: frequencies.count(symbol),
                        code: code.to_string(),
                    })
                    .collect(),
                entropy::payload_bits(&frequencies, codes),
                entropy::average_code_length(&frequencies, codes),
            ),
            None => (Vec::new(), 0, 0.0),
        };

        let compressed_size = header_bytes + payload_bits.div_ceil(8);
        let ratio = if data.is_empty() {
            1.0
        } else {
            compressed_size as f64 / data.len() as f64
        };

        CompressionReport {
            original_size: data.len() as u64,
            compressed_size,
            distinct_symbols: frequencies.distinct(),
            entropy_bits: entropy::shannon_entropy(&frequencies),
            average_code_length,
            ratio,
            symbols,
        }
    }
}

/// Encode `input` into `output` with the default configuration.
pub fn encode<R: Read + Seek, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<(), CompressError> {
    Compressor::default().encode(input, output).map(|_| ())
}

/// Decode `input` into `output` with the default configuration.
pub fn decode<R: Read, W: Write>(input: &mut R, output: &mut W) -> Result<(), CompressError> {
    Compressor::default().decode(input, output).map(|_| ())
}
