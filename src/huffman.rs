//! Huffman compression and decompression
//!
//! Encoding makes two passes over a seekable source: one to count symbol
//! frequencies, one to emit codes. Decoding rebuilds the same tree from the
//! header and walks it bit by bit in a single pass.

use std::io::{BufReader, BufWriter, Cursor, ErrorKind, Read, Seek, SeekFrom, Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::bits::{BitPacker, BitUnpacker};
use crate::code_table::CodeTable;
use crate::config::CompressionConfig;
use crate::error::CompressError;
use crate::frequency::FrequencyTable;
use crate::header::Header;
use crate::tree::HuffmanTree;

/// Sizes observed while encoding or decoding one stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSummary {
    pub symbols: u64,
    pub distinct_symbols: usize,
    pub header_bytes: u64,
    pub payload_bytes: u64,
}

impl StreamSummary {
    pub fn compressed_bytes(&self) -> u64 {
        self.header_bytes + self.payload_bytes
    }
}

/// Encode everything from the current position of `input` to its end.
///
/// The source is read twice and never held in memory, so no size limit applies.
pub fn encode<R: Read + Seek, W: Write>(
    input: &mut R,
    output: &mut W,
    config: &CompressionConfig,
) -> Result<StreamSummary, CompressError> {
    let chunk_size = config.io_buffer_size.max(1);
    let start = input.stream_position()?;
    let frequencies = FrequencyTable::from_reader(input, chunk_size)?;
    debug!(
        total = frequencies.total(),
        distinct = frequencies.distinct(),
        "frequency pass complete"
    );

    let header = Header::from_table(frequencies);
    let mut writer = BufWriter::with_capacity(config.io_buffer_size, output);
    header.write_to(&mut writer)?;
    let mut summary = StreamSummary {
        symbols: header.total(),
        distinct_symbols: header.frequencies().distinct(),
        header_bytes: header.encoded_len(),
        payload_bytes: 0,
    };

    let Some(tree) = HuffmanTree::from_frequencies(header.frequencies()) else {
        writer.flush()?;
        debug!("empty input, wrote header only");
        return Ok(summary);
    };
    let codes = CodeTable::from_tree(&tree);
    trace!(
        codes = codes.len(),
        max_code_len = codes.max_code_len(),
        "code table built"
    );

    input.seek(SeekFrom::Start(start))?;
    let mut packer = BitPacker::new(&mut writer);
    let mut chunk = vec![0u8; chunk_size];
    let mut remaining = header.total();
    loop {
        let n = match input.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        remaining = remaining
            .checked_sub(n as u64)
            .ok_or(CompressError::InputChanged)?;
        for &b in &chunk[..n] {
            let code = codes.get(b).ok_or(CompressError::InputChanged)?;
            packer.push_bits(code.bits())?;
        }
    }
    if remaining != 0 {
        return Err(CompressError::InputChanged);
    }

    summary.payload_bytes = packer.finish()?;
    writer.flush()?;
    debug!(
        symbols = summary.symbols,
        header_bytes = summary.header_bytes,
        payload_bytes = summary.payload_bytes,
        "encode complete"
    );
    Ok(summary)
}

/// Encode a source that cannot be rewound by buffering it in memory first.
///
/// Fails with `InputTooLarge` once more than `max_input_size` bytes arrive.
pub fn encode_buffered<R: Read, W: Write>(
    input: &mut R,
    output: &mut W,
    config: &CompressionConfig,
) -> Result<StreamSummary, CompressError> {
    let limit = config.max_input_size;
    let mut data = Vec::new();
    input.take(limit.saturating_add(1)).read_to_end(&mut data)?;
    if data.len() as u64 > limit {
        return Err(CompressError::InputTooLarge { limit });
    }
    encode(&mut Cursor::new(data), output, config)
}

/// Decode one compressed stream. Bytes after the last needed payload bit
/// are left unread or ignored.
pub fn decode<R: Read, W: Write>(
    input: &mut R,
    output: &mut W,
    config: &CompressionConfig,
) -> Result<StreamSummary, CompressError> {
    let mut reader = BufReader::with_capacity(config.io_buffer_size, input);
    let header = Header::read_from(&mut reader)?;
    if config.verify_total {
        header.verify()?;
    }
    let total = header.total();
    debug!(
        total,
        distinct = header.frequencies().distinct(),
        "header read"
    );

    let mut summary = StreamSummary {
        symbols: 0,
        distinct_symbols: header.frequencies().distinct(),
        header_bytes: header.encoded_len(),
        payload_bytes: 0,
    };
    if total == 0 {
        return Ok(summary);
    }

    let tree = HuffmanTree::from_frequencies(header.frequencies()).ok_or_else(|| {
        CompressError::InvalidAlphabet("non-zero total with an empty alphabet".into())
    })?;
    let mut writer = BufWriter::with_capacity(config.io_buffer_size, output);
    let mut unpacker = BitUnpacker::new(&mut reader);

    let root = tree.root();
    let mut node = root;
    let mut decoded = 0u64;
    while decoded < total {
        let bit = unpacker
            .next_bit()?
            .ok_or(CompressError::TruncatedPayload {
                expected: total,
                decoded,
            })?;
        node = tree
            .child(node, bit)
            .ok_or_else(|| CompressError::CorruptPayload {
                bit_offset: unpacker.bits_read() - 1,
            })?;
        if let Some(symbol) = tree.symbol(node) {
            writer.write_all(&[symbol])?;
            decoded += 1;
            node = root;
        }
    }

    summary.symbols = decoded;
    summary.payload_bytes = unpacker.bytes_consumed();
    writer.flush()?;
    debug!(
        symbols = summary.symbols,
        payload_bytes = summary.payload_bytes,
        "decode complete"
    );
    Ok(summary)
}

/// Compress an in-memory buffer.
pub fn compress(data: &[u8], config: &CompressionConfig) -> Result<Vec<u8>, CompressError> {
    let mut output = Vec::new();
    encode(&mut Cursor::new(data), &mut output, config)?;
    Ok(output)
}

/// Decompress an in-memory buffer.
pub fn decompress(data: &[u8], config: &CompressionConfig) -> Result<Vec<u8>, CompressError> {
    let mut output = Vec::new();
    decode(&mut Cursor::new(data), &mut output, config)?;
    Ok(output)
}
