//! Compressed stream header
//!
//! Layout, all integers big-endian:
//!
//! ```text
//! [1 byte]  distinct symbols - 1
//! repeated distinct times, ascending symbol order:
//!   [1 byte]  symbol
//!   [8 bytes] frequency
//! [8 bytes] total symbol count
//! ```
//!
//! An empty input is the single byte `0x00` followed by end-of-stream.
//! Storing `distinct - 1` lets the one count byte express all 256 symbols.

use std::io::{ErrorKind, Read, Write};

use crate::error::CompressError;
use crate::frequency::FrequencyTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    frequencies: FrequencyTable,
    total: u64,
}

impl Header {
    pub fn new(frequencies: FrequencyTable, total: u64) -> Self {
        Self { frequencies, total }
    }

    /// Header for a table whose declared total is the sum of its counts.
    pub fn from_table(frequencies: FrequencyTable) -> Self {
        let total = frequencies.total();
        Self { frequencies, total }
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn encoded_len(&self) -> u64 {
        match self.frequencies.distinct() {
            0 => 1,
            n => 1 + 9 * n as u64 + 8,
        }
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), CompressError> {
        let distinct = self.frequencies.distinct();
        if distinct == 0 {
            if self.total != 0 {
                return Err(CompressError::InvalidAlphabet(format!(
                    "total of {} declared with no symbols",
                    self.total
                )));
            }
            writer.write_all(&[0])?;
            return Ok(());
        }

        let mut buf = Vec::with_capacity(self.encoded_len() as usize);
        buf.push((distinct - 1) as u8);
        for (symbol, frequency) in self.frequencies.iter() {
            buf.push(symbol);
            buf.extend_from_slice(&frequency.to_be_bytes());
        }
        buf.extend_from_slice(&self.total.to_be_bytes());
        writer.write_all(&buf)?;
        Ok(())
    }

    /// Read a header, consuming exactly its bytes from `reader`.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, CompressError> {
        let count = read_byte(reader)?.ok_or(CompressError::TruncatedHeader("symbol count"))?;
        let first = match read_byte(reader)? {
            Some(symbol) => symbol,
            None if count == 0 => return Ok(Self::new(FrequencyTable::new(), 0)),
            None => return Err(CompressError::TruncatedHeader("symbol")),
        };

        let distinct = count as usize + 1;
        let mut frequencies = FrequencyTable::new();
        let mut previous: Option<u8> = None;
        for index in 0..distinct {
            let symbol = if index == 0 {
                first
            } else {
                read_byte(reader)?.ok_or(CompressError::TruncatedHeader("symbol"))?
            };
            if previous.is_some_and(|p| symbol <= p) {
                return Err(CompressError::InvalidAlphabet(format!(
                    "symbol {symbol} out of ascending order"
                )));
            }
            let frequency = read_u64(reader, "symbol frequency")?;
            if frequency == 0 {
                return Err(CompressError::InvalidAlphabet(format!(
                    "symbol {symbol} has zero frequency"
                )));
            }
            frequencies.insert(symbol, frequency)?;
            previous = Some(symbol);
        }
        let total = read_u64(reader, "total symbol count")?;

        Ok(Self { frequencies, total })
    }

    /// Check that the declared total matches the frequency sum.
    pub fn verify(&self) -> Result<(), CompressError> {
        if self.frequencies.total() != self.total {
            return Err(CompressError::InvalidAlphabet(format!(
                "frequencies sum to {} but header declares {}",
                self.frequencies.total(),
                self.total
            )));
        }
        Ok(())
    }
}

fn read_byte<R: Read>(reader: &mut R) -> Result<Option<u8>, CompressError> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

fn read_u64<R: Read>(reader: &mut R, field: &'static str) -> Result<u64, CompressError> {
    let mut bytes = [0u8; 8];
    reader.read_exact(&mut bytes).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => CompressError::TruncatedHeader(field),
        _ => CompressError::IoError(e),
    })?;
    Ok(u64::from_be_bytes(bytes))
}
