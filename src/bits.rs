//! Bit-level packing of Huffman codes
//!
//! Bits are packed most-significant-bit first. The final byte is zero-padded
//! only when a partial byte is pending.

use std::io::{self, ErrorKind, Read, Write};

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

pub struct BitPacker<W: Write> {
    writer: BitWriter<W, BigEndian>,
    bits_written: u64,
}

impl<W: Write> BitPacker<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BitWriter::endian(writer, BigEndian),
            bits_written: 0,
        }
    }

    pub fn push_bit(&mut self, bit: bool) -> io::Result<()> {
        self.writer.write_bit(bit)?;
        self.bits_written += 1;
        Ok(())
    }

    pub fn push_bits(&mut self, bits: &[bool]) -> io::Result<()> {
        for &bit in bits {
            self.push_bit(bit)?;
        }
        Ok(())
    }

    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    pub fn has_partial_byte(&self) -> bool {
        !self.writer.byte_aligned()
    }

    /// Flush any pending partial byte and return the number of payload bytes.
    pub fn finish(mut self) -> io::Result<u64> {
        if self.has_partial_byte() {
            self.writer.byte_align()?;
        }
        Ok(self.bits_written.div_ceil(8))
    }
}

pub struct BitUnpacker<R: Read> {
    reader: BitReader<R, BigEndian>,
    bits_read: u64,
}

impl<R: Read> BitUnpacker<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BitReader::endian(reader, BigEndian),
            bits_read: 0,
        }
    }

    /// Next bit of the stream, or `None` once the underlying reader is exhausted.
    pub fn next_bit(&mut self) -> io::Result<Option<bool>> {
        match self.reader.read_bit() {
            Ok(bit) => {
                self.bits_read += 1;
                Ok(Some(bit))
            }
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Input bytes touched so far, counting a partially consumed byte.
    pub fn bytes_consumed(&self) -> u64 {
        self.bits_read.div_ceil(8)
    }
}
