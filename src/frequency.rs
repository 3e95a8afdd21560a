//! Byte frequency analysis
//!
//! Counts how often each of the 256 byte values occurs in an input stream.
//! The table is the only thing persisted in the compressed header, so both
//! sides rebuild the code tree from it.

use std::io::{ErrorKind, Read};

use crate::error::CompressError;

/// Number of symbols in the byte alphabet.
pub const ALPHABET_SIZE: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
    total: u64,
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
            total: 0,
        }
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.record_all(data);
        table
    }

    /// Consume `reader` to exhaustion, counting every byte.
    pub fn from_reader<R: Read>(reader: &mut R, chunk_size: usize) -> Result<Self, CompressError> {
        let mut table = Self::new();
        let mut chunk = vec![0u8; chunk_size.max(1)];
        loop {
            let n = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            table.record_all(&chunk[..n]);
        }
        Ok(table)
    }

    pub fn record_all(&mut self, data: &[u8]) {
        for &b in data {
            self.counts[b as usize] += 1;
        }
        self.total += data.len() as u64;
    }

    /// Set the count of a symbol that has not been counted yet.
    ///
    /// Used when rebuilding a table from a header, where counts arrive whole.
    pub(crate) fn insert(&mut self, symbol: u8, count: u64) -> Result<(), CompressError> {
        if self.counts[symbol as usize] != 0 {
            return Err(CompressError::InvalidAlphabet(format!(
                "symbol {symbol} listed twice"
            )));
        }
        self.total = self.total.checked_add(count).ok_or_else(|| {
            CompressError::InvalidAlphabet("frequency sum overflows u64".into())
        })?;
        self.counts[symbol as usize] = count;
        Ok(())
    }

    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of symbols with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Present symbols and their counts, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(i, &c)| (i as u8, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_counts_and_total() {
        let table = FrequencyTable::from_bytes(b"abracadabra");
        assert_eq!(table.count(b'a'), 5);
        assert_eq!(table.count(b'b'), 2);
        assert_eq!(table.count(b'z'), 0);
        assert_eq!(table.total(), 11);
        assert_eq!(table.distinct(), 5);
    }

    #[test]
    fn test_empty_stream() {
        let table = FrequencyTable::from_reader(&mut Cursor::new(Vec::new()), 16).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.distinct(), 0);
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn test_reader_matches_slice() {
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        // A tiny chunk forces many short reads.
        let from_reader = FrequencyTable::from_reader(&mut Cursor::new(&data), 7).unwrap();
        assert_eq!(from_reader, FrequencyTable::from_bytes(&data));
        assert_eq!(from_reader.distinct(), 256);
    }

    #[test]
    fn test_reader_zero_chunk_size() {
        let table = FrequencyTable::from_reader(&mut Cursor::new(b"abc".to_vec()), 0).unwrap();
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn test_iter_ascending() {
        let table = FrequencyTable::from_bytes(b"zyxzy");
        let pairs: Vec<(u8, u64)> = table.iter().collect();
        assert_eq!(pairs, vec![(b'x', 1), (b'y', 2), (b'z', 2)]);
    }

    #[test]
    fn test_insert_rejects_duplicates_and_overflow() {
        let mut table = FrequencyTable::new();
        table.insert(7, u64::MAX - 1).unwrap();
        assert!(matches!(table.insert(7, 1), Err(CompressError::InvalidAlphabet(_))));
        assert!(matches!(table.insert(8, 2), Err(CompressError::InvalidAlphabet(_))));
        table.insert(9, 1).unwrap();
        assert_eq!(table.total(), u64::MAX);
    }
}
