//! Integration tests for sigma-huffman

use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sigma_huffman::code_table::CodeTable;
use sigma_huffman::config::CompressionConfig;
use sigma_huffman::error::CompressError;
use sigma_huffman::frequency::FrequencyTable;
use sigma_huffman::header::Header;
use sigma_huffman::tree::HuffmanTree;
use sigma_huffman::*;

fn roundtrip(data: &[u8]) -> Vec<u8> {
    let compressor = Compressor::default();
    let compressed = compressor.compress(data).unwrap();
    compressor.decompress(&compressed).unwrap()
}

#[test]
fn test_file_roundtrip() {
    let data = b"the quick brown fox jumps over the lazy dog".repeat(50);
    let mut source = tempfile::tempfile().unwrap();
    source.write_all(&data).unwrap();
    source.seek(SeekFrom::Start(0)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let compressed_path = dir.path().join("fox.huff");
    let mut compressed = File::create(&compressed_path).unwrap();
    encode(&mut source, &mut compressed).unwrap();
    drop(compressed);

    let mut compressed = File::open(&compressed_path).unwrap();
    let mut restored = Vec::new();
    decode(&mut compressed, &mut restored).unwrap();
    assert_eq!(restored, data);
    assert!(std::fs::metadata(&compressed_path).unwrap().len() < data.len() as u64);
}

#[test]
fn test_random_roundtrips() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..50 {
        let len = rng.gen_range(0..4096);
        // Narrow alphabets skew the tree; wide ones approach 8 bits per symbol.
        let alphabet: u16 = rng.gen_range(1..=256);
        let data: Vec<u8> = (0..len)
            .map(|_| (rng.gen_range(0..alphabet)) as u8)
            .collect();
        assert_eq!(roundtrip(&data), data);
    }
}

#[test]
fn test_random_header_roundtrips() {
    let mut rng = StdRng::seed_from_u64(0xfeed);
    for _ in 0..200 {
        let distinct = rng.gen_range(1..=256usize);
        let mut symbols: Vec<u8> = (0..=255).collect();
        symbols.sort_by_key(|_| rng.gen::<u32>());
        symbols.truncate(distinct);
        symbols.sort_unstable();

        // Keep the sum of up to 256 counts inside u64.
        let ceiling = u64::MAX / 256;
        let mut bytes = vec![(distinct - 1) as u8];
        let mut total = 0u64;
        for &symbol in &symbols {
            let count = rng.gen_range(1..=ceiling);
            total += count;
            bytes.push(symbol);
            bytes.extend_from_slice(&count.to_be_bytes());
        }
        bytes.extend_from_slice(&total.to_be_bytes());

        let header = Header::read_from(&mut Cursor::new(&bytes)).unwrap();
        header.verify().unwrap();
        assert_eq!(header.total(), total);
        assert_eq!(header.frequencies().distinct(), distinct);

        let mut written = Vec::new();
        header.write_to(&mut written).unwrap();
        assert_eq!(written, bytes);
    }
}

#[test]
fn test_random_bytes_roundtrip() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut data = vec![0u8; 100_000];
    rng.fill(&mut data[..]);
    assert_eq!(roundtrip(&data), data);
}

#[test]
fn test_single_repeated_byte() {
    let data = vec![0x41u8; 1000];
    let compressor = Compressor::default();
    let compressed = compressor.compress(&data).unwrap();
    let header_len = 1 + 9 + 8;
    assert_eq!(compressed.len(), header_len + 1000 / 8);
    assert_eq!(compressor.decompress(&compressed).unwrap(), data);
}

#[test]
fn test_full_alphabet_skewed() {
    let data: Vec<u8> = (0..=255u8)
        .flat_map(|b| std::iter::repeat(b).take(1 + (b as usize * b as usize) % 97))
        .collect();
    let compressed = Compressor::default().compress(&data).unwrap();
    assert_eq!(compressed[0], 0xFF);
    assert_eq!(roundtrip(&data), data);
}

#[test]
fn test_empty_input() {
    let compressor = Compressor::default();
    let compressed = compressor.compress(b"").unwrap();
    assert_eq!(compressed, vec![0u8]);
    assert!(compressor.decompress(&compressed).unwrap().is_empty());
}

#[test]
fn test_empty_stream_is_truncated_header() {
    let result = Compressor::default().decompress(b"");
    assert!(matches!(result, Err(CompressError::TruncatedHeader(_))));
}

#[test]
fn test_truncation_detected() {
    let mut rng = StdRng::seed_from_u64(99);
    let data: Vec<u8> = (0..300).map(|_| rng.gen_range(b'a'..=b'h')).collect();
    let compressor = Compressor::default();
    let mut compressed = Vec::new();
    let summary = compressor
        .encode(&mut Cursor::new(&data), &mut compressed)
        .unwrap();
    for cut in 1..=summary.payload_bytes as usize {
        let result = compressor.decompress(&compressed[..compressed.len() - cut]);
        assert!(
            matches!(result, Err(CompressError::TruncatedPayload { .. })),
            "cut {cut}"
        );
    }
}

#[test]
fn test_independent_builds_agree() {
    let data = b"encoder and decoder build their trees separately";
    let compressed = Compressor::default().compress(data).unwrap();

    let encoder_side = FrequencyTable::from_bytes(data);
    let decoder_side = Header::read_from(&mut Cursor::new(&compressed))
        .unwrap()
        .frequencies()
        .clone();
    let a = CodeTable::from_tree(&HuffmanTree::from_frequencies(&encoder_side).unwrap());
    let b = CodeTable::from_tree(&HuffmanTree::from_frequencies(&decoder_side).unwrap());
    assert_eq!(a, b);
}

/// A reader with no `Seek`, forcing the buffered path.
struct OneShot<R>(R);

impl<R: Read> Read for OneShot<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.0.read(buf)
    }
}

#[test]
fn test_unseekable_source() {
    let data = b"piped input cannot be rewound".repeat(10);
    let compressor = Compressor::default();
    let mut compressed = Vec::new();
    compressor
        .encode_buffered(&mut OneShot(&data[..]), &mut compressed)
        .unwrap();
    let mut restored = Vec::new();
    compressor
        .decode(&mut OneShot(&compressed[..]), &mut restored)
        .unwrap();
    assert_eq!(restored, data);
}

#[test]
fn test_compression_config() {
    let config = CompressionConfig::from_json(r#"{"io_buffer_size": 3}"#).unwrap();
    let compressor = Compressor::new(config);
    let data = b"tiny buffers still see every byte".repeat(20);
    let compressed = compressor.compress(&data).unwrap();
    assert_eq!(compressor.decompress(&compressed).unwrap(), data);
}

#[test]
fn test_report_populated() {
    let report = Compressor::default().analyze(b"metadata test data here");
    assert!(report.entropy_bits > 0.0);
    assert!(report.average_code_length >= report.entropy_bits);
    assert_eq!(report.original_size, 23);
    assert_eq!(report.symbols.len(), report.distinct_symbols);
}
