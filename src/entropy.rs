//! Entropy measures for compression diagnostics

use crate::code_table::CodeTable;
use crate::frequency::FrequencyTable;

/// Shannon entropy of the table in bits per symbol.
pub fn shannon_entropy(table: &FrequencyTable) -> f64 {
    if table.is_empty() {
        return 0.0;
    }
    let len = table.total() as f64;
    let mut entropy = 0.0;
    for (_, f) in table.iter() {
        let p = f as f64 / len;
        entropy -= p * p.log2();
    }
    entropy
}

/// Number of payload bits the code table spends on the counted input.
pub fn payload_bits(table: &FrequencyTable, codes: &CodeTable) -> u64 {
    table
        .iter()
        .map(|(symbol, f)| f * codes.get(symbol).map_or(0, |c| c.len() as u64))
        .sum()
}

/// Mean code length in bits per symbol, weighted by frequency.
pub fn average_code_length(table: &FrequencyTable, codes: &CodeTable) -> f64 {
    if table.is_empty() {
        return 0.0;
    }
    payload_bits(table, codes) as f64 / table.total() as f64
}
