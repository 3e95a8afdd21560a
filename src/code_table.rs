//! Symbol to code mapping derived from a Huffman tree.

use std::fmt;

use crate::frequency::ALPHABET_SIZE;
use crate::tree::{HuffmanTree, NodeId};

/// Root-to-leaf path of a symbol; `false` is a left turn, `true` a right one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// Walk the tree depth-first, left before right, recording each leaf's path.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![None; ALPHABET_SIZE];
        let mut path: Vec<bool> = Vec::new();
        // (node, path length above it, edge taken into it)
        let mut stack: Vec<(NodeId, usize, Option<bool>)> = vec![(tree.root(), 0, None)];

        while let Some((id, depth, edge)) = stack.pop() {
            path.truncate(depth);
            if let Some(bit) = edge {
                path.push(bit);
            }
            if let Some(symbol) = tree.symbol(id) {
                codes[symbol as usize] = Some(Code { bits: path.clone() });
                continue;
            }
            for bit in [true, false] {
                if let Some(child) = tree.child(id, bit) {
                    stack.push((child, path.len(), Some(bit)));
                }
            }
        }

        Self { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// Present symbols and their codes, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|c| (i as u8, c)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(Option::is_none)
    }

    pub fn max_code_len(&self) -> usize {
        self.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }
}
