//! Huffman tree construction
//!
//! Nodes live in a flat arena and refer to their children by index. The
//! arena is owned by the tree, so dropping the tree releases every node.

use crate::frequency::FrequencyTable;
use crate::priority::{Entry, PriorityOrderedSet};

/// Index of a node in the tree's arena.
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        frequency: u64,
    },
    /// `children[0]` is reached by a `0` bit, `children[1]` by a `1` bit.
    /// Only the synthetic root of a single-symbol tree has an empty slot.
    Internal {
        frequency: u64,
        children: [Option<NodeId>; 2],
    },
}

impl Node {
    pub fn frequency(&self) -> u64 {
        match self {
            Node::Leaf { frequency, .. } | Node::Internal { frequency, .. } => *frequency,
        }
    }

    pub fn symbol(&self) -> Option<u8> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build the tree for a frequency table, or `None` if the table is empty.
    ///
    /// The result depends only on the table, so the encoder and decoder
    /// arrive at identical trees.
    pub fn from_frequencies(table: &FrequencyTable) -> Option<Self> {
        let distinct = table.distinct();
        let mut nodes = Vec::with_capacity(2 * distinct);
        let mut queue = PriorityOrderedSet::with_capacity(distinct);

        for (symbol, frequency) in table.iter() {
            queue.insert(Entry {
                frequency,
                tie_break: symbol,
                node: nodes.len(),
            });
            nodes.push(Node::Leaf { symbol, frequency });
        }

        while let Some((a, b)) = queue.pop_two_lowest() {
            let frequency = a.frequency + b.frequency;
            queue.insert(Entry {
                frequency,
                tie_break: a.tie_break,
                node: nodes.len(),
            });
            nodes.push(Node::Internal {
                frequency,
                children: [Some(a.node), Some(b.node)],
            });
        }

        let last = queue.pop_lowest()?;
        let root = if distinct == 1 {
            // A bare leaf would get a zero-length code; hang it off a
            // synthetic root so the sole symbol encodes as a single `0`.
            nodes.push(Node::Internal {
                frequency: last.frequency,
                children: [Some(last.node), None],
            });
            nodes.len() - 1
        } else {
            last.node
        };

        Some(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Child reached from `id` by `bit`, if the slot is populated.
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match &self.nodes[id] {
            Node::Internal { children, .. } => children[bit as usize],
            Node::Leaf { .. } => None,
        }
    }

    pub fn symbol(&self, id: NodeId) -> Option<u8> {
        self.nodes[id].symbol()
    }

    /// Total frequency, equal to the number of encoded symbols.
    pub fn weight(&self) -> u64 {
        self.nodes[self.root].frequency()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
