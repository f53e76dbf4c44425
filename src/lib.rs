//! # Huffman - Prefix-Code Compression
//!
//! A Rust implementation of Huffman coding over byte alphabets.
//!
//! The pipeline has three stages:
//! 1. **Frequency counting**: one pass over the input, counts per byte
//! 2. **Tree building**: repeatedly merge the two lightest nodes from a
//!    min-priority queue until a single root remains
//! 3. **Coding**: a preorder walk assigns `0` to left edges and `1` to right
//!    edges; decoding descends the tree bit by bit
//!
//! The tree shape can be written as a postorder stream and read back.
//!
//! ## Example
//!
//! ```
//! use huffman_rs::HuffmanCoder;
//!
//! let mut coder = HuffmanCoder::new();
//! let bits = coder.compress(b"abracadabra")?;
//!
//! // Reconstructs the original sequence
//! assert_eq!(coder.decompress(&bits)?, b"abracadabra");
//!
//! // Shape of the tree, postorder
//! assert_eq!(coder.serialize_tree()?, b"LaLcLdBLbLrBBB");
//! # Ok::<(), huffman_rs::HuffmanError>(())
//! ```
//!
//! ## Determinism
//!
//! Leaves enter the queue in byte order and equal weights leave it in
//! insertion order, so identical input always yields identical codes.

mod codes;
mod coder;
mod decoder;
mod error;
mod frequency;
mod node;
mod packed;
mod queue;
mod serialize;
mod tree;

#[cfg(test)]
mod tests;

pub use codes::CodeTable;
pub use coder::{CompressionStats, HuffmanCoder};
pub use decoder::Decoder;
pub use error::{HuffmanError, Result};
pub use frequency::{FrequencyIter, FrequencyTable};
pub use node::{NodeKind, TreeNode};
pub use packed::PackedBits;
pub use serialize::{BRANCH_MARKER, LEAF_MARKER};
pub use slotmap::DefaultKey;
pub use tree::HuffmanTree;
