use crate::codes::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::tree::HuffmanTree;
use tracing::{debug, instrument};

/// A tree together with the code table derived from it.
#[derive(Debug, Clone)]
struct ActiveTree {
    tree: HuffmanTree,
    codes: CodeTable,
}

impl ActiveTree {
    fn new(tree: HuffmanTree) -> Self {
        let codes = tree.code_table();
        Self { tree, codes }
    }
}

/// Session object holding the active tree.
///
/// `compress` builds a fresh tree from its input and makes it active;
/// `decompress` and `serialize_tree` read whichever tree is active.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCoder {
    active: Option<ActiveTree>,
    stats: Option<CompressionStats>,
}

impl HuffmanCoder {
    /// Creates a coder with no active tree.
    pub fn new() -> Self {
        Self {
            active: None,
            stats: None,
        }
    }

    /// Builds a tree from `input`, makes it active and returns the encoding.
    ///
    /// Empty input installs the empty tree and returns an empty string.
    #[instrument(level = "debug", skip_all, fields(input = input.len()))]
    pub fn compress(&mut self, input: &[u8]) -> Result<String> {
        let active = ActiveTree::new(HuffmanTree::from_bytes(input));
        let bits = active.codes.encode(input)?;

        let stats = CompressionStats {
            input_length: input.len(),
            distinct_symbols: active.codes.len(),
            encoded_bits: bits.len(),
        };
        debug!(
            encoded_bits = stats.encoded_bits,
            ratio = stats.compression_ratio(),
            "compressed"
        );

        self.active = Some(active);
        self.stats = Some(stats);
        Ok(bits)
    }

    /// Decodes `code` with the active tree.
    pub fn decompress(&self, code: &str) -> Result<Vec<u8>> {
        self.active()?.tree.decode(code)
    }

    /// Encodes `input` with the active tree without rebuilding it.
    pub fn encode(&self, input: &[u8]) -> Result<String> {
        self.active()?.codes.encode(input)
    }

    /// Postorder serialization of the active tree.
    pub fn serialize_tree(&self) -> Result<Vec<u8>> {
        Ok(self.active()?.tree.serialize())
    }

    /// Installs `tree` as the active tree.
    pub fn load_tree(&mut self, tree: HuffmanTree) {
        debug!(nodes = tree.len(), "loaded tree");
        self.active = Some(ActiveTree::new(tree));
        self.stats = None;
    }

    /// Rebuilds a tree from its serialized form and makes it active.
    pub fn load_serialized(&mut self, stream: &[u8]) -> Result<()> {
        self.load_tree(HuffmanTree::deserialize(stream)?);
        Ok(())
    }

    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.active.as_ref().map(|active| &active.tree)
    }

    pub fn code_table(&self) -> Option<&CodeTable> {
        self.active.as_ref().map(|active| &active.codes)
    }

    /// Statistics of the most recent `compress`, cleared when a tree is loaded.
    pub fn stats(&self) -> Option<CompressionStats> {
        self.stats
    }

    fn active(&self) -> Result<&ActiveTree> {
        self.active.as_ref().ok_or(HuffmanError::NoActiveTree)
    }
}

/// Statistics about the compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionStats {
    /// Number of input bytes
    pub input_length: usize,
    /// Number of distinct bytes, i.e. leaves in the tree
    pub distinct_symbols: usize,
    /// Length of the encoding in bits
    pub encoded_bits: usize,
}

impl CompressionStats {
    /// Average code length per input symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.input_length == 0 {
            0.0
        } else {
            self.encoded_bits as f64 / self.input_length as f64
        }
    }

    /// Encoded size as a percentage of the 8-bit input size.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_length == 0 {
            0.0
        } else {
            (self.encoded_bits as f64 / (self.input_length as f64 * 8.0)) * 100.0
        }
    }
}
