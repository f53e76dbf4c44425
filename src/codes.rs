use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::node::NodeKind;
use crate::packed::PackedBits;
use crate::tree::HuffmanTree;
use ahash::AHashMap as HashMap;
use tracing::{debug, instrument};

/// Code assigned to the only symbol of a one-symbol alphabet.
///
/// The root-to-leaf path is empty there, which cannot count repetitions.
const LONE_LEAF_CODE: &str = "0";

/// Mapping from symbol to its `'0'`/`'1'` code.
///
/// Derived from a tree by a preorder walk where the left edge appends `'0'`
/// and the right edge appends `'1'`. Because every branch has two children,
/// no code is a prefix of another.
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    codes: HashMap<u8, String>,
    // symbols in byte order
    order: Vec<u8>,
}

impl CodeTable {
    /// Walks `tree` and records the path to every leaf.
    #[instrument(level = "debug", skip_all, fields(nodes = tree.len()))]
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = HashMap::new();

        let Some(root) = tree.root else {
            return Self::with_codes(codes);
        };

        if let NodeKind::Leaf { symbol } = tree.nodes[root].kind {
            codes.insert(symbol, LONE_LEAF_CODE.to_string());
            return Self::with_codes(codes);
        }

        // (node, edge taken to reach it, path length before that edge)
        let mut stack = vec![(root, None, 0usize)];
        let mut path = String::new();
        while let Some((key, edge, depth)) = stack.pop() {
            path.truncate(depth);
            if let Some(bit) = edge {
                path.push(bit);
            }

            match tree.nodes[key].kind {
                NodeKind::Leaf { symbol } => {
                    codes.insert(symbol, path.clone());
                }
                NodeKind::Branch { left, right } => {
                    stack.push((right, Some('1'), path.len()));
                    stack.push((left, Some('0'), path.len()));
                }
            }
        }

        debug!(symbols = codes.len(), "generated code table");
        Self::with_codes(codes)
    }

    fn with_codes(codes: HashMap<u8, String>) -> Self {
        let mut order: Vec<u8> = codes.keys().copied().collect();
        order.sort_unstable();
        Self { codes, order }
    }

    /// The code for `symbol`, if the tree has a leaf for it.
    pub fn get(&self, symbol: u8) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// `(symbol, code)` pairs in byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> + '_ {
        self.order
            .iter()
            .filter_map(move |&symbol| Some((symbol, self.get(symbol)?)))
    }

    /// Encoded length in bits of an input with these frequencies.
    ///
    /// Returns `None` if a counted symbol has no code.
    pub fn encoded_len(&self, frequencies: &FrequencyTable) -> Option<u64> {
        frequencies.iter().try_fold(0u64, |total, (symbol, count)| {
            let code = self.codes.get(&symbol)?;
            Some(total + count * code.len() as u64)
        })
    }

    /// Concatenates the code of every input symbol, in input order.
    #[instrument(level = "debug", skip_all, fields(input = input.len()))]
    pub fn encode(&self, input: &[u8]) -> Result<String> {
        let mut bits = String::with_capacity(input.len() * 2);
        for (position, &symbol) in input.iter().enumerate() {
            bits.push_str(self.lookup(symbol, position)?);
        }
        debug!(bits = bits.len(), "encoded");
        Ok(bits)
    }

    /// Like [`encode`](Self::encode), packing eight bits per byte.
    #[instrument(level = "debug", skip_all, fields(input = input.len()))]
    pub fn encode_packed(&self, input: &[u8]) -> Result<PackedBits> {
        let mut packed = PackedBits::new();
        for (position, &symbol) in input.iter().enumerate() {
            let code = self.lookup(symbol, position)?;
            packed.extend(code.bytes().map(|bit| bit == b'1'));
        }
        debug!(bits = packed.len(), bytes = packed.as_bytes().len(), "encoded");
        Ok(packed)
    }

    fn lookup(&self, symbol: u8, position: usize) -> Result<&str> {
        self.get(symbol)
            .ok_or(HuffmanError::UnknownSymbol { symbol, position })
    }
}

impl HuffmanTree {
    /// Derives the code table of this tree.
    pub fn code_table(&self) -> CodeTable {
        CodeTable::from_tree(self)
    }

    /// Encodes `input` using this tree's codes.
    ///
    /// Derives a fresh [`CodeTable`] on every call. To encode repeatedly,
    /// keep the table from [`code_table`](Self::code_table) or use
    /// [`HuffmanCoder::encode`](crate::HuffmanCoder::encode), which caches it.
    pub fn encode(&self, input: &[u8]) -> Result<String> {
        self.code_table().encode(input)
    }

    /// Encodes `input` into packed bits using this tree's codes.
    ///
    /// Like [`encode`](Self::encode), this rebuilds the code table per call.
    pub fn encode_packed(&self, input: &[u8]) -> Result<PackedBits> {
        self.code_table().encode_packed(input)
    }
}
