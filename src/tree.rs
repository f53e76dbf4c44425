use crate::frequency::FrequencyTable;
use crate::node::{NodeKind, TreeNode};
use crate::queue::MinQueue;
use slotmap::{DefaultKey, SlotMap};
use tracing::{debug, instrument, trace};

/// A Huffman prefix-code tree.
///
/// Nodes are stored in a generational arena and refer to each other by key.
/// The tree is read-only once built; encoding, decoding and serialization
/// all borrow it immutably.
///
/// An empty alphabet produces a tree with no root. A single-symbol alphabet
/// produces a lone leaf root with no merge step.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    pub(crate) nodes: SlotMap<DefaultKey, TreeNode>,
    pub(crate) root: Option<DefaultKey>,
}

impl HuffmanTree {
    /// Creates a tree with no nodes.
    pub fn empty() -> Self {
        Self {
            nodes: SlotMap::new(),
            root: None,
        }
    }

    /// Counts the symbols of `bytes` and builds their tree.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_frequencies(&FrequencyTable::from_bytes(bytes))
    }

    /// Builds the tree by greedy merging of the two lightest nodes.
    ///
    /// Leaves are seeded in byte order and equal weights are resolved by
    /// insertion order, so the shape (and every code) is reproducible. The
    /// first node removed becomes the left child, the second the right.
    #[instrument(level = "debug", skip_all, fields(alphabet = frequencies.len()))]
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Self {
        let alphabet = frequencies.len();
        let mut nodes = SlotMap::with_capacity(alphabet.saturating_mul(2));
        let mut queue = MinQueue::with_capacity(alphabet);

        for (symbol, count) in frequencies {
            let key = nodes.insert(TreeNode::leaf(symbol, count));
            queue.push(count, key);
        }

        let mut merges = 0usize;
        let root = loop {
            let Some((left_weight, left)) = queue.pop() else {
                break None;
            };
            let Some((right_weight, right)) = queue.pop() else {
                break Some(left);
            };

            let frequency = left_weight + right_weight;
            let parent = nodes.insert(TreeNode::branch(left, right, frequency));
            nodes[left].parent = Some(parent);
            nodes[right].parent = Some(parent);
            queue.push(frequency, parent);

            merges += 1;
            trace!(left_weight, right_weight, frequency, "merged");
        };

        debug!(merges, nodes = nodes.len(), "built tree");
        Self { nodes, root }
    }

    /// Key of the root node, `None` for the empty tree.
    pub fn root(&self) -> Option<DefaultKey> {
        self.root
    }

    /// Returns the node for `key`.
    pub fn node(&self, key: DefaultKey) -> Option<&TreeNode> {
        self.nodes.get(key)
    }

    /// Returns the parent of `key`, if it has one.
    pub fn parent(&self, key: DefaultKey) -> Option<DefaultKey> {
        self.nodes.get(key)?.parent
    }

    /// Number of edges between `key` and the root, following parent links.
    pub fn depth(&self, key: DefaultKey) -> Option<usize> {
        let mut current = self.nodes.get(key)?;
        let mut depth = 0;
        while let Some(parent) = current.parent {
            current = &self.nodes[parent];
            depth += 1;
        }
        Some(depth)
    }

    /// Total number of nodes, leaves and branches.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of distinct symbols in the tree.
    pub fn leaf_count(&self) -> usize {
        self.nodes.values().filter(|node| node.is_leaf()).count()
    }

    /// Finds the leaf holding `symbol`.
    pub fn leaf(&self, symbol: u8) -> Option<DefaultKey> {
        self.nodes
            .iter()
            .find(|(_, node)| node.symbol() == Some(symbol))
            .map(|(key, _)| key)
    }

    /// Sum over leaves of `frequency * depth`.
    ///
    /// This equals the encoded length in bits of the input the tree was
    /// built from. A lone leaf counts as depth one, matching its one-bit code.
    pub fn weighted_path_length(&self) -> u64 {
        let Some(root) = self.root else {
            return 0;
        };

        if let NodeKind::Leaf { .. } = self.nodes[root].kind {
            return self.nodes[root].frequency;
        }

        let mut total = 0;
        let mut stack = vec![(root, 0u64)];
        while let Some((key, depth)) = stack.pop() {
            let node = &self.nodes[key];
            match node.kind {
                NodeKind::Leaf { .. } => total += node.frequency * depth,
                NodeKind::Branch { left, right } => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
            }
        }
        total
    }
}

impl Default for HuffmanTree {
    fn default() -> Self {
        Self::empty()
    }
}
