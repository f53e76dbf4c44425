use crate::error::{HuffmanError, Result};
use crate::node::{NodeKind, TreeNode};
use crate::tree::HuffmanTree;
use slotmap::{DefaultKey, SlotMap};
use tracing::{debug, instrument};

/// Emitted for every branch, after both of its subtrees.
pub const BRANCH_MARKER: u8 = b'B';

/// Emitted for every leaf, immediately followed by the leaf's symbol byte.
pub const LEAF_MARKER: u8 = b'L';

/// Weight given to leaves rebuilt from a stream, which carries no counts.
const REPLAYED_LEAF_FREQUENCY: u64 = 1;

fn malformed(position: usize, reason: &'static str) -> HuffmanError {
    HuffmanError::MalformedTree { position, reason }
}

impl HuffmanTree {
    /// Writes the tree shape as a postorder stream.
    ///
    /// Left subtree, right subtree, then the node itself: `B` for a branch,
    /// `L` plus the symbol for a leaf. The empty tree serializes to nothing.
    #[instrument(level = "debug", skip_all, fields(nodes = self.len()))]
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len() * 2);
        let Some(root) = self.root else {
            return out;
        };

        let mut stack = vec![(root, false)];
        while let Some((key, expanded)) = stack.pop() {
            match self.nodes[key].kind {
                NodeKind::Leaf { symbol } => out.extend_from_slice(&[LEAF_MARKER, symbol]),
                NodeKind::Branch { .. } if expanded => out.push(BRANCH_MARKER),
                NodeKind::Branch { left, right } => {
                    stack.push((key, true));
                    stack.push((right, false));
                    stack.push((left, false));
                }
            }
        }

        debug!(bytes = out.len(), "serialized tree");
        out
    }

    /// Rebuilds a tree from a postorder stream.
    ///
    /// Leaves are pushed onto a stack; each `B` pops the right then the left
    /// child and pushes the new branch. A valid stream leaves exactly one
    /// node (or none, for the empty stream). Leaves get unit frequency.
    #[instrument(level = "debug", skip_all, fields(bytes = stream.len()))]
    pub fn deserialize(stream: &[u8]) -> Result<Self> {
        let mut nodes: SlotMap<DefaultKey, TreeNode> = SlotMap::new();
        let mut pending: Vec<DefaultKey> = Vec::new();
        let mut seen = [false; 256];
        let mut position = 0;

        while position < stream.len() {
            match stream[position] {
                LEAF_MARKER => {
                    let Some(&symbol) = stream.get(position + 1) else {
                        return Err(malformed(position, "leaf marker without a symbol"));
                    };
                    if std::mem::replace(&mut seen[usize::from(symbol)], true) {
                        return Err(malformed(position, "symbol appears in more than one leaf"));
                    }
                    pending.push(nodes.insert(TreeNode::leaf(symbol, REPLAYED_LEAF_FREQUENCY)));
                    position += 2;
                }
                BRANCH_MARKER => {
                    let (Some(right), Some(left)) = (pending.pop(), pending.pop()) else {
                        return Err(malformed(position, "branch marker needs two pending subtrees"));
                    };
                    let frequency = nodes[left].frequency + nodes[right].frequency;
                    let parent = nodes.insert(TreeNode::branch(left, right, frequency));
                    nodes[left].parent = Some(parent);
                    nodes[right].parent = Some(parent);
                    pending.push(parent);
                    position += 1;
                }
                _ => return Err(malformed(position, "unknown marker")),
            }
        }

        if pending.len() > 1 {
            return Err(malformed(stream.len(), "stream ends with more than one subtree"));
        }

        debug!(nodes = nodes.len(), "deserialized tree");
        Ok(Self {
            nodes,
            root: pending.pop(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_empty() {
        assert!(HuffmanTree::from_bytes(b"").serialize().is_empty());
    }

    #[test]
    fn test_serialize_lone_leaf() {
        assert_eq!(HuffmanTree::from_bytes(b"zzz").serialize(), b"Lz");
    }

    #[test]
    fn test_serialize_two_symbols() {
        // b is lighter, merged first, sits on the left
        let stream = HuffmanTree::from_bytes(b"aab").serialize();
        assert_eq!(stream, b"LbLaB");
        assert_eq!(stream.iter().filter(|&&b| b == BRANCH_MARKER).count(), 1);
    }

    #[test]
    fn test_serialize_abracadabra() {
        let tree = HuffmanTree::from_bytes(b"abracadabra");
        assert_eq!(tree.serialize(), b"LaLcLdBLbLrBBB");
    }

    #[test]
    fn test_serialize_is_deterministic() {
        let tree = HuffmanTree::from_bytes(b"hello world");
        assert_eq!(tree.serialize(), tree.serialize());
        assert_eq!(
            tree.serialize(),
            HuffmanTree::from_bytes(b"hello world").serialize()
        );
    }

    #[test]
    fn test_marker_bytes_as_symbols() {
        // Symbols that collide with marker bytes must still round trip.
        let tree = HuffmanTree::from_bytes(b"BBBLLx");
        let stream = tree.serialize();
        let rebuilt = HuffmanTree::deserialize(&stream).unwrap();
        assert_eq!(rebuilt.serialize(), stream);
    }

    #[test]
    fn test_deserialize_restores_codes() {
        let input = b"abracadabra";
        let tree = HuffmanTree::from_bytes(input);
        let rebuilt = HuffmanTree::deserialize(&tree.serialize()).unwrap();

        let original: Vec<_> = tree.code_table().iter().map(|(s, c)| (s, c.to_string())).collect();
        let restored: Vec<_> = rebuilt.code_table().iter().map(|(s, c)| (s, c.to_string())).collect();
        assert_eq!(original, restored);

        let bits = tree.encode(input).unwrap();
        assert_eq!(rebuilt.decode(&bits).unwrap(), input);
    }

    #[test]
    fn test_deserialize_frequencies_and_parents() {
        let tree = HuffmanTree::deserialize(b"LxLyB").unwrap();
        let root = tree.root().unwrap();
        assert_eq!(tree.node(root).unwrap().frequency, 2);
        let x = tree.leaf(b'x').unwrap();
        assert_eq!(tree.parent(x), Some(root));
        assert_eq!(tree.node(x).unwrap().frequency, 1);
    }

    #[test]
    fn test_deserialize_empty_and_lone_leaf() {
        assert!(HuffmanTree::deserialize(b"").unwrap().is_empty());
        let lone = HuffmanTree::deserialize(b"Lq").unwrap();
        assert_eq!(lone.len(), 1);
        assert_eq!(lone.encode(b"qq").unwrap(), "00");
    }

    #[test]
    fn test_deserialize_errors() {
        let cases: [(&[u8], usize, &str); 5] = [
            (b"L", 0, "leaf marker without a symbol"),
            (b"LaB", 2, "branch marker needs two pending subtrees"),
            (b"LaLb", 4, "stream ends with more than one subtree"),
            (b"LaXLbB", 2, "unknown marker"),
            (b"LaLaB", 2, "symbol appears in more than one leaf"),
        ];
        for (stream, position, reason) in cases {
            assert_eq!(
                HuffmanTree::deserialize(stream).unwrap_err(),
                HuffmanError::MalformedTree { position, reason },
                "stream {:?}",
                String::from_utf8_lossy(stream)
            );
        }
    }
}
