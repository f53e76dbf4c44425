use slotmap::DefaultKey;

/// Shape of a tree node.
///
/// A leaf carries a symbol and has no children; a branch has exactly two
/// children and no symbol. Nothing else is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A single input symbol.
    Leaf { symbol: u8 },

    /// A merged frequency group with both children present.
    Branch { left: DefaultKey, right: DefaultKey },
}

/// A node stored in the tree's arena.
///
/// Children and parent are arena keys rather than pointers, so the parent
/// link is a plain non-owning index.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub kind: NodeKind,
    pub frequency: u64,
    pub parent: Option<DefaultKey>,
}

impl TreeNode {
    pub(crate) fn leaf(symbol: u8, frequency: u64) -> Self {
        Self {
            kind: NodeKind::Leaf { symbol },
            frequency,
            parent: None,
        }
    }

    pub(crate) fn branch(left: DefaultKey, right: DefaultKey, frequency: u64) -> Self {
        Self {
            kind: NodeKind::Branch { left, right },
            frequency,
            parent: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    pub fn is_branch(&self) -> bool {
        matches!(self.kind, NodeKind::Branch { .. })
    }

    /// The leaf's symbol; `None` for branches.
    pub fn symbol(&self) -> Option<u8> {
        match self.kind {
            NodeKind::Leaf { symbol } => Some(symbol),
            NodeKind::Branch { .. } => None,
        }
    }

    /// `(left, right)` for branches; `None` for leaves.
    pub fn children(&self) -> Option<(DefaultKey, DefaultKey)> {
        match self.kind {
            NodeKind::Leaf { .. } => None,
            NodeKind::Branch { left, right } => Some((left, right)),
        }
    }
}
