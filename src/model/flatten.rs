//! Depth-first linearization of the menu tree for keyboard addressing.

use super::node::{MenuTree, NodeId};

/// One entry of the flattened list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatEntry {
    pub id: NodeId,
    /// Parent node, recorded at build time
    pub parent: Option<NodeId>,
    pub depth: usize,
}

/// Read-only pre-order listing of every node, root and nested.
/// Indices are stable until the tree is rebuilt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenedList {
    entries: Vec<FlatEntry>,
    /// Position of each node, indexed by `NodeId`
    positions: Vec<Option<usize>>,
}

/// Flatten a tree, node before its children, siblings in display order
pub fn flatten(tree: &MenuTree) -> FlattenedList {
    let mut list = FlattenedList {
        entries: Vec::with_capacity(tree.len()),
        positions: vec![None; tree.len()],
    };
    let mut stack: Vec<(NodeId, usize)> = tree.roots().iter().rev().map(|&id| (id, 0)).collect();

    while let Some((id, depth)) = stack.pop() {
        let Some(node) = tree.get(id) else {
            continue;
        };
        if let Some(slot) = list.positions.get_mut(id.0) {
            *slot = Some(list.entries.len());
        }
        list.entries.push(FlatEntry {
            id,
            parent: node.parent,
            depth,
        });
        stack.extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
    }

    list
}

impl FlattenedList {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[FlatEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&FlatEntry> {
        self.entries.get(index)
    }

    pub fn id_at(&self, index: usize) -> Option<NodeId> {
        self.entries.get(index).map(|e| e.id)
    }

    /// Index of a node in the list
    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.positions.get(id.0).copied().flatten()
    }

    /// Parent of the node at `index`, without scanning
    pub fn parent_of(&self, index: usize) -> Option<NodeId> {
        self.entries.get(index).and_then(|e| e.parent)
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().map(|e| e.id)
    }
}
