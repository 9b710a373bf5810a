//! External node-list synchronization.
//!
//! A host (typically a navbar) emits its node list whenever it changes. The
//! menu materializes each emission the same way it builds its own tree, picks
//! the first node flagged `isActive` in pre-order and reports each distinct
//! activation once.

use crate::model::node::{MenuNode, MenuTree, NodeId};

/// Identity of an active node across emissions. Built from resolved content
/// only, so inserting or reordering siblings does not change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveKey {
    pub label: String,
    pub link: Option<String>,
    pub value: String,
}

impl ActiveKey {
    pub fn of(node: &MenuNode) -> Self {
        Self {
            label: node.label.clone(),
            link: node.link.clone(),
            value: node.value.clone(),
        }
    }
}

/// Pre-order walk yielding the first node that satisfies `pred`
fn find_preorder<'a>(
    tree: &'a MenuTree,
    pred: impl Fn(&MenuNode) -> bool,
) -> Option<&'a MenuNode> {
    let mut stack: Vec<NodeId> = tree.roots().iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        let Some(node) = tree.get(id) else {
            continue;
        };
        if pred(node) {
            return Some(node);
        }
        stack.extend(node.children.iter().rev().copied());
    }
    None
}

/// First node flagged `isActive`, depth-first pre-order
pub fn find_active(tree: &MenuTree) -> Option<&MenuNode> {
    find_preorder(tree, |node| node.is_active)
}

/// The node of `tree` with the given identity, if the tree contains one
pub fn resolve<'a>(tree: &'a MenuTree, key: &ActiveKey) -> Option<&'a MenuNode> {
    find_preorder(tree, |node| ActiveKey::of(node) == *key)
}

/// Remembers the last reported activation
#[derive(Debug, Default)]
pub struct ActiveNodeSync {
    last: Option<ActiveKey>,
}

impl ActiveNodeSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the active key of an emission. Returns true when it is a new
    /// activation that listeners must hear about. An emission without an
    /// active record forgets the previous one.
    pub fn observe(&mut self, active: Option<&ActiveKey>) -> bool {
        match active {
            None => {
                self.last = None;
                false
            }
            Some(key) if self.last.as_ref() == Some(key) => false,
            Some(key) => {
                self.last = Some(key.clone());
                true
            }
        }
    }

    pub fn last(&self) -> Option<&ActiveKey> {
        self.last.as_ref()
    }
}
