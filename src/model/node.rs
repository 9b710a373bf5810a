//! Node materialization: the display tree as an arena of [`MenuNode`]s.
//!
//! Nodes are addressed by [`NodeId`] (their arena index, valid for one build)
//! and carry a [`NodePath`] of sibling indices from the root. The path is the
//! content-derived identity used for state that may outlive a rebuild, such as
//! expansion.

use super::accessor::{value_to_text, ItemAccessors};
use super::builder::TreeBuilder;
use super::ordering::OrderBy;
use crate::menu::focus::{FocusHandle, FocusSink};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// Identity of a materialized node within one build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Sibling indices from the root down to a node
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodePath(pub Vec<usize>);

impl NodePath {
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        NodePath(indices)
    }

    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        f.write_str(&parts.join("/"))
    }
}

/// A node in the display tree
#[derive(Debug)]
pub struct MenuNode {
    pub id: NodeId,
    pub path: NodePath,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub label: String,
    pub icon: Option<String>,
    pub link: Option<String>,
    pub hint: bool,
    pub disabled: bool,
    /// Source-provided flag, read by the external node-list synchronization
    pub is_active: bool,
    /// Selection value projected to listeners; the label unless the record has one
    pub value: String,
    /// Link target (e.g., "_blank")
    pub target: Option<String>,
    /// The original dataset entry
    pub record: Value,
    pub focus: FocusHandle,
}

impl MenuNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.path.depth()
    }

    /// The link to navigate to, if any. Absent links and `"#"` are action-only.
    pub fn navigation_link(&self) -> Option<&str> {
        self.link.as_deref().filter(|l| !l.is_empty() && *l != "#")
    }
}

/// Inputs of one materialization pass
pub struct MaterializeOptions<'a> {
    pub builder: &'a dyn TreeBuilder,
    pub accessors: &'a ItemAccessors,
    pub order: Option<&'a OrderBy>,
    pub value_field: &'a str,
    pub focus_sink: Option<&'a Rc<dyn FocusSink>>,
}

/// The materialized tree, owned by one menu for the duration of one build
#[derive(Debug, Default)]
pub struct MenuTree {
    nodes: Vec<MenuNode>,
    roots: Vec<NodeId>,
}

impl MenuTree {
    /// Build the tree for a dataset. Every nested child list goes through the
    /// builder again; a fresh focus handle is allocated for every node.
    pub fn materialize(records: &[Value], options: &MaterializeOptions<'_>) -> Self {
        let mut tree = MenuTree::default();
        tree.roots = tree.materialize_level(records, None, &NodePath::default(), options);
        tracing::debug!(
            "materialized menu tree: {} roots, {} nodes",
            tree.roots.len(),
            tree.nodes.len()
        );
        tree
    }

    fn materialize_level(
        &mut self,
        records: &[Value],
        parent: Option<NodeId>,
        parent_path: &NodePath,
        options: &MaterializeOptions<'_>,
    ) -> Vec<NodeId> {
        let items = options
            .builder
            .build(records, options.accessors, options.order);

        let mut ids = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let id = NodeId(self.nodes.len());
            let path = parent_path.child(index);
            let value = item
                .record
                .get(options.value_field)
                .and_then(value_to_text)
                .unwrap_or_else(|| item.label.clone());
            let target = item
                .record
                .get("target")
                .and_then(value_to_text)
                .filter(|t| !t.is_empty());

            self.nodes.push(MenuNode {
                id,
                focus: FocusHandle::new(path.clone(), options.focus_sink),
                path: path.clone(),
                parent,
                children: Vec::new(),
                label: item.label,
                icon: item.icon,
                link: item.link,
                hint: item.hint,
                disabled: item.disabled,
                is_active: item.is_active,
                value,
                target,
                record: item.record,
            });

            if let Some(child_records) = item.children {
                let children = self.materialize_level(&child_records, Some(id), &path, options);
                self.nodes[id.0].children = children;
            }
            ids.push(id);
        }
        ids
    }

    pub fn get(&self, id: NodeId) -> Option<&MenuNode> {
        self.nodes.get(id.0)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// All nodes in arena order (which is depth-first pre-order)
    pub fn nodes(&self) -> &[MenuNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn find_by_path(&self, path: &NodePath) -> Option<&MenuNode> {
        self.nodes.iter().find(|n| &n.path == path)
    }

    /// First node, in pre-order, with the given label
    pub fn find_by_label(&self, label: &str) -> Option<&MenuNode> {
        self.nodes.iter().find(|n| n.label == label)
    }

    /// Siblings of a node including itself, in display order
    pub fn siblings(&self, id: NodeId) -> &[NodeId] {
        match self.get(id).and_then(|n| n.parent) {
            Some(parent) => self
                .get(parent)
                .map(|p| p.children.as_slice())
                .unwrap_or(&[]),
            None => &self.roots,
        }
    }

    /// Whether `node` lies strictly below `ancestor`
    pub fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.get(node).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).and_then(|n| n.parent);
        }
        false
    }
}
