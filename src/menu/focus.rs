//! Keyboard focus: which entry is focused, which node is active, and how UI
//! input focus is moved to a node or back to the trigger.

use crate::model::node::{NodeId, NodePath};
use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Focused index and highlighted node of one menu
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusState {
    /// Index into the flattened list, `None` when nothing is focused
    pub focused_index: Option<usize>,
    /// Last activated node, used for active highlighting
    pub active_node: Option<NodeId>,
}

impl FocusState {
    pub fn reset(&mut self) {
        *self = FocusState::default();
    }

    pub fn is_reset(&self) -> bool {
        self.focused_index.is_none() && self.active_node.is_none()
    }
}

/// Where UI focus should go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget<'a> {
    Trigger,
    Node(&'a NodePath),
}

/// Host-side receiver of focus moves (the widget layer that owns real UI focus)
pub trait FocusSink {
    /// Move input focus. Returns false when the target has no live element.
    fn focus(&self, target: FocusTarget<'_>) -> bool;
}

/// Per-node handle used to move UI focus to that node. Created once per
/// materialized node and never shared.
pub struct FocusHandle {
    path: NodePath,
    sink: Option<Weak<dyn FocusSink>>,
    detached: Cell<bool>,
}

impl FocusHandle {
    pub(crate) fn new(path: NodePath, sink: Option<&Rc<dyn FocusSink>>) -> Self {
        Self {
            path,
            sink: sink.map(Rc::downgrade),
            detached: Cell::new(false),
        }
    }

    /// Move UI focus to the node. Returns false, without error, when the
    /// handle has no live target.
    pub fn focus(&self) -> bool {
        if self.detached.get() {
            return false;
        }
        let Some(sink) = self.sink.as_ref().and_then(Weak::upgrade) else {
            return false;
        };
        let focused = sink.focus(FocusTarget::Node(&self.path));
        if !focused {
            tracing::trace!("focus target {} has no live element", self.path);
        }
        focused
    }

    /// Mark the node's element as gone; later focus calls are skipped
    pub fn detach(&self) {
        self.detached.set(true);
    }

    pub fn is_live(&self) -> bool {
        !self.detached.get() && self.sink.as_ref().is_some_and(|s| s.strong_count() > 0)
    }
}

impl fmt::Debug for FocusHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusHandle")
            .field("path", &self.path)
            .field("live", &self.is_live())
            .finish()
    }
}
