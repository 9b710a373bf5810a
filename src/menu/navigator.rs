//! Keyboard navigator: turns a logical [`NavAction`] and the current focused
//! index into a focus change over the flattened list.
//!
//! The navigator is read-only over the tree and the flattened list; the menu
//! applies the returned [`NavOutcome`].

use super::open_state::CloseReason;
use crate::input::keybindings::NavAction;
use crate::model::flatten::FlattenedList;
use crate::model::node::{MenuTree, NodeId};

/// What a navigation step asks the menu to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Focus an entry of the flattened list
    Focus(usize),
    /// Expand `node`, then focus its first enabled child if any
    Expand { node: NodeId, focus: Option<usize> },
    /// Collapse `parent` and focus it
    Collapse { parent: NodeId, focus: usize },
    Activate(NodeId),
    /// Close and return UI focus to the trigger
    Close(CloseReason),
    /// Close and let the host continue its tab order
    Release,
    Stay,
}

pub struct Navigator<'a> {
    tree: &'a MenuTree,
    flat: &'a FlattenedList,
}

impl<'a> Navigator<'a> {
    pub fn new(tree: &'a MenuTree, flat: &'a FlattenedList) -> Self {
        Self { tree, flat }
    }

    fn enabled(&self, id: NodeId) -> bool {
        self.tree.get(id).is_some_and(|n| !n.disabled)
    }

    fn enabled_at(&self, index: usize) -> bool {
        self.flat.id_at(index).is_some_and(|id| self.enabled(id))
    }

    pub fn step(&self, action: NavAction, focused: Option<usize>) -> NavOutcome {
        let outcome = match action {
            NavAction::Forward => self.forward(focused).map_or(NavOutcome::Stay, NavOutcome::Focus),
            NavAction::Backward => self.backward(focused),
            NavAction::First => self.first().map_or(NavOutcome::Stay, NavOutcome::Focus),
            NavAction::Last => self.last().map_or(NavOutcome::Stay, NavOutcome::Focus),
            NavAction::NextSibling => self
                .sibling(focused, true)
                .map_or(NavOutcome::Stay, NavOutcome::Focus),
            NavAction::PrevSibling => self
                .sibling(focused, false)
                .map_or(NavOutcome::Stay, NavOutcome::Focus),
            NavAction::Expand => self.expand(focused),
            NavAction::Collapse => self.collapse(focused),
            NavAction::Activate => match focused.and_then(|i| self.flat.id_at(i)) {
                Some(id) => NavOutcome::Activate(id),
                None => NavOutcome::Close(CloseReason::Escape),
            },
            NavAction::Close => NavOutcome::Close(CloseReason::Escape),
            NavAction::Tab => NavOutcome::Release,
        };
        tracing::trace!("{:?} from {:?}: {:?}", action, focused, outcome);
        outcome
    }

    /// Next enabled entry after `focused`, wrapping. Starts at the first
    /// entry when nothing is focused.
    pub fn forward(&self, focused: Option<usize>) -> Option<usize> {
        let len = self.flat.len();
        if len == 0 {
            return None;
        }
        let start = focused.map_or(0, |i| (i + 1) % len);
        (0..len)
            .map(|k| (start + k) % len)
            .find(|&i| self.enabled_at(i))
            .filter(|&i| Some(i) != focused)
    }

    /// Previous enabled entry. Moving back past the first entry closes the
    /// menu; with nothing focused the last entry is focused.
    pub fn backward(&self, focused: Option<usize>) -> NavOutcome {
        match focused {
            None => self.last().map_or(NavOutcome::Stay, NavOutcome::Focus),
            Some(i) => (0..i.min(self.flat.len()))
                .rev()
                .find(|&j| self.enabled_at(j))
                .map_or(NavOutcome::Close(CloseReason::BackPastStart), NavOutcome::Focus),
        }
    }

    pub fn first(&self) -> Option<usize> {
        (0..self.flat.len()).find(|&i| self.enabled_at(i))
    }

    pub fn last(&self) -> Option<usize> {
        (0..self.flat.len()).rev().find(|&i| self.enabled_at(i))
    }

    /// Next or previous enabled sibling at the focused node's depth, wrapping
    pub fn sibling(&self, focused: Option<usize>, forward: bool) -> Option<usize> {
        let current = focused.and_then(|i| self.flat.id_at(i));
        let siblings = match current {
            Some(id) => self.tree.siblings(id),
            None => self.tree.roots(),
        };
        let len = siblings.len();
        if len == 0 {
            return None;
        }

        let start = match (current.and_then(|id| siblings.iter().position(|&s| s == id)), forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(c), true) => (c + 1) % len,
            (Some(c), false) => (c + len - 1) % len,
        };
        (0..len)
            .map(|k| if forward { (start + k) % len } else { (start + len - k) % len })
            .map(|k| siblings[k])
            .filter(|&id| Some(id) != current)
            .find(|&id| self.enabled(id))
            .and_then(|id| self.flat.position(id))
    }

    fn expand(&self, focused: Option<usize>) -> NavOutcome {
        let Some(node) = focused
            .and_then(|i| self.flat.id_at(i))
            .and_then(|id| self.tree.get(id))
        else {
            return NavOutcome::Stay;
        };
        if !node.has_children() {
            return NavOutcome::Stay;
        }
        let focus = node
            .children
            .iter()
            .copied()
            .find(|&child| self.enabled(child))
            .and_then(|child| self.flat.position(child));
        NavOutcome::Expand {
            node: node.id,
            focus,
        }
    }

    fn collapse(&self, focused: Option<usize>) -> NavOutcome {
        let Some(parent) = focused.and_then(|i| self.flat.parent_of(i)) else {
            return NavOutcome::Stay;
        };
        match self.flat.position(parent) {
            Some(focus) => NavOutcome::Collapse { parent, focus },
            None => NavOutcome::Stay,
        }
    }
}
