//! Selection dispatch types: what a listener learns about an activated node,
//! and the action-runner seam that performs a node's configured side effect.

use crate::model::node::{MenuNode, NodePath};
use serde::Serialize;
use serde_json::Value;

/// What caused a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectSource {
    Pointer,
    Keyboard,
    /// The external node-list signal reported an active node
    Sync,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectEvent {
    pub source: SelectSource,
    pub path: NodePath,
}

/// The widget hosting the menu, as seen by selection listeners
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostWidget {
    pub name: String,
}

/// Simplified projection of a selected node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectedItem {
    pub label: String,
    pub value: String,
    pub icon: Option<String>,
    pub link: Option<String>,
    pub target: Option<String>,
}

impl SelectedItem {
    pub fn from_node(node: &MenuNode) -> Self {
        Self {
            label: node.label.clone(),
            value: node.value.clone(),
            icon: node.icon.clone(),
            link: node.link.clone(),
            target: node.target.clone(),
        }
    }
}

/// Context handed to the action runner
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    pub menu: &'a str,
    pub path: &'a NodePath,
    pub source: SelectSource,
}

/// Performs a node's configured action. Failures inside the runner are the
/// embedding application's concern and are not intercepted.
pub trait ActionRunner {
    fn run(&mut self, record: &Value, ctx: &ActionContext<'_>);
}

impl<F> ActionRunner for F
where
    F: FnMut(&Value, &ActionContext<'_>),
{
    fn run(&mut self, record: &Value, ctx: &ActionContext<'_>) {
        self(record, ctx)
    }
}

/// Runner for menus without configured actions
#[derive(Debug, Clone, Copy, Default)]
pub struct NoActions;

impl ActionRunner for NoActions {
    fn run(&mut self, _record: &Value, _ctx: &ActionContext<'_>) {}
}

pub type SelectCallback = Box<dyn FnMut(&SelectEvent, &HostWidget, &SelectedItem)>;
