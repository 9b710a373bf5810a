//! The menu instance: owner of the materialized tree, the flattened list and
//! every piece of interaction state, and the entry point for host events.
//!
//! All event methods run to completion. Side effects that must follow the
//! state transition (UI focus moves, navigation) are collected as
//! [`DeferredAction`]s and drained before the method returns.

pub mod focus;
pub mod hover;
pub mod input;
pub mod listeners;
pub mod location;
pub mod navigator;
pub mod open_state;
pub mod registry;
pub mod selection;
pub mod sync;
pub mod timer;

use crate::config::{ConfigError, MenuConfig};
use crate::input::handler::{DeferredAction, InputContext, InputHandler, InputResult};
use crate::input::keybindings::{KeyMap, Shortcut};
use crate::model::accessor::ItemAccessors;
use crate::model::builder::{DatasetTreeBuilder, TreeBuilder};
use crate::model::flatten::{flatten, FlattenedList};
use crate::model::node::{MaterializeOptions, MenuNode, MenuTree, NodeId, NodePath};
use crate::model::ordering::{OrderBy, OrderByError};
use crossterm::event::KeyEvent;
use focus::{FocusSink, FocusState, FocusTarget};
use hover::HoverTracker;
use input::{KeyOrigin, MenuInputHandler};
use listeners::{ListenerGuard, ListenerKind, ListenerRegistry};
use location::{link_matches, LocationProvider, StaticLocation};
use open_state::{closes_on_leaf, closes_on_outside_click, CloseReason, OpenReason, OpenState};
use registry::WidgetRegistry;
use selection::{
    ActionContext, ActionRunner, HostWidget, NoActions, SelectCallback, SelectEvent, SelectSource,
    SelectedItem,
};
use serde_json::Value;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;
use sync::{find_active, resolve, ActiveKey, ActiveNodeSync};

/// Name used for the widget-registry entry of an unnamed menu
pub const DEFAULT_MENU_NAME: &str = "menu";

/// What a pointer event was over, or where the pointer went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Trigger,
    /// The dropdown region outside any node
    Dropdown,
    Node(NodeId),
    Outside,
}

impl PointerTarget {
    /// Whether the target lies inside the menu container
    pub fn is_inside(self) -> bool {
        self != PointerTarget::Outside
    }
}

/// Collaborators supplied by the embedding application
pub struct MenuHost {
    pub location: Rc<dyn LocationProvider>,
    pub actions: Box<dyn ActionRunner>,
    pub focus_sink: Option<Rc<dyn FocusSink>>,
    pub listeners: ListenerRegistry,
    pub widgets: WidgetRegistry,
    pub on_select: Option<SelectCallback>,
}

impl Default for MenuHost {
    fn default() -> Self {
        Self {
            location: Rc::new(StaticLocation::default()),
            actions: Box::new(NoActions),
            focus_sink: None,
            listeners: ListenerRegistry::new(),
            widgets: WidgetRegistry::new(),
            on_select: None,
        }
    }
}

impl MenuHost {
    pub fn with_location(mut self, location: Rc<dyn LocationProvider>) -> Self {
        self.location = location;
        self
    }

    pub fn with_actions(mut self, actions: impl ActionRunner + 'static) -> Self {
        self.actions = Box::new(actions);
        self
    }

    pub fn with_focus_sink(mut self, sink: Rc<dyn FocusSink>) -> Self {
        self.focus_sink = Some(sink);
        self
    }

    pub fn with_listeners(mut self, listeners: ListenerRegistry) -> Self {
        self.listeners = listeners;
        self
    }

    pub fn with_widgets(mut self, widgets: WidgetRegistry) -> Self {
        self.widgets = widgets;
        self
    }

    pub fn on_select<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&SelectEvent, &HostWidget, &SelectedItem) + 'static,
    {
        self.on_select = Some(Box::new(callback));
        self
    }
}

pub struct MenuBuilder {
    config: MenuConfig,
    dataset: Vec<Value>,
    accessors: Option<ItemAccessors>,
    tree_builder: Box<dyn TreeBuilder>,
    host: MenuHost,
}

impl MenuBuilder {
    pub fn dataset(mut self, dataset: Vec<Value>) -> Self {
        self.dataset = dataset;
        self
    }

    /// Override the accessors derived from the config's field names
    pub fn accessors(mut self, accessors: ItemAccessors) -> Self {
        self.accessors = Some(accessors);
        self
    }

    pub fn tree_builder(mut self, builder: impl TreeBuilder + 'static) -> Self {
        self.tree_builder = Box::new(builder);
        self
    }

    pub fn host(mut self, host: MenuHost) -> Self {
        self.host = host;
        self
    }

    /// Mount the menu: validate the config, build the tree, register the
    /// widget entry and the shortcut listener, and apply the auto-open policy.
    pub fn build(self) -> Result<Menu, ConfigError> {
        self.config.validate()?;
        let shortcut = self.config.shortcut()?;
        let order = self.config.ordering()?;

        let name = self
            .config
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_MENU_NAME.to_string());
        let accessors = self
            .accessors
            .unwrap_or_else(|| ItemAccessors::from_config(&self.config));
        let key_map = KeyMap::new(
            self.config.menu_position,
            self.config.menu_layout,
            self.config.direction,
        );

        let mut menu = Menu {
            hover: HoverTracker::new(self.config.hover),
            config: self.config,
            name,
            accessors,
            tree_builder: self.tree_builder,
            dataset: self.dataset,
            order,
            tree: MenuTree::default(),
            flat: FlattenedList::default(),
            expanded: HashSet::new(),
            open: OpenState::default(),
            focus: FocusState::default(),
            key_map,
            shortcut,
            host: self.host,
            sync: ActiveNodeSync::new(),
            outside_guard: None,
            shortcut_guard: None,
        };
        menu.rebuild();

        menu.host.widgets.register(&menu.name);
        if menu.shortcut.is_some() {
            let guard = menu
                .host
                .listeners
                .acquire(ListenerKind::ShortcutKey, menu.name.clone());
            menu.shortcut_guard = Some(guard);
        }

        let location = menu.host.location.current_path();
        let tree = &menu.tree;
        menu.open = OpenState::initial(menu.config.auto_open, || {
            tree.nodes()
                .iter()
                .filter_map(|n| n.link.as_deref())
                .any(|link| link_matches(link, &location))
        });
        if menu.open.is_open() {
            menu.acquire_outside_listener();
        }

        tracing::debug!(
            "mounted menu {:?}: {} nodes, open={}",
            menu.name,
            menu.tree.len(),
            menu.open.is_open()
        );
        Ok(menu)
    }
}

/// One mounted menu
pub struct Menu {
    config: MenuConfig,
    name: String,
    accessors: ItemAccessors,
    tree_builder: Box<dyn TreeBuilder>,
    dataset: Vec<Value>,
    order: Option<OrderBy>,
    tree: MenuTree,
    flat: FlattenedList,
    expanded: HashSet<NodePath>,
    open: OpenState,
    focus: FocusState,
    hover: HoverTracker,
    key_map: KeyMap,
    shortcut: Option<Shortcut>,
    host: MenuHost,
    sync: ActiveNodeSync,
    outside_guard: Option<ListenerGuard>,
    shortcut_guard: Option<ListenerGuard>,
}

impl Menu {
    pub fn builder(config: MenuConfig) -> MenuBuilder {
        MenuBuilder {
            config,
            dataset: Vec::new(),
            accessors: None,
            tree_builder: Box::new(DatasetTreeBuilder),
            host: MenuHost::default(),
        }
    }

    // Dataset and accessors

    /// Re-run the tree builder, materializer and flattener. Focus is reset
    /// and hover timers are cancelled; expansion survives only with
    /// `preserve_expansion`.
    fn rebuild(&mut self) {
        for node in self.tree.nodes() {
            node.focus.detach();
        }

        let options = MaterializeOptions {
            builder: self.tree_builder.as_ref(),
            accessors: &self.accessors,
            order: self.order.as_ref(),
            value_field: &self.config.data_value,
            focus_sink: self.host.focus_sink.as_ref(),
        };
        self.tree = MenuTree::materialize(&self.dataset, &options);
        self.flat = flatten(&self.tree);

        if self.config.preserve_expansion {
            let tree = &self.tree;
            self.expanded
                .retain(|path| tree.find_by_path(path).is_some_and(|n| n.has_children()));
        } else {
            self.expanded.clear();
        }
        self.focus.reset();
        self.hover.clear();
    }

    pub fn set_dataset(&mut self, dataset: Vec<Value>) {
        self.dataset = dataset;
        self.rebuild();
    }

    pub fn set_accessors(&mut self, accessors: ItemAccessors) {
        self.accessors = accessors;
        self.rebuild();
    }

    pub fn set_order_by(&mut self, directive: Option<&str>) -> Result<(), OrderByError> {
        self.order = directive.map(OrderBy::parse).transpose()?;
        self.config.order_by = directive.map(str::to_string);
        self.rebuild();
        Ok(())
    }

    // Open/close

    fn acquire_outside_listener(&mut self) {
        if closes_on_outside_click(self.config.auto_close) && self.outside_guard.is_none() {
            let guard = self
                .host
                .listeners
                .acquire(ListenerKind::OutsideClick, self.name.clone());
            self.outside_guard = Some(guard);
        }
    }

    fn open_menu(&mut self, reason: OpenReason) -> bool {
        if !self.open.open(reason) {
            return false;
        }
        self.focus.reset();
        self.acquire_outside_listener();
        true
    }

    /// Every close cancels hover timers and clears focus
    fn close_menu(&mut self, reason: CloseReason) -> bool {
        if !self.open.close(reason) {
            return false;
        }
        self.hover.clear();
        self.focus.reset();
        self.outside_guard = None;
        true
    }

    fn set_expanded(&mut self, id: NodeId, expanded: bool) {
        let Some(path) = self.tree.get(id).map(|n| n.path.clone()) else {
            return;
        };
        if expanded {
            self.expanded.insert(path);
        } else {
            self.expanded.remove(&path);
        }
    }

    /// Manual toggle from the trigger control
    pub fn trigger_click(&mut self) {
        if self.open.is_open() {
            self.close_menu(CloseReason::Toggle);
        } else {
            self.open_menu(OpenReason::Toggle);
        }
    }

    pub fn pointer_enter_container(&mut self) {
        if self.config.show_on_hover {
            self.open_menu(OpenReason::Hover);
        }
    }

    /// Pointer left the container; `related` is where it went
    pub fn pointer_leave_container(&mut self, related: PointerTarget) {
        if self.config.show_on_hover && !related.is_inside() {
            self.close_menu(CloseReason::HoverLeave);
        }
    }

    /// Pointer-down anywhere. Only an outside press while the outside-click
    /// listener is registered closes the menu.
    pub fn pointer_down(&mut self, target: PointerTarget) {
        if target.is_inside() || self.outside_guard.is_none() {
            return;
        }
        let mut ctx = InputContext::new();
        if self.close_menu(CloseReason::OutsideClick) {
            ctx.defer(DeferredAction::FocusTrigger);
        }
        self.run_deferred(&mut ctx);
    }

    // Hover

    pub fn pointer_enter_node(&mut self, id: NodeId) -> bool {
        if self.tree.get(id).is_none() {
            return false;
        }
        self.hover.on_enter(id)
    }

    /// Pointer left a node. Moving into one of its own descendants keeps it
    /// hovered.
    pub fn pointer_leave_node(&mut self, id: NodeId, related: PointerTarget) -> bool {
        if let PointerTarget::Node(next) = related {
            if self.tree.is_descendant(next, id) {
                return false;
            }
        }
        self.hover.on_leave(id)
    }

    /// Advance the hover clock. Returns true if the hover set changed.
    pub fn advance_time(&mut self, elapsed: Duration) -> bool {
        self.hover.advance(elapsed)
    }

    // Keyboard

    fn handle_key(&mut self, event: &KeyEvent, origin: KeyOrigin) -> InputResult {
        let mut ctx = InputContext::new();
        let result = MenuInputHandler::new(self, origin).dispatch_input(event, &mut ctx);
        self.run_deferred(&mut ctx);
        result
    }

    /// Key pressed while the trigger control has focus
    pub fn trigger_key_down(&mut self, event: &KeyEvent) -> InputResult {
        self.handle_key(event, KeyOrigin::Trigger)
    }

    /// Key pressed inside the dropdown
    pub fn dropdown_key_down(&mut self, event: &KeyEvent) -> InputResult {
        self.handle_key(event, KeyOrigin::Dropdown)
    }

    /// Key pressed anywhere; toggles the menu on the shortcut accelerator
    pub fn global_key_down(&mut self, event: &KeyEvent) -> InputResult {
        if self.shortcut_guard.is_none() || !self.shortcut.is_some_and(|s| s.matches(event)) {
            return InputResult::Ignored;
        }
        let mut ctx = InputContext::new();
        if self.open.is_open() {
            self.close_menu(CloseReason::Shortcut);
        } else if self.open_menu(OpenReason::Shortcut) {
            ctx.defer(DeferredAction::FocusTrigger);
        }
        self.run_deferred(&mut ctx);
        InputResult::Consumed
    }

    // Selection

    pub fn node_click(&mut self, id: NodeId) {
        self.activate(id, SelectSource::Pointer);
    }

    pub fn activate(&mut self, id: NodeId, source: SelectSource) {
        let mut ctx = InputContext::new();
        self.dispatch_selection(id, source, &mut ctx);
        self.run_deferred(&mut ctx);
    }

    fn dispatch_selection(&mut self, id: NodeId, source: SelectSource, ctx: &mut InputContext) {
        let Some(node) = self.tree.get(id) else {
            tracing::debug!("activate: no node {:?}", id);
            return;
        };
        if node.disabled {
            tracing::debug!("activate: {} is disabled", node.path);
            return;
        }
        if node.has_children() {
            if !self.config.show_on_hover {
                let expanded = !self.expanded.contains(&node.path);
                self.set_expanded(id, expanded);
            }
            return;
        }

        let path = node.path.clone();
        let record = node.record.clone();
        let item = SelectedItem::from_node(node);
        let navigate = node.navigation_link().map(|link| DeferredAction::Navigate {
            link: link.to_string(),
            target: node.target.clone(),
        });
        tracing::debug!("activate {} {:?} ({:?})", path, item.label, source);

        self.focus.active_node = Some(id);
        self.focus.focused_index = self.flat.position(id);

        let action_ctx = ActionContext {
            menu: &self.name,
            path: &path,
            source,
        };
        self.host.actions.run(&record, &action_ctx);

        self.host
            .widgets
            .set_display_value(&self.name, item.label.clone());

        if let Some(on_select) = self.host.on_select.as_mut() {
            let event = SelectEvent { source, path };
            let widget = HostWidget {
                name: self.name.clone(),
            };
            on_select(&event, &widget, &item);
        }

        if let Some(navigate) = navigate {
            ctx.defer(navigate);
        }
        if closes_on_leaf(self.config.auto_close) {
            self.close_menu(CloseReason::LeafActivation);
        }
    }

    fn run_deferred(&mut self, ctx: &mut InputContext) {
        for action in ctx.take_deferred() {
            match action {
                DeferredAction::FocusTrigger => {
                    tracing::trace!("focus trigger");
                    if let Some(sink) = &self.host.focus_sink {
                        sink.focus(FocusTarget::Trigger);
                    }
                }
                DeferredAction::FocusNode(id) => {
                    if let Some(node) = self.tree.get(id) {
                        tracing::trace!("focus node {}", node.path);
                        node.focus.focus();
                    }
                }
                DeferredAction::Navigate { link, target } => {
                    tracing::debug!("navigate to {:?} (target {:?})", link, target);
                    self.host.location.navigate(&link, target.as_deref());
                }
            }
        }
    }

    // External node-list sync

    /// Consume an emission of the external node list. Returns true when a
    /// new activation was reported to `on_select`.
    pub fn nodes_changed(&mut self, records: &[Value]) -> bool {
        let options = MaterializeOptions {
            builder: self.tree_builder.as_ref(),
            accessors: &self.accessors,
            order: self.order.as_ref(),
            value_field: &self.config.data_value,
            focus_sink: None,
        };
        let emitted = MenuTree::materialize(records, &options);
        let active = find_active(&emitted);
        let key = active.map(ActiveKey::of);
        if !self.sync.observe(key.as_ref()) {
            return false;
        }
        let (Some(node), Some(key)) = (active, key) else {
            return false;
        };

        // Report the menu's own node when it shows the same entry
        let path = resolve(&self.tree, &key).unwrap_or(node).path.clone();
        tracing::debug!("external activation of {} {:?}", path, key.label);
        if let Some(on_select) = self.host.on_select.as_mut() {
            let event = SelectEvent {
                source: SelectSource::Sync,
                path,
            };
            let widget = HostWidget {
                name: self.name.clone(),
            };
            on_select(&event, &widget, &SelectedItem::from_node(node));
        }
        true
    }

    // Queries

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.open.is_open()
    }

    pub fn focus_state(&self) -> FocusState {
        self.focus
    }

    pub fn focused_node(&self) -> Option<&MenuNode> {
        self.focus
            .focused_index
            .and_then(|i| self.flat.id_at(i))
            .and_then(|id| self.tree.get(id))
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    pub fn flattened(&self) -> &FlattenedList {
        &self.flat
    }

    pub fn key_map(&self) -> &KeyMap {
        &self.key_map
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.tree
            .get(id)
            .is_some_and(|n| self.expanded.contains(&n.path))
    }

    pub fn is_hovered(&self, id: NodeId) -> bool {
        self.hover.is_hovered(id)
    }

    /// Hover alone decides in show-on-hover mode; otherwise expansion or
    /// hover shows the submenu.
    pub fn is_submenu_visible(&self, id: NodeId) -> bool {
        if self.config.show_on_hover {
            self.is_hovered(id)
        } else {
            self.is_expanded(id) || self.is_hovered(id)
        }
    }

    /// Whether the node's link matches the current location
    pub fn is_active_link(&self, id: NodeId) -> bool {
        let Some(link) = self.tree.get(id).and_then(|n| n.link.as_deref()) else {
            return false;
        };
        link_matches(link, &self.host.location.current_path())
    }

    pub fn display_value(&self) -> Option<String> {
        self.host.widgets.display_value(&self.name)
    }
}

impl Drop for Menu {
    fn drop(&mut self) {
        self.hover.clear();
        for node in self.tree.nodes() {
            node.focus.detach();
        }
        self.outside_guard = None;
        self.shortcut_guard = None;
        self.host.widgets.unregister(&self.name);
        tracing::debug!("unmounted menu {:?}", self.name);
    }
}
