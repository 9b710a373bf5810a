//! Input handling for the menu.
//!
//! Provides the InputHandler implementation for keys pressed on the trigger
//! or inside the open dropdown. The shortcut accelerator is handled by
//! [`Menu::global_key_down`] and never reaches this handler.

use super::navigator::{NavOutcome, Navigator};
use super::open_state::{CloseReason, OpenReason};
use super::selection::SelectSource;
use super::Menu;
use crate::input::handler::{DeferredAction, InputContext, InputHandler, InputResult};
use crate::input::keybindings::KeyMap;
use crossterm::event::KeyEvent;

/// Where a key event was received
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrigin {
    Trigger,
    Dropdown,
}

/// Wrapper that provides InputHandler for a mounted menu
pub struct MenuInputHandler<'a> {
    pub menu: &'a mut Menu,
    pub origin: KeyOrigin,
}

impl<'a> MenuInputHandler<'a> {
    pub fn new(menu: &'a mut Menu, origin: KeyOrigin) -> Self {
        Self { menu, origin }
    }

    fn focus_index(&mut self, index: usize, ctx: &mut InputContext) {
        self.menu.focus.focused_index = Some(index);
        if let Some(id) = self.menu.flat.id_at(index) {
            ctx.defer(DeferredAction::FocusNode(id));
        }
    }

    fn apply(&mut self, outcome: NavOutcome, ctx: &mut InputContext) -> InputResult {
        match outcome {
            NavOutcome::Focus(index) => self.focus_index(index, ctx),
            NavOutcome::Expand { node, focus } => {
                self.menu.set_expanded(node, true);
                if let Some(index) = focus {
                    self.focus_index(index, ctx);
                }
            }
            NavOutcome::Collapse { parent, focus } => {
                self.menu.set_expanded(parent, false);
                self.focus_index(focus, ctx);
            }
            NavOutcome::Activate(id) => {
                self.menu.dispatch_selection(id, SelectSource::Keyboard, ctx);
            }
            NavOutcome::Close(reason) => {
                self.menu.close_menu(reason);
                ctx.defer(DeferredAction::FocusTrigger);
            }
            NavOutcome::Release => {
                self.menu.close_menu(CloseReason::Tab);
                return InputResult::Ignored;
            }
            NavOutcome::Stay => {}
        }
        InputResult::Consumed
    }
}

impl InputHandler for MenuInputHandler<'_> {
    fn handle_key_event(&mut self, event: &KeyEvent, ctx: &mut InputContext) -> InputResult {
        if !self.menu.is_open() {
            // A closed dropdown receives no keys; the trigger opens on arrows/Enter
            if self.origin == KeyOrigin::Trigger && KeyMap::opens_from_trigger(event) {
                self.menu.open_menu(OpenReason::TriggerKey);
                return InputResult::Consumed;
            }
            return InputResult::Ignored;
        }

        let Some(action) = self.menu.key_map.resolve(event) else {
            return InputResult::Ignored;
        };
        let focused = self.menu.focus.focused_index;
        let outcome = Navigator::new(&self.menu.tree, &self.menu.flat).step(action, focused);
        self.apply(outcome, ctx)
    }
}
