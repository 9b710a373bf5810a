//! Input handling for the menu.
//!
//! Key events flow through an [`InputHandler`], which mutates menu state
//! synchronously and records side effects that must happen *after* the
//! handler has finished as [`DeferredAction`]s:
//!
//! 1. **Run to completion**: a handler finishes its state transition before
//!    any deferred action runs, so collaborators never observe half-updated
//!    state.
//!
//! 2. **Explicit consumption**: handlers return `InputResult::Consumed` to stop
//!    propagation or `InputResult::Ignored` to let the host process the key
//!    (e.g., Tab keeps moving through the page's tab order).
//!
//! 3. **Ordered side effects**: deferred actions are drained in the order they
//!    were pushed. Navigation to an activated link is pushed after the
//!    selection callback ran, so a caller-driven navigation always wins.
//!
//! ## Example
//!
//! ```ignore
//! impl InputHandler for MyList {
//!     fn handle_key_event(&mut self, event: &KeyEvent, ctx: &mut InputContext) -> InputResult {
//!         match event.code {
//!             KeyCode::Down => { self.move_down(); InputResult::Consumed }
//!             KeyCode::Esc => { ctx.defer(DeferredAction::FocusTrigger); InputResult::Consumed }
//!             _ => InputResult::Ignored
//!         }
//!     }
//! }
//! ```

use crate::model::node::NodeId;
use crossterm::event::KeyEvent;

/// Result of handling an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// The input was handled - stop propagation.
    Consumed,
    /// The input was not handled - let the host process it.
    Ignored,
}

/// Context passed to input handlers, collecting side effects.
#[derive(Debug, Default)]
pub struct InputContext {
    /// Actions to execute after input handling (for deferred operations).
    pub deferred_actions: Vec<DeferredAction>,
}

impl InputContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn defer(&mut self, action: DeferredAction) {
        self.deferred_actions.push(action);
    }

    /// Take the queued actions, leaving the context empty.
    pub fn take_deferred(&mut self) -> Vec<DeferredAction> {
        std::mem::take(&mut self.deferred_actions)
    }
}

/// Actions that need to be executed after input handling completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredAction {
    /// Move UI focus back to the trigger control
    FocusTrigger,
    /// Move UI focus to a node through its focus handle
    FocusNode(NodeId),
    /// Navigate to a dataset-provided link
    Navigate {
        link: String,
        target: Option<String>,
    },
}

/// Trait for elements that can handle key events.
pub trait InputHandler {
    /// Handle a key event. Returns whether the event was consumed.
    fn handle_key_event(&mut self, event: &KeyEvent, ctx: &mut InputContext) -> InputResult;

    /// Dispatch input through this handler.
    fn dispatch_input(&mut self, event: &KeyEvent, ctx: &mut InputContext) -> InputResult {
        let result = self.handle_key_event(event, ctx);
        tracing::trace!("{:?} {:?} -> {:?}", event.code, event.modifiers, result);
        result
    }
}
