//! Open/Close controller: the `Closed`/`Open` state of one menu and the
//! policies that decide which interactions may change it.

use crate::config::{AutoClose, AutoOpen};

/// Why a menu opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenReason {
    AutoOpen,
    Toggle,
    Hover,
    TriggerKey,
    Shortcut,
}

/// Why a menu closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Toggle,
    HoverLeave,
    Escape,
    Tab,
    /// Move-backward from the first entry
    BackPastStart,
    OutsideClick,
    LeafActivation,
    Shortcut,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenState {
    open: bool,
}

impl OpenState {
    /// State at mount. `active_page` reports whether some node's link matches
    /// the current location; it is only consulted for `AutoOpen::ActivePage`.
    pub fn initial(auto_open: AutoOpen, active_page: impl FnOnce() -> bool) -> Self {
        let open = match auto_open {
            AutoOpen::Never => false,
            AutoOpen::Always => true,
            AutoOpen::ActivePage => active_page(),
        };
        if open {
            tracing::debug!("menu opens at mount ({:?})", auto_open);
        }
        Self { open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns true if the state changed
    pub fn open(&mut self, reason: OpenReason) -> bool {
        if self.open {
            return false;
        }
        tracing::debug!("menu open: {:?}", reason);
        self.open = true;
        true
    }

    /// Returns true if the state changed
    pub fn close(&mut self, reason: CloseReason) -> bool {
        if !self.open {
            return false;
        }
        tracing::debug!("menu close: {:?}", reason);
        self.open = false;
        true
    }
}

/// Whether a pointer-down outside the menu closes it
pub fn closes_on_outside_click(policy: AutoClose) -> bool {
    policy != AutoClose::Never
}

/// Whether activating a leaf closes the menu
pub fn closes_on_leaf(policy: AutoClose) -> bool {
    policy == AutoClose::Always
}
