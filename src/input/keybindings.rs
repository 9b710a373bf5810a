//! Key vocabulary of the menu: the global shortcut accelerator and the
//! direction-remapping table that turns physical arrow keys into logical
//! navigation actions for a given open-position.

use crate::config::{Horizontal, MenuLayout, MenuPosition, TextDirection, Vertical};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Format a key combination as a user-friendly string (e.g., "Ctrl+M")
pub fn format_keybinding(keycode: &KeyCode, modifiers: &KeyModifiers) -> String {
    let mut result = String::new();

    if modifiers.contains(KeyModifiers::CONTROL) {
        result.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        result.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        result.push_str("Shift+");
    }
    if modifiers.contains(KeyModifiers::SUPER) {
        result.push_str("Super+");
    }

    match keycode {
        KeyCode::Enter => result.push_str("Enter"),
        KeyCode::Tab => result.push_str("Tab"),
        KeyCode::BackTab => result.push_str("Tab"),
        KeyCode::Esc => result.push_str("Esc"),
        KeyCode::Left => result.push_str("←"),
        KeyCode::Right => result.push_str("→"),
        KeyCode::Up => result.push_str("↑"),
        KeyCode::Down => result.push_str("↓"),
        KeyCode::Home => result.push_str("Home"),
        KeyCode::End => result.push_str("End"),
        KeyCode::Char(' ') => result.push_str("Space"),
        KeyCode::Char(c) => result.push_str(&c.to_uppercase().to_string()),
        KeyCode::F(n) => result.push_str(&format!("F{}", n)),
        _ => return String::new(),
    }

    result
}

/// Parse a key name ("down", "esc", "a", ...)
pub fn parse_key(key: &str) -> Option<KeyCode> {
    let lower = key.to_lowercase();
    match lower.as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "tab" => Some(KeyCode::Tab),
        "backtab" => Some(KeyCode::BackTab),
        "esc" | "escape" => Some(KeyCode::Esc),
        "space" => Some(KeyCode::Char(' ')),

        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),

        s if s.chars().count() == 1 => s.chars().next().map(KeyCode::Char),
        // Handle function keys like "f1", "f2", ..., "f12"
        s if s.starts_with('f') && s.len() >= 2 => s[1..].parse::<u8>().ok().map(KeyCode::F),
        _ => None,
    }
}

/// Parse a single modifier name
pub fn parse_modifier(modifier: &str) -> Option<KeyModifiers> {
    match modifier.to_lowercase().as_str() {
        "ctrl" | "control" => Some(KeyModifiers::CONTROL),
        "shift" => Some(KeyModifiers::SHIFT),
        "alt" | "option" => Some(KeyModifiers::ALT),
        "super" | "cmd" | "meta" => Some(KeyModifiers::SUPER),
        _ => None,
    }
}

/// Parse a full key combination such as "ctrl+shift+down"
pub fn parse_key_combo(combo: &str) -> Option<(KeyCode, KeyModifiers)> {
    let parts: Vec<&str> = combo.split('+').map(str::trim).collect();
    let (key, modifiers) = parts.split_last()?;
    let code = parse_key(key)?;
    let mut result = KeyModifiers::empty();
    for m in modifiers {
        result |= parse_modifier(m)?;
    }
    Some((code, result))
}

/// Error returned for an unusable shortcut accelerator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutError(pub String);

impl std::fmt::Display for ShortcutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid shortcut: {}", self.0)
    }
}

impl std::error::Error for ShortcutError {}

/// Global accelerator: one character plus at least one modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub key: char,
    pub modifiers: KeyModifiers,
}

impl Shortcut {
    /// Parse "ctrl+m", "Alt+F" or a bare character ("m", which means Alt+M)
    pub fn parse(combo: &str) -> Result<Self, ShortcutError> {
        let combo = combo.trim();
        let parts: Vec<&str> = combo.split('+').map(str::trim).collect();
        let Some((key, modifier_names)) = parts.split_last() else {
            return Err(ShortcutError(combo.to_string()));
        };

        let mut chars = key.chars();
        let key = match (chars.next(), chars.next()) {
            (Some(c), None) => c.to_ascii_lowercase(),
            _ => return Err(ShortcutError(format!("{combo:?} must end in one character"))),
        };

        let mut modifiers = KeyModifiers::empty();
        for name in modifier_names {
            match parse_modifier(name) {
                Some(m) => modifiers |= m,
                None => return Err(ShortcutError(format!("unknown modifier {name:?}"))),
            }
        }
        if modifiers.is_empty() {
            modifiers = KeyModifiers::ALT;
        }

        Ok(Self { key, modifiers })
    }

    /// Whether a key event fires this accelerator. Shift is ignored unless the
    /// accelerator requires it, since it only changes the character's case.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let KeyCode::Char(c) = event.code else {
            return false;
        };
        if c.to_ascii_lowercase() != self.key {
            return false;
        }
        let mut pressed = event.modifiers;
        if !self.modifiers.contains(KeyModifiers::SHIFT) {
            pressed.remove(KeyModifiers::SHIFT);
        }
        pressed == self.modifiers
    }
}

impl std::fmt::Display for Shortcut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_keybinding(&KeyCode::Char(self.key), &self.modifiers))
    }
}

/// Logical navigation action produced from a physical key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Forward,
    Backward,
    Expand,
    Collapse,
    NextSibling,
    PrevSibling,
    First,
    Last,
    Activate,
    Close,
    Tab,
}

/// Physical keys bound to the four directional actions for one open-position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMap {
    pub forward: KeyCode,
    pub backward: KeyCode,
    pub expand: KeyCode,
    pub collapse: KeyCode,
    pub layout: MenuLayout,
}

impl KeyMap {
    /// Build the table for an open-position. Focus order follows visual order:
    /// a menu opening upward moves forward with ArrowUp, a menu whose submenus
    /// open leftward expands with ArrowLeft. RTL mirrors the horizontal axis.
    pub fn new(position: MenuPosition, layout: MenuLayout, direction: TextDirection) -> Self {
        let (forward, backward) = match position.vertical() {
            Vertical::Down => (KeyCode::Down, KeyCode::Up),
            Vertical::Up => (KeyCode::Up, KeyCode::Down),
        };
        let (mut expand, mut collapse) = match position.horizontal() {
            Horizontal::Right => (KeyCode::Right, KeyCode::Left),
            Horizontal::Left => (KeyCode::Left, KeyCode::Right),
        };
        if direction == TextDirection::Rtl {
            std::mem::swap(&mut expand, &mut collapse);
        }

        Self {
            forward,
            backward,
            expand,
            collapse,
            layout,
        }
    }

    /// Resolve a key pressed inside the open dropdown
    pub fn resolve(&self, event: &KeyEvent) -> Option<NavAction> {
        // Shift+Tab arrives as BackTab carrying the SHIFT modifier
        match event.code {
            KeyCode::Tab | KeyCode::BackTab => return Some(NavAction::Tab),
            _ => {}
        }
        if !event.modifiers.is_empty() {
            return None;
        }

        let code = event.code;
        let horizontal = self.layout == MenuLayout::Horizontal;
        let action = match code {
            KeyCode::Esc => NavAction::Close,
            KeyCode::Enter | KeyCode::Char(' ') => NavAction::Activate,
            KeyCode::Home => NavAction::First,
            KeyCode::End => NavAction::Last,
            c if c == self.forward => NavAction::Forward,
            c if c == self.backward => NavAction::Backward,
            c if c == self.expand && horizontal => NavAction::NextSibling,
            c if c == self.collapse && horizontal => NavAction::PrevSibling,
            c if c == self.expand => NavAction::Expand,
            c if c == self.collapse => NavAction::Collapse,
            _ => return None,
        };
        tracing::trace!("key {:?} resolved to {:?}", code, action);
        Some(action)
    }

    /// Whether a key pressed on the closed trigger opens the menu
    pub fn opens_from_trigger(event: &KeyEvent) -> bool {
        event.modifiers.is_empty()
            && matches!(event.code, KeyCode::Down | KeyCode::Up | KeyCode::Enter)
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new(
            MenuPosition::default(),
            MenuLayout::default(),
            TextDirection::default(),
        )
    }
}
