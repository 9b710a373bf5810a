//! Named-widget registry: lets the host read what a menu last selected.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetEntry {
    pub display_value: Option<String>,
}

/// Shared map from widget name to its entry
#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    widgets: Rc<RefCell<HashMap<String, WidgetEntry>>>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, name: &str) {
        self.widgets
            .borrow_mut()
            .entry(name.to_string())
            .or_default();
    }

    pub fn unregister(&self, name: &str) {
        self.widgets.borrow_mut().remove(name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.widgets.borrow().contains_key(name)
    }

    pub fn set_display_value(&self, name: &str, value: impl Into<String>) {
        self.widgets
            .borrow_mut()
            .entry(name.to_string())
            .or_default()
            .display_value = Some(value.into());
    }

    pub fn display_value(&self, name: &str) -> Option<String> {
        self.widgets
            .borrow()
            .get(name)
            .and_then(|w| w.display_value.clone())
    }
}
