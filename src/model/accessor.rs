//! Field accessors: how a display value is pulled out of a raw record.
//!
//! An accessor is either the name of a record field or a callback over the
//! whole record. Accessors are resolved once while the tree is built, so the
//! rest of the menu only ever sees plain data.

use crate::config::MenuConfig;
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// Error returned by an accessor callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorError(pub String);

impl AccessorError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl fmt::Display for AccessorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "accessor failed: {}", self.0)
    }
}

impl std::error::Error for AccessorError {}

pub type AccessorFn = Rc<dyn Fn(&Value) -> Result<Value, AccessorError>>;

/// A field name or a callback over a record
#[derive(Clone)]
pub enum Accessor {
    Field(String),
    Function(AccessorFn),
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Accessor::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl Accessor {
    pub fn field(name: impl Into<String>) -> Self {
        Accessor::Field(name.into())
    }

    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, AccessorError> + 'static,
    {
        Accessor::Function(Rc::new(f))
    }

    /// Evaluate against a record. A field missing from the record and a
    /// callback that returns `null` both yield `Value::Null`.
    pub fn get(&self, record: &Value) -> Result<Value, AccessorError> {
        match self {
            Accessor::Field(name) => Ok(record.get(name).cloned().unwrap_or(Value::Null)),
            Accessor::Function(f) => f(record),
        }
    }

    /// Evaluate, falling back to `fallback_field` of the record when the
    /// callback fails. Failures are logged and never propagated.
    pub fn get_or_fallback(&self, record: &Value, fallback_field: &str) -> Value {
        match self.get(record) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    "{} for record {}, falling back to field {:?}",
                    e,
                    record_summary(record),
                    fallback_field
                );
                record.get(fallback_field).cloned().unwrap_or(Value::Null)
            }
        }
    }
}

impl From<&str> for Accessor {
    fn from(name: &str) -> Self {
        Accessor::Field(name.to_string())
    }
}

impl From<String> for Accessor {
    fn from(name: String) -> Self {
        Accessor::Field(name)
    }
}

/// The four accessors used to turn a record into a node
#[derive(Debug, Clone)]
pub struct ItemAccessors {
    pub label: Accessor,
    pub icon: Accessor,
    pub link: Accessor,
    pub children: Accessor,
}

impl Default for ItemAccessors {
    fn default() -> Self {
        Self {
            label: Accessor::field("label"),
            icon: Accessor::field("icon"),
            link: Accessor::field("link"),
            children: Accessor::field("children"),
        }
    }
}

impl ItemAccessors {
    /// Field-name accessors taken from the configuration
    pub fn from_config(config: &MenuConfig) -> Self {
        Self {
            label: Accessor::field(config.item_label.clone()),
            icon: Accessor::field(config.item_icon.clone()),
            link: Accessor::field(config.item_link.clone()),
            children: Accessor::field(config.item_children.clone()),
        }
    }

    pub fn with_label(mut self, accessor: impl Into<Accessor>) -> Self {
        self.label = accessor.into();
        self
    }

    pub fn with_icon(mut self, accessor: impl Into<Accessor>) -> Self {
        self.icon = accessor.into();
        self
    }

    pub fn with_link(mut self, accessor: impl Into<Accessor>) -> Self {
        self.link = accessor.into();
        self
    }

    pub fn with_children(mut self, accessor: impl Into<Accessor>) -> Self {
        self.children = accessor.into();
        self
    }

    pub fn label_of(&self, record: &Value) -> String {
        value_to_text(&self.label.get_or_fallback(record, "label")).unwrap_or_default()
    }

    pub fn icon_of(&self, record: &Value) -> Option<String> {
        value_to_text(&self.icon.get_or_fallback(record, "icon")).filter(|s| !s.is_empty())
    }

    pub fn link_of(&self, record: &Value) -> Option<String> {
        value_to_text(&self.link.get_or_fallback(record, "link")).filter(|s| !s.is_empty())
    }

    /// Child records, or `None` when the record has no child list
    pub fn children_of(&self, record: &Value) -> Option<Vec<Value>> {
        match self.children.get_or_fallback(record, "children") {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// Render a scalar value as display text. Objects and arrays have no text form.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Truthiness of a record flag (`true`, non-zero numbers, "true")
pub fn value_is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn record_summary(record: &Value) -> String {
    match record.get("label").and_then(Value::as_str) {
        Some(label) => format!("{label:?}"),
        None => "<unlabeled>".to_string(),
    }
}
