//! Ordering directives: `field:asc|desc[,field:asc|desc,...]`

use serde_json::Value;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

/// A parsed ordering directive; keys are compared left to right
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub keys: Vec<SortKey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByError(pub String);

impl std::fmt::Display for OrderByError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid order-by directive: {}", self.0)
    }
}

impl std::error::Error for OrderByError {}

impl OrderBy {
    /// Parse a directive. A key without a direction sorts ascending.
    pub fn parse(directive: &str) -> Result<Self, OrderByError> {
        let mut keys = Vec::new();
        for part in directive.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (field, direction) = match part.split_once(':') {
                Some((field, dir)) => (field.trim(), dir.trim()),
                None => (part, "asc"),
            };
            if field.is_empty() {
                return Err(OrderByError(format!("{part:?} has no field name")));
            }
            let direction = match direction.to_ascii_lowercase().as_str() {
                "asc" => SortDirection::Asc,
                "desc" => SortDirection::Desc,
                other => {
                    return Err(OrderByError(format!(
                        "{other:?} is not asc or desc in {part:?}"
                    )))
                }
            };
            keys.push(SortKey {
                field: field.to_string(),
                direction,
            });
        }
        if keys.is_empty() {
            return Err(OrderByError(format!("{directive:?} names no fields")));
        }
        Ok(Self { keys })
    }

    /// Compare two records by every key in order
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        for key in &self.keys {
            let ord = compare_values(a.get(&key.field), b.get(&key.field));
            let ord = match key.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }

    /// Stable sort of one level of records
    pub fn sort(&self, records: &mut [Value]) {
        records.sort_by(|a, b| self.compare(a, b));
    }
}

fn rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Object(_)) => 5,
    }
}

/// Missing and null values sort first; numbers compare numerically and
/// strings lexically. Values of different kinds order by kind.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}
