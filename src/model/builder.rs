//! Tree building: one level of raw records to normalized items.
//!
//! The builder is the seam for dataset-to-tree conversion. It normalizes a
//! single level (ordering plus accessor resolution) and hands back the raw
//! child records untouched; the materializer in [`super::node`] calls it
//! again for every nested level.

use super::accessor::{value_is_truthy, ItemAccessors};
use super::ordering::OrderBy;
use serde_json::Value;

/// A record with its accessors resolved
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltItem {
    pub label: String,
    pub icon: Option<String>,
    pub link: Option<String>,
    pub hint: bool,
    pub disabled: bool,
    pub is_active: bool,
    pub record: Value,
    /// Raw child records, `None` when the record has no child list
    pub children: Option<Vec<Value>>,
}

/// Converts one level of a dataset into normalized items
pub trait TreeBuilder {
    fn build(
        &self,
        records: &[Value],
        accessors: &ItemAccessors,
        order: Option<&OrderBy>,
    ) -> Vec<BuiltItem>;
}

/// Default builder for nested JSON datasets
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetTreeBuilder;

impl TreeBuilder for DatasetTreeBuilder {
    fn build(
        &self,
        records: &[Value],
        accessors: &ItemAccessors,
        order: Option<&OrderBy>,
    ) -> Vec<BuiltItem> {
        let mut records = records.to_vec();
        if let Some(order) = order {
            order.sort(&mut records);
        }

        records
            .into_iter()
            .map(|record| BuiltItem {
                label: accessors.label_of(&record),
                icon: accessors.icon_of(&record),
                link: accessors.link_of(&record),
                hint: value_is_truthy(record.get("hint")),
                disabled: value_is_truthy(record.get("disabled")),
                is_active: value_is_truthy(record.get("isActive")),
                children: accessors.children_of(&record),
                record,
            })
            .collect()
    }
}
