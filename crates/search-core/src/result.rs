use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One search hit as returned by the API; field types vary per record.
pub type Item = Map<String, Value>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub incomplete_results: bool,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub total_count: u64,
}

pub fn str_field<'a>(item: &'a Item, field: &str) -> Option<&'a str> {
    item.get(field).and_then(Value::as_str)
}

pub fn bool_field(item: &Item, field: &str) -> Option<bool> {
    item.get(field).and_then(Value::as_bool)
}

pub fn u64_field(item: &Item, field: &str) -> Option<u64> {
    item.get(field).and_then(Value::as_u64)
}
