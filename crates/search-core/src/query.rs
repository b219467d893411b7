use std::fmt;

use crate::error::QueryError;
use crate::qualifier::Parameter;
use crate::qualifiers::Qualifiers;

pub const MIN_LIMIT: u32 = 1;
pub const MAX_LIMIT: u32 = 1000;
pub const DEFAULT_LIMIT: u32 = 30;

/// A search request: free-text keywords plus declared qualifiers and parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub keywords: Vec<String>,
    pub kind: String,
    pub limit: u32,
    pub order: Parameter,
    pub sort: Parameter,
    pub qualifiers: Qualifiers,
}

impl Query {
    pub fn validate(&self) -> Result<(), QueryError> {
        if !(MIN_LIMIT..=MAX_LIMIT).contains(&self.limit) {
            return Err(QueryError::LimitOutOfRange {
                limit: self.limit,
                min: MIN_LIMIT,
                max: MAX_LIMIT,
            });
        }
        Ok(())
    }

    /// Routes a raw value to the qualifier or parameter serialized under `key`.
    pub fn set_qualifier(&mut self, key: &str, value: &str) -> Result<(), QueryError> {
        let target = if self.order.key() == key {
            &mut self.order
        } else if self.sort.key() == key {
            &mut self.sort
        } else {
            self.qualifiers
                .get_by_key_mut(key)
                .ok_or_else(|| QueryError::UnknownQualifier(key.to_string()))?
        };

        target.set(value)?;
        Ok(())
    }

    /// Textual query: keywords in order, then set qualifiers by key, then
    /// `sort` and `order` when set.
    pub fn query_string(&self) -> String {
        let mut parts: Vec<String> = self.keywords.clone();

        parts.extend(
            self.qualifiers
                .list_set()
                .into_iter()
                .map(|(key, value)| format!("{key}:{value}")),
        );

        for parameter in [&self.sort, &self.order] {
            if parameter.is_set() {
                parts.push(format!("{}:{}", parameter.key(), parameter));
            }
        }

        parts.join(" ")
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query_string())
    }
}
