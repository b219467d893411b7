use std::fmt;

use crate::error::ValidationError;
use crate::validators::Validator;

/// Descriptive input tag for the flag-binding layer. Validation never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Bool,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
        }
    }
}

/// A named search option holding a raw string value.
///
/// Used both for search filters (`stars:`, `language:`) and for query
/// controls (`sort`, `order`); [`Parameter`] is the same type under the
/// second name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Qualifier {
    key: String,
    kind: ValueKind,
    set: bool,
    validator: Option<Validator>,
    value: String,
}

pub type Parameter = Qualifier;

impl Qualifier {
    pub fn new(
        key: impl Into<String>,
        kind: ValueKind,
        default: impl Into<String>,
        validator: Option<Validator>,
    ) -> Self {
        Self {
            key: key.into(),
            kind,
            set: false,
            validator,
            value: default.into(),
        }
    }

    pub fn is_set(&self) -> bool {
        self.set
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Raw current value, the declared default until [`Qualifier::set`] succeeds.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Validates and stores `value`. A rejected value leaves the qualifier untouched.
    pub fn set(&mut self, value: &str) -> Result<(), ValidationError> {
        if let Some(validator) = &self.validator {
            validator.validate(value)?;
        }
        self.set = true;
        self.value = value.to_string();
        Ok(())
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if needs_quoting(&self.value) {
            write!(f, "{:?}", self.value)
        } else {
            f.write_str(&self.value)
        }
    }
}

fn needs_quoting(value: &str) -> bool {
    value.chars().any(|ch| ch.is_whitespace() || ch == '"')
}

#[cfg(test)]
mod tests {
    use crate::validators::{bool_validator, opts_validator, range_validator};

    use super::*;

    #[test]
    fn new_qualifier_starts_unset_with_default_value() {
        let qualifier = Qualifier::new("fork", ValueKind::String, "false", None);

        assert!(!qualifier.is_set());
        assert_eq!(qualifier.key(), "fork");
        assert_eq!(qualifier.value(), "false");
        assert_eq!(qualifier.type_name(), "string");
    }

    #[test]
    fn set_without_validator_accepts_any_string() {
        let mut qualifier = Qualifier::new("language", ValueKind::String, "", None);

        qualifier.set("go").expect("any value should be accepted");

        assert!(qualifier.is_set());
        assert_eq!(qualifier.to_string(), "go");
    }

    #[test]
    fn set_stores_raw_value_without_coercion() {
        let mut qualifier = Qualifier::new("stars", ValueKind::String, "", Some(range_validator()));

        qualifier.set("0010..*").expect("range should be accepted");

        assert_eq!(qualifier.value(), "0010..*");
    }

    #[test]
    fn failed_set_leaves_state_unchanged() {
        let mut qualifier = Qualifier::new("stars", ValueKind::String, "", Some(range_validator()));
        let err = qualifier.set("lots").expect_err("invalid range should fail");

        assert_eq!(err.to_string(), "lots is invalid format");
        assert!(!qualifier.is_set());
        assert_eq!(qualifier.to_string(), "");

        qualifier.set(">100").expect("valid range should succeed");
        qualifier
            .set("1..2..3")
            .expect_err("second invalid set should fail");

        assert!(qualifier.is_set());
        assert_eq!(qualifier.to_string(), ">100");
    }

    #[test]
    fn bool_kind_still_stores_strings() {
        let mut qualifier = Qualifier::new("archived", ValueKind::Bool, "", Some(bool_validator()));

        qualifier.set("true").expect("true is a boolean literal");

        assert_eq!(qualifier.type_name(), "bool");
        assert_eq!(qualifier.value(), "true");
    }

    #[test]
    fn display_quotes_values_with_whitespace_or_quotes() {
        let mut qualifier = Qualifier::new("topic", ValueKind::String, "", None);

        qualifier.set("help wanted").expect("set");
        assert_eq!(qualifier.to_string(), "\"help wanted\"");

        qualifier.set("tab\tseparated").expect("set");
        assert_eq!(qualifier.to_string(), "\"tab\\tseparated\"");

        qualifier.set("say \"hi\"").expect("set");
        assert_eq!(qualifier.to_string(), "\"say \\\"hi\\\"\"");

        qualifier.set("plain-value").expect("set");
        assert_eq!(qualifier.to_string(), "plain-value");
    }

    #[test]
    fn parameter_alias_shares_qualifier_contract() {
        let mut order: Parameter =
            Parameter::new("order", ValueKind::String, "desc", Some(opts_validator(&["asc", "desc"])));

        order
            .set("sideways")
            .expect_err("unknown order should fail");
        assert!(!order.is_set());
        assert_eq!(order.value(), "desc");

        order.set("asc").expect("asc is allowed");
        assert_eq!(order.to_string(), "asc");
    }
}
