use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

// Both patterns accept more than the server does. They only catch obviously
// malformed input early; some values that pass here are still rejected remotely.
#[allow(clippy::expect_used)]
static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(>|>=|<|<=|\*\.\.)?[0-9]+(\.\.(\*|[0-9]+))?$").expect("range pattern compiles")
});

// `\d` would also match non-ASCII digits.
const DATE_TIME: &str = r"[0-9\-+:T]+";

#[allow(clippy::expect_used)]
static DATE_TIME_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(>|>=|<|<=|\*\.\.)?{DATE_TIME}(\.\.(\*|{DATE_TIME}))?$"
    ))
    .expect("date range pattern compiles")
});

/// Format rule applied to a raw qualifier value before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// Value must equal one of the options exactly.
    Options(&'static [&'static str]),
    /// Every comma-separated token must equal one of the options exactly.
    MultiOptions(&'static [&'static str]),
    Bool,
    /// Numeric value or range such as `>=5`, `1..10`, `*..10`.
    Range,
    /// Date/time value or range such as `2021-01-01..*`.
    Date,
}

impl Validator {
    pub fn validate(&self, value: &str) -> Result<(), ValidationError> {
        match self {
            Self::Options(opts) => {
                if !is_included(value, opts) {
                    return Err(ValidationError::NotIncluded {
                        value: value.to_string(),
                        allowed: opts.join(", "),
                    });
                }
                Ok(())
            }
            Self::MultiOptions(opts) => {
                match value.split(',').find(|token| !is_included(token, opts)) {
                    Some(token) => Err(ValidationError::TokenNotIncluded {
                        token: token.to_string(),
                        allowed: opts.join(", "),
                    }),
                    None => Ok(()),
                }
            }
            Self::Bool => value
                .parse::<bool>()
                .map(|_| ())
                .map_err(|_| ValidationError::NotBoolean(value.to_string())),
            Self::Range => match_format(&RANGE_RE, value),
            Self::Date => match_format(&DATE_TIME_RANGE_RE, value),
        }
    }
}

pub const fn opts_validator(opts: &'static [&'static str]) -> Validator {
    Validator::Options(opts)
}

pub const fn multi_opts_validator(opts: &'static [&'static str]) -> Validator {
    Validator::MultiOptions(opts)
}

pub const fn bool_validator() -> Validator {
    Validator::Bool
}

pub const fn range_validator() -> Validator {
    Validator::Range
}

pub const fn date_validator() -> Validator {
    Validator::Date
}

fn is_included(value: &str, opts: &[&str]) -> bool {
    opts.iter().any(|opt| *opt == value)
}

fn match_format(pattern: &Regex, value: &str) -> Result<(), ValidationError> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat(value.to_string()))
    }
}
