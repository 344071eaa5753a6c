//! Chained query steps
//!
//! A step is one narrowing or traversal operation written as text, so a chain
//! of queries can be given on the command line:
//!
//! - `in:KEY` descends through `KEY` ([`IndexedJson::children_of`])
//! - `filter:KEY` keeps entries having `KEY` ([`IndexedJson::filter`])
//! - `filter:KEY=VALUE` keeps entries whose `KEY` matches `VALUE`
//! - `value:VALUE` keeps entries with any property matching `VALUE`
//!   ([`IndexedJson::filter_by_value`])
//!
//! `VALUE` is read as JSON when it parses, otherwise as a plain string.

use crate::core::indexed::IndexedJson;
use crate::core::value::parse_query_value;
use crate::error::{IdxJsonError, Result};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A single query step
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Descend one level through a key
    In(String),
    /// Keep entries having a key, optionally matching a value
    Filter { key: String, value: Option<Value> },
    /// Keep entries with any property matching a value
    FilterValue(Value),
}

impl Step {
    /// Apply this step, producing a new instance
    pub fn apply<'a>(&self, index: &IndexedJson<'a>) -> IndexedJson<'a> {
        match self {
            Self::In(key) => index.children_of(key),
            Self::Filter { key, value } => index.filter(key, value.as_ref()),
            Self::FilterValue(value) => index.filter_by_value(value),
        }
    }
}

impl FromStr for Step {
    type Err = IdxJsonError;

    fn from_str(s: &str) -> Result<Self> {
        let (kind, arg) = s.split_once(':').ok_or_else(|| {
            IdxJsonError::invalid_query(format!(
                "step '{}' must look like in:KEY, filter:KEY[=VALUE] or value:VALUE",
                s
            ))
        })?;

        match kind {
            "in" => Ok(Self::In(non_empty_key(arg, s)?.to_string())),
            "filter" => {
                let (key, value) = match arg.split_once('=') {
                    Some((key, raw)) => (key, Some(parse_query_value(raw))),
                    None => (arg, None),
                };
                Ok(Self::Filter {
                    key: non_empty_key(key, s)?.to_string(),
                    value,
                })
            }
            "value" => Ok(Self::FilterValue(parse_query_value(arg))),
            other => Err(IdxJsonError::invalid_query(format!(
                "unknown step '{}' in '{}'",
                other, s
            ))),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In(key) => write!(f, "in:{}", key),
            Self::Filter { key, value: None } => write!(f, "filter:{}", key),
            Self::Filter {
                key,
                value: Some(value),
            } => write!(f, "filter:{}={}", key, display_value(value)),
            Self::FilterValue(value) => write!(f, "value:{}", display_value(value)),
        }
    }
}

/// Apply steps left to right
pub fn run<'a>(index: &IndexedJson<'a>, steps: &[Step]) -> IndexedJson<'a> {
    steps
        .iter()
        .fold(index.clone(), |current, step| step.apply(&current))
}

fn non_empty_key<'s>(key: &'s str, step: &str) -> Result<&'s str> {
    if key.is_empty() {
        return Err(IdxJsonError::invalid_query(format!(
            "step '{}' is missing a key",
            step
        )));
    }
    Ok(key)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) if parse_query_value(s) == *value => s.clone(),
        other => other.to_string(),
    }
}
