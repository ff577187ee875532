// Lane options: a JSON object whose entries become `key:value` lane arguments.

use crate::error::LaneError;
use lane_sdk::StringUtil;
use serde_json::Value;
use std::collections::BTreeMap;

/// Parsed lane options, kept in key order so command lines are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneOptions {
    entries: BTreeMap<String, String>,
}

impl LaneOptions {
    /// Parse the `options` input. Absent or blank input yields no options.
    pub fn parse(raw: Option<&str>) -> Result<Self, LaneError> {
        let raw = match raw.map(str::trim) {
            None | Some("") => return Ok(Self::default()),
            Some(raw) => raw,
        };

        let invalid = |reason: String| LaneError::InvalidOptions {
            raw: raw.to_string(),
            reason,
        };

        let value: Value = StringUtil::convert_from_json(raw).map_err(|e| invalid(e.to_string()))?;
        let object = match value {
            Value::Object(object) => object,
            other => return Err(invalid(format!("expected an object, found {}", type_name(&other)))),
        };

        let entries = object
            .into_iter()
            .map(|(key, value)| (key, option_text(value)))
            .collect();
        Ok(Self { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LaneOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Text passed to the lane for one option value.
fn option_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        nested @ (Value::Array(_) | Value::Object(_)) => nested.to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
