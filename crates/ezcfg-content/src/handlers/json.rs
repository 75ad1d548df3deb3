//! JSON format handler using serde_json

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::format::{Comments, Format, FormatHandler};

/// Handler for JSON files.
///
/// JSON has no comment syntax, so comments are dropped on render.
#[derive(Debug, Default)]
pub struct JsonHandler;

impl JsonHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FormatHandler for JsonHandler {
    fn format(&self) -> Format {
        Format::Json
    }

    fn parse(&self, source: &str) -> Result<Value> {
        if source.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        match serde_json::from_str(source).map_err(|e| Error::parse("JSON", e.to_string()))? {
            value @ Value::Object(_) => Ok(value),
            Value::Null => Ok(Value::Object(Map::new())),
            _ => Err(Error::parse("JSON", "top level is not an object")),
        }
    }

    fn render(&self, value: &Value, _comments: &Comments) -> Result<String> {
        let mut out = serde_json::to_string_pretty(value)?;
        out.push('\n');
        Ok(out)
    }
}
