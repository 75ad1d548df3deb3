//! TOML format handler using toml_edit

use serde_json::{Map, Value};
use toml_edit::{Array, DocumentMut, InlineTable, Item, Table};

use crate::error::{Error, Result};
use crate::format::{Comments, Format, FormatHandler};
use crate::path::{PathSegment, format_path};

/// Handler for TOML files using toml_edit.
///
/// Keys keep document order in both directions. Mappings become `[table]`
/// sections; mappings inside sequences become inline tables.
#[derive(Debug, Default)]
pub struct TomlHandler;

impl TomlHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FormatHandler for TomlHandler {
    fn format(&self) -> Format {
        Format::Toml
    }

    fn parse(&self, source: &str) -> Result<Value> {
        let doc: DocumentMut = source
            .parse()
            .map_err(|e: toml_edit::TomlError| Error::parse("TOML", e.to_string()))?;
        Ok(table_to_json(doc.as_table()))
    }

    fn render(&self, value: &Value, comments: &Comments) -> Result<String> {
        let Value::Object(map) = value else {
            return Err(Error::parse("TOML", "top level is not a mapping"));
        };

        let mut doc = DocumentMut::new();
        let mut renderer = Renderer {
            comments,
            path: Vec::new(),
            header_written: map.values().any(|v| !v.is_object()),
        };
        renderer.fill(doc.as_table_mut(), map)?;
        Ok(doc.to_string())
    }
}

/// Builds a toml_edit table tree from a mapping, attaching comments to keys
/// and section headers.
struct Renderer<'a> {
    comments: &'a Comments,
    path: Vec<PathSegment>,
    /// Whether anything precedes the next section header
    header_written: bool,
}

impl Renderer<'_> {
    fn fill(&mut self, table: &mut Table, map: &Map<String, Value>) -> Result<()> {
        for (key, value) in map {
            self.path.push(PathSegment::Key(key.clone()));
            let comment = self.comments.get(&format_path(&self.path)).map(|l| comment_block(l));

            match value {
                Value::Object(child) => {
                    let visible = comment.is_some() || child.values().any(|v| !v.is_object());
                    let mut section = Table::new();
                    section.set_implicit(!visible);
                    if visible {
                        let separator = if self.header_written { "\n" } else { "" };
                        if let Some(comment) = &comment {
                            section.decor_mut().set_prefix(format!("{separator}{comment}"));
                        }
                        self.header_written = true;
                    }
                    self.fill(&mut section, child)?;
                    table.insert(key, Item::Table(section));
                }
                other => {
                    table.insert(key, Item::Value(json_to_toml(other)?));
                    if let Some(comment) = comment
                        && let Some(mut entry) = table.key_mut(key)
                    {
                        entry.leaf_decor_mut().set_prefix(comment);
                    }
                }
            }

            self.path.pop();
        }
        Ok(())
    }
}

fn comment_block(lines: &[String]) -> String {
    let style = Format::Toml.comment_style();
    lines
        .iter()
        .filter_map(|line| style.format_line("", line))
        .map(|line| format!("{line}\n"))
        .collect()
}

fn table_to_json(table: &Table) -> Value {
    Value::Object(
        table
            .iter()
            .map(|(key, item)| (key.to_string(), item_to_json(item)))
            .collect(),
    )
}

fn item_to_json(item: &Item) -> Value {
    match item {
        Item::Value(v) => value_to_json(v),
        Item::Table(t) => table_to_json(t),
        Item::ArrayOfTables(arr) => Value::Array(arr.iter().map(table_to_json).collect()),
        Item::None => Value::Null,
    }
}

fn value_to_json(value: &toml_edit::Value) -> Value {
    match value {
        toml_edit::Value::String(s) => Value::String(s.value().clone()),
        toml_edit::Value::Integer(i) => Value::Number((*i.value()).into()),
        toml_edit::Value::Float(f) => serde_json::Number::from_f64(*f.value())
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml_edit::Value::Boolean(b) => Value::Bool(*b.value()),
        toml_edit::Value::Datetime(d) => Value::String(d.value().to_string()),
        toml_edit::Value::Array(arr) => Value::Array(arr.iter().map(value_to_json).collect()),
        toml_edit::Value::InlineTable(t) => Value::Object(
            t.iter()
                .map(|(key, v)| (key.to_string(), value_to_json(v)))
                .collect(),
        ),
    }
}

/// Convert a serde_json::Value to an inline toml_edit value
fn json_to_toml(json: &Value) -> Result<toml_edit::Value> {
    match json {
        Value::Null => Err(Error::parse("TOML", "TOML does not support null values")),
        Value::Bool(b) => Ok((*b).into()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i.into())
            } else if let Some(f) = n.as_f64() {
                Ok(f.into())
            } else {
                Err(Error::parse("TOML", "Invalid number"))
            }
        }
        Value::String(s) => Ok(s.as_str().into()),
        Value::Array(items) => {
            let mut array = Array::new();
            for item in items {
                array.push(json_to_toml(item)?);
            }
            Ok(toml_edit::Value::Array(array))
        }
        Value::Object(obj) => {
            let mut inline = InlineTable::new();
            for (k, v) in obj {
                inline.insert(k.as_str(), json_to_toml(v)?);
            }
            Ok(toml_edit::Value::InlineTable(inline))
        }
    }
}
