//! YAML format handler using serde_yaml

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use serde_yaml::Value as YamlValue;

use crate::error::{Error, Result};
use crate::format::{Comments, Format, FormatHandler};

/// Matches a block mapping entry: indentation, key, and the rest of the line.
static KEY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"^(?P<indent> *)(?P<key>'(?:[^']|'')*'|"(?:[^"\\]|\\.)*"|[^\s'"#][^:]*?):(?: (?P<rest>.*))?$"##)
        .unwrap()
});

/// Matches a block scalar header such as `|`, `|-` or `>+`.
static BLOCK_SCALAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[|>][-+]?[0-9]?$").unwrap());

/// Handler for YAML files using serde_yaml
#[derive(Debug, Default)]
pub struct YamlHandler;

impl YamlHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FormatHandler for YamlHandler {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn parse(&self, source: &str) -> Result<Value> {
        let yaml_value: YamlValue =
            serde_yaml::from_str(source).map_err(|e| Error::parse("YAML", e.to_string()))?;

        match yaml_value {
            YamlValue::Null => Ok(Value::Object(Map::new())),
            value @ YamlValue::Mapping(_) => Ok(yaml_to_json(&value)),
            YamlValue::Tagged(tagged) if tagged.value.is_mapping() => Ok(yaml_to_json(&tagged.value)),
            _ => Err(Error::parse("YAML", "top level is not a mapping")),
        }
    }

    fn render(&self, value: &Value, comments: &Comments) -> Result<String> {
        let rendered =
            serde_yaml::to_string(value).map_err(|e| Error::parse("YAML", e.to_string()))?;
        if comments.is_empty() {
            return Ok(rendered);
        }
        Ok(insert_comments(&rendered, comments))
    }
}

/// Convert YAML to the ordered JSON value model.
///
/// Scalar keys are stringified; keys that are collections are dropped.
fn yaml_to_json(value: &YamlValue) -> Value {
    match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            } else {
                Value::Null
            }
        }
        YamlValue::String(s) => Value::String(s.clone()),
        YamlValue::Sequence(arr) => Value::Array(arr.iter().map(yaml_to_json).collect()),
        YamlValue::Mapping(map) => {
            let mut json_map = Map::new();
            for (k, v) in map {
                let key = match k {
                    YamlValue::String(s) => s.clone(),
                    YamlValue::Bool(b) => b.to_string(),
                    YamlValue::Number(n) => n.to_string(),
                    _ => continue,
                };
                json_map.insert(key, yaml_to_json(v));
            }
            Value::Object(json_map)
        }
        YamlValue::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}

/// Insert `# comment` lines above the mapping keys whose dotted path has
/// comments attached.
///
/// Works on serde_yaml's block output: two-space mapping indentation,
/// sequences at their parent key's indentation. Keys inside sequence items
/// and block scalar bodies are not addressable and are passed through.
fn insert_comments(rendered: &str, comments: &Comments) -> String {
    let style = Format::Yaml.comment_style();
    let mut out = String::with_capacity(rendered.len());
    let mut keys: Vec<(usize, String)> = Vec::new();
    let mut sequence_indent: Option<usize> = None;
    let mut block_indent: Option<usize> = None;

    for line in rendered.lines() {
        let trimmed = line.trim_start_matches(' ');
        let indent = line.len() - trimmed.len();

        if let Some(block) = block_indent {
            if trimmed.is_empty() || indent > block {
                push_line(&mut out, line);
                continue;
            }
            block_indent = None;
        }

        if opens_block_scalar(trimmed) {
            block_indent = Some(indent);
        }

        if trimmed == "-" || trimmed.starts_with("- ") {
            sequence_indent = Some(sequence_indent.map_or(indent, |s| s.min(indent)));
            push_line(&mut out, line);
            continue;
        }

        if let Some(seq) = sequence_indent {
            if indent > seq {
                push_line(&mut out, line);
                continue;
            }
            sequence_indent = None;
        }

        if let Some(caps) = KEY_LINE.captures(line) {
            let key = unquote_key(&caps["key"]);
            while keys.last().is_some_and(|(depth, _)| *depth >= indent) {
                keys.pop();
            }

            let path = keys
                .iter()
                .map(|(_, k)| k.as_str())
                .chain(std::iter::once(key.as_str()))
                .collect::<Vec<_>>()
                .join(".");

            if let Some(lines) = comments.get(&path) {
                let pad = &line[..indent];
                for comment in lines.iter().flat_map(|c| c.split('\n')) {
                    let comment = comment.trim_end_matches('\r');
                    if let Some(formatted) = style.format_line(pad, comment) {
                        push_line(&mut out, &formatted);
                    }
                }
            }

            keys.push((indent, key));
        }

        push_line(&mut out, line);
    }

    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn opens_block_scalar(trimmed: &str) -> bool {
    trimmed
        .rsplit(' ')
        .next()
        .is_some_and(|token| BLOCK_SCALAR.is_match(token))
}

fn unquote_key(raw: &str) -> String {
    if let Some(inner) = raw.strip_prefix('\'').and_then(|r| r.strip_suffix('\'')) {
        return inner.replace("''", "'");
    }
    if raw.starts_with('"') {
        if let Ok(unescaped) = serde_json::from_str::<String>(raw) {
            return unescaped;
        }
    }
    raw.to_string()
}
