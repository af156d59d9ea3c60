// Template parsing and rendering
//
// Syntax:
//   {{ user.name }}    value at a key path, HTML-escaped
//   {{{ body }}}       value at a key path, written raw
//   {{ . }}            the whole data value
// Key path segments are object keys or array indices (`items.0.title`).

use std::fmt;
use std::io::Write;

use serde_json::Value;

use crate::error::{ParseError, RenderError};

/// A parsed template, ready to render any number of times
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq)]
enum Part {
    Literal(String),
    Value { path: KeyPath, escape: bool },
}

/// Dot-separated lookup path; no segments means the root value
#[derive(Debug, Clone, PartialEq, Eq)]
struct KeyPath(Vec<String>);

impl KeyPath {
    fn parse(expr: &str, offset: usize) -> Result<Self, ParseError> {
        if expr.is_empty() {
            return Err(ParseError::EmptyExpression { offset });
        }
        if expr == "." {
            return Ok(Self(Vec::new()));
        }

        let valid_segment = |segment: &str| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        };

        if !expr.split('.').all(valid_segment) {
            return Err(ParseError::InvalidPath {
                offset,
                path: expr.to_string(),
            });
        }

        Ok(Self(expr.split('.').map(str::to_string).collect()))
    }

    fn lookup<'a>(&self, data: &'a Value) -> Option<&'a Value> {
        self.0.iter().try_fold(data, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str(".")
        } else {
            f.write_str(&self.0.join("."))
        }
    }
}

impl Template {
    /// Parses template source
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let mut parts = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                parts.push(Part::Literal(rest[..start].to_string()));
            }

            let raw = rest[start..].starts_with("{{{");
            let (open, close) = if raw { ("{{{", "}}}") } else { ("{{", "}}") };
            let tag_offset = offset + start;
            let body_start = start + open.len();

            let body_len = rest[body_start..]
                .find(close)
                .ok_or(ParseError::Unclosed { offset: tag_offset })?;
            let expr = rest[body_start..body_start + body_len].trim();

            parts.push(Part::Value {
                path: KeyPath::parse(expr, tag_offset)?,
                escape: !raw,
            });

            let consumed = body_start + body_len + close.len();
            rest = &rest[consumed..];
            offset += consumed;
        }

        if !rest.is_empty() {
            parts.push(Part::Literal(rest.to_string()));
        }

        Ok(Self { parts })
    }

    /// Renders into `out`
    ///
    /// Output already written stays written if a later tag fails.
    pub fn render(&self, out: &mut dyn Write, data: &Value) -> Result<(), RenderError> {
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.write_all(text.as_bytes())?,
                Part::Value { path, escape } => {
                    let value = path
                        .lookup(data)
                        .ok_or_else(|| RenderError::MissingValue(path.to_string()))?;
                    let text = scalar_text(value)
                        .ok_or_else(|| RenderError::NotScalar(path.to_string()))?;

                    if *escape {
                        out.write_all(escape_html(&text).as_bytes())?;
                    } else {
                        out.write_all(text.as_bytes())?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Renders into a new string
    pub fn render_to_string(&self, data: &Value) -> Result<String, RenderError> {
        let mut buf = Vec::new();
        self.render(&mut buf, data)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Key paths referenced by the template, in order of appearance
    pub fn variables(&self) -> Vec<String> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Value { path, .. } => Some(path.to_string()),
                Part::Literal(_) => None,
            })
            .collect()
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
