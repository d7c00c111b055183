//! Output format configuration and record rendering
//!
//! Provides the two wire formats for a cleaned record tree:
//! - Text: flattened `key=value` tokens, dotted paths for nested groups
//! - Json: one JSON object per line, groups as nested objects
//!
//! Both formats emit keys sorted at every nesting level.

use super::error::{LoggerError, Result};
use super::record::{Node, RecordTree, Scalar};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Output format for rendered records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Flattened key=value text (default)
    ///
    /// Example: `level="INFO" msg="Request processed" record.requestId="abc-123"`
    #[default]
    Text,

    /// JSON format for machine processing
    ///
    /// Example: `{"level":"INFO","msg":"Request processed","record":{"requestId":"abc-123"}}`
    Json,
}

impl OutputFormat {
    /// Decode a format name the way `AWS_LAMBDA_LOG_FORMAT` is interpreted.
    ///
    /// Only `json` (any case, surrounding whitespace ignored) selects JSON.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("json") {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }

    /// Render `tree` as one newline-terminated line appended to `buf`.
    ///
    /// On error `buf` may hold a partial record and must be discarded.
    pub fn render(&self, tree: &RecordTree, buf: &mut Vec<u8>) -> Result<()> {
        match self {
            OutputFormat::Json => {
                serde_json::to_writer(&mut *buf, tree)?;
                buf.push(b'\n');
            }
            OutputFormat::Text => {
                write_text_record(buf, tree, "")?;
                if buf.last() == Some(&b' ') {
                    buf.pop();
                }
                buf.push(b'\n');
            }
        }
        Ok(())
    }

    /// Write the line emitted in place of a record that failed to encode.
    pub fn write_fallback<W: Write + ?Sized>(&self, out: &mut W, err: &LoggerError) -> Result<()> {
        let message = format!("failed to encode log record: {}", err.encode_description());
        match self {
            OutputFormat::Json => {
                writeln!(
                    out,
                    "{{\"level\":\"ERROR\",\"msg\":{}}}",
                    serde_json::to_string(&message)?
                )?;
            }
            OutputFormat::Text => {
                writeln!(out, "level=ERROR msg={}", quote_text_value(&message)?)?;
            }
        }
        Ok(())
    }
}

/// Write every leaf of `record` as `path.key=value ` in sorted key order.
pub fn write_text_record(buf: &mut Vec<u8>, record: &RecordTree, path: &str) -> Result<()> {
    for (key, node) in record.iter() {
        let key = if path.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", path, key)
        };

        match node {
            Node::Tree(tree) => write_text_record(buf, tree, &key)?,
            Node::Scalar(scalar) => {
                buf.extend_from_slice(key.as_bytes());
                buf.push(b'=');
                write_text_value(buf, scalar)?;
                buf.push(b' ');
            }
        }
    }
    Ok(())
}

fn write_text_value(buf: &mut Vec<u8>, scalar: &Scalar) -> Result<()> {
    match scalar {
        Scalar::String(s) => buf.extend_from_slice(quote_text_value(s)?.as_bytes()),
        Scalar::Null => buf.extend_from_slice(b"null"),
        Scalar::Bool(b) => write!(buf, "{}", b)?,
        Scalar::Int(i) => write!(buf, "{}", i)?,
        Scalar::Uint(u) => write!(buf, "{}", u)?,
        Scalar::Float(f) => write!(buf, "{}", f)?,
        Scalar::Display(d) => write!(buf, "{}", d)?,
        Scalar::Json(v) => serde_json::to_writer(&mut *buf, v)?,
    }
    Ok(())
}

/// Quote a string value with JSON string escaping
fn quote_text_value(value: &str) -> Result<String> {
    serde_json::to_string(value).map_err(|e| LoggerError::formatter("text", e.to_string()))
}
