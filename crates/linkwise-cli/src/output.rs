//! Output formatting and writing utilities
//!
//! This module formats results as JSON, YAML or human-readable text. The
//! human form of a resource lists its links first, then its remaining
//! fields.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use linkwise_core::{Payload, PayloadMap, Response, HREF_KEY, LINKS_KEY};
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};
use tracing::trace;

/// Trait for formatting output with specialized support for resources
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a canonical payload
    fn format_payload(&self, payload: &Payload) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_payload(&self, payload: &Payload) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_payload_human(payload)),
            _ => self.format(payload),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message (human format only)
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a warning message (human format only)
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a section header (human format only)
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        self.write_formatted(formatted)
    }

    /// Write a canonical payload
    pub fn payload(&mut self, payload: &Payload) -> Result<()> {
        let formatted = self.format.format_payload(payload)?;
        self.write_formatted(formatted)
    }

    /// Write a looked-up resource
    pub fn response(&mut self, response: &Response) -> Result<()> {
        trace!(key = %response.key, "Writing response");
        self.section(response.key.as_str())?;
        self.payload(&response.payload)
    }

    fn write_formatted(&mut self, formatted: String) -> Result<()> {
        // YAML already ends with a newline
        if formatted.ends_with('\n') {
            write!(self.writer, "{}", formatted)?;
            self.writer.flush()?;
            Ok(())
        } else {
            self.writeln(&formatted)
        }
    }
}

/// Format a payload for human reading
fn format_payload_human(payload: &Payload) -> String {
    match payload {
        Payload::Object(map) => format_object_human(map),
        Payload::Sequence(items) => {
            let mut output = format!("{} item(s)\n", items.len());
            for (i, item) in items.iter().enumerate() {
                output.push_str(&format!("\n[{}]\n", i));
                output.push_str(&format_payload_human(item));
            }
            output
        }
        Payload::Scalar(value) => format!("{}\n", format_value_compact(value)),
    }
}

fn format_object_human(map: &PayloadMap) -> String {
    let mut output = String::new();

    if let Some(links) = map.links() {
        output.push_str("Links:\n");
        let width = links.keys().map(str::len).max().unwrap_or(0);
        for (relation, link) in links {
            let href = link
                .as_object()
                .and_then(|l| l.get(HREF_KEY))
                .and_then(Payload::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format_value_compact(&link.to_value()));
            output.push_str(&format!("  {:width$}  {}\n", relation, href, width = width));
        }
    }

    let fields: Vec<(&String, &Payload)> = map.iter().filter(|(key, _)| *key != LINKS_KEY).collect();
    if !fields.is_empty() {
        output.push_str("Fields:\n");
        let width = fields.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
        for (key, value) in fields {
            output.push_str(&format!(
                "  {:width$}  {}\n",
                key,
                format_value_compact(&value.to_value()),
                width = width
            ));
        }
    }

    output
}

/// Format a JSON value in a compact, human-readable way
fn format_value_compact(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            if arr.len() <= 3 {
                format!(
                    "[{}]",
                    arr.iter()
                        .map(format_value_compact)
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            } else {
                format!("[{} items]", arr.len())
            }
        }
        Value::Object(obj) => {
            if obj.len() <= 2 {
                let items: Vec<String> = obj
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, format_value_compact(v)))
                    .collect();
                format!("{{{}}}", items.join(", "))
            } else {
                format!("{{{} fields}}", obj.len())
            }
        }
    }
}
