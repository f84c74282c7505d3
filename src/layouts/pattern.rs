//! Pattern layout implementation
//!
//! A configurable conversion pattern in the classic `%`-specifier style:
//!
//! | Specifier | Output |
//! |-----------|--------|
//! | `%d` / `%d{fmt}` | timestamp, ISO 8601 with milliseconds or a strftime format |
//! | `%p` | level name |
//! | `%c` | logger name |
//! | `%m` | rendered message |
//! | `%t` | thread name or id |
//! | `%x` | NDC stack, space-joined |
//! | `%X{key}` | MDC value for `key` |
//! | `%F` / `%L` / `%M` | file, line, module path of the call site |
//! | `%n` | newline |
//! | `%%` | literal percent |

use crate::core::error::{LoggerError, Result};
use crate::core::event::LoggingEvent;
use crate::core::layout::Layout;
use std::fmt::Write as _;

const DEFAULT_PATTERN: &str = "%d [%t] %p %c - %m";
const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

#[derive(Debug, Clone)]
enum Chunk {
    Literal(String),
    Date(Option<String>),
    Level,
    LoggerName,
    Message,
    Thread,
    NdcStack,
    MdcValue(String),
    File,
    Line,
    ModulePath,
    Newline,
}

#[derive(Debug, Clone)]
pub struct PatternLayout {
    pattern: String,
    chunks: Vec<Chunk>,
}

impl PatternLayout {
    /// Layout with the default pattern `%d [%t] %p %c - %m`.
    pub fn new() -> Self {
        Self::with_pattern(DEFAULT_PATTERN).expect("default pattern is well formed")
    }

    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let chunks = Self::parse(pattern)?;
        Ok(Self {
            pattern: pattern.to_string(),
            chunks,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    fn parse(pattern: &str) -> Result<Vec<Chunk>> {
        let mut chunks = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            let specifier = chars.next().ok_or_else(|| {
                LoggerError::config("PatternLayout", "pattern ends with a dangling '%'")
            })?;
            if specifier == '%' {
                literal.push('%');
                continue;
            }
            if !literal.is_empty() {
                chunks.push(Chunk::Literal(std::mem::take(&mut literal)));
            }
            let chunk = match specifier {
                'd' => Chunk::Date(Self::parse_braced_argument(&mut chars)?),
                'p' => Chunk::Level,
                'c' => Chunk::LoggerName,
                'm' => Chunk::Message,
                't' => Chunk::Thread,
                'x' => Chunk::NdcStack,
                'X' => {
                    let key = Self::parse_braced_argument(&mut chars)?.ok_or_else(|| {
                        LoggerError::config("PatternLayout", "%X requires a {key} argument")
                    })?;
                    Chunk::MdcValue(key)
                }
                'F' => Chunk::File,
                'L' => Chunk::Line,
                'M' => Chunk::ModulePath,
                'n' => Chunk::Newline,
                other => {
                    return Err(LoggerError::config(
                        "PatternLayout",
                        format!("unknown conversion specifier '%{}'", other),
                    ));
                }
            };
            chunks.push(chunk);
        }
        if !literal.is_empty() {
            chunks.push(Chunk::Literal(literal));
        }
        Ok(chunks)
    }

    fn parse_braced_argument(
        chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    ) -> Result<Option<String>> {
        if chars.peek() != Some(&'{') {
            return Ok(None);
        }
        chars.next();
        let mut argument = String::new();
        for c in chars.by_ref() {
            if c == '}' {
                return Ok(Some(argument));
            }
            argument.push(c);
        }
        Err(LoggerError::config(
            "PatternLayout",
            "unbalanced '{' in pattern",
        ))
    }
}

impl Default for PatternLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout for PatternLayout {
    fn format(&self, event: &LoggingEvent) -> String {
        let mut out = String::with_capacity(64 + event.rendered_message.len());
        for chunk in &self.chunks {
            match chunk {
                Chunk::Literal(text) => out.push_str(text),
                Chunk::Date(format) => {
                    let format = format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT);
                    let _ = write!(out, "{}", event.timestamp.format(format));
                }
                Chunk::Level => out.push_str(event.level.as_str()),
                Chunk::LoggerName => out.push_str(&event.logger_name),
                Chunk::Message => out.push_str(&event.rendered_message),
                Chunk::Thread => out.push_str(event.thread_label()),
                Chunk::NdcStack => out.push_str(&event.ndc.join(" ")),
                Chunk::MdcValue(key) => {
                    if let Some(value) = event.mdc.get(key) {
                        out.push_str(value);
                    }
                }
                Chunk::File => {
                    if let Some(location) = &event.location {
                        out.push_str(&location.file);
                    }
                }
                Chunk::Line => {
                    if let Some(location) = &event.location {
                        let _ = write!(out, "{}", location.line);
                    }
                }
                Chunk::ModulePath => {
                    if let Some(location) = &event.location {
                        out.push_str(&location.module_path);
                    }
                }
                Chunk::Newline => out.push('\n'),
            }
        }
        out
    }
}
