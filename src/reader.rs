use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{Result, TraceError};
use crate::trace::Trace;

/// Default characters that mark a comment line
pub const DEFAULT_COMMENT_MARKERS: [char; 3] = ['c', '#', '!'];

/// Configuration for reading a trace from whitespace separated columns.
///
/// Every line is trimmed. Blank lines and lines starting with one of the
/// comment markers are skipped; the rest are split on runs of whitespace and
/// the configured columns become x and y.
#[derive(Debug, Clone)]
pub struct TraceReader {
    /// 0-based column holding x
    pub x_column: usize,
    /// 0-based column holding y
    pub y_column: usize,
    /// First characters that mark a line as a comment
    pub comment_markers: Vec<char>,
}

impl Default for TraceReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceReader {
    /// Reader for x in column 0 and y in column 1, skipping `c`, `#` and `!` lines
    pub fn new() -> Self {
        Self {
            x_column: 0,
            y_column: 1,
            comment_markers: DEFAULT_COMMENT_MARKERS.to_vec(),
        }
    }

    /// Sets the columns for x and y
    pub fn with_columns(mut self, x_column: usize, y_column: usize) -> Self {
        self.x_column = x_column;
        self.y_column = y_column;
        self
    }

    /// Replaces the comment markers
    pub fn with_comment_markers(mut self, markers: &[char]) -> Self {
        self.comment_markers = markers.to_vec();
        self
    }

    /// Reads the whole file, then parses it with [`TraceReader::parse`].
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Trace> {
        let content = fs::read_to_string(path.as_ref())?;
        debug!("read {} bytes from {}", content.len(), path.as_ref().display());
        self.parse(&content)
    }

    /// Parses a trace from text. Rows keep their order in the source.
    ///
    /// # Errors
    ///
    /// * `MalformedRecord` if a data line lacks a configured column or the
    ///   token is not a number (line numbers are 1-based)
    /// * `EmptyTrace` if no data lines remain
    pub fn parse(&self, content: &str) -> Result<Trace> {
        let mut x = Vec::new();
        let mut y = Vec::new();
        let mut skipped = 0usize;

        for (line_idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            let first = match line.chars().next() {
                Some(c) => c,
                None => {
                    skipped += 1;
                    continue;
                }
            };
            if self.comment_markers.contains(&first) {
                skipped += 1;
                continue;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            x.push(self.column_value(&tokens, self.x_column, line_idx + 1)?);
            y.push(self.column_value(&tokens, self.y_column, line_idx + 1)?);
        }
        debug!("parsed {} samples, skipped {} lines", x.len(), skipped);

        Trace::new(x, y)
    }

    fn column_value(&self, tokens: &[&str], column: usize, line: usize) -> Result<f64> {
        let token = tokens.get(column).ok_or_else(|| TraceError::MalformedRecord {
            line,
            reason: format!("missing column {} (found {} columns)", column, tokens.len()),
        })?;
        token.parse::<f64>().map_err(|e| TraceError::MalformedRecord {
            line,
            reason: format!("column {} '{}': {}", column, token, e),
        })
    }
}
