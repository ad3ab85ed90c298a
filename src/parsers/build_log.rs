use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{LogEntry, Summary};

pub const DEFAULT_FILE_MARKER: &str = "/";
pub const DEFAULT_LINE_MARKER: &str = "Line";

/// Line prefixes that classify a build log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    pub file_marker: String,
    pub line_marker: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            file_marker: DEFAULT_FILE_MARKER.to_string(),
            line_marker: DEFAULT_LINE_MARKER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub markers: Markers,
    pub exclude: Vec<Pattern>,
}

impl LogOptions {
    pub fn new(markers: Markers, exclude: &[String]) -> Result<Self> {
        if markers.file_marker.is_empty() {
            return Err(Error::EmptyMarker("file_marker"));
        }
        if markers.line_marker.is_empty() {
            return Err(Error::EmptyMarker("line_marker"));
        }
        let exclude = exclude
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|source| Error::Pattern {
                    pattern: p.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { markers, exclude })
    }

    fn is_excluded(&self, file: &str) -> bool {
        self.exclude.iter().any(|p| p.matches(file))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine<'a> {
    FileHeader(&'a str),
    Entry {
        line_number: &'a str,
        error_token: &'a str,
    },
    Other,
}

pub fn classify_line<'a>(line: &'a str, markers: &Markers) -> LogLine<'a> {
    if line.starts_with(&markers.file_marker) {
        return LogLine::FileHeader(line.trim());
    }

    if line.starts_with(&markers.line_marker) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() >= 2 {
            return LogLine::Entry {
                line_number: tokens[1],
                error_token: tokens[tokens.len() - 1],
            };
        }
    }

    LogLine::Other
}

/// Single pass over the log. Lines that are not valid UTF-8 are decoded lossily.
pub fn summarize_reader<R: BufRead>(reader: R, options: &LogOptions) -> Result<Summary> {
    let mut summary = Summary::default();
    let mut current_file: Option<String> = None;
    let mut orphans = 0usize;
    let mut excluded = 0usize;

    for (idx, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let text = String::from_utf8_lossy(&raw);
        let line = text.trim_end_matches('\r');

        match classify_line(line, &options.markers) {
            LogLine::FileHeader(path) => {
                tracing::debug!("file header at line {}: {}", idx + 1, path);
                current_file = Some(path.to_string());
            }
            LogLine::Entry {
                line_number,
                error_token,
            } => {
                let Some(file) = current_file.as_ref() else {
                    orphans += 1;
                    continue;
                };
                if options.is_excluded(file) {
                    excluded += 1;
                    continue;
                }
                summary.record(LogEntry {
                    file_path: file.clone(),
                    line_number: line_number.to_string(),
                    error_token: error_token.to_string(),
                });
            }
            LogLine::Other => {}
        }
    }

    if orphans > 0 {
        tracing::warn!("skipped {} warning entries that appeared before any file header", orphans);
    }
    if excluded > 0 {
        tracing::info!("skipped {} warning entries in excluded files", excluded);
    }

    Ok(summary)
}

pub fn summarize_file(path: &Path, options: &LogOptions) -> Result<Summary> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::LogNotFound(path.to_path_buf()),
        _ => Error::Io(e),
    })?;
    summarize_reader(BufReader::new(file), options)
}
