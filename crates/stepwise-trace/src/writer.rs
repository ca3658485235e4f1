//! Trace export for external renderers.
//!
//! Two layouts are supported:
//! - **JSONL**: a header line (`name` + `inputs` + `steps` count) followed by
//!   one step per line
//! - **JSON**: the whole trace as one pretty-printed document

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::types::Trace;

/// Error type for trace export operations.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Jsonl,
    Json,
}

impl ExportFormat {
    /// Pick a layout from a file extension (`.json` → JSON, anything else → JSONL).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => ExportFormat::Json,
            _ => ExportFormat::Jsonl,
        }
    }
}

#[derive(Serialize)]
struct Header<'a> {
    name: &'a str,
    inputs: &'a std::collections::BTreeMap<String, serde_json::Value>,
    steps: usize,
}

/// Writes traces to files.
#[derive(Debug, Clone)]
pub struct TraceWriter {
    path: PathBuf,
    format: ExportFormat,
}

impl TraceWriter {
    /// Create a writer for the given file, creating parent directories.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, WriteError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let format = ExportFormat::from_path(&path);
        Ok(Self { path, format })
    }

    /// Override the layout picked from the extension.
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Write a trace, truncating any existing file. Returns the lines written.
    pub fn write<E, S>(&self, trace: &Trace<E, S>) -> Result<usize, WriteError>
    where
        E: Serialize,
        S: Serialize,
    {
        let file = File::create(&self.path)?;
        let mut out = BufWriter::new(file);
        let lines = write_to(&mut out, trace, self.format)?;
        out.flush()?;
        tracing::debug!(path = %self.path.display(), lines, "trace exported");
        Ok(lines)
    }
}

/// Write a trace to any writer in the given layout. Returns the lines written.
pub fn write_to<W, E, S>(
    out: &mut W,
    trace: &Trace<E, S>,
    format: ExportFormat,
) -> Result<usize, WriteError>
where
    W: Write,
    E: Serialize,
    S: Serialize,
{
    match format {
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, trace)?;
            writeln!(out)?;
            Ok(1)
        }
        ExportFormat::Jsonl => {
            let header = Header {
                name: &trace.name,
                inputs: &trace.inputs,
                steps: trace.len(),
            };
            writeln!(out, "{}", serde_json::to_string(&header)?)?;
            for step in trace {
                writeln!(out, "{}", serde_json::to_string(step)?)?;
            }
            Ok(trace.len() + 1)
        }
    }
}
