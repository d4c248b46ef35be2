// File: crates/ellingham-core/src/error.rs
// Summary: Error types for table loading and diagram rendering.

use std::path::PathBuf;

/// Failure while loading or validating a compound table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to read table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("record {record}: '{value}' is not a number (column '{column}')")]
    InvalidNumber {
        record: usize,
        column: &'static str,
        value: String,
    },

    #[error("record {record}: unrecognised {what} '{value}'")]
    InvalidValue {
        record: usize,
        what: &'static str,
        value: String,
    },

    #[error("'{label}': start temperature must be finite and below end temperature")]
    InvalidSpan { label: String },

    #[error("duplicate compound line '{label}'")]
    DuplicateLabel { label: String },
}

/// Failure while drawing or writing a diagram.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("unsupported output format '{0}' (expected png, jpg or svg)")]
    UnsupportedFormat(String),

    #[error("failed to create a {width}x{height} raster surface")]
    Surface { width: i32, height: i32 },

    #[error("failed to encode {0}")]
    Encode(&'static str),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
