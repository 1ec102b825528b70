//! Error types for dataset loading and scene flow.
//!
//! Defined in `impara-core` so callers can downcast an `anyhow::Error` and
//! tell a bad dataset apart from a broken scene graph.

use std::path::PathBuf;

use thiserror::Error;

use crate::flow::SceneId;

/// Where inside a dataset file a record was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLocation {
    /// 1-based line of a JSON-Lines file.
    Line(usize),
    /// 0-based index into a JSON array.
    Index(usize),
}

impl std::fmt::Display for RecordLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordLocation::Line(line) => write!(f, "line {line}"),
            RecordLocation::Index(index) => write!(f, "index {index}"),
        }
    }
}

/// Errors that can occur while loading a verb, noun, or adjective dataset.
#[derive(Debug, Error)]
pub enum DataError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid JSON array of the expected record type.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// One line of a JSON-Lines file is not a valid record.
    #[error("failed to parse {} (line {line}): {source}", .path.display())]
    ParseLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A record parsed but broke a schema rule.
    #[error("Schema validation failed in {} at {location} ({item}): {reason}", .path.display())]
    Invalid {
        path: PathBuf,
        location: RecordLocation,
        item: String,
        reason: String,
    },
}

/// Errors raised by the scene flow runner.
#[derive(Debug, Error)]
pub enum FlowError {
    /// No scene is registered under the requested identifier.
    #[error("no scene registered for key: {0}")]
    UnknownScene(SceneId),

    /// A transition reached a scene without the state it needs.
    #[error("scene {scene} requires {field}, but it has not been selected")]
    MissingState { scene: SceneId, field: &'static str },
}
