//! # Rumor-Prep: data preparation helpers for rumor propagation trees
//!
//! Small parsing and encoding layer that sits between raw propagation-tree
//! datasets (one `<root id>.txt` file per tree, one edge per line) and the
//! model code that consumes them.
//!
//! ## Features
//!
//! - **Edges**: fixed-shape edge-line parser producing tweet/user ids and timestamps
//! - **Trees**: root-id extraction, tree-file enumeration, whole-tree loading
//! - **Labels**: one-hot and scalar-index encodings of the four veracity labels
//! - **Time**: calendar date text to day-granularity epoch timestamps
//! - **Config**: serializable dataset layout

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Edge-line parsing
pub mod edge;

/// Tree files: naming, enumeration and loading
pub mod tree;

/// Veracity label encodings
pub mod label;

/// Date text conversion
pub mod time;

/// Dataset layout configuration
pub mod config;

// Re-export commonly used types
pub use edge::{parse_edge_line, is_root_marker, Edge};
pub use tree::{get_root_id, get_tree_file_names, load_tree, load_trees, PropagationTree};
pub use label::{one_hot_label, to_label, Label, NUM_CLASSES};
pub use time::from_date_text_to_timestamp;
pub use config::DatasetLayout;

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum PrepError {
    /// Input text does not match the expected fixed-shape format
    #[error("Format error: {0}")]
    Format(String),

    /// IO error while reading tree or config files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PrepError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        PrepError::Format(msg.into())
    }
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, PrepError>;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        edge::{parse_edge_line, Edge},
        tree::{get_root_id, get_tree_file_names, load_tree, load_trees, PropagationTree},
        label::{one_hot_label, to_label, Label},
        time::from_date_text_to_timestamp,
        config::DatasetLayout,
        Result, PrepError,
    };
}
