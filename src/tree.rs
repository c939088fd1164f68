//! Tree files: root ids, enumeration and loading
//!
//! A dataset directory holds one file per propagation tree under
//! `<datadir>/tree/<root id>.txt`. Each file starts with a `ROOT` header line
//! followed by one edge line per retweet/reply.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::DatasetLayout;
use crate::edge::{is_root_marker, Edge};
use crate::{PrepError, Result};

/// Root id of the tree stored at `tree_file_name`.
///
/// The base name with its last extension stripped must be an integer literal.
/// The path is not touched on disk.
pub fn get_root_id<P: AsRef<Path>>(tree_file_name: P) -> Result<i64> {
    let raw = tree_file_name.as_ref().to_string_lossy();

    // Base name is the raw text after the last separator, so `.` and trailing
    // separators are kept rather than normalized away.
    let base = raw
        .rsplit(|c: char| c == '/' || c == std::path::MAIN_SEPARATOR)
        .next()
        .unwrap_or_default();
    if base.is_empty() {
        return Err(PrepError::format(format!(
            "tree file name {:?} has no base name",
            raw
        )));
    }

    // Leading dots do not start an extension.
    let stem = match base.rfind('.') {
        Some(dot) if base[..dot].chars().any(|c| c != '.') => &base[..dot],
        _ => base,
    };

    stem.trim().parse::<i64>().map_err(|e| {
        PrepError::format(format!(
            "tree file stem {:?} of {:?} is not an integer: {}",
            stem, raw, e
        ))
    })
}

/// Paths of all `<datadir>/tree/*.txt` files.
///
/// Order follows the filesystem and is not sorted; sort at the call site when
/// a deterministic order matters. A missing or unreadable `tree` directory
/// yields an empty list.
pub fn get_tree_file_names<P: AsRef<Path>>(datadir: P) -> Vec<PathBuf> {
    DatasetLayout::default().tree_file_names(datadir)
}

/// List files named `*.<extension>` directly inside `dir`, skipping hidden files.
pub(crate) fn list_files_with_extension(dir: &Path, extension: &str) -> Vec<PathBuf> {
    if !dir.is_dir() {
        debug!("tree directory {} does not exist", dir.display());
        return Vec::new();
    }

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') {
            continue;
        }

        if entry.path().extension().map_or(false, |ext| ext == extension) {
            files.push(entry.into_path());
        }
    }

    debug!("found {} tree files in {}", files.len(), dir.display());
    files
}

/// A propagation tree read from disk
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropagationTree {
    /// Id of the source post, taken from the file name
    pub root_id: i64,
    /// Edges in file order, header line excluded
    pub edges: Vec<Edge>,
}

impl PropagationTree {
    /// Parse the text of a tree file.
    ///
    /// Blank lines and the `ROOT` header are skipped; every other line must be
    /// a well-formed edge.
    pub fn from_text(root_id: i64, text: &str) -> Result<Self> {
        let mut edges = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || is_root_marker(line) {
                continue;
            }

            let edge = Edge::parse(line).map_err(|e| match e {
                PrepError::Format(msg) => {
                    PrepError::Format(format!("tree {} line {}: {}", root_id, idx + 1, msg))
                }
                other => other,
            })?;
            edges.push(edge);
        }

        Ok(PropagationTree { root_id, edges })
    }

    /// Number of edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Check if the tree has no edges
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Latest destination timestamp, or `None` for an empty tree
    pub fn max_time(&self) -> Option<f64> {
        self.edges.iter().map(|e| e.time_out).reduce(f64::max)
    }
}

/// Read and parse a single tree file.
pub fn load_tree<P: AsRef<Path>>(path: P) -> Result<PropagationTree> {
    let path = path.as_ref();
    let root_id = get_root_id(path)?;
    let text = fs::read_to_string(path)?;
    let tree = PropagationTree::from_text(root_id, &text)?;

    debug!("loaded tree {} with {} edges", root_id, tree.len());
    Ok(tree)
}

/// Load every tree under `<datadir>/tree`, in parallel.
///
/// Trees come back sorted by root id. The first failing file aborts the load.
pub fn load_trees<P: AsRef<Path>>(datadir: P) -> Result<Vec<PropagationTree>> {
    load_trees_with_layout(datadir, &DatasetLayout::default())
}

/// [`load_trees`] for a non-default dataset layout.
pub fn load_trees_with_layout<P: AsRef<Path>>(
    datadir: P,
    layout: &DatasetLayout,
) -> Result<Vec<PropagationTree>> {
    let files = layout.tree_file_names(datadir);

    let mut trees = files
        .par_iter()
        .map(load_tree)
        .collect::<Result<Vec<_>>>()?;
    trees.sort_by_key(|tree| tree.root_id);

    Ok(trees)
}
