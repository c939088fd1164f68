//! Dataset layout configuration

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::tree::list_files_with_extension;
use crate::Result;

/// Where tree files live inside a dataset directory
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetLayout {
    /// Subdirectory holding one file per tree
    pub tree_dir: String,
    /// Extension of tree files, without the dot
    pub extension: String,
}

impl Default for DatasetLayout {
    fn default() -> Self {
        DatasetLayout {
            tree_dir: "tree".to_string(),
            extension: "txt".to_string(),
        }
    }
}

impl DatasetLayout {
    /// Directory holding the tree files of `datadir`
    pub fn tree_path<P: AsRef<Path>>(&self, datadir: P) -> PathBuf {
        datadir.as_ref().join(&self.tree_dir)
    }

    /// Tree files of `datadir`, in filesystem order
    pub fn tree_file_names<P: AsRef<Path>>(&self, datadir: P) -> Vec<PathBuf> {
        list_files_with_extension(&self.tree_path(datadir), &self.extension)
    }

    /// Save layout to a JSON file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Load layout from a JSON file; missing fields take their defaults
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
