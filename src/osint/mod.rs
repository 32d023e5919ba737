//! The OSINT category tree and its startup loader.
//!
//! The tree is read once from a JSON document shaped like
//! `{"name": .., "type": "folder", "children": [..]}`. A missing or broken
//! file never stops the server; the loader substitutes a placeholder tree
//! whose single child carries the error message.

pub mod presenter;
pub mod search;

use std::{
    borrow::Cow,
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{error, info};

pub const ERROR_MARKER: &str = "Error";
pub const UNKNOWN_CATEGORY: &str = "Unknown Category";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Folder,
    Item,
    Url,
    Other(Cow<'static, str>),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Folder => "folder",
            NodeKind::Item => "item",
            NodeKind::Url => "url",
            NodeKind::Other(value) => value.as_ref(),
        }
    }
}

impl From<&str> for NodeKind {
    fn from(value: &str) -> Self {
        match value {
            "folder" => NodeKind::Folder,
            "item" => NodeKind::Item,
            "url" => NodeKind::Url,
            other => NodeKind::Other(Cow::Owned(other.to_string())),
        }
    }
}

impl Serialize for NodeKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(NodeKind::from(value.as_str()))
    }
}

/// One node of the category tree. Fields the dashboard does not interpret are
/// kept in `extra` so the tree re-serializes without loss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OsintNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<NodeKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<OsintNode>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OsintNode {
    pub fn folder(name: impl Into<String>, children: Vec<OsintNode>) -> Self {
        Self {
            name: Some(name.into()),
            kind: Some(NodeKind::Folder),
            children: Some(children),
            ..Self::default()
        }
    }

    pub fn item(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            kind: Some(NodeKind::Item),
            ..Self::default()
        }
    }

    /// Placeholder tree served when the data file cannot be loaded.
    pub fn error_tree(message: impl Into<String>) -> Self {
        Self::folder(ERROR_MARKER, vec![Self::item(message)])
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_CATEGORY)
    }

    pub fn children(&self) -> &[OsintNode] {
        self.children.as_deref().unwrap_or_default()
    }

    pub fn is_error_marker(&self) -> bool {
        self.name.as_deref() == Some(ERROR_MARKER)
    }

    /// The failure message carried by a placeholder tree.
    pub fn error_message(&self) -> Option<&str> {
        if !self.is_error_marker() {
            return None;
        }
        self.children().first().and_then(|child| child.name.as_deref())
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{file} not found at {}", path.display())]
    DataFileMissing { file: String, path: PathBuf },
    #[error("Error loading {file}: {reason}")]
    DataFileInvalid { file: String, reason: String },
}

impl LoadError {
    /// Text placed in the placeholder tree's only child.
    pub fn placeholder_message(&self) -> String {
        match self {
            LoadError::DataFileMissing { file, .. } => format!("{file} not found"),
            LoadError::DataFileInvalid { .. } => self.to_string(),
        }
    }
}

pub fn try_load_osint_data(path: &Path) -> Result<OsintNode, LoadError> {
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let raw = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => LoadError::DataFileMissing {
            file: file.clone(),
            path: path.to_path_buf(),
        },
        _ => LoadError::DataFileInvalid {
            file: file.clone(),
            reason: err.to_string(),
        },
    })?;

    serde_json::from_str(&raw).map_err(|err| LoadError::DataFileInvalid {
        file,
        reason: err.to_string(),
    })
}

/// Loads the tree, degrading to [`OsintNode::error_tree`] on any failure.
pub fn load_osint_data(path: &Path) -> OsintNode {
    match try_load_osint_data(path) {
        Ok(tree) => {
            info!(
                path = %path.display(),
                categories = tree.children().len(),
                "loaded OSINT data"
            );
            tree
        }
        Err(err) => {
            error!(%err, "failed to load OSINT data");
            OsintNode::error_tree(err.placeholder_message())
        }
    }
}
