//! Output naming for exported shapes.
//!
//! A nested naming file is flattened once, before any image work, into a
//! `NameTable` mapping each anchor point to a relative output path. Anchors
//! without an entry fall back to `shape_<row>_<col>.png`.
//!
//! ```yaml
//! delete:
//!   "0,0": __DELETE
//! towers:
//!   ice:
//!     "96,96": ice1
//!     "66,96": ice2
//! ```

mod tree;

pub use tree::{NamingKey, NamingNode};

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};


use crate::error::{Result, SplitError};
use crate::types::Point;

use tree::structure_error;

/// Leaf value marking a component that must not be written.
pub const DELETE_SENTINEL: &str = "__DELETE";

/// Suffix appended to leaf names when none is configured.
pub const DEFAULT_SUFFIX: &str = ".png";

/// What to do with the component at one anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameEntry {
    /// Write to this path, relative to the output root.
    Path(PathBuf),
    /// Skip the component entirely.
    Delete,
}

/// Flat anchor-to-path lookup.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    entries: BTreeMap<Point, NameEntry>,
}

impl NameTable {
    /// A table with no entries; every anchor gets a generated name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and flatten a naming file.
    pub fn load(path: &Path, suffix: &str) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| SplitError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read naming table: {}", e),
        })?;

        Self::parse(&source, suffix)
    }

    /// Parse and flatten naming YAML.
    pub fn parse(source: &str, suffix: &str) -> Result<Self> {
        Self::flatten(&NamingNode::parse(source)?, suffix)
    }

    /// Flatten a naming tree, joining group names from the root down and
    /// appending `suffix` to each leaf.
    pub fn flatten(root: &NamingNode, suffix: &str) -> Result<Self> {
        let mut table = Self::new();
        table.flatten_into(root, Path::new(""), suffix)?;
        Ok(table)
    }

    fn flatten_into(&mut self, node: &NamingNode, prefix: &Path, suffix: &str) -> Result<()> {
        let NamingNode::Group(children) = node else {
            return Err(structure_error(
                format!("'{}' must be a group of names", prefix.display()),
                None,
            ));
        };

        for (key, child) in children {
            match (key, child) {
                (NamingKey::Group(name), group @ NamingNode::Group(_)) => {
                    let dir = prefix.join(checked_relative(name)?);
                    self.flatten_into(group, &dir, suffix)?;
                }
                (NamingKey::Group(name), NamingNode::Leaf(_)) => {
                    return Err(structure_error(
                        format!("Group '{}' under '{}' maps to a leaf", name, prefix.display()),
                        None,
                    ));
                }
                (NamingKey::Anchor(point), NamingNode::Leaf(leaf)) => {
                    let entry = if leaf == DELETE_SENTINEL {
                        NameEntry::Delete
                    } else {
                        let file = format!("{}{}", leaf, suffix);
                        NameEntry::Path(prefix.join(checked_relative(&file)?))
                    };
                    self.insert(*point, entry)?;
                }
                (NamingKey::Anchor(point), NamingNode::Group(_)) => {
                    return Err(structure_error(
                        format!("Anchor {} under '{}' maps to a group", point, prefix.display()),
                        None,
                    ));
                }
            }
        }

        Ok(())
    }

    /// Add an entry, rejecting anchors that are already named.
    pub fn insert(&mut self, anchor: Point, entry: NameEntry) -> Result<()> {
        match self.entries.entry(anchor) {
            Entry::Vacant(slot) => {
                slot.insert(entry);
                Ok(())
            }
            Entry::Occupied(existing) => Err(structure_error(
                format!(
                    "Anchor {} is named twice: {} and {}",
                    anchor,
                    describe(existing.get()),
                    describe(&entry)
                ),
                Some("Each anchor may appear only once in the naming table".to_string()),
            )),
        }
    }

    /// The entry for `anchor`, if one was configured.
    pub fn lookup(&self, anchor: Point) -> Option<&NameEntry> {
        self.entries.get(&anchor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in row-major anchor order.
    pub fn iter(&self) -> impl Iterator<Item = (&Point, &NameEntry)> {
        self.entries.iter()
    }
}

/// Generated file name for an anchor with no table entry.
pub fn fallback_name(anchor: Point) -> PathBuf {
    PathBuf::from(format!("shape_{}_{}.png", anchor.row, anchor.col))
}

/// Ensure a name stays inside the output root.
fn checked_relative(name: &str) -> Result<&Path> {
    let path = Path::new(name);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

    if escapes {
        return Err(structure_error(
            format!("Name '{}' must be a relative path inside the output directory", name),
            Some("Remove leading '/' and any '..' segments".to_string()),
        ));
    }
    Ok(path)
}

fn describe(entry: &NameEntry) -> String {
    match entry {
        NameEntry::Path(path) => format!("'{}'", path.display()),
        NameEntry::Delete => DELETE_SENTINEL.to_string(),
    }
}
