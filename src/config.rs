//! Project configuration (shapesplit.yaml) parsing.
//!
//! Every field is optional; command-line flags override whatever the file
//! sets. Relative paths are resolved against the file's directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classify::ColourSpec;
use crate::error::{Result, SplitError};
use crate::extract::Connectivity;
use crate::naming::DEFAULT_SUFFIX;
use crate::types::Colour;

/// The name of the configuration file looked up by default.
pub const CONFIG_FILENAME: &str = "shapesplit.yaml";

/// Settings for a split run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Sprite sheet to split.
    pub source: Option<PathBuf>,

    /// Directory exported shapes are written under.
    pub output: PathBuf,

    /// Colour treated as empty space (`#hex` or `@x,y`).
    pub background: Option<ColourSpec>,

    /// Colour that joins shapes but is erased on export.
    pub glue: Option<ColourSpec>,

    /// 4- or 8-neighbour adjacency.
    pub connectivity: Connectivity,

    /// Canvas fill colour, overriding the background.
    pub fill: Option<Colour>,

    /// Naming table (YAML).
    pub names: Option<PathBuf>,

    /// Suffix appended to every leaf name in the naming table.
    pub suffix: String,

    /// Where to write the JSON listing of exported shapes.
    pub manifest: Option<PathBuf>,

    /// Pad exported shapes to squares after splitting.
    pub square: bool,
}

fn default_output() -> PathBuf {
    PathBuf::from("shapes")
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            source: None,
            output: default_output(),
            background: None,
            glue: None,
            connectivity: Connectivity::default(),
            fill: None,
            names: None,
            suffix: DEFAULT_SUFFIX.to_string(),
            manifest: None,
            square: false,
        }
    }
}

impl SplitConfig {
    /// Load configuration from a YAML file, resolving relative paths
    /// against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SplitError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        let config = Self::parse(&content)?;
        let base = path.parent().unwrap_or(Path::new(""));
        Ok(config.relative_to(base))
    }

    /// Load `shapesplit.yaml` from `dir` if it exists, defaults otherwise.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILENAME);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // An empty file deserializes as null rather than an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| SplitError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Rebase every relative path onto `base`.
    pub fn relative_to(mut self, base: &Path) -> Self {
        let rebase = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };

        self.source = self.source.map(rebase);
        self.output = rebase(self.output);
        self.names = self.names.map(rebase);
        self.manifest = self.manifest.map(rebase);
        self
    }
}
