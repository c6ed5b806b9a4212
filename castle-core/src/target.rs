//! Target records: the points of interest shown on the map.
//!
//! Targets are declared in TOML as an array of `[[target]]` tables and are
//! read-only once loaded. Loading is forgiving about individual entries: a
//! target whose position is not numeric, or whose id repeats an earlier one,
//! is dropped with a warning instead of failing the whole set.
//!
//! ```toml
//! [[target]]
//! id = "t1"
//! title = "Sheriff Callahan"
//! x = 50
//! y = "50"
//! address = "325 Colton Rd"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Title used when a target has neither a title nor a label.
pub const FALLBACK_TITLE: &str = "Info";

/// Errors raised while loading a target set.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("failed to read targets from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed targets file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Unique identifier of a target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct TargetId(String);

impl TargetId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TargetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TargetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position as percentages of the container's width and height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A point of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub id: TargetId,
    pub title: String,
    pub position: Position,
    pub address: Option<String>,
    pub work: Option<String>,
    pub notes: Option<String>,
}

impl Target {
    /// Inline style placing the marker inside its container.
    pub fn marker_style(&self) -> String {
        format!("left: {}%; top: {}%;", self.position.x, self.position.y)
    }
}

/// Targets in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetSet {
    targets: Vec<Target>,
}

#[derive(Debug, Deserialize)]
struct TargetFile {
    #[serde(default)]
    target: Vec<RawTarget>,
}

#[derive(Debug, Deserialize)]
struct RawTarget {
    id: Option<String>,
    title: Option<String>,
    label: Option<String>,
    x: Option<toml::Value>,
    y: Option<toml::Value>,
    address: Option<String>,
    work: Option<String>,
    notes: Option<String>,
}

impl TargetSet {
    pub fn new(targets: Vec<Target>) -> Self {
        Self { targets }
    }

    /// Parse a TOML target list.
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML only. Entries with a non-numeric position are
    /// skipped, and so is any entry reusing an earlier id.
    pub fn from_toml_str(source: &str) -> Result<Self, TargetError> {
        let file: TargetFile = toml::from_str(source)?;
        let mut targets: Vec<Target> = Vec::with_capacity(file.target.len());

        for (index, raw) in file.target.into_iter().enumerate() {
            let Some(target) = raw.into_target(index) else {
                continue;
            };
            if targets.iter().any(|existing| existing.id == target.id) {
                warn!(target_id = %target.id, "skipping target with duplicate id");
                continue;
            }
            targets.push(target);
        }

        Ok(Self { targets })
    }

    /// Load a target list from a TOML file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or does not parse.
    pub fn load(path: &Path) -> Result<Self, TargetError> {
        let source = std::fs::read_to_string(path).map_err(|source| TargetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn get(&self, id: &TargetId) -> Option<&Target> {
        self.targets.iter().find(|target| &target.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl RawTarget {
    fn into_target(self, index: usize) -> Option<Target> {
        let id = non_empty(self.id).unwrap_or_else(|| format!("target-{}", index + 1));

        let (Some(x), Some(y)) = (
            self.x.as_ref().and_then(percent),
            self.y.as_ref().and_then(percent),
        ) else {
            warn!(target_id = %id, "skipping target with non-numeric position");
            return None;
        };

        let title = non_empty(self.title)
            .or_else(|| non_empty(self.label))
            .unwrap_or_else(|| FALLBACK_TITLE.to_string());

        Some(Target {
            id: TargetId(id),
            title,
            position: Position { x, y },
            address: non_empty(self.address),
            work: non_empty(self.work),
            notes: non_empty(self.notes),
        })
    }
}

/// Read a percentage from a TOML number or numeric string.
#[allow(clippy::cast_precision_loss)]
fn percent(value: &toml::Value) -> Option<f64> {
    let number = match value {
        toml::Value::Integer(int) => *int as f64,
        toml::Value::Float(float) => *float,
        toml::Value::String(text) => text.trim().trim_end_matches('%').trim().parse().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
