//! Fixture loading and management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// A single fixture case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Kernel under test (`lngamma`, `bisect`, `softclip`, `savgol`).
    pub function: String,
    /// Kernel arguments.
    pub inputs: serde_json::Value,
    /// Expected output object.
    pub expected: serde_json::Value,
    /// Absolute tolerance floor for this case, on top of the active profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abs_tol: Option<f64>,
    /// Where the expected values come from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// A collection of fixture cases for one family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Family name.
    pub family: String,
    /// UTC timestamp of capture.
    pub captured_at: String,
    /// Individual cases.
    pub cases: Vec<FixtureCase>,
    /// File the set was loaded from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        let mut set = Self::from_json(&content).map_err(|source| HarnessError::Fixture {
            path: path.to_path_buf(),
            source,
        })?;
        set.source = Some(path.to_path_buf());
        Ok(set)
    }
}

/// Fixture files at `path`: the file itself, or every `*.json` directly under
/// a directory, sorted by name.
pub fn discover(path: &Path) -> Result<Vec<PathBuf>, HarnessError> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let p = entry?.path();
        if p.is_file() && p.extension().is_some_and(|ext| ext == "json") {
            files.push(p);
        }
    }
    if files.is_empty() {
        return Err(HarnessError::NoFixtures(path.to_path_buf()));
    }
    files.sort();
    Ok(files)
}
