use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A source line, identified both by its raw line number and by its offset
/// within the unified diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Line {
    pub line_number: u32,
    /// Position within the patch (1-based). `None` when the line is not part
    /// of the diff.
    #[serde(default)]
    pub patch_position: Option<u32>,
}

impl Line {
    pub fn new(line_number: u32, patch_position: u32) -> Self {
        Self {
            line_number,
            patch_position: Some(patch_position),
        }
    }

    /// A line that exists in the file but not in the diff.
    pub fn outside_patch(line_number: u32) -> Self {
        Self {
            line_number,
            patch_position: None,
        }
    }
}

#[derive(Deserialize)]
struct RawLineViolation {
    line: Line,
    messages: Vec<String>,
}

/// A violation on a single line. Always carries at least one non-blank
/// message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawLineViolation")]
pub struct LineViolation {
    line: Line,
    messages: Vec<String>,
}

impl LineViolation {
    pub fn new(line: Line, messages: Vec<String>) -> Result<Self> {
        if messages.is_empty() {
            return Err(Error::Violations(format!(
                "line {} has a violation with no messages",
                line.line_number
            )));
        }
        if messages.iter().any(|m| m.trim().is_empty()) {
            return Err(Error::Violations(format!(
                "line {} has a blank violation message",
                line.line_number
            )));
        }
        Ok(Self { line, messages })
    }

    pub fn line(&self) -> &Line {
        &self.line
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl TryFrom<RawLineViolation> for LineViolation {
    type Error = Error;

    fn try_from(raw: RawLineViolation) -> Result<Self> {
        LineViolation::new(raw.line, raw.messages)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileViolation {
    pub filename: String,
    #[serde(default)]
    pub line_violations: Vec<LineViolation>,
}

impl FileViolation {
    pub fn new(filename: impl Into<String>, line_violations: Vec<LineViolation>) -> Self {
        Self {
            filename: filename.into(),
            line_violations,
        }
    }
}

/// Load a JSON array of file violations.
pub fn load_violations(path: &Path) -> Result<Vec<FileViolation>> {
    if !path.exists() {
        return Err(Error::ViolationsNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    parse_violations(&content)
}

pub fn parse_violations(content: &str) -> Result<Vec<FileViolation>> {
    serde_json::from_str(content)
        .map_err(|e| Error::Violations(format!("failed to parse violations: {e}")))
}
