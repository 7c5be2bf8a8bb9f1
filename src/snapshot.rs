use std::cell::RefCell;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::pull_request::{Comment, PullRequest, PullRequestState};
use crate::violation::Line;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    /// Webhook action as written in the file. Kept verbatim so unknown
    /// actions survive a save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Lines touched by the head commit.
    #[serde(default)]
    pub head_lines: Vec<Line>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A pull request read from a JSON snapshot. Posted comments are kept in
/// memory until `save` writes them back.
pub struct SnapshotPullRequest {
    data: RefCell<SnapshotData>,
    posted: RefCell<Vec<Comment>>,
}

impl SnapshotPullRequest {
    pub fn new(data: SnapshotData) -> Self {
        Self {
            data: RefCell::new(data),
            posted: RefCell::new(Vec::new()),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::SnapshotNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let data: SnapshotData = serde_json::from_str(&content)
            .map_err(|e| Error::Snapshot(format!("failed to parse {}: {e}", path.display())))?;
        debug!(
            path = %path.display(),
            state = data.state.as_deref().unwrap_or_default(),
            comments = data.comments.len(),
            "loaded pull request snapshot"
        );
        Ok(Self::new(data))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(&*self.data.borrow())
            .map_err(|e| Error::Snapshot(format!("failed to serialize snapshot: {e}")))?;
        std::fs::write(path, content + "\n")?;
        Ok(())
    }

    /// Comments added since the snapshot was loaded, in posting order.
    pub fn posted(&self) -> Vec<Comment> {
        self.posted.borrow().clone()
    }

    pub fn data(&self) -> SnapshotData {
        self.data.borrow().clone()
    }
}

impl PullRequest for SnapshotPullRequest {
    fn state(&self) -> PullRequestState {
        PullRequestState::from_action(self.data.borrow().state.as_deref().unwrap_or_default())
    }

    fn head_includes(&self, line: &Line) -> Result<bool> {
        Ok(self.data.borrow().head_lines.contains(line))
    }

    fn comments(&self) -> Result<Vec<Comment>> {
        Ok(self.data.borrow().comments.clone())
    }

    fn add_comment(&self, filename: &str, position: u32, body: &str) -> Result<()> {
        let comment = Comment::new(filename, position, body);
        self.data.borrow_mut().comments.push(comment.clone());
        self.posted.borrow_mut().push(comment);
        Ok(())
    }
}
