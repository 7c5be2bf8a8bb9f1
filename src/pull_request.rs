use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::violation::Line;

/// The webhook action that triggered the review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PullRequestState {
    /// First review of a new pull request.
    Opened,
    /// A new commit was pushed to an existing pull request.
    Synchronize,
    /// Any other action (closed, labeled, ...). Nothing is posted.
    #[default]
    Other,
}

impl PullRequestState {
    /// Map a webhook action string (`"opened"`, `"synchronize"`, ...).
    pub fn from_action(action: &str) -> Self {
        match action {
            "opened" => PullRequestState::Opened,
            "synchronize" => PullRequestState::Synchronize,
            _ => PullRequestState::Other,
        }
    }
}

/// A review comment anchored to a patch position in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub path: String,
    pub position: u32,
    pub body: String,
}

impl Comment {
    pub fn new(path: impl Into<String>, position: u32, body: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            position,
            body: body.into(),
        }
    }
}

/// The pull request under review. Implementations own the comment list and
/// whatever transport is needed to reach the hosting service.
pub trait PullRequest {
    fn state(&self) -> PullRequestState;

    fn opened(&self) -> bool {
        self.state() == PullRequestState::Opened
    }

    fn synchronize(&self) -> bool {
        self.state() == PullRequestState::Synchronize
    }

    /// Whether `line` was touched by the head commit.
    fn head_includes(&self, line: &Line) -> Result<bool>;

    /// Comments already present on the pull request.
    fn comments(&self) -> Result<Vec<Comment>>;

    /// Post an inline comment at a patch position.
    fn add_comment(&self, filename: &str, position: u32, body: &str) -> Result<()>;
}
