#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use review_commenter::error::{Error, Result};
use review_commenter::policy::{CommentingPolicy, PolicyFactory};
use review_commenter::pull_request::{Comment, PullRequest, PullRequestState};
use review_commenter::violation::{FileViolation, Line, LineViolation};

// --- Shared tracking state ---

#[derive(Default)]
pub struct PullRequestTracker {
    pub added: Vec<(String, u32, String)>,
    pub head_checks: Vec<Line>,
    pub comment_fetches: usize,
}

// --- Mock implementations ---

pub struct MockPullRequest {
    pub state: PullRequestState,
    pub head_includes: bool,
    pub comments: Vec<Comment>,
    pub fail_add_comment: Option<String>,
    pub fail_head_includes: Option<String>,
    pub tracker: Arc<Mutex<PullRequestTracker>>,
}

impl MockPullRequest {
    pub fn new(state: PullRequestState) -> Self {
        Self {
            state,
            head_includes: false,
            comments: Vec::new(),
            fail_add_comment: None,
            fail_head_includes: None,
            tracker: Arc::new(Mutex::new(PullRequestTracker::default())),
        }
    }

    pub fn opened() -> Self {
        Self::new(PullRequestState::Opened)
    }

    pub fn synchronized(head_includes: bool) -> Self {
        Self {
            head_includes,
            ..Self::new(PullRequestState::Synchronize)
        }
    }

    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments = comments;
        self
    }

    pub fn added(&self) -> Vec<(String, u32, String)> {
        self.tracker.lock().unwrap().added.clone()
    }

    pub fn head_checks(&self) -> Vec<Line> {
        self.tracker.lock().unwrap().head_checks.clone()
    }

    pub fn comment_fetches(&self) -> usize {
        self.tracker.lock().unwrap().comment_fetches
    }
}

impl PullRequest for MockPullRequest {
    fn state(&self) -> PullRequestState {
        self.state
    }

    fn head_includes(&self, line: &Line) -> Result<bool> {
        if let Some(ref msg) = self.fail_head_includes {
            return Err(Error::PullRequest(msg.clone()));
        }
        self.tracker.lock().unwrap().head_checks.push(*line);
        Ok(self.head_includes)
    }

    fn comments(&self) -> Result<Vec<Comment>> {
        self.tracker.lock().unwrap().comment_fetches += 1;
        Ok(self.comments.clone())
    }

    fn add_comment(&self, filename: &str, position: u32, body: &str) -> Result<()> {
        if let Some(ref msg) = self.fail_add_comment {
            return Err(Error::PullRequest(msg.clone()));
        }
        self.tracker
            .lock()
            .unwrap()
            .added
            .push((filename.to_string(), position, body.to_string()));
        Ok(())
    }
}

/// Policy returning a fixed answer and recording every candidate it sees.
pub struct StubPolicy {
    permitted: std::result::Result<bool, String>,
    checked: Arc<Mutex<Vec<Comment>>>,
}

impl CommentingPolicy for StubPolicy {
    fn comment_permitted(
        &self,
        _pull_request: &dyn PullRequest,
        candidate: &Comment,
    ) -> Result<bool> {
        self.checked.lock().unwrap().push(candidate.clone());
        self.permitted.clone().map_err(Error::PullRequest)
    }
}

#[derive(Clone)]
pub struct StubPolicyFactory {
    permitted: std::result::Result<bool, String>,
    pub created: Arc<AtomicUsize>,
    pub checked: Arc<Mutex<Vec<Comment>>>,
}

impl StubPolicyFactory {
    pub fn permitting(permitted: bool) -> Self {
        Self {
            permitted: Ok(permitted),
            created: Arc::new(AtomicUsize::new(0)),
            checked: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            permitted: Err(msg.to_string()),
            ..Self::permitting(true)
        }
    }

    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn checked(&self) -> Vec<Comment> {
        self.checked.lock().unwrap().clone()
    }
}

impl PolicyFactory for StubPolicyFactory {
    type Policy = StubPolicy;

    fn create_policy(&self) -> StubPolicy {
        self.created.fetch_add(1, Ordering::SeqCst);
        StubPolicy {
            permitted: self.permitted.clone(),
            checked: Arc::clone(&self.checked),
        }
    }
}

// --- Fixtures ---

pub fn line_violation(line_number: u32, patch_position: u32, messages: &[&str]) -> LineViolation {
    LineViolation::new(
        Line::new(line_number, patch_position),
        messages.iter().map(|m| m.to_string()).collect(),
    )
    .unwrap()
}

/// `test.rb`, line 10 at patch position 2, "Trailing whitespace".
pub fn trailing_whitespace_violation() -> FileViolation {
    FileViolation::new(
        "test.rb",
        vec![line_violation(10, 2, &["Trailing whitespace"])],
    )
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
