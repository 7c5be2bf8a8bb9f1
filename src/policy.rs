use std::cell::RefCell;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::pull_request::{Comment, PullRequest};

/// Decides whether a candidate comment may be posted right now.
pub trait CommentingPolicy {
    fn comment_permitted(&self, pull_request: &dyn PullRequest, candidate: &Comment)
    -> Result<bool>;

    /// Called after `candidate` was posted, so later decisions in the same
    /// run can see it.
    fn comment_posted(&self, _comment: &Comment) {}
}

/// Builds the policy a `Commenter` consults. Override in tests to inject a
/// stub policy.
pub trait PolicyFactory {
    type Policy: CommentingPolicy;

    fn create_policy(&self) -> Self::Policy;
}

/// How an existing comment body is compared against a candidate body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateMatch {
    /// Bodies are equal after trimming whitespace.
    #[default]
    Exact,
    /// The existing body contains the candidate body.
    Contains,
}

impl DuplicateMatch {
    /// A blank candidate never matches anything.
    fn matches(self, existing: &str, candidate: &str) -> bool {
        if candidate.trim().is_empty() {
            return false;
        }
        match self {
            DuplicateMatch::Exact => existing.trim() == candidate.trim(),
            DuplicateMatch::Contains => existing.contains(candidate.trim()),
        }
    }
}

impl FromStr for DuplicateMatch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "exact" => Ok(DuplicateMatch::Exact),
            "contains" => Ok(DuplicateMatch::Contains),
            other => Err(Error::ConfigValidation(format!(
                "unknown duplicate_match: {other} (expected: exact, contains)"
            ))),
        }
    }
}

impl fmt::Display for DuplicateMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicateMatch::Exact => write!(f, "exact"),
            DuplicateMatch::Contains => write!(f, "contains"),
        }
    }
}

/// Refuses to repeat a comment already present at the same file and position.
///
/// Existing comments are fetched on the first decision and cached for the
/// lifetime of the policy; comments posted afterwards are appended through
/// `comment_posted`.
#[derive(Debug, Default)]
pub struct DuplicateCommentPolicy {
    duplicate_match: DuplicateMatch,
    known: RefCell<Option<Vec<Comment>>>,
}

impl DuplicateCommentPolicy {
    pub fn new(duplicate_match: DuplicateMatch) -> Self {
        Self {
            duplicate_match,
            known: RefCell::new(None),
        }
    }
}

impl CommentingPolicy for DuplicateCommentPolicy {
    fn comment_permitted(
        &self,
        pull_request: &dyn PullRequest,
        candidate: &Comment,
    ) -> Result<bool> {
        if self.known.borrow().is_none() {
            let comments = pull_request.comments()?;
            *self.known.borrow_mut() = Some(comments);
        }
        let known = self.known.borrow();
        let duplicate = known.iter().flatten().any(|existing| {
            existing.path == candidate.path
                && existing.position == candidate.position
                && self.duplicate_match.matches(&existing.body, &candidate.body)
        });
        Ok(!duplicate)
    }

    fn comment_posted(&self, comment: &Comment) {
        if let Some(known) = self.known.borrow_mut().as_mut() {
            known.push(comment.clone());
        }
    }
}

/// Default factory producing a `DuplicateCommentPolicy`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicyFactory {
    pub duplicate_match: DuplicateMatch,
}

impl DefaultPolicyFactory {
    pub fn new(duplicate_match: DuplicateMatch) -> Self {
        Self { duplicate_match }
    }
}

impl PolicyFactory for DefaultPolicyFactory {
    type Policy = DuplicateCommentPolicy;

    fn create_policy(&self) -> DuplicateCommentPolicy {
        DuplicateCommentPolicy::new(self.duplicate_match)
    }
}
