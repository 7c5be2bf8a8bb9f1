use tracing::{debug, info};

use crate::error::Result;
use crate::policy::{CommentingPolicy, DefaultPolicyFactory, PolicyFactory};
use crate::pull_request::{Comment, PullRequest};
use crate::violation::{FileViolation, Line};

/// Counts from one `comment_on_violations` pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentSummary {
    pub posted: usize,
    pub skipped: usize,
}

/// Posts inline comments for violations that the pull request state and the
/// commenting policy allow.
pub struct Commenter<F = DefaultPolicyFactory> {
    policy_factory: F,
}

impl Commenter {
    pub fn new() -> Self {
        Self {
            policy_factory: DefaultPolicyFactory::default(),
        }
    }
}

impl Default for Commenter {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PolicyFactory> Commenter<F> {
    pub fn with_policy_factory(policy_factory: F) -> Self {
        Self { policy_factory }
    }

    /// Walk every message of every line violation and post it as its own
    /// comment when eligible.
    ///
    /// The policy is built at most once per call, on the first candidate that
    /// passes the state check. Collaborator errors abort the walk; comments
    /// already posted stay posted.
    pub fn comment_on_violations(
        &self,
        file_violations: &[FileViolation],
        pull_request: &dyn PullRequest,
    ) -> Result<CommentSummary> {
        let mut summary = CommentSummary::default();
        let mut policy: Option<F::Policy> = None;

        for file_violation in file_violations {
            let filename = file_violation.filename.as_str();

            for line_violation in &file_violation.line_violations {
                let line = line_violation.line();
                let messages = line_violation.messages();

                let Some(position) = line.patch_position else {
                    debug!(
                        file = filename,
                        line = line.line_number,
                        reason = "no_patch_position",
                        "skipping violation"
                    );
                    summary.skipped += messages.len();
                    continue;
                };

                if let Some(reason) = ineligible_reason(pull_request, line)? {
                    debug!(
                        file = filename,
                        line = line.line_number,
                        reason,
                        "skipping violation"
                    );
                    summary.skipped += messages.len();
                    continue;
                }

                for message in messages {
                    let candidate = Comment::new(filename, position, message.as_str());
                    let policy =
                        policy.get_or_insert_with(|| self.policy_factory.create_policy());

                    if !policy.comment_permitted(pull_request, &candidate)? {
                        debug!(
                            file = filename,
                            position,
                            reason = "policy_denied",
                            "skipping comment"
                        );
                        summary.skipped += 1;
                        continue;
                    }

                    pull_request.add_comment(filename, position, message)?;
                    policy.comment_posted(&candidate);
                    info!(file = filename, position, body = %message, "posted comment");
                    summary.posted += 1;
                }
            }
        }

        if !file_violations.is_empty() {
            info!(
                posted = summary.posted,
                skipped = summary.skipped,
                "finished commenting"
            );
        }
        Ok(summary)
    }
}

/// Opened pull requests get every violation; synchronized ones only those on
/// lines touched by the head commit.
fn ineligible_reason(pull_request: &dyn PullRequest, line: &Line) -> Result<Option<&'static str>> {
    if pull_request.opened() {
        Ok(None)
    } else if pull_request.synchronize() {
        if pull_request.head_includes(line)? {
            Ok(None)
        } else {
            Ok(Some("not_in_head"))
        }
    } else {
        Ok(Some("state"))
    }
}
