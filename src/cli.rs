use clap::Parser;

/// review-commenter — post lint violations as inline pull request comments
#[derive(Parser, Debug, Clone)]
#[command(name = "review-commenter", version, about)]
pub struct Cli {
    /// JSON file with the file violations to comment on
    #[arg(long)]
    pub violations: String,

    /// JSON snapshot of the pull request under review
    #[arg(long = "pull-request", alias = "pr")]
    pub pull_request: String,

    /// Path to config file (default: .review-commenter.toml)
    #[arg(long)]
    pub config: Option<String>,

    /// How existing comments are matched for duplicates (exact, contains)
    #[arg(long)]
    pub duplicate_match: Option<String>,

    /// Print the comments that would be posted without updating the snapshot
    #[arg(long)]
    pub dry_run: bool,
}
