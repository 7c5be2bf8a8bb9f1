use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    ConfigValidation(String),

    #[error("violations file not found: {0}")]
    ViolationsNotFound(PathBuf),

    #[error("violations error: {0}")]
    Violations(String),

    #[error("pull request snapshot not found: {0}")]
    SnapshotNotFound(PathBuf),

    #[error("pull request snapshot error: {0}")]
    Snapshot(String),

    #[error("pull request error: {0}")]
    PullRequest(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
