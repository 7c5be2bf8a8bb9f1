pub mod cli;
pub mod commenter;
pub mod config;
pub mod error;
pub mod policy;
pub mod pull_request;
pub mod snapshot;
pub mod violation;
