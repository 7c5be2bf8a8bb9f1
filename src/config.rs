use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::policy::DuplicateMatch;

pub const DEFAULT_CONFIG_PATH: &str = ".review-commenter.toml";

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub duplicate_match: Option<String>,
    pub dry_run: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub violations: PathBuf,
    pub pull_request: PathBuf,
    pub duplicate_match: DuplicateMatch,
    pub dry_run: bool,
}

impl Config {
    /// Load the config file and merge CLI overrides on top. A missing default
    /// config file is fine; a missing explicit one is not.
    pub fn load(cli: &Cli) -> Result<Self> {
        let file_config = match cli.config.as_deref() {
            Some(path) => {
                let path = Path::new(path);
                if !path.exists() {
                    return Err(Error::ConfigNotFound(path.to_path_buf()));
                }
                parse_config(&std::fs::read_to_string(path)?)?
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    parse_config(&std::fs::read_to_string(path)?)?
                } else {
                    ConfigFile::default()
                }
            }
        };

        merge(file_config, cli)
    }
}

pub fn parse_config(content: &str) -> Result<ConfigFile> {
    let config: ConfigFile = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ConfigFile) -> Result<()> {
    if let Some(ref duplicate_match) = config.duplicate_match {
        duplicate_match.parse::<DuplicateMatch>()?;
    }
    Ok(())
}

pub fn merge(file: ConfigFile, cli: &Cli) -> Result<Config> {
    let duplicate_match = match cli
        .duplicate_match
        .as_deref()
        .or(file.duplicate_match.as_deref())
    {
        Some(value) => value.parse()?,
        None => DuplicateMatch::default(),
    };
    Ok(Config {
        violations: PathBuf::from(&cli.violations),
        pull_request: PathBuf::from(&cli.pull_request),
        duplicate_match,
        dry_run: cli.dry_run || file.dry_run.unwrap_or(false),
    })
}
