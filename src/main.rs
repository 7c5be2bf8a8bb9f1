use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use review_commenter::cli::Cli;
use review_commenter::commenter::Commenter;
use review_commenter::config::Config;
use review_commenter::error::Result;
use review_commenter::policy::DefaultPolicyFactory;
use review_commenter::snapshot::SnapshotPullRequest;
use review_commenter::violation::load_violations;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

fn run(config: &Config) -> Result<()> {
    let violations = load_violations(&config.violations)?;
    let pull_request = SnapshotPullRequest::load(&config.pull_request)?;

    let commenter =
        Commenter::with_policy_factory(DefaultPolicyFactory::new(config.duplicate_match));
    let summary = commenter.comment_on_violations(&violations, &pull_request)?;

    let posted = pull_request.posted();
    for comment in &posted {
        println!("{}:{}: {}", comment.path, comment.position, comment.body);
    }

    if config.dry_run {
        info!(posted = summary.posted, "dry run, snapshot left unchanged");
    } else if !posted.is_empty() {
        pull_request.save(&config.pull_request)?;
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let config = match Config::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    info!(?config, "config loaded");

    if let Err(e) = run(&config) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
