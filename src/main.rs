mod assign;
mod config;
mod github;
mod pr;

use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;

use config::Config;
use github::{DryRunSink, GithubClient, SubmissionSink};

/// pr-assign — deterministically picks reviewers and assignees for a GitHub
/// Pull Request from a YAML config stored in the repository, and submits
/// them through the GitHub API. The same PR always gets the same picks.
#[derive(Parser, Debug)]
#[command(name = "pr-assign", version, about)]
struct Cli {
    /// GitHub Pull Request URL (e.g., https://github.com/org/repo/pull/42)
    pr_url: String,

    /// Path of the assignment config inside the target repository
    #[arg(long, default_value = ".github/auto_assign.yml")]
    config_path: String,

    /// Git ref to read the config from (defaults to the default branch)
    #[arg(long)]
    r#ref: Option<String>,

    /// Local YAML file to use instead of fetching the config from the repo
    #[arg(long)]
    config_file: Option<PathBuf>,

    /// Print the planned reviewer/assignee lists instead of submitting them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let _main_span = info_span!("pr_assign", pr_url = %cli.pr_url).entered();

    info!("parsing PR URL");
    let pr_url = pr::parse_pr_url(&cli.pr_url)?;
    debug!(owner = %pr_url.owner, repo = %pr_url.repo, pr = pr_url.pr_number, "parsed PR URL");

    let client = GithubClient::from_env()?;

    info!("fetching pull request from GitHub");
    let pull_request = client.fetch_pull_request(&pr_url).await?;
    info!(title = %pull_request.title, author = %pull_request.author, "fetched PR metadata");

    let config_text = match &cli.config_file {
        Some(path) => {
            info!(path = %path.display(), "loading configuration from local file");
            std::fs::read_to_string(path)?
        }
        None => {
            info!(path = %cli.config_path, "fetching configuration from repository");
            client
                .fetch_config(&pr_url, &cli.config_path, cli.r#ref.as_deref())
                .await?
        }
    };
    let config = Config::from_yaml(&config_text)?;
    config.validate()?;

    if assign::keywords::includes_skip_keywords(&pull_request.title, &config.skip_keywords) {
        info!(title = %pull_request.title, "title matches a skip keyword, not assigning anyone");
        return Ok(());
    }
    if pull_request.draft && !config.run_on_draft {
        info!("PR is a draft and runOnDraft is off, not assigning anyone");
        return Ok(());
    }

    info!("planning assignment");
    let reviewers = assign::choose_reviewers(&config, &pull_request);
    let assignees = if config.add_assignees.is_reviewers() {
        reviewers.clone()
    } else {
        assign::choose_assignees(&config, &pull_request)?
    };
    info!(reviewers = ?reviewers, assignees = ?assignees, "planned assignment");

    let sink: Box<dyn SubmissionSink> = if cli.dry_run {
        Box::new(DryRunSink)
    } else {
        Box::new(client)
    };

    if config.add_reviewers && !reviewers.is_empty() {
        sink.request_reviewers(&pr_url, &reviewers).await?;
        info!(count = reviewers.len(), "reviewers submitted");
    } else {
        info!("no reviewers to submit");
    }

    if !assignees.is_empty() {
        sink.add_assignees(&pr_url, &assignees).await?;
        info!(count = assignees.len(), "assignees submitted");
    } else {
        info!("no assignees to submit");
    }

    Ok(())
}
