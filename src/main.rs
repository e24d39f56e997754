mod cli;

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use console::style;
use gitstudio::{ConflictReport, GitRepo, StudioConfig};
use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{}", failure_line(&e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = StudioConfig::load(cli.config.clone())?;
    let repo = GitRepo::open_with_config(&cli.repo, &config.executor)
        .with_context(|| format!("Cannot open git repo at {}", cli.repo.display()))?;
    info!(repo = %cli.repo.display(), "repository opened");

    let deadline = cli.timeout.map(Duration::from_secs);

    match cli.command {
        Commands::Status => print(with_deadline(deadline, repo.status()).await?),
        Commands::Log { max_count, branch } => print(
            with_deadline(deadline, repo.log(max_count, branch.as_deref())).await?,
        ),
        Commands::Branches => print(with_deadline(deadline, repo.branches()).await?),
        Commands::Tags => print(with_deadline(deadline, repo.get_tags()).await?),
        Commands::Remotes => print(with_deadline(deadline, repo.get_remotes()).await?),
        Commands::Config { key } => {
            print(with_deadline(deadline, repo.get_config(key.as_deref())).await?)
        }
        Commands::Probe {
            source,
            target,
            json,
        } => {
            let target = match target {
                Some(target) => target,
                None => repo.current_branch().await?,
            };
            // Not bounded by the deadline: exiting mid-probe would skip the rollback
            let report = repo.probe_conflicts(&source, &target).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                show_report(&report);
            }
        }
    }

    Ok(())
}

/// Bound a read-only operation by the caller's deadline, if any
async fn with_deadline<T>(
    deadline: Option<Duration>,
    operation: impl Future<Output = gitstudio::Result<T>>,
) -> Result<T> {
    match deadline {
        Some(limit) => tokio::time::timeout(limit, operation)
            .await
            .with_context(|| format!("Operation did not finish within {}s", limit.as_secs()))?
            .map_err(Into::into),
        None => operation.await.map_err(Into::into),
    }
}

/// The single line reported on stderr when a command fails
fn failure_line(err: &anyhow::Error) -> String {
    format!("{} {:#}", style("✗").red().bold(), err)
}

fn print(output: String) {
    print!("{output}");
}

fn show_report(report: &ConflictReport) {
    if !report.has_conflicts() {
        println!(
            "{} {} merges cleanly into {}",
            style("✓").green().bold(),
            style(&report.source).cyan(),
            style(&report.target).cyan()
        );
        return;
    }

    println!(
        "{} Merging {} into {} would conflict in {} file(s):",
        style("⚠").yellow().bold(),
        style(&report.source).cyan(),
        style(&report.target).cyan(),
        report.conflicted.len()
    );
    for path in &report.conflicted {
        println!("  {} {}", style("✗").red(), path);
    }
}
