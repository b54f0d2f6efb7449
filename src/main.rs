//! Command-line front end for repopulse.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use repopulse::github::GITHUB_API_BASE;
use repopulse::insights::gemini::DEFAULT_GEMINI_MODEL;
use repopulse::stats::{format_date, week_start};
use repopulse::config::ttl_from_minutes;
use repopulse::{Config, Insights, RepositoryData, RepositoryStats, parse_repository};

#[derive(Parser)]
#[command(name = "repopulse")]
#[command(about = "Fetch, cache, and summarize GitHub repository statistics")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConfigArgs {
    /// GitHub token (raises the API rate limit)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// GitHub API root
    #[arg(long, default_value = GITHUB_API_BASE, global = true)]
    api_base: String,

    /// Cache directory (defaults to the platform cache dir)
    #[arg(long, env = "REPOPULSE_CACHE_DIR", global = true)]
    cache_dir: Option<PathBuf>,

    /// Minutes before a cached response expires
    #[arg(long, default_value_t = 15, global = true)]
    ttl_minutes: u64,

    /// Gemini API key for live insights
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    gemini_key: Option<String>,

    /// Gemini model name
    #[arg(long, default_value = DEFAULT_GEMINI_MODEL, global = true)]
    gemini_model: String,
}

impl From<ConfigArgs> for Config {
    fn from(args: ConfigArgs) -> Self {
        Config {
            token: args.token.filter(|t| !t.trim().is_empty()),
            api_base: args.api_base,
            cache_dir: args.cache_dir,
            ttl: ttl_from_minutes(args.ttl_minutes),
            gemini_api_key: args.gemini_key.filter(|k| !k.trim().is_empty()),
            gemini_model: args.gemini_model,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show statistics and insights for a repository
    Show {
        /// owner/repo or GitHub URL
        repo: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Skip insights generation
        #[arg(long)]
        no_insights: bool,
    },
    /// Compare two repositories
    Compare {
        first: String,
        second: String,
        #[arg(long)]
        json: bool,
    },
    /// Remove cached responses
    ClearCache,
}

#[derive(Serialize)]
struct Report<'a> {
    data: &'a RepositoryData,
    stats: RepositoryStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    insights: Option<Insights>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let Cli { config, command } = Cli::parse();
    let config = Config::from(config);

    match command {
        Commands::Show {
            repo,
            json,
            no_insights,
        } => show(&config, &repo, json, no_insights).await,
        Commands::Compare {
            first,
            second,
            json,
        } => compare(&config, &first, &second, json).await,
        Commands::ClearCache => {
            let store = config.cache_store()?;
            let removed = store.clear();
            println!("Removed {} cached entries", removed);
            Ok(())
        }
    }
}

async fn show(config: &Config, repo: &str, json: bool, no_insights: bool) -> Result<()> {
    let id = parse_repository(repo)?;
    let client = config.github_client()?;

    let data = client
        .fetch_aggregate(&id.owner, &id.name)
        .await
        .with_context(|| format!("fetching {}", id))?;

    let insights = if no_insights {
        None
    } else {
        Some(config.insights_generator().generate(&data).await)
    };

    let report = Report {
        stats: RepositoryStats::from_data(&data),
        data: &data,
        insights,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

async fn compare(config: &Config, first: &str, second: &str, json: bool) -> Result<()> {
    let first = parse_repository(first)?;
    let second = parse_repository(second)?;
    let client = config.github_client()?;

    let (a, b) = client.fetch_comparison(&first, &second).await?;
    let reports = [
        Report {
            stats: RepositoryStats::from_data(&a),
            data: &a,
            insights: None,
        },
        Report {
            stats: RepositoryStats::from_data(&b),
            data: &b,
            insights: None,
        },
    ];

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    println!(
        "{:<16} {:>24} {:>24}",
        "", a.repository.full_name, b.repository.full_name
    );
    let rows: [(&str, String, String); 6] = [
        (
            "Stars",
            a.repository.stargazers_count.to_string(),
            b.repository.stargazers_count.to_string(),
        ),
        (
            "Forks",
            a.repository.forks_count.to_string(),
            b.repository.forks_count.to_string(),
        ),
        (
            "Open issues",
            a.repository.open_issues_count.to_string(),
            b.repository.open_issues_count.to_string(),
        ),
        ("Size", reports[0].stats.size.clone(), reports[1].stats.size.clone()),
        (
            "Contributors",
            a.contributors.len().to_string(),
            b.contributors.len().to_string(),
        ),
        (
            "Commits (52w)",
            reports[0].stats.total_commits.to_string(),
            reports[1].stats.total_commits.to_string(),
        ),
    ];
    for (label, left, right) in rows {
        println!("{:<16} {:>24} {:>24}", label, left, right);
    }
    Ok(())
}

fn print_report(report: &Report<'_>) {
    let repo = &report.data.repository;
    let stats = &report.stats;

    println!("{}", repo.full_name);
    if let Some(description) = repo.description.as_deref().filter(|d| !d.is_empty()) {
        println!("  {}", description);
    }
    println!();
    println!("  Stars:          {}", repo.stargazers_count);
    println!("  Forks:          {}", repo.forks_count);
    println!("  Open issues:    {}", repo.open_issues_count);
    println!("  Size:           {}", stats.size);
    println!("  Default branch: {}", repo.default_branch);
    if let Some(license) = &repo.license {
        println!("  License:        {}", license.name);
    }
    println!("  Created:        {}", format_date(&repo.created_at));
    println!("  Updated:        {}", format_date(&repo.updated_at));

    println!();
    println!("Languages");
    if stats.languages.is_empty() {
        println!("  (none reported)");
    }
    for share in stats.languages.iter().take(6) {
        println!("  {:<20} {:>5.1}%", share.name, share.percentage);
    }

    println!();
    println!("Commit activity");
    match report.data.commit_activity.last().and_then(week_start) {
        Some(latest) => println!(
            "  {} commits over {} weeks (avg {}/week, peak {}), latest week starting {}",
            stats.total_commits,
            stats.weeks,
            stats.average_weekly_commits,
            stats.peak_weekly_commits,
            latest
        ),
        None => println!("  (not available yet)"),
    }

    println!();
    println!("Top contributors");
    for contributor in &report.data.contributors {
        println!("  {:<24} {}", contributor.login, contributor.contributions);
    }

    if let Some(insights) = &report.insights {
        println!();
        println!("Insights");
        println!("  Summary:       {}", insights.summary);
        println!("  Languages:     {}", insights.language_analysis);
        println!("  Contributions: {}", insights.contribution_patterns);
    }
}
