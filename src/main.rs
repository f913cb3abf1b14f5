use anyhow::Context;
use clap::Parser;
use repo_health::config::AppConfig;
use repo_health::github::{FetchError, GitHubClient};
use repo_health::types::RepoId;
use repo_health::{render, report};
use std::io::{self, BufRead, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Descriptive statistics for a GitHub repository.
#[derive(Debug, Parser)]
#[command(name = "repo-health", version, about)]
struct Cli {
    /// Repository owner (e.g., "rust-lang")
    owner: String,
    /// Repository name (e.g., "rust")
    repo: String,
}

/// The menu's command set; anything else reprints the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Quit,
    Structure,
    BasicInfo,
    SocialActivity,
    IssuesAndPulls,
}

impl Command {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "0" => Some(Command::Quit),
            "1" => Some(Command::Structure),
            "2" => Some(Command::BasicInfo),
            "3" => Some(Command::SocialActivity),
            "4" => Some(Command::IssuesAndPulls),
            _ => None,
        }
    }
}

const MENU: &str = "\
[0] Quit
[1] File structure
[2] Basic information
[3] Social activity
[4] Issues and pull requests";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so the tables on stdout stay clean.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "repo_health=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("failed to load configuration")?;
    let token = config.resolve_token()?;
    let client = GitHubClient::new(&config, &token)?;
    let id = RepoId {
        owner: cli.owner,
        repo: cli.repo,
    };

    println!("Welcome! Pick what you want to know about {id}.");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        println!("{MENU}");
        print!(".. ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF behaves like quitting.
            break;
        }
        let Some(command) = Command::parse(&line) else {
            continue;
        };
        if command == Command::Quit {
            break;
        }

        // A failed command never takes the menu down with it.
        if let Err(error) = run_command(&client, &id, command).await {
            report_failure(&id, &error);
        }
    }

    Ok(())
}

async fn run_command(client: &GitHubClient, id: &RepoId, command: Command) -> Result<(), FetchError> {
    match command {
        Command::Structure => {
            let structure = report::repo_structure(client, id).await?;
            println!("{}", render::render_structure(&structure));
        }
        Command::BasicInfo => {
            let record = report::basic_info(client, id).await?;
            println!("{}", render::render_record(&record));
        }
        Command::SocialActivity => {
            let social = report::social_activity(client, id).await?;
            println!("{}", render::render_social(&social));
        }
        Command::IssuesAndPulls => {
            let record = report::issue_turnaround(client, id).await?;
            println!("{}", render::render_record(&record));
        }
        Command::Quit => {}
    }
    Ok(())
}

fn report_failure(id: &RepoId, error: &FetchError) {
    match error {
        FetchError::NotFound => println!("Repository {id} not found."),
        other => {
            tracing::error!(%id, error = %other, "command failed");
            println!("Could not complete the request: {other}");
        }
    }
}
