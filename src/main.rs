use anyhow::Context;
use clap::{Parser, Subcommand};
use hubpage::dates::DateFormat;
use hubpage::{Config, Dashboard, GithubClient, HubError, RepoQuery, ReqwestTransport};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hubpage")]
#[command(about = "Render GitHub emojis, profiles and repositories into an HTML page")]
#[command(version)]
struct Cli {
    /// File the rendered page is written to
    #[arg(short, long, default_value = "index.html", global = true)]
    output: PathBuf,
    /// Page title
    #[arg(long, default_value = "GitHub", global = true)]
    title: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every GitHub emoji
    Emojis,
    /// Show a user's profile
    User {
        /// GitHub login, exactly as registered
        username: String,
    },
    /// List a user's repositories
    Repos {
        /// Owner of the repositories
        username: String,
        /// all, public, private, forks, sources, member or internal
        #[arg(long = "type", default_value = "public")]
        kind: String,
        /// full_name, created, updated or pushed
        #[arg(long, default_value = "updated")]
        sort: String,
        /// asc or desc
        #[arg(long, default_value = "desc")]
        direction: String,
        #[arg(long, default_value_t = 10)]
        per_page: u32,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let transport = match ReqwestTransport::new(&config) {
        Ok(t) => t,
        Err(e @ HubError::TransportUnavailable(_)) => {
            error!(error = %e, "no HTTP transport available");
            eprintln!("This environment cannot make HTTP requests; please use a more recent platform.");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    let client = GithubClient::new(&config.api_url, Arc::new(transport));
    let dashboard = Dashboard::new(client, DateFormat::new(config.date_format.as_str()));

    let outcome = match &cli.command {
        Commands::Emojis => dashboard.get_emojis().await,
        Commands::User { username } => dashboard.get_user_infos(username).await,
        Commands::Repos {
            username,
            kind,
            sort,
            direction,
            per_page,
            page,
        } => {
            let query = RepoQuery {
                kind: kind.clone(),
                sort: sort.clone(),
                direction: direction.clone(),
                per_page: *per_page,
                page: *page,
            };
            dashboard.get_user_repos(username, &query).await
        }
    };

    // Written either way: a failed call leaves its notice on the page.
    dashboard
        .write_document(&cli.output, &cli.title)
        .await
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    let rendered = outcome?;
    println!(
        "Wrote {} ({} entr{} in #{}).",
        cli.output.display(),
        rendered.entries,
        if rendered.entries == 1 { "y" } else { "ies" },
        rendered.region.id()
    );
    if let Some(next) = rendered.follow_up {
        println!("Next: hubpage repos {}", next.username);
    }

    Ok(())
}
