use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use link_preview::{Config, Resolver};

#[derive(Parser)]
#[command(name = "link-preview", about = "Resolve URLs into link previews")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a URL and print the preview markup
    Resolve {
        url: String,
        /// Print the full {error, html} result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List site strategies in priority order
    Patterns,
    /// Show which site strategy claims a URL (no network)
    Match { url: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let resolver = Resolver::from_config(&config)?;

    match cli.command {
        Commands::Resolve { url, json } => {
            let t0 = Instant::now();
            let result = resolver.resolve(&url).await;
            tracing::debug!("Resolved {} in {:.2}s", url, t0.elapsed().as_secs_f64());

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else if let Some(error) = &result.error {
                eprintln!("error: {}", error);
            } else if let Some(html) = &result.html {
                println!("{}", html);
            }

            Ok(if result.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Patterns => {
            for (i, name) in resolver.registry().names().iter().enumerate() {
                println!("{:>2}. {}", i + 1, name);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Match { url } => {
            match resolver.registry().find(&url) {
                Some(strategy) => println!("{}", strategy.name()),
                None => println!("(none: generic metadata)"),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
