use tracing_subscriber::EnvFilter;

use hypermod_deploy::cli;
use hypermod_deploy::engine::{self, Outcome};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = match cli::run() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("{error:#}");
            std::process::exit(2);
        }
    };

    match engine::call(config).await {
        Ok(report) => {
            if let Outcome::PullRequest(number) = report.outcome {
                println!("{number}");
            }

            if !report.failures.is_empty() {
                tracing::error!("{} command(s) failed during this run", report.failures.len());
                std::process::exit(1);
            }
        }
        Err(error) => {
            tracing::error!("{error:#}");
            std::process::exit(1);
        }
    }
}
