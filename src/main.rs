use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use solution_builder::api;
use solution_builder::builder::FlatRate;
use solution_builder::config::AppConfig;
use solution_builder::models::Canvas;
use solution_builder::report::{self, ReportFormat};

#[derive(Parser)]
#[command(name = "sbld")]
#[command(about = "Solution Builder: compose offerings and export BP&E / WBS documents")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Solution Builder server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
    /// Render a saved canvas (JSON) as a plain-text document
    Report {
        /// budget (BP&E) or wbs
        #[arg(short, long, default_value = "budget")]
        format: String,

        /// Hourly rate; defaults to the configured rate
        #[arg(short, long)]
        rate: Option<f64>,

        /// Canvas file, as returned by the canvas endpoints
        file: PathBuf,
    },
}

/// Initialize tracing. Logs go to stderr so report output on stdout stays clean.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "solution_builder=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn serve(config: AppConfig, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting Solution Builder server on port {}", port);
    if config.catalog_url.is_none() {
        tracing::warn!("No catalog URL configured; offering endpoints will return 503");
    }

    let app = api::create_router(config);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!(
        "Solution Builder server listening on http://127.0.0.1:{}",
        port
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn print_report(config: &AppConfig, format: &str, rate: Option<f64>, file: &Path) -> anyhow::Result<()> {
    let format = ReportFormat::from_str(format)
        .ok_or_else(|| anyhow::anyhow!("Unknown report format: {} (expected budget or wbs)", format))?;
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read canvas file {}", file.display()))?;
    let canvas: Canvas = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse canvas file {}", file.display()))?;

    let rates = report_rate(config, rate)?;
    print!("{}", report::render(&canvas, format, &rates));
    Ok(())
}

fn report_rate(config: &AppConfig, rate: Option<f64>) -> anyhow::Result<FlatRate> {
    match rate {
        Some(rate) => FlatRate::checked(rate)
            .ok_or_else(|| anyhow::anyhow!("Invalid rate: {} (expected a non-negative number)", rate)),
        None => Ok(FlatRate(config.default_rate)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = AppConfig::load();

    match cli.command {
        Some(Commands::Serve { port }) => serve(config, port).await?,
        Some(Commands::Report { format, rate, file }) => {
            print_report(&config, &format, rate, &file)?
        }
        None => serve(config, 3000).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_rate_rejects_nan_and_negative_values() {
        let config = AppConfig::default();
        assert!(report_rate(&config, Some(f64::NAN)).is_err());
        assert!(report_rate(&config, Some(-5.0)).is_err());
        assert_eq!(report_rate(&config, Some(150.0)).unwrap(), FlatRate(150.0));
        assert_eq!(report_rate(&config, None).unwrap(), FlatRate(200.0));
    }

    #[test]
    fn print_report_fails_before_rendering_with_a_bad_rate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canvas.json");
        std::fs::write(&path, "[]").unwrap();

        let err = print_report(&AppConfig::default(), "wbs", Some(f64::NAN), &path).unwrap_err();
        assert!(err.to_string().contains("Invalid rate"));
    }
}
