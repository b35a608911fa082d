//! rhelper - repository reports for project-management front ends
//!
//! # Usage
//! ```bash
//! rhelper rhsummary                      # Tip, tags and branches of the current repo
//! rhelper -R /srv/repo rhmanifest -r tip lib
//! rhelper -R /srv/repo serve --port 3001 # Serve reports over HTTP
//! ```

use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rhelper::commands::{self, CommandRequest};
use rhelper::config::{DEFAULT_PATH_ENCODING, ReportConfig};
use rhelper::git::GitRepository;
use rhelper::routes::{self, ServerState};

/// Repository reports for project-management front ends
#[derive(Parser)]
#[command(name = "rhelper")]
#[command(about = "Summarize repository state as XML reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the repository (discovered upward from here)
    #[arg(short = 'R', long = "repository", value_name = "REPO_PATH", default_value = ".")]
    repository: PathBuf,

    /// Character set used to interpret file paths
    #[arg(long, env = "RHELPER_PATH_ENCODING", default_value = DEFAULT_PATH_ENCODING)]
    path_encoding: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Output tip, tags and live branches
    Rhsummary,
    /// Output the sub-manifest of the specified directory
    Rhmanifest {
        /// Revision (percent-encoded, `+` for space); empty means tip
        #[arg(short, long, default_value = "")]
        rev: String,

        /// Directory (percent-encoded, `+` for space); empty means root
        #[arg(default_value = "")]
        path: String,
    },
    /// Serve reports over HTTP
    Serve {
        /// Port to run the server on
        #[arg(short, long, default_value = "3001")]
        port: u16,
    },
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the report.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("rhelper: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ReportConfig::new(&cli.path_encoding)?;

    let (name, request) = match cli.command {
        Commands::Rhsummary => ("rhsummary", CommandRequest::default()),
        Commands::Rhmanifest { rev, path } => (
            "rhmanifest",
            CommandRequest {
                rev: rev.into_bytes(),
                path: path.into_bytes(),
            },
        ),
        Commands::Serve { port } => return serve(cli.repository, config, port),
    };

    let command = commands::find(name)?;
    let repo = GitRepository::open(&cli.repository)?;
    debug!(command = name, repo = %repo.path, "dispatching");

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = (command.handler)(&repo, &config, &request, &mut out);
    out.flush()?;
    result?;
    Ok(())
}

#[tokio::main]
async fn serve(repo_path: PathBuf, config: ReportConfig, port: u16) -> anyhow::Result<()> {
    // Fail early on a bad path rather than on the first request.
    let repo_path = GitRepository::open(&repo_path)?.workdir().to_path_buf();

    let state = Arc::new(ServerState {
        repo_path: repo_path.clone(),
        config,
    });

    let app = routes::create_router(state).layer(TraceLayer::new_for_http());

    let addr = format!("127.0.0.1:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, repo = %repo_path.display(), "serving reports");

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
        info!("shutting down");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
