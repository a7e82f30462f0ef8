use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Query, State};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use filmroom::api::routes::engagement::{
    player_report, point_report, PlayerReportParams, PointReportParams,
};
use filmroom::api::routes::reports::{
    coach_overview, game_report, team_report, GameReportParams, OverviewParams, TeamReportParams,
};
use filmroom::api::state::AppState;
use filmroom::config::AppConfig;
use filmroom::storage::StorageConfig;

#[derive(Parser)]
#[command(name = "filmroom")]
#[command(about = "Engagement analytics for video-based sports coaching")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Assemble a report and print it as JSON
    Report {
        #[command(subcommand)]
        which: ReportCommand,
    },
}

#[derive(Subcommand)]
enum ReportCommand {
    /// Coach overview across every team they author points for
    Overview {
        #[arg(long)]
        coach_id: String,

        /// Window start date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        start: Option<String>,

        /// Window end date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        end: Option<String>,
    },

    /// Team engagement report
    Team {
        #[arg(long)]
        team_id: String,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,
    },

    /// Per-point breakdown for one game
    Game {
        #[arg(long)]
        game_id: String,
    },

    /// Engagement detail for one player
    Player {
        #[arg(long)]
        player_id: String,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,
    },

    /// Audience breakdown for one coaching point
    Point {
        #[arg(long)]
        point_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    let fmt_layer = if cli.json_logs {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();

    tracing::info!("Starting filmroom v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli.config)?;
    let data_dir = cli
        .data_dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| config.data_dir.clone());

    let state = AppState {
        storage: Arc::new(StorageConfig::new(data_dir)),
        weights: config.engagement.weights(),
    };

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let app = filmroom::api::build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Serving reports on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Report { which } => {
            let json = match which {
                ReportCommand::Overview {
                    coach_id,
                    start,
                    end,
                } => {
                    let params = OverviewParams {
                        coach_id: Some(coach_id),
                        start,
                        end,
                    };
                    let report = coach_overview(State(state), Query(params)).await?;
                    serde_json::to_string_pretty(&report.0)?
                }
                ReportCommand::Team {
                    team_id,
                    start,
                    end,
                } => {
                    let params = TeamReportParams {
                        team_id: Some(team_id),
                        start,
                        end,
                    };
                    let report = team_report(State(state), Query(params)).await?;
                    serde_json::to_string_pretty(&report.0)?
                }
                ReportCommand::Game { game_id } => {
                    let params = GameReportParams {
                        game_id: Some(game_id),
                    };
                    let report = game_report(State(state), Query(params)).await?;
                    serde_json::to_string_pretty(&report.0)?
                }
                ReportCommand::Player {
                    player_id,
                    start,
                    end,
                } => {
                    let params = PlayerReportParams {
                        player_id: Some(player_id),
                        start,
                        end,
                    };
                    let report = player_report(State(state), Query(params)).await?;
                    serde_json::to_string_pretty(&report.0)?
                }
                ReportCommand::Point { point_id } => {
                    let params = PointReportParams {
                        point_id: Some(point_id),
                    };
                    let report = point_report(State(state), Query(params)).await?;
                    serde_json::to_string_pretty(&report.0)?
                }
            };
            println!("{}", json);
        }
    }

    Ok(())
}

/// Load the config file if it exists, otherwise use defaults. A missing
/// file is normal for local runs; a present-but-invalid file is an error.
fn load_config(path: &str) -> Result<AppConfig> {
    let path = PathBuf::from(path);
    if path.exists() {
        Ok(AppConfig::from_file(&path)?)
    } else {
        Ok(AppConfig::default())
    }
}
