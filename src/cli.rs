//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_store::{AGENTS_FILE, JsonFileStore, SIMULATIONS_FILE};
use crate::adapters::web::{AppState, build_router, system_today};
use crate::domain::error::HedgefundError;
use crate::domain::series::price_history;
use crate::domain::timeframe::Timeframe;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "hedgefund", about = "Mock financial data backend for the hedge fund demo")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API server
    Serve(ServeArgs),
    /// Print a generated price history as JSON
    History {
        symbol: String,
        #[arg(short, long, default_value = "3M")]
        timeframe: String,
        /// Anchor date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        end_date: Option<String>,
    },
}

/// Command-line overrides for `serve`. Unset fields fall back to the config
/// file, then to built-in defaults.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct ServeArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub host: Option<String>,
    #[arg(long)]
    pub port: Option<u16>,
    /// Extra CORS origins, comma-separated
    #[arg(long, env = "ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub data_dir: PathBuf,
    pub log_level: String,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Serve(args) => run_serve(&args),
        Command::History {
            symbol,
            timeframe,
            end_date,
        } => run_history(&symbol, &timeframe, end_date.as_deref()),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = HedgefundError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

/// Merge command-line overrides, the optional config file and defaults.
pub fn build_server_settings(
    adapter: Option<&dyn ConfigPort>,
    args: &ServeArgs,
) -> Result<ServerSettings, HedgefundError> {
    let file_value = |key: &str| adapter.and_then(|a| a.get_string("server", key));

    let port = match args.port {
        Some(port) => port,
        None => match file_value("port") {
            Some(raw) => raw.trim().parse().map_err(|_| HedgefundError::ConfigInvalid {
                section: "server".into(),
                key: "port".into(),
                reason: format!("'{raw}' is not a valid port number"),
            })?,
            None => DEFAULT_PORT,
        },
    };

    let allowed_origins = if args.allowed_origins.is_empty() {
        adapter
            .map(|a| a.get_list("server", "allowed_origins"))
            .unwrap_or_default()
    } else {
        args.allowed_origins
            .iter()
            .flat_map(|raw| split_origins(raw))
            .collect()
    };

    Ok(ServerSettings {
        host: args
            .host
            .clone()
            .or_else(|| file_value("host"))
            .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port,
        allowed_origins,
        data_dir: args
            .data_dir
            .clone()
            .or_else(|| file_value("data_dir").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
        log_level: args
            .log_level
            .clone()
            .or_else(|| adapter.and_then(|a| a.get_string("logging", "level")))
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
    })
}

/// Install the global subscriber. `RUST_LOG` wins over `level`.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init();
}

fn build_state(data_dir: &Path) -> Result<AppState, HedgefundError> {
    let simulations = JsonFileStore::open(data_dir, SIMULATIONS_FILE)?;
    let agents = JsonFileStore::open(data_dir, AGENTS_FILE)?;
    Ok(AppState {
        simulations: Arc::new(simulations),
        agents: Arc::new(agents),
        today: system_today,
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

fn run_serve(args: &ServeArgs) -> ExitCode {
    let adapter = match &args.config {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            match load_config(path) {
                Ok(a) => Some(a),
                Err(code) => return code,
            }
        }
        None => None,
    };

    let settings = match build_server_settings(adapter.as_ref().map(|a| a as &dyn ConfigPort), args)
    {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };
    init_tracing(&settings.log_level);

    let state = match build_state(&settings.data_dir) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };
    let router = build_router(state, &settings.allowed_origins);
    let addr = format!("{}:{}", settings.host, settings.port);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            let err = HedgefundError::Io(e);
            eprintln!("error: {err}");
            return ExitCode::from(&err);
        }
    };

    let served: Result<(), HedgefundError> = runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!(
            %addr,
            data_dir = %settings.data_dir.display(),
            origins = settings.allowed_origins.len(),
            "hedgefund API listening"
        );
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    });

    match served {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}

/// Parse a `YYYY-MM-DD` anchor date.
pub fn parse_end_date(raw: &str) -> Result<NaiveDate, HedgefundError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| HedgefundError::invalid("end_date", format!("'{raw}' is not YYYY-MM-DD")))
}

pub fn history_json(
    symbol: &str,
    timeframe: &str,
    end_date: NaiveDate,
) -> Result<String, HedgefundError> {
    let timeframe: Timeframe = timeframe.parse()?;
    let points = price_history(symbol, timeframe, end_date)?;
    Ok(serde_json::to_string_pretty(&points)?)
}

fn run_history(symbol: &str, timeframe: &str, end_date: Option<&str>) -> ExitCode {
    let result = end_date
        .map(parse_end_date)
        .unwrap_or_else(|| Ok(system_today()))
        .and_then(|end| history_json(symbol, timeframe, end));

    match result {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}
