use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::{Parser, ValueEnum};
use sandboxctl::action::registry;
use sandboxctl::sandbox::auth::AuthKind;
use sandboxctl::{dispatch, Params};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::Level;

/// Declarative CLI for the AWS Innovation Sandbox API
#[derive(Parser, Debug)]
#[command(name = "sandboxctl", version, about, long_about = None)]
struct Args {
    /// Action to perform
    #[arg(value_parser = PossibleValuesParser::new(registry::all_action_names()))]
    action: Option<String>,

    /// Base URL of the Sandbox API
    #[arg(long)]
    api_url: Option<String>,

    /// API version segment
    #[arg(long)]
    api_version: Option<String>,

    /// Authentication strategy
    #[arg(long, value_enum)]
    auth_type: Option<AuthKind>,

    /// Authentication configuration, as a JSON object of strings
    #[arg(long)]
    auth_config: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Skip TLS certificate validation
    #[arg(long)]
    insecure: bool,

    /// Account ID for account-specific actions
    #[arg(long)]
    account_id: Option<String>,

    /// Lease ID for lease-specific actions
    #[arg(long)]
    lease_id: Option<String>,

    /// User ID for user-specific actions
    #[arg(long)]
    user_id: Option<String>,

    /// Request body for create/update/extend actions, as a JSON object
    #[arg(long)]
    data: Option<String>,

    /// Query parameters for list actions, as a JSON object
    #[arg(long)]
    query: Option<String>,

    /// Declarative task file (YAML or JSON); flags override its values
    #[arg(short = 'f', long)]
    params_file: Option<PathBuf>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .expect("Failed to open log file");

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("sandboxctl started with log level: {:?}", level);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("sandboxctl").join("sandboxctl.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".sandboxctl").join("sandboxctl.log");
    }
    PathBuf::from("sandboxctl.log")
}

/// Merge the task file (if any) with CLI flags; flags win
fn resolve_params(args: &Args) -> Result<Params> {
    let mut params = match &args.params_file {
        Some(path) => Params::from_file(path)?,
        None => {
            let action = args
                .action
                .clone()
                .context("ACTION argument is required (or use --params-file)")?;
            let api_url = args
                .api_url
                .clone()
                .context("--api-url is required (or use --params-file)")?;
            Params::new(&action, &api_url)
        }
    };

    if let Some(action) = &args.action {
        params.action = action.clone();
    }
    if let Some(api_url) = &args.api_url {
        params.api_url = api_url.clone();
    }
    if let Some(api_version) = &args.api_version {
        params.api_version = api_version.clone();
    }
    if let Some(auth_type) = args.auth_type {
        params.auth_type = auth_type;
    }
    if let Some(auth_config) = &args.auth_config {
        params.auth_config = serde_json::from_str(auth_config)
            .context("--auth-config must be a JSON object of strings")?;
    }
    if let Some(timeout) = args.timeout {
        params.timeout = timeout;
    }
    if args.insecure {
        params.validate_certs = false;
    }
    if let Some(account_id) = &args.account_id {
        params.account_id = Some(account_id.clone());
    }
    if let Some(lease_id) = &args.lease_id {
        params.lease_id = Some(lease_id.clone());
    }
    if let Some(user_id) = &args.user_id {
        params.user_id = Some(user_id.clone());
    }
    if let Some(data) = &args.data {
        params.resource_data = parse_object(data, "--data")?;
    }
    if let Some(query) = &args.query {
        params.query_params = parse_object(query, "--query")?;
    }

    Ok(params)
}

fn parse_object(text: &str, flag: &str) -> Result<Map<String, Value>> {
    let value: Value =
        serde_json::from_str(text).with_context(|| format!("{} must be a JSON object", flag))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("{} must be a JSON object", flag),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    let params = resolve_params(&args)?;
    let outcome = dispatch(&params).await;

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if outcome.failed {
        std::process::exit(1);
    }
    Ok(())
}
