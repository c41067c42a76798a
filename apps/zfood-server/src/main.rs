use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use db::{ConnectOpts, DbEngine, DbHandle};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use zfood::{ZFood, ZFoodConfig};

mod ingress;
mod shutdown;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const MODULE_NAME: &str = "zfood";

/// ZFood Server - restaurants, users and their visits over REST
#[derive(Parser)]
#[command(name = "zfood-server")]
#[command(about = "ZFood Server - restaurants, users and their visits over REST")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // home_dir is normalized and created while loading
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "ZFood Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

/// Resolve the effective DSN: relative sqlite paths are anchored at home_dir.
fn resolve_dsn(db_config: &DatabaseConfig, home_dir: &Path) -> Result<String> {
    let raw = db_config.url.trim();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }
    let engine = DbHandle::detect(raw)?;
    if engine == DbEngine::Sqlite && raw.starts_with("sqlite://") {
        return Ok(db::absolutize_sqlite_dsn(raw, home_dir)?);
    }
    Ok(raw.to_string())
}

fn connect_opts(db_config: &DatabaseConfig) -> ConnectOpts {
    ConnectOpts {
        max_conns: db_config.max_conns,
        acquire_timeout: Some(Duration::from_secs(5)),
        sqlite_busy_timeout: db_config
            .busy_timeout_ms
            .map(|ms| Duration::from_millis(ms as u64)),
        create_sqlite_dirs: true,
    }
}

fn module_config(config: &AppConfig) -> Result<ZFoodConfig> {
    let cfg: ZFoodConfig = config.module_config(MODULE_NAME)?;
    if cfg.default_page_size == 0 {
        return Err(anyhow!("modules.zfood.default_page_size must be positive"));
    }
    if cfg.default_page_size > cfg.max_page_size {
        return Err(anyhow!(
            "modules.zfood.default_page_size ({}) exceeds max_page_size ({})",
            cfg.default_page_size,
            cfg.max_page_size
        ));
    }
    Ok(cfg)
}

async fn run_server(config: AppConfig) -> Result<()> {
    let module_cfg = module_config(&config)?;

    let db_config = config
        .database
        .clone()
        .or_else(|| AppConfig::default().database)
        .ok_or_else(|| anyhow!("Database configuration missing"))?;
    let home_dir = PathBuf::from(&config.server.home_dir);
    let dsn = resolve_dsn(&db_config, &home_dir)?;

    tracing::info!(dsn = %db::redact_dsn(&dsn), "Connecting to database");
    let db = DbHandle::connect(&dsn, connect_opts(&db_config))
        .await
        .context("Failed to connect to database")?;
    tracing::info!(engine = ?db.engine(), "Database connected");

    ZFood::migrate(&db.sea()).await?;
    let zfood = ZFood::new(db.sea(), module_cfg);

    let router = ingress::build_router(zfood.router(), &config.server);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid bind address {}:{}",
                config.server.host, config.server.port
            )
        })?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = shutdown::wait_for_shutdown().await {
                tracing::error!(error = %e, "shutdown signal handler failed");
            }
        })
        .await
        .context("HTTP server failed")?;

    db.close().await;
    tracing::info!("ZFood Server stopped");
    Ok(())
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    module_config(&config)?;
    if let Some(db_config) = &config.database {
        resolve_dsn(db_config, Path::new(&config.server.home_dir))?;
    }
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
