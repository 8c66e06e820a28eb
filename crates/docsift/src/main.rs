use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use docsift::config::{load_settings, validate_settings, LogFormat, Settings};
use docsift::error::ConfigError;
use docsift::pipeline::Pipeline;
use docsift::processor::{ocr, PageRasterizer, PdftoppmRasterizer};
use docsift::server::{self, AppState};

#[derive(Parser, Debug)]
#[command(name = "docsift")]
#[command(about = "Upload documents, extract their text and sort them into categories")]
#[command(version)]
struct Cli {
    /// JSON settings file
    #[arg(short, long, env = "DOCSIFT_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to bind the HTTP server to
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory uploaded files are written to
    #[arg(long)]
    upload_dir: Option<String>,

    /// SQLite database file
    #[arg(long)]
    database: Option<String>,
}

impl Cli {
    /// Loads file and environment settings, then layers the flags on top.
    fn resolve_settings(self) -> Result<Settings, ConfigError> {
        let settings = load_settings(self.config.as_deref())?;
        self.apply(settings)
    }

    /// Applies flags over `settings` and validates the merged result.
    fn apply(self, mut settings: Settings) -> Result<Settings, ConfigError> {
        if let Some(host) = self.host {
            settings.host = host;
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(dir) = self.upload_dir {
            settings.upload_dir = dir;
        }
        if let Some(path) = self.database {
            settings.database_path = path;
        }

        validate_settings(&settings)?;
        Ok(settings)
    }
}

fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => tracing::subscriber::set_global_default(
            registry.with(tracing_subscriber::fmt::layer().with_target(false)),
        ),
        LogFormat::Json => tracing::subscriber::set_global_default(
            registry.with(tracing_subscriber::fmt::layer().json()),
        ),
    }
    .context("Failed to initialise tracing")?;

    // The db layer logs through the `log` facade.
    tracing_log::LogTracer::init().context("Failed to bridge log records")?;

    Ok(())
}

fn warn_missing_tools(settings: &Settings) {
    let engine = ocr::default_engine(&settings.ocr);
    if !engine.is_available() {
        warn!(
            engine = engine.name(),
            "OCR engine not available; scanned documents will be stored without text"
        );
    }

    let rasterizer = PdftoppmRasterizer::new(&settings.ocr.pdftoppm_cmd, settings.ocr.dpi);
    if !rasterizer.is_available() {
        warn!(
            command = %settings.ocr.pdftoppm_cmd,
            "PDF rasterizer not available; scanned PDFs cannot be OCR'd"
        );
    }
}

fn ensure_upload_dir(path: &Path) -> Result<(), ConfigError> {
    std::fs::create_dir_all(path).map_err(|e| ConfigError::CreateUploadDir {
        path: path.to_path_buf(),
        source: e,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = cli.resolve_settings().context("Failed to load settings")?;

    init_tracing(settings.log_format)?;

    let upload_dir = PathBuf::from(&settings.upload_dir);
    ensure_upload_dir(&upload_dir)?;

    warn_missing_tools(&settings);

    let pipeline = Pipeline::open(&settings)
        .with_context(|| format!("Failed to start pipeline on {}", settings.database_path))?;
    let state = AppState::new(pipeline, upload_dir, settings.max_upload_bytes);

    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", settings.host, settings.port))?;

    info!(
        uploads = %settings.upload_dir,
        database = %settings.database_path,
        "Starting docsift"
    );

    server::serve(addr, server::router(state)).await?;

    Ok(())
}
