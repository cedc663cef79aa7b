mod loader;
mod script;
mod session;

use std::path::{Path, PathBuf};

use clap::Parser;
use tokio::io::AsyncReadExt;
use viewer::engine::ViewerCore;
use viewer::error::ViewerError;

use crate::loader::FsAssetLoader;
use crate::session::{Session, SessionOptions};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("output encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tour rejected [{code}]: {0}", code = .0.error_code())]
    Viewer(#[from] ViewerError),
    #[error(transparent)]
    Script(#[from] script::ScriptError),
}

#[derive(Parser, Debug)]
#[command(name = "panotour", about = "Replay a navigation script against a panorama tour")]
struct Cli {
    /// Tour configuration JSON.
    #[arg(long, env = "PANOTOUR_TOUR")]
    tour: PathBuf,

    /// Replay script. Read from stdin when absent.
    #[arg(long, env = "PANOTOUR_SCRIPT")]
    script: Option<PathBuf>,

    /// Directory image URLs resolve against. Defaults to the tour file's directory.
    #[arg(long, env = "PANOTOUR_ASSETS")]
    assets: Option<PathBuf>,

    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    #[arg(long, default_value_t = 720.0)]
    height: f64,

    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,

    /// Sleep between frames so the replay runs at wall-clock speed.
    #[arg(long)]
    realtime: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    let raw = tokio::fs::read_to_string(&cli.tour).await?;
    let core = ViewerCore::from_json(&raw)?;
    tracing::info!(tour = %cli.tour.display(), panoramas = core.tour.len(), start = %core.start_panorama, "tour loaded");

    let source = match &cli.script {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };
    let steps = script::parse(&source)?;

    let assets = cli
        .assets
        .clone()
        .unwrap_or_else(|| cli.tour.parent().map(Path::to_path_buf).unwrap_or_default());
    let loader = FsAssetLoader::new(assets);
    tracing::debug!(root = %loader.root().display(), steps = steps.len(), "replay starting");

    let options = SessionOptions {
        viewport_width: cli.width,
        viewport_height: cli.height,
        frame_ms: cli.frame_ms,
        realtime: cli.realtime,
    };
    let mut session = Session::new(core, loader, options);
    let mut out = std::io::stdout().lock();
    session.run(&steps, &mut out).await?;

    tracing::info!(
        panorama = session.core().current_panorama_id().unwrap_or("-"),
        "replay finished"
    );
    Ok(())
}
