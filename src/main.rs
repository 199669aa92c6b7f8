//! trinity-shaders - links the active resource pack's shader materials into
//! mcpelauncher's `shaders` folder.
//!
//! # Execution Flow
//!
//! 1. Load `settings.yaml` (defaults when absent)
//! 2. Initialize logging (console, plus rotating file when a log dir is set)
//! 3. Locate the launcher root (`--root`, or auto-detection)
//! 4. Scan packs, resolve the active one, rebuild `shaders/`
//!
//! Exits non-zero when the launcher, the registry file or the shaders folder
//! is missing; an emptied shaders folder is still a success.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use trinity_shaders::services::install_detection::{
    default_candidates, detect_install_root, display_with_home,
};
use trinity_shaders::services::{EmptyReason, RunOutcome};
use trinity_shaders::{APP_NAME, ConfigManager, LauncherLayout, VERSION};

#[derive(Parser)]
#[command(name = "trinity-shaders")]
#[command(version)]
#[command(about = "Links the active resource pack's shader materials into mcpelauncher's shaders folder", long_about = None)]
struct Cli {
    /// mcpelauncher root directory (skips auto-detection)
    #[arg(long)]
    root: Option<Utf8PathBuf>,

    /// Directory containing settings.yaml
    #[arg(long = "config-dir")]
    config_dir: Option<Utf8PathBuf>,

    /// Also write rotating log files to this directory
    #[arg(long = "log-dir")]
    log_dir: Option<Utf8PathBuf>,

    /// Enable debug output
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = match &cli.config_dir {
        Some(dir) => ConfigManager::new(dir),
        None => ConfigManager::from_default_location()?,
    };
    let settings = config_manager.load_settings()?;

    let log_dir = cli.log_dir.clone().or_else(|| settings.log_dir.clone());
    let _guard = trinity_shaders::logging::setup_logging(
        log_dir.as_deref(),
        APP_NAME,
        cli.debug || settings.debug_mode,
    )?;

    tracing::debug!("Starting {} v{}", APP_NAME, VERSION);

    let home = dirs::home_dir().and_then(|home| Utf8PathBuf::try_from(home).ok());

    let root = match cli.root {
        Some(root) => root,
        None => {
            let home = home
                .as_deref()
                .context("Could not determine the home directory")?;
            let candidates = default_candidates(home, &settings.extra_install_roots);
            detect_install_root(&candidates).map_err(|e| {
                tracing::error!("{}", e);
                e
            })?
        }
    };

    let layout = LauncherLayout::from_root(&root);
    let outcome = trinity_shaders::run(&layout, settings.max_packs).map_err(|e| {
        tracing::error!("{}", e);
        e
    })?;

    let shaders = display_with_home(&layout.shaders, home.as_deref());
    match outcome {
        RunOutcome::Linked { report, .. } => {
            tracing::info!("Symlinks to materials created in {}", shaders);
            if report.failed > 0 {
                tracing::warn!("{} materials could not be linked", report.failed);
            }
        }
        RunOutcome::Emptied { reason, removed } => {
            let why = match reason {
                EmptyReason::NoActivePack => "no active pack",
                EmptyReason::NoMaterials => "active pack has no materials",
            };
            tracing::info!("Emptied {} ({}, {} entries removed)", shaders, why, removed);
        }
    }

    Ok(())
}
