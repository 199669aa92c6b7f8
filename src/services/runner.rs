use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use super::catalog::build_catalog;
use super::linker::{LinkFilesystem, ShaderLinker, SyncReport, has_materials};
use super::manifest::{ExtractError, parse_registry};
use super::resolver::resolve;
use crate::models::{LauncherLayout, PackRecord};

/// Errors that end a run
#[derive(Error, Debug)]
pub enum ShaderSyncError {
    #[error("mcpelauncher not found in any known location (searched: {})", join_paths(.0))]
    LauncherNotFound(Vec<Utf8PathBuf>),

    #[error("global_resource_packs.json not found at {0}")]
    RegistryNotFound(Utf8PathBuf),

    #[error("Failed to parse global_resource_packs.json: {0}")]
    RegistryParse(#[from] ExtractError),

    #[error("shaders folder not found, create it with: mkdir -p \"{0}\"")]
    ShadersDirNotFound(Utf8PathBuf),
}

fn join_paths(paths: &[Utf8PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Why the shaders directory was left empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// The registry's pack is not among the scanned packs
    NoActivePack,
    /// The active pack has no `*.material.bin` files
    NoMaterials,
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Linked {
        pack: PackRecord,
        subpack: Option<String>,
        report: SyncReport,
    },
    Emptied {
        reason: EmptyReason,
        removed: usize,
    },
}

/// Resolve the active pack of `layout` and rebuild its shaders directory.
///
/// Missing or unparseable registry and a missing shaders directory are fatal;
/// every other problem is logged and the run continues.
pub fn run(layout: &LauncherLayout, max_packs: usize) -> Result<RunOutcome, ShaderSyncError> {
    run_with_linker(layout, max_packs, &ShaderLinker::new())
}

/// [`run`] with an explicit linker.
pub fn run_with_linker<F: LinkFilesystem>(
    layout: &LauncherLayout,
    max_packs: usize,
    linker: &ShaderLinker<F>,
) -> Result<RunOutcome, ShaderSyncError> {
    if !layout.registry.is_file() {
        return Err(ShaderSyncError::RegistryNotFound(layout.registry.clone()));
    }

    tracing::info!("Getting resource pack list...");
    let (catalog, scan_report) = build_catalog(layout, max_packs);
    if scan_report.skipped > 0 {
        tracing::warn!("Skipped {} packs with unreadable manifests", scan_report.skipped);
    }

    let selector = parse_registry(&layout.registry)?;
    let resolved = resolve(&catalog, &selector);

    if let Some(active) = &resolved {
        tracing::info!("Pack path: {}", active.path());
        match active.subpack_path() {
            Some(subpack_path) => tracing::info!("Subpack path: {}", subpack_path),
            None => tracing::info!("No subpack selected"),
        }
    }

    if !layout.shaders.is_dir() {
        return Err(ShaderSyncError::ShadersDirNotFound(layout.shaders.clone()));
    }

    let Some(active) = resolved else {
        tracing::warn!("No active pack found, emptying shaders folder...");
        return Ok(empty(linker, &layout.shaders, EmptyReason::NoActivePack));
    };

    if !has_materials(&active) {
        tracing::warn!("No .material.bin files found in the pack, emptying shaders folder...");
        return Ok(empty(linker, &layout.shaders, EmptyReason::NoMaterials));
    }

    let report = linker.sync(Some(&active), &layout.shaders);
    tracing::info!(
        "Linked {} materials ({} from subpack, {} failed)",
        report.linked,
        report.overridden,
        report.failed
    );

    Ok(RunOutcome::Linked {
        pack: active.pack.clone(),
        subpack: active.subpack.map(str::to_string),
        report,
    })
}

fn empty<F: LinkFilesystem>(
    linker: &ShaderLinker<F>,
    shaders: &Utf8Path,
    reason: EmptyReason,
) -> RunOutcome {
    let report = linker.sync(None, shaders);
    RunOutcome::Emptied {
        reason,
        removed: report.removed,
    }
}
