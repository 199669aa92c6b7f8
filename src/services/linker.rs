//! Shader link synchronisation.
//!
//! The shaders directory is always rebuilt from scratch: every entry is
//! removed, then one symlink per `*.material.bin` of the active pack is
//! created. Sub-pack materials are linked afterwards and replace main-pack
//! links of the same name.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;

use crate::models::ResolvedActivePack;

/// Substring identifying compiled material files
pub const MATERIAL_MARKER: &str = ".material.bin";

/// Filesystem mutations performed by [`ShaderLinker`]
#[cfg_attr(test, mockall::automock)]
pub trait LinkFilesystem {
    /// Remove a file, symlink or empty directory
    fn remove_entry(&self, path: &Utf8Path) -> io::Result<()>;

    /// Create a symlink at `link` pointing at `source`
    fn create_symlink(&self, source: &Utf8Path, link: &Utf8Path) -> io::Result<()>;
}

/// [`LinkFilesystem`] backed by the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct OsLinkFilesystem;

impl LinkFilesystem for OsLinkFilesystem {
    fn remove_entry(&self, path: &Utf8Path) -> io::Result<()> {
        if fs::symlink_metadata(path)?.is_dir() {
            fs::remove_dir(path)
        } else {
            fs::remove_file(path)
        }
    }

    #[cfg(unix)]
    fn create_symlink(&self, source: &Utf8Path, link: &Utf8Path) -> io::Result<()> {
        std::os::unix::fs::symlink(source, link)
    }

    #[cfg(windows)]
    fn create_symlink(&self, source: &Utf8Path, link: &Utf8Path) -> io::Result<()> {
        std::os::windows::fs::symlink_file(source, link)
    }
}

/// Counts from one [`ShaderLinker::sync`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Entries removed while clearing the target
    pub removed: usize,
    /// Links created (main pack and sub-pack)
    pub linked: usize,
    /// Main-pack links replaced by a sub-pack material
    pub overridden: usize,
    /// Links that could not be created
    pub failed: usize,
}

/// Keeps a shaders directory in step with the active pack's materials
pub struct ShaderLinker<F: LinkFilesystem = OsLinkFilesystem> {
    fs: F,
}

impl ShaderLinker<OsLinkFilesystem> {
    pub fn new() -> Self {
        Self {
            fs: OsLinkFilesystem,
        }
    }
}

impl Default for ShaderLinker<OsLinkFilesystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: LinkFilesystem> ShaderLinker<F> {
    pub fn with_filesystem(fs: F) -> Self {
        Self { fs }
    }

    /// Rebuild `target` for `resolved`; with `None` the target is only emptied.
    ///
    /// Per-entry failures are logged and counted, never returned.
    pub fn sync(&self, resolved: Option<&ResolvedActivePack<'_>>, target: &Utf8Path) -> SyncReport {
        let mut report = SyncReport {
            removed: self.clear(target),
            ..SyncReport::default()
        };

        let Some(resolved) = resolved else {
            return report;
        };

        let main_dir = materials_dir(resolved.path());
        for (name, source) in material_files(&main_dir) {
            self.link(&source, &target.join(&name), &mut report);
        }

        if let Some(subpack_dir) = resolved.subpack_path() {
            for (name, source) in material_files(&materials_dir(&subpack_dir)) {
                let link = target.join(&name);
                if fs::symlink_metadata(&link).is_ok() {
                    match self.fs.remove_entry(&link) {
                        Ok(()) => report.overridden += 1,
                        Err(e) => tracing::warn!("Failed to replace {}: {}", link, e),
                    }
                }
                self.link(&source, &link, &mut report);
            }
        }

        tracing::debug!(
            "Sync finished - removed: {}, linked: {}, overridden: {}, failed: {}",
            report.removed,
            report.linked,
            report.overridden,
            report.failed
        );

        report
    }

    /// Remove every entry directly inside `target`, returning how many went.
    ///
    /// Entries that cannot be removed are logged and left in place.
    pub fn clear(&self, target: &Utf8Path) -> usize {
        let entries = match fs::read_dir(target) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Cannot read shaders directory {}: {}", target, e);
                return 0;
            }
        };

        let mut removed = 0;
        for entry in entries.flatten() {
            let Ok(path) = Utf8PathBuf::try_from(entry.path()) else {
                tracing::warn!("Leaving non UTF-8 entry in {}", target);
                continue;
            };
            match self.fs.remove_entry(&path) {
                Ok(()) => removed += 1,
                Err(e) => tracing::warn!("Failed to remove {}: {}", path, e),
            }
        }

        removed
    }

    fn link(&self, source: &Utf8Path, link: &Utf8Path, report: &mut SyncReport) {
        match self.fs.create_symlink(source, link) {
            Ok(()) => report.linked += 1,
            Err(e) => {
                tracing::warn!(
                    "Failed to create symlink for {}: {}",
                    link.file_name().unwrap_or(link.as_str()),
                    e
                );
                report.failed += 1;
            }
        }
    }
}

/// Whether the pack (or its selected sub-pack) ships any material file.
pub fn has_materials(resolved: &ResolvedActivePack<'_>) -> bool {
    if !material_files(&materials_dir(resolved.path())).is_empty() {
        return true;
    }

    resolved
        .subpack_path()
        .is_some_and(|dir| !material_files(&materials_dir(&dir)).is_empty())
}

fn materials_dir(pack_dir: &Utf8Path) -> Utf8PathBuf {
    pack_dir.join("renderer").join("materials")
}

/// `(file name, absolute source path)` for each material in `dir`, sorted by name.
///
/// A missing directory yields nothing.
fn material_files(dir: &Utf8Path) -> Vec<(String, Utf8PathBuf)> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("No materials at {}: {}", dir, e);
            return Vec::new();
        }
    };

    let base = absolute(dir);
    let mut files: Vec<_> = entries
        .flatten()
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.contains(MATERIAL_MARKER))
        .map(|name| {
            let source = base.join(&name);
            (name, source)
        })
        .collect();

    files.sort();
    files
}

/// Make `path` absolute without resolving symlinks.
fn absolute(path: &Utf8Path) -> Utf8PathBuf {
    std::path::absolute(path)
        .ok()
        .and_then(|p| Utf8PathBuf::try_from(p).ok())
        .unwrap_or_else(|| path.to_path_buf())
}
