//! Pack discovery under `resource_packs/` and `development_resource_packs/`.
//!
//! A pack root holds pack directories either directly or one namespace level
//! down. Any directory with a `manifest.json` is a candidate; deeper nesting
//! is never searched.

use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

use crate::models::{LauncherLayout, PackCatalog, PackRecord};
use crate::services::manifest::{clean_name, parse_manifest};

const MANIFEST_FILE: &str = "manifest.json";

/// Outcome of scanning one pack root
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Packs appended to the catalog
    pub added: usize,
    /// Candidates dropped because their manifest could not be parsed
    pub skipped: usize,
    /// Scan stopped early because the catalog filled up
    pub truncated: bool,
}

impl ScanReport {
    fn merge(&mut self, other: ScanReport) {
        self.added += other.added;
        self.skipped += other.skipped;
        self.truncated |= other.truncated;
    }
}

/// Scan `root` for packs and append them to `catalog`.
///
/// A missing or unreadable root is treated as empty.
pub fn scan(root: &Utf8Path, is_development: bool, catalog: &mut PackCatalog) -> ScanReport {
    let mut report = ScanReport::default();

    let entries = match subdirectories(root) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Skipping pack root {}: {}", root, e);
            return report;
        }
    };

    for dir in entries {
        if has_manifest(&dir) {
            if !add_candidate(&dir, is_development, catalog, &mut report) {
                break;
            }
            continue;
        }

        // Namespace directory: look exactly one level deeper
        let nested = match subdirectories(&dir) {
            Ok(nested) => nested,
            Err(e) => {
                tracing::debug!("Cannot read {}: {}", dir, e);
                continue;
            }
        };

        let mut full = false;
        for pack_dir in nested.iter().filter(|d| has_manifest(d)) {
            if !add_candidate(pack_dir, is_development, catalog, &mut report) {
                full = true;
                break;
            }
        }
        if full {
            break;
        }
    }

    report
}

/// Build a fresh catalog from both pack roots of an installation.
///
/// Normal packs are scanned first so they win ties against development packs.
pub fn build_catalog(layout: &LauncherLayout, capacity: usize) -> (PackCatalog, ScanReport) {
    let mut catalog = PackCatalog::with_capacity(capacity);
    let mut report = scan(&layout.resource_packs, false, &mut catalog);
    report.merge(scan(
        &layout.development_resource_packs,
        true,
        &mut catalog,
    ));

    tracing::info!("Found {} packs", catalog.len());
    (catalog, report)
}

/// Parse one candidate and append it; returns `false` once the catalog is full.
fn add_candidate(
    dir: &Utf8Path,
    is_development: bool,
    catalog: &mut PackCatalog,
    report: &mut ScanReport,
) -> bool {
    if catalog.is_full() {
        tracing::warn!(
            "Too many packs, skipping the rest (limit {})",
            catalog.capacity()
        );
        report.truncated = true;
        return false;
    }

    let fields = match parse_manifest(&dir.join(MANIFEST_FILE)) {
        Ok(fields) => fields,
        Err(e) => {
            tracing::warn!("Skipping {}: {}", dir, e);
            report.skipped += 1;
            return true;
        }
    };

    let pack = PackRecord {
        uuid: fields.uuid,
        version: fields.version,
        display_name: clean_name(&fields.name),
        path: dir.to_path_buf(),
        is_development,
    };

    tracing::info!(
        "{}.\t{}{}",
        catalog.len() + 1,
        pack.display_name,
        if is_development { " [DEVELOPMENT]" } else { "" }
    );

    match catalog.push(pack) {
        Ok(()) => {
            report.added += 1;
            true
        }
        Err(e) => {
            tracing::warn!("{}", e);
            report.truncated = true;
            false
        }
    }
}

fn has_manifest(dir: &Utf8Path) -> bool {
    dir.join(MANIFEST_FILE).exists()
}

/// Non-hidden subdirectories of `dir`, sorted by name.
///
/// Symlinked directories are followed. Entries with non-UTF-8 names are skipped.
fn subdirectories(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut found = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let Ok(name) = entry.file_name().into_string() else {
            tracing::debug!("Skipping non UTF-8 entry in {}", dir);
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        let path = dir.join(&name);
        if path.is_dir() {
            found.push(path);
        }
    }

    found.sort();
    Ok(found)
}
