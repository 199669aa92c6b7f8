//! Locating the mcpelauncher installation.
//!
//! The launcher lives in one of two places depending on how it was installed:
//! - native: `~/.local/share/mcpelauncher`
//! - Flatpak (Trinity launcher): `~/.var/app/com.trench.trinity.launcher/data/mcpelauncher`
//!
//! Extra roots from the settings file are tried after these.
//!
//! # Examples
//!
//! ```ignore
//! use trinity_shaders::services::install_detection::{default_candidates, detect_install_root};
//!
//! let candidates = default_candidates(home, &settings.extra_install_roots);
//! let root = detect_install_root(&candidates)?;
//! ```

use camino::{Utf8Path, Utf8PathBuf};

use super::ShaderSyncError;

/// Native install location, relative to `$HOME`
pub const DEFAULT_ROOT: &str = ".local/share/mcpelauncher";

/// Flatpak install location, relative to `$HOME`
pub const FLATPAK_ROOT: &str = ".var/app/com.trench.trinity.launcher/data/mcpelauncher";

/// Candidate installation roots in the order they are tried.
pub fn default_candidates(home: &Utf8Path, extra_roots: &[Utf8PathBuf]) -> Vec<Utf8PathBuf> {
    let mut candidates = vec![home.join(DEFAULT_ROOT), home.join(FLATPAK_ROOT)];
    candidates.extend(extra_roots.iter().map(|root| expand_home(root, home)));
    candidates
}

/// Return the first candidate that is an existing directory.
///
/// # Errors
///
/// [`ShaderSyncError::LauncherNotFound`] listing every searched path.
pub fn detect_install_root(candidates: &[Utf8PathBuf]) -> Result<Utf8PathBuf, ShaderSyncError> {
    for (index, candidate) in candidates.iter().enumerate() {
        if candidate.is_dir() {
            if index == 0 {
                tracing::info!("Using default path: {}", candidate);
            } else {
                tracing::info!("Using alternative path: {}", candidate);
            }
            return Ok(candidate.clone());
        }
        tracing::debug!("No launcher at {}", candidate);
    }

    Err(ShaderSyncError::LauncherNotFound(candidates.to_vec()))
}

/// Replace a leading `~` with `home`.
fn expand_home(path: &Utf8Path, home: &Utf8Path) -> Utf8PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

/// Render `path` with the home prefix shown as `$HOME`.
pub fn display_with_home(path: &Utf8Path, home: Option<&Utf8Path>) -> String {
    match home.and_then(|home| path.strip_prefix(home).ok()) {
        Some(rest) if rest.as_str().is_empty() => "$HOME".to_string(),
        Some(rest) => format!("$HOME/{}", rest),
        None => path.to_string(),
    }
}
