use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use super::pack::MAX_PACKS;

/// User settings from `settings.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,

    /// Directory for rotating log files; console only when unset
    #[serde(rename = "Log Directory", default)]
    pub log_dir: Option<Utf8PathBuf>,

    /// Installation roots tried after the built-in locations
    #[serde(rename = "Extra Install Roots", default)]
    pub extra_install_roots: Vec<Utf8PathBuf>,

    #[serde(rename = "Max Packs", default = "default_max_packs")]
    pub max_packs: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_mode: false,
            log_dir: None,
            extra_install_roots: Vec::new(),
            max_packs: MAX_PACKS,
        }
    }
}

fn default_max_packs() -> usize {
    MAX_PACKS
}
