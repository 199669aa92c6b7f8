// trinity-shaders - Shader material linker for mcpelauncher
//
// This is the library crate containing pack discovery, active pack resolution
// and shader link synchronisation. The binary crate (main.rs) is a thin CLI.

pub mod config;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{ActiveSelector, LauncherLayout, PackCatalog, PackRecord, Settings};
pub use services::{RunOutcome, ShaderSyncError, run};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
