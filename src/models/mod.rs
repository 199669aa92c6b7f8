//! Data models for trinity-shaders.
//!
//! - [`PackRecord`] / [`PackCatalog`]: packs discovered under the two pack roots
//! - [`ActiveSelector`]: the launcher's recorded active pack
//! - [`ResolvedActivePack`]: the catalog entry the selector points at
//! - [`LauncherLayout`]: paths inside an mcpelauncher installation
//! - [`Settings`]: user settings loaded from `settings.yaml`
//!
//! Everything here lives for a single run; nothing is persisted except settings.

pub mod layout;
pub mod pack;
pub mod settings;

pub use layout::LauncherLayout;
pub use pack::{
    ActiveSelector, CatalogFull, MAX_PACKS, PackCatalog, PackRecord, ResolvedActivePack,
    composite_key,
};
pub use settings::Settings;
