//! Services module - the pack discovery and shader linking pipeline.
//!
//! Data flows one way: the registry file and pack roots feed the catalog
//! builder and field extractor, the resolver picks the active pack, and the
//! linker rebuilds the shaders directory.
//!
//! # Components
//!
//! - [`manifest`]: tolerant line-based field extraction from `manifest.json`
//!   and `global_resource_packs.json`, plus formatting-code stripping
//! - [`catalog`]: two-level scan of the pack roots into a bounded [`PackCatalog`](crate::models::PackCatalog)
//! - [`resolver`]: case-insensitive `uuid_version` lookup of the active pack
//! - [`linker`]: clears the shaders directory and symlinks `*.material.bin` files
//! - [`install_detection`]: finds the mcpelauncher installation root
//! - [`runner`]: wires the above together for one invocation
//!
//! Nothing here keeps state between runs or touches the network.
//!
//! # Usage Example
//!
//! ```ignore
//! use trinity_shaders::models::LauncherLayout;
//! use trinity_shaders::services::run;
//!
//! let layout = LauncherLayout::from_root(root);
//! match run(&layout, 100)? {
//!     RunOutcome::Linked { pack, .. } => println!("linked {}", pack.display_name),
//!     RunOutcome::Emptied { .. } => println!("shaders folder emptied"),
//! }
//! ```

pub mod catalog;
pub mod install_detection;
pub mod linker;
pub mod manifest;
pub mod resolver;
pub mod runner;

pub use catalog::{ScanReport, build_catalog, scan};
pub use install_detection::{default_candidates, detect_install_root, display_with_home};
pub use linker::{LinkFilesystem, OsLinkFilesystem, ShaderLinker, SyncReport, has_materials};
pub use manifest::{ExtractError, clean_name, parse_manifest, parse_registry};
pub use resolver::resolve;
pub use runner::{EmptyReason, RunOutcome, ShaderSyncError, run, run_with_linker};
