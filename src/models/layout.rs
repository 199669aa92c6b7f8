use camino::{Utf8Path, Utf8PathBuf};

/// Paths inside an mcpelauncher installation that the tool reads or writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherLayout {
    pub root: Utf8PathBuf,
    pub data: Utf8PathBuf,
    pub registry: Utf8PathBuf,
    pub resource_packs: Utf8PathBuf,
    pub development_resource_packs: Utf8PathBuf,
    pub shaders: Utf8PathBuf,
}

impl LauncherLayout {
    /// Derive the layout from an installation root such as
    /// `~/.local/share/mcpelauncher`
    pub fn from_root<P: AsRef<Utf8Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let data = root.join("games").join("com.mojang");

        Self {
            registry: data.join("minecraftpe").join("global_resource_packs.json"),
            resource_packs: data.join("resource_packs"),
            development_resource_packs: data.join("development_resource_packs"),
            shaders: root.join("shaders"),
            data,
            root,
        }
    }
}
