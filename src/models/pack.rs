use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// Maximum number of packs a catalog holds unless configured otherwise
pub const MAX_PACKS: usize = 100;

/// One resource pack discovered on disk
///
/// Only constructed once uuid, name and version were all read from the
/// pack's `manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackRecord {
    pub uuid: String,
    /// Digits-only flattening of the manifest version array (`[1, 2, 3]` → `"123"`)
    pub version: String,
    /// Pack name with `§` formatting codes stripped
    pub display_name: String,
    pub path: Utf8PathBuf,
    pub is_development: bool,
}

impl PackRecord {
    /// Lookup key shared with [`ActiveSelector::composite_key`]
    pub fn composite_key(&self) -> String {
        composite_key(&self.uuid, &self.version)
    }
}

/// Builds the case-insensitive `<id>_<version>` key used to match packs
pub fn composite_key(id: &str, version: &str) -> String {
    format!("{}_{}", id, version).to_lowercase()
}

/// Returned by [`PackCatalog::push`] when the catalog is at capacity
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Pack catalog is full ({capacity} packs)")]
pub struct CatalogFull {
    pub capacity: usize,
}

/// Ordered, bounded collection of discovered packs
///
/// Insertion order is discovery order. Duplicate keys are allowed; lookups
/// take the first match.
#[derive(Debug, Clone)]
pub struct PackCatalog {
    packs: Vec<PackRecord>,
    capacity: usize,
}

impl PackCatalog {
    /// Create an empty catalog holding at most [`MAX_PACKS`] records
    pub fn new() -> Self {
        Self::with_capacity(MAX_PACKS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            packs: Vec::new(),
            capacity,
        }
    }

    /// Append a record, refusing it once the catalog is full
    pub fn push(&mut self, pack: PackRecord) -> Result<(), CatalogFull> {
        if self.is_full() {
            return Err(CatalogFull {
                capacity: self.capacity,
            });
        }
        self.packs.push(pack);
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.packs.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PackRecord> {
        self.packs.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PackRecord> {
        self.packs.iter()
    }
}

impl Default for PackCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a PackCatalog {
    type Item = &'a PackRecord;
    type IntoIter = std::slice::Iter<'a, PackRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.packs.iter()
    }
}

/// The launcher's recorded active pack, read from `global_resource_packs.json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSelector {
    pub pack_id: String,
    pub version: String,
    pub subpack: Option<String>,
}

impl ActiveSelector {
    /// Create a selector; an empty sub-pack name means "no sub-pack"
    pub fn new(
        pack_id: impl Into<String>,
        version: impl Into<String>,
        subpack: Option<String>,
    ) -> Self {
        Self {
            pack_id: pack_id.into(),
            version: version.into(),
            subpack: subpack.filter(|s| !s.is_empty()),
        }
    }

    pub fn composite_key(&self) -> String {
        composite_key(&self.pack_id, &self.version)
    }
}

/// A catalog entry matched by the selector, with the selector's sub-pack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedActivePack<'a> {
    pub pack: &'a PackRecord,
    pub subpack: Option<&'a str>,
}

impl ResolvedActivePack<'_> {
    pub fn path(&self) -> &Utf8Path {
        &self.pack.path
    }

    /// `<pack>/subpacks/<name>`, if a sub-pack is selected
    pub fn subpack_path(&self) -> Option<Utf8PathBuf> {
        self.subpack
            .map(|name| self.pack.path.join("subpacks").join(name))
    }
}
