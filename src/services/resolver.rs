use crate::models::{ActiveSelector, PackCatalog, ResolvedActivePack};

/// Find the catalog entry the launcher has marked active.
///
/// Packs are matched on `lowercase(uuid)_lowercase(version)`. The first match in
/// catalog order wins, so a normal pack shadows a development pack with the
/// same key. Returns `None` when nothing matches.
pub fn resolve<'a>(
    catalog: &'a PackCatalog,
    selector: &'a ActiveSelector,
) -> Option<ResolvedActivePack<'a>> {
    let key = selector.composite_key();

    let found = catalog.iter().find(|pack| pack.composite_key() == key);
    match found {
        Some(pack) => {
            tracing::info!(
                "Active pack: {} v{} ({})",
                pack.display_name,
                selector.version,
                selector.pack_id
            );
            Some(ResolvedActivePack {
                pack,
                subpack: selector.subpack.as_deref(),
            })
        }
        None => {
            tracing::warn!("Active pack {} not found in scanned packs", key);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PackRecord;
    use camino::Utf8PathBuf;

    fn record(uuid: &str, version: &str, is_development: bool) -> PackRecord {
        PackRecord {
            uuid: uuid.to_string(),
            version: version.to_string(),
            display_name: uuid.to_string(),
            path: Utf8PathBuf::from(format!("/packs/{}", uuid)),
            is_development,
        }
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let mut catalog = PackCatalog::new();
        catalog.push(record("ABC-1", "3", false)).unwrap();
        let selector = ActiveSelector::new("abc-1", "3", None);

        let resolved = resolve(&catalog, &selector).unwrap();
        assert_eq!(resolved.pack.uuid, "ABC-1");
        assert_eq!(resolved.subpack, None);
    }

    #[test]
    fn test_resolve_empty_catalog() {
        let catalog = PackCatalog::new();
        let selector = ActiveSelector::new("anything", "100", None);

        assert!(resolve(&catalog, &selector).is_none());
    }

    #[test]
    fn test_resolve_requires_version_match() {
        let mut catalog = PackCatalog::new();
        catalog.push(record("u1", "100", false)).unwrap();
        let selector = ActiveSelector::new("u1", "200", None);

        assert!(resolve(&catalog, &selector).is_none());
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let mut catalog = PackCatalog::new();
        catalog.push(record("u1", "100", false)).unwrap();
        catalog.push(record("U1", "100", true)).unwrap();
        let selector = ActiveSelector::new("u1", "100", Some("high".to_string()));

        let resolved = resolve(&catalog, &selector).unwrap();
        assert!(!resolved.pack.is_development);
        assert_eq!(resolved.subpack, Some("high"));
    }
}
