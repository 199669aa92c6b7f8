//! Tolerant field extraction for `manifest.json` and `global_resource_packs.json`.
//!
//! These files are scanned line by line instead of being parsed as JSON. The
//! first line that contains the quoted key *and* yields a value wins. This
//! accepts the loosely formatted files found in the wild (trailing commas,
//! comments) at the cost of not understanding nesting, escaped quotes or
//! multi-line strings.
//!
//! # Examples
//!
//! ```ignore
//! use trinity_shaders::services::manifest::{extract_version_triple_from_str, clean_name};
//!
//! assert_eq!(extract_version_triple_from_str(r#""version": [1, 12, 3]"#), Some("1123".into()));
//! assert_eq!(clean_name("§cRed"), "Red");
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use std::fs;
use std::sync::LazyLock;
use thiserror::Error;

use crate::models::ActiveSelector;

/// Minecraft formatting-code marker
const FORMAT_MARKER: char = '§';

/// Number of version components kept when flattening a version array
const VERSION_COMPONENTS: usize = 3;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("Invalid digit-run regex"));

/// Errors from reading a manifest or the global registry
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to read {path}: {source}")]
    Unreadable {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: field \"{field}\" missing or invalid")]
    MissingField {
        path: Utf8PathBuf,
        field: &'static str,
    },
}

/// Identifying fields of a pack manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestFields {
    pub uuid: String,
    /// Raw name, formatting codes still present
    pub name: String,
    pub version: String,
}

/// Find the first `"<key>": "<value>"` in `text` and return the value verbatim.
pub fn extract_quoted_string_from_str(text: &str, key: &str) -> Option<String> {
    let token = format!("\"{}\"", key);

    text.lines().find_map(|line| {
        let after_key = &line[line.find(&token)? + token.len()..];
        let after_colon = &after_key[after_key.find(':')? + 1..];
        let value_start = &after_colon[after_colon.find('"')? + 1..];
        let value = &value_start[..value_start.find('"')?];
        Some(value.to_string())
    })
}

/// Flatten the first `"version": [..]` array in `text` to its digits.
///
/// Up to three digit runs are concatenated with no separator, so `[1, 12, 3]`
/// becomes `"1123"`. Anything that is not an ASCII digit is dropped.
pub fn extract_version_triple_from_str(text: &str) -> Option<String> {
    extract_version_array(text, "version")
}

fn extract_version_array(text: &str, key: &str) -> Option<String> {
    let token = format!("\"{}\"", key);
    let mut lines = text.lines();

    while let Some(line) = lines.next() {
        let Some(key_pos) = line.find(&token) else {
            continue;
        };
        let after_key = &line[key_pos + token.len()..];
        let Some(open) = after_key.find('[') else {
            continue;
        };

        let mut contents = String::from(&after_key[open + 1..]);
        // Pretty-printed arrays close on a later line
        while !contents.contains(']') {
            match lines.next() {
                Some(next) => {
                    contents.push(' ');
                    contents.push_str(next);
                }
                None => return None,
            }
        }

        let inside = contents.split(']').next().unwrap_or_default();
        let digits: String = DIGIT_RUN
            .find_iter(inside)
            .take(VERSION_COMPONENTS)
            .map(|m| m.as_str())
            .collect();

        if digits.is_empty() {
            continue;
        }
        return Some(digits);
    }

    None
}

/// Read `path` as text, replacing invalid UTF-8 rather than failing.
fn read_text(path: &Utf8Path) -> Result<String, ExtractError> {
    let bytes = fs::read(path).map_err(|source| ExtractError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// File variant of [`extract_quoted_string_from_str`]; unreadable files yield `None`.
pub fn extract_quoted_string(path: &Utf8Path, key: &str) -> Option<String> {
    let text = read_text(path).ok()?;
    extract_quoted_string_from_str(&text, key)
}

/// File variant of [`extract_version_triple_from_str`]; unreadable files yield `None`.
pub fn extract_version_triple(path: &Utf8Path) -> Option<String> {
    let text = read_text(path).ok()?;
    extract_version_triple_from_str(&text)
}

/// Read uuid, name and version from a pack manifest.
///
/// # Errors
///
/// Returns [`ExtractError::MissingField`] naming the first field that could
/// not be extracted (an empty uuid counts as missing), or
/// [`ExtractError::Unreadable`] if the file cannot be read.
pub fn parse_manifest(path: &Utf8Path) -> Result<ManifestFields, ExtractError> {
    let text = read_text(path)?;
    let missing = |field| ExtractError::MissingField {
        path: path.to_path_buf(),
        field,
    };

    let uuid = extract_quoted_string_from_str(&text, "uuid")
        .filter(|uuid| !uuid.is_empty())
        .ok_or_else(|| missing("uuid"))?;
    let name = extract_quoted_string_from_str(&text, "name").ok_or_else(|| missing("name"))?;
    let version = extract_version_triple_from_str(&text).ok_or_else(|| missing("version"))?;

    Ok(ManifestFields {
        uuid,
        name,
        version,
    })
}

/// Read the active pack reference from `global_resource_packs.json`.
///
/// The registry lists global packs in priority order; the first entry is the
/// active one, which is what first-match scanning picks up.
pub fn parse_registry(path: &Utf8Path) -> Result<ActiveSelector, ExtractError> {
    let text = read_text(path)?;
    let missing = |field| ExtractError::MissingField {
        path: path.to_path_buf(),
        field,
    };

    let pack_id = extract_quoted_string_from_str(&text, "pack_id")
        .filter(|id| !id.is_empty())
        .ok_or_else(|| missing("pack_id"))?;
    let version = extract_version_triple_from_str(&text).ok_or_else(|| missing("version"))?;
    let subpack = extract_quoted_string_from_str(&text, "subpack");

    Ok(ActiveSelector::new(pack_id, version, subpack))
}

/// Strip Minecraft `§` formatting codes from a display name.
///
/// Each marker is removed together with the character after it; a trailing
/// marker is removed on its own. The result never contains a marker.
pub fn clean_name(name: &str) -> String {
    let mut cleaned = String::with_capacity(name.len());
    let mut chars = name.chars();

    while let Some(c) = chars.next() {
        if c == FORMAT_MARKER {
            chars.next();
        } else {
            cleaned.push(c);
        }
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MANIFEST: &str = r#"{
    "format_version": 2,
    "header": {
        "description": "Deferred lighting",
        "name": "§l§6Particle§rMax",
        "uuid": "0f2c1e36-5b8b-4d3a-9d0e-6f1c2f4a7b11",
        "version": [1, 12, 3],
        "min_engine_version": [1, 20, 0]
    },
    "modules": [
        {
            "type": "resources",
            "uuid": "aaaaaaaa-0000-0000-0000-000000000000",
            "version": [9, 9, 9]
        }
    ]
}"#;

    fn temp_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn utf8(file: &NamedTempFile) -> &Utf8Path {
        Utf8Path::from_path(file.path()).unwrap()
    }

    #[test]
    fn test_quoted_string_first_match_wins() {
        assert_eq!(
            extract_quoted_string_from_str(MANIFEST, "uuid").as_deref(),
            Some("0f2c1e36-5b8b-4d3a-9d0e-6f1c2f4a7b11")
        );
    }

    #[test]
    fn test_quoted_string_is_case_sensitive() {
        assert_eq!(extract_quoted_string_from_str(MANIFEST, "UUID"), None);
    }

    #[test]
    fn test_quoted_string_skips_lines_without_value() {
        let text = "\"name\"\n\"name\": \"Second\"";
        assert_eq!(
            extract_quoted_string_from_str(text, "name").as_deref(),
            Some("Second")
        );
    }

    #[test]
    fn test_quoted_string_key_must_be_quoted() {
        let text = "pack_name: \"nope\"\n";
        assert_eq!(extract_quoted_string_from_str(text, "name"), None);
    }

    #[test]
    fn test_version_triple() {
        assert_eq!(
            extract_version_triple_from_str(r#""version": [1, 12, 3]"#).as_deref(),
            Some("1123")
        );
        assert_eq!(
            extract_version_triple_from_str(r#""version": [1, 2, 3]"#).as_deref(),
            Some("123")
        );
    }

    #[test]
    fn test_version_ignores_min_engine_version() {
        let text = "\"min_engine_version\": [1, 20, 0],\n\"version\": [2, 0, 1]";
        assert_eq!(extract_version_triple_from_str(text).as_deref(), Some("201"));
    }

    #[test]
    fn test_version_keeps_three_components() {
        assert_eq!(
            extract_version_triple_from_str(r#""version": [1, 2, 3, 4]"#).as_deref(),
            Some("123")
        );
    }

    #[test]
    fn test_version_drops_non_digits() {
        assert_eq!(
            extract_version_triple_from_str(r#""version": [1, "2.5", 3]"#).as_deref(),
            Some("125")
        );
    }

    #[test]
    fn test_version_multiline_array() {
        let text = "\"version\": [\n    1,\n    4,\n    0\n],";
        assert_eq!(extract_version_triple_from_str(text).as_deref(), Some("140"));
    }

    #[test]
    fn test_version_string_form_not_found() {
        assert_eq!(extract_version_triple_from_str(r#""version": "1.0.0""#), None);
        assert_eq!(extract_version_triple_from_str(r#""version": []"#), None);
    }

    #[test]
    fn test_parse_manifest() {
        let file = temp_file(MANIFEST);
        let fields = parse_manifest(utf8(&file)).unwrap();

        assert_eq!(fields.uuid, "0f2c1e36-5b8b-4d3a-9d0e-6f1c2f4a7b11");
        assert_eq!(fields.name, "§l§6Particle§rMax");
        assert_eq!(fields.version, "1123");
    }

    #[test]
    fn test_parse_manifest_missing_uuid() {
        let file = temp_file("{\n\"name\": \"X\",\n\"version\": [1, 0, 0]\n}");
        let err = parse_manifest(utf8(&file)).unwrap_err();

        assert!(matches!(err, ExtractError::MissingField { field: "uuid", .. }));
    }

    #[test]
    fn test_parse_manifest_unreadable() {
        let err = parse_manifest(Utf8Path::new("/nonexistent/manifest.json")).unwrap_err();
        assert!(matches!(err, ExtractError::Unreadable { .. }));
        assert_eq!(
            extract_quoted_string(Utf8Path::new("/nonexistent/manifest.json"), "uuid"),
            None
        );
    }

    #[test]
    fn test_parse_registry_with_subpack() {
        let file = temp_file(
            r#"[
   {
      "pack_id" : "0F2C1E36-5B8B",
      "subpack" : "ultra",
      "version" : [ 1, 12, 3 ]
   },
   {
      "pack_id" : "other",
      "version" : [ 2, 0, 0 ]
   }
]"#,
        );
        let selector = parse_registry(utf8(&file)).unwrap();

        assert_eq!(selector.pack_id, "0F2C1E36-5B8B");
        assert_eq!(selector.version, "1123");
        assert_eq!(selector.subpack.as_deref(), Some("ultra"));
    }

    #[test]
    fn test_parse_registry_without_subpack() {
        let file = temp_file(r#"[{"pack_id": "u1", "version": [1, 0, 0]}]"#);
        let selector = parse_registry(utf8(&file)).unwrap();

        assert_eq!(selector.pack_id, "u1");
        assert_eq!(selector.version, "100");
        assert_eq!(selector.subpack, None);
    }

    #[test]
    fn test_parse_registry_empty_list() {
        let file = temp_file("[]\n");
        let err = parse_registry(utf8(&file)).unwrap_err();
        assert!(matches!(err, ExtractError::MissingField { field: "pack_id", .. }));
    }

    #[test]
    fn test_file_variants() {
        let file = temp_file(MANIFEST);
        assert_eq!(extract_version_triple(utf8(&file)).as_deref(), Some("1123"));
        assert_eq!(
            extract_quoted_string(utf8(&file), "description").as_deref(),
            Some("Deferred lighting")
        );
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("ParticleMax"), "ParticleMax");
        assert_eq!(clean_name("§cRed"), "Red");
        assert_eq!(clean_name("§l§6Particle§rMax"), "ParticleMax");
        assert_eq!(clean_name("Trailing§"), "Trailing");
        assert_eq!(clean_name("§§x"), "x");
    }
}
