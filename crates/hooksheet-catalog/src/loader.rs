//! Loading catalogs from JSON, YAML or TOML files
//!
//! A catalog file is either a bare list of entries or a table with an
//! `entries` list:
//!
//! ```yaml
//! entries:
//!   - id: useState
//!     label: useState
//!     description: Local state
//!     note: Use the updater form for derived updates
//!     code: const [count, setCount] = useState(0);
//!     accentColor: "#61dafb"
//! ```
//!
//! TOML files must use the table form (`[[entries]]`).

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Catalog, CatalogError, Result, TopicEntry};

#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<TopicEntry>),
    Table { entries: Vec<TopicEntry> },
}

impl CatalogFile {
    fn into_entries(self) -> Vec<TopicEntry> {
        match self {
            CatalogFile::List(entries) | CatalogFile::Table { entries } => entries,
        }
    }
}

/// Supported catalog file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
    Toml,
}

impl CatalogFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => Some(CatalogFormat::Json),
            Some("yaml") | Some("yml") => Some(CatalogFormat::Yaml),
            Some("toml") => Some(CatalogFormat::Toml),
            _ => None,
        }
    }
}

/// Load a catalog from a file, picking the parser by extension
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    let format = CatalogFormat::from_path(path)
        .ok_or_else(|| CatalogError::UnsupportedFormat(path.to_path_buf()))?;

    let content = fs::read_to_string(path)?;
    let catalog = parse_catalog(&content, format).map_err(|e| match e {
        CatalogError::Parse { message, .. } => CatalogError::Parse {
            path: path.to_path_buf(),
            message,
        },
        other => other,
    })?;

    tracing::info!(
        "Loaded catalog with {} entries from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}

/// Parse catalog text in a given format
pub fn parse_catalog(content: &str, format: CatalogFormat) -> Result<Catalog> {
    let parse_error = |message: String| CatalogError::Parse {
        path: Default::default(),
        message,
    };

    let file: CatalogFile = match format {
        CatalogFormat::Json => {
            serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?
        }
        CatalogFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?
        }
        CatalogFormat::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string()))?,
    };

    Catalog::new(file.into_entries())
}

/// Serialise a catalog as pretty JSON in the table form
pub fn catalog_to_json(catalog: &Catalog) -> Result<String> {
    let file = CatalogFile::Table {
        entries: catalog.entries().to_vec(),
    };
    serde_json::to_string_pretty(&file).map_err(|e| CatalogError::Parse {
        path: Default::default(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_list() {
        let json = r#"[
            {"id": "a", "label": "A", "code": "a()"},
            {"id": "b", "label": "B"}
        ]"#;
        let catalog = parse_catalog(json, CatalogFormat::Json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find("a").map(|e| e.code()), Some("a()"));
    }

    #[test]
    fn test_parse_yaml_table() {
        let yaml = "entries:\n  - id: a\n    label: A\n    accentColor: \"#010203\"\n";
        let catalog = parse_catalog(yaml, CatalogFormat::Yaml).unwrap();
        assert_eq!(catalog.get(0).map(|e| e.accent_color()), Some("#010203"));
    }

    #[test]
    fn test_parse_toml_table() {
        let toml = "[[entries]]\nid = \"a\"\nlabel = \"A\"\n\n[[entries]]\nid = \"b\"\nlabel = \"B\"\n";
        let catalog = parse_catalog(toml, CatalogFormat::Toml).unwrap();
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_rejects_duplicates() {
        let json = r#"[{"id": "a", "label": "A"}, {"id": "a", "label": "B"}]"#;
        assert!(matches!(
            parse_catalog(json, CatalogFormat::Json),
            Err(CatalogError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            parse_catalog("{not json", CatalogFormat::Json),
            Err(CatalogError::Parse { .. })
        ));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(CatalogFormat::from_path(Path::new("x.yml")), Some(CatalogFormat::Yaml));
        assert_eq!(CatalogFormat::from_path(Path::new("x.JSON")), None);
        assert_eq!(CatalogFormat::from_path(Path::new("x")), None);
    }

    #[test]
    fn test_json_export_reloads() {
        let catalog = crate::builtin::react_hooks();
        let json = catalog_to_json(&catalog).unwrap();
        assert_eq!(parse_catalog(&json, CatalogFormat::Json).unwrap(), catalog);
    }
}
