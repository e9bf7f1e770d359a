//! Loading of JSON catalog resources

use crate::catalog::CatalogNode;
use crate::error::{I18nError, I18nResult};
use crate::locale::LocaleCode;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

// `EMBEDDED_RESOURCES: &[(&str, &str)]`, one entry per `locales/<code>.json`,
// generated by the build script after validating the files.
include!(concat!(env!("OUT_DIR"), "/embedded_locales.rs"));

/// Parse one catalog resource into a tree.
pub fn parse_catalog(locale: &str, raw: &str) -> I18nResult<CatalogNode> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|source| I18nError::Parse {
            locale: locale.to_string(),
            source,
        })?;

    if !value.is_object() {
        return Err(I18nError::InvalidCatalog {
            locale: locale.to_string(),
            reason: "top level must be an object".to_string(),
        });
    }

    CatalogNode::from_json(value).map_err(|reason| {
        error!(locale, %reason, "Rejected catalog resource");
        I18nError::InvalidCatalog {
            locale: locale.to_string(),
            reason,
        }
    })
}

/// Reads catalogs from a directory holding one `<code>.json` per locale
#[derive(Debug, Clone)]
pub struct ResourceLoader {
    /// Base directory for locale resources
    base_dir: PathBuf,
}

impl ResourceLoader {
    /// Create a new loader for `base_dir`
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Get the base directory for resources
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the resource file for `locale`
    pub fn resource_path(&self, locale: &LocaleCode) -> PathBuf {
        self.base_dir.join(format!("{locale}.json"))
    }

    /// Load the resource for a single locale
    pub fn load_locale(&self, locale: &LocaleCode) -> I18nResult<CatalogNode> {
        let path = self.resource_path(locale);
        debug!(path = %path.display(), "Loading catalog resource");

        let content = fs::read_to_string(&path).map_err(|source| {
            warn!(path = %path.display(), %source, "Catalog resource unreadable");
            I18nError::ResourceLoad {
                path: path.to_string_lossy().to_string(),
                source,
            }
        })?;

        parse_catalog(locale.as_str(), &content)
    }

    /// Locales that have a resource file, sorted
    ///
    /// File stems are normalized, so `es-ES.json` is discovered as `es`.
    pub fn discover(&self) -> I18nResult<Vec<LocaleCode>> {
        let entries = fs::read_dir(&self.base_dir).map_err(|source| I18nError::ResourceLoad {
            path: self.base_dir.to_string_lossy().to_string(),
            source,
        })?;

        let mut locales = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| I18nError::ResourceLoad {
                    path: self.base_dir.to_string_lossy().to_string(),
                    source,
                })?
                .path();

            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(code) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(LocaleCode::new)
            {
                locales.push(code);
            }
        }

        locales.sort();
        locales.dedup();
        Ok(locales)
    }

    /// Load every discovered locale. Fails on the first bad resource.
    pub fn load_all(&self) -> I18nResult<HashMap<LocaleCode, CatalogNode>> {
        let locales = self.discover()?;
        if locales.is_empty() {
            return Err(I18nError::NoCatalogs {
                location: self.base_dir.to_string_lossy().to_string(),
            });
        }

        let mut trees = HashMap::with_capacity(locales.len());
        for locale in locales {
            let tree = self.load_file_for(&locale)?;
            trees.insert(locale, tree);
        }
        Ok(trees)
    }

    // A normalized code may come from a region-tagged file name.
    fn load_file_for(&self, locale: &LocaleCode) -> I18nResult<CatalogNode> {
        let exact = self.resource_path(locale);
        if exact.exists() {
            return self.load_locale(locale);
        }

        let entries = fs::read_dir(&self.base_dir).map_err(|source| I18nError::ResourceLoad {
            path: self.base_dir.to_string_lossy().to_string(),
            source,
        })?;
        for entry in entries.flatten() {
            let path = entry.path();
            let matches = path.extension().and_then(|ext| ext.to_str()) == Some("json")
                && path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .and_then(LocaleCode::new)
                    .as_ref()
                    == Some(locale);
            if matches {
                let content = fs::read_to_string(&path).map_err(|source| I18nError::ResourceLoad {
                    path: path.to_string_lossy().to_string(),
                    source,
                })?;
                return parse_catalog(locale.as_str(), &content);
            }
        }

        self.load_locale(locale)
    }
}
