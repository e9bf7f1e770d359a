//! Translation catalogs
//!
//! A catalog maps each locale code to a tree of message templates. Trees
//! are built once at startup from JSON resources and never change after
//! that, so a catalog behind an `Arc` can be read from any number of
//! threads without locking.

use crate::error::{I18nError, I18nResult};
use crate::locale::{normalize, LocaleCode};
use crate::resource::{self, ResourceLoader};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, info};

/// Returned by [`TranslationCatalog::tree`] when no catalog exists at all.
static EMPTY_TREE: CatalogNode = CatalogNode::Branch(BTreeMap::new());

/// One node of a catalog tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CatalogNode {
    /// A message template
    Text(String),
    /// A group of named children
    Branch(BTreeMap<String, CatalogNode>),
}

impl CatalogNode {
    /// Convert a parsed JSON resource into a tree.
    ///
    /// Numbers and booleans are kept as their textual form. `null` and
    /// arrays have no meaning in a catalog and are rejected, as are key
    /// segments that are empty or contain a `.`, which no dotted key
    /// could reach.
    pub fn from_json(value: serde_json::Value) -> Result<Self, String> {
        Self::convert(value, "")
    }

    fn convert(value: serde_json::Value, path: &str) -> Result<Self, String> {
        use serde_json::Value;

        match value {
            Value::String(text) => Ok(Self::Text(text)),
            Value::Number(number) => Ok(Self::Text(number.to_string())),
            Value::Bool(flag) => Ok(Self::Text(flag.to_string())),
            Value::Object(map) => {
                let mut children = BTreeMap::new();
                for (segment, child) in map {
                    if segment.is_empty() || segment.contains('.') {
                        return Err(format!("invalid key segment '{segment}' under '{path}'"));
                    }
                    let child_path = if path.is_empty() {
                        segment.clone()
                    } else {
                        format!("{path}.{segment}")
                    };
                    children.insert(segment, Self::convert(child, &child_path)?);
                }
                Ok(Self::Branch(children))
            }
            Value::Null => Err(format!("'{path}' is null")),
            Value::Array(_) => Err(format!("'{path}' is an array")),
        }
    }

    /// Direct child named `segment`, if this is a branch that has one
    pub fn child(&self, segment: &str) -> Option<&CatalogNode> {
        match self {
            Self::Branch(children) => children.get(segment),
            Self::Text(_) => None,
        }
    }

    /// Walk a dotted key path. Every segment must be a child of the node
    /// reached so far; an empty key or empty segment never matches.
    pub fn walk(&self, key: &str) -> Option<&CatalogNode> {
        if key.is_empty() {
            return None;
        }
        key.split('.')
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// The template, if this node is a leaf
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Branch(_) => None,
        }
    }

    /// Whether this node is a branch without children
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Branch(children) if children.is_empty())
    }

    /// Dotted paths of every leaf below this node, in sorted order
    pub fn leaf_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        self.collect_leaf_keys("", &mut keys);
        keys
    }

    fn collect_leaf_keys(&self, prefix: &str, keys: &mut Vec<String>) {
        match self {
            Self::Text(_) => keys.push(prefix.to_string()),
            Self::Branch(children) => {
                for (segment, child) in children {
                    let path = if prefix.is_empty() {
                        segment.clone()
                    } else {
                        format!("{prefix}.{segment}")
                    };
                    child.collect_leaf_keys(&path, keys);
                }
            }
        }
    }
}

/// Immutable mapping from locale code to catalog tree.
#[derive(Debug, Clone)]
pub struct TranslationCatalog {
    trees: HashMap<LocaleCode, CatalogNode>,
    default_locale: LocaleCode,
    fallback_locale: LocaleCode,
}

impl TranslationCatalog {
    /// Build a catalog from already-parsed trees.
    pub fn new(
        default_locale: LocaleCode,
        fallback_locale: LocaleCode,
        trees: HashMap<LocaleCode, CatalogNode>,
    ) -> Self {
        Self {
            trees,
            default_locale,
            fallback_locale,
        }
    }

    /// Build a catalog from `(locale, json)` pairs.
    pub fn from_sources<'a, I>(
        default_locale: LocaleCode,
        fallback_locale: LocaleCode,
        sources: I,
    ) -> I18nResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut trees = HashMap::new();
        for (locale, raw) in sources {
            let code = LocaleCode::new(locale).ok_or_else(|| I18nError::InvalidCatalog {
                locale: locale.to_string(),
                reason: "catalog name is not a locale code".to_string(),
            })?;
            let tree = resource::parse_catalog(code.as_str(), raw)?;
            debug!(locale = %code, keys = tree.leaf_keys().len(), "Loaded catalog");
            trees.insert(code, tree);
        }

        Ok(Self::new(default_locale, fallback_locale, trees))
    }

    /// The catalogs compiled into the crate from its `locales/` directory.
    pub fn embedded(default_locale: LocaleCode, fallback_locale: LocaleCode) -> I18nResult<Self> {
        let catalog = Self::from_sources(
            default_locale,
            fallback_locale,
            resource::EMBEDDED_RESOURCES.iter().copied(),
        )?;
        info!(locales = ?catalog.locales(), "Loaded embedded translation catalogs");
        Ok(catalog)
    }

    /// Load every `<code>.json` file in `dir`.
    pub fn from_dir<P: AsRef<Path>>(
        dir: P,
        default_locale: LocaleCode,
        fallback_locale: LocaleCode,
    ) -> I18nResult<Self> {
        let loader = ResourceLoader::new(dir);
        let trees = loader.load_all()?;
        let catalog = Self::new(default_locale, fallback_locale, trees);
        info!(
            dir = %loader.base_dir().display(),
            locales = ?catalog.locales(),
            "Loaded translation catalogs"
        );
        Ok(catalog)
    }

    /// Locale used when nothing else matches
    pub fn default_locale(&self) -> &LocaleCode {
        &self.default_locale
    }

    /// Locale consulted for keys missing from the active locale
    pub fn fallback_locale(&self) -> &LocaleCode {
        &self.fallback_locale
    }

    /// Whether `code` (already normalized) has a catalog
    pub fn contains(&self, code: &str) -> bool {
        self.trees.contains_key(code)
    }

    /// Normalize `raw` and return it if a catalog exists for it
    pub fn supported(&self, raw: &str) -> Option<LocaleCode> {
        LocaleCode::new(raw).filter(|code| self.contains(code.as_str()))
    }

    /// All locales with a catalog, sorted
    pub fn locales(&self) -> Vec<&LocaleCode> {
        let mut locales: Vec<_> = self.trees.keys().collect();
        locales.sort();
        locales
    }

    /// Full tree for a locale.
    ///
    /// Unknown locales get the default locale's tree, then the fallback
    /// locale's tree. An empty branch comes back only when no catalog is
    /// loaded at all.
    pub fn tree(&self, locale: &str) -> &CatalogNode {
        let normalized = normalize(locale);
        self.trees
            .get(normalized.as_str())
            .or_else(|| self.trees.get(&self.default_locale))
            .or_else(|| self.trees.get(&self.fallback_locale))
            .unwrap_or(&EMPTY_TREE)
    }

    /// Tree for exactly `locale`, without any defaulting
    pub fn exact_tree(&self, locale: &str) -> Option<&CatalogNode> {
        self.trees.get(normalize(locale).as_str())
    }

    /// Stored code and tree for exactly `locale`
    pub fn entry(&self, locale: &str) -> Option<(&LocaleCode, &CatalogNode)> {
        self.trees.get_key_value(normalize(locale).as_str())
    }

    /// Strict lookup of a dotted key in one locale
    pub fn lookup(&self, locale: &str, key: &str) -> Option<&CatalogNode> {
        self.exact_tree(locale).and_then(|tree| tree.walk(key))
    }

    /// Every leaf key of a locale's catalog
    pub fn keys(&self, locale: &str) -> Vec<String> {
        self.exact_tree(locale)
            .map(CatalogNode::leaf_keys)
            .unwrap_or_default()
    }
}
