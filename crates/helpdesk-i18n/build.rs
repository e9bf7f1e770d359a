//! Build script for helpdesk-i18n crate
//!
//! Validates every `locales/<code>.json` catalog at compile time and embeds
//! them into the crate:
//! - Every file is a JSON object whose leaves are strings, numbers or booleans
//! - Every key of every locale also exists in the fallback catalog
//! - Placeholders (`{{ name }}`) agree across locales for each shared key
//! - Locales missing keys that the fallback has are reported, not rejected

use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use regex::Regex;
use serde_json::Value;

/// Locale whose catalog must be complete; overridable for custom builds.
const DEFAULT_BUILD_FALLBACK: &str = "en";

type Leaves = BTreeMap<String, BTreeSet<String>>;

/// Collect every leaf key and the placeholders it references
fn collect_leaves(
    value: &Value,
    prefix: &str,
    placeholder: &Regex,
    leaves: &mut Leaves,
) -> Result<(), String> {
    match value {
        Value::Object(map) => {
            for (segment, child) in map {
                if segment.is_empty() || segment.contains('.') {
                    return Err(format!("invalid key segment '{segment}' under '{prefix}'"));
                }
                let path = if prefix.is_empty() {
                    segment.clone()
                } else {
                    format!("{prefix}.{segment}")
                };
                collect_leaves(child, &path, placeholder, leaves)?;
            }
            Ok(())
        }
        Value::String(text) => {
            let params = placeholder
                .captures_iter(text)
                .map(|caps| caps[1].to_string())
                .collect();
            leaves.insert(prefix.to_string(), params);
            Ok(())
        }
        Value::Number(_) | Value::Bool(_) => {
            leaves.insert(prefix.to_string(), BTreeSet::new());
            Ok(())
        }
        Value::Null => Err(format!("'{prefix}' is null")),
        Value::Array(_) => Err(format!("'{prefix}' is an array")),
    }
}

/// Validate a single locale file
fn validate_locale_file(path: &Path, placeholder: &Regex) -> Result<Leaves, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let value: Value = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;

    if !value.is_object() {
        return Err(format!("{}: top level must be an object", path.display()));
    }

    let mut leaves = Leaves::new();
    collect_leaves(&value, "", placeholder, &mut leaves)
        .map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(leaves)
}

/// Find all locale files
fn find_locale_files(locales_dir: &Path) -> Result<BTreeMap<String, PathBuf>, String> {
    if !locales_dir.exists() {
        return Err(format!(
            "Locales directory not found: {}",
            locales_dir.display()
        ));
    }

    let mut locale_files = BTreeMap::new();

    for entry in fs::read_dir(locales_dir)
        .map_err(|e| format!("Failed to read locales directory: {}", e))?
    {
        let entry = entry.map_err(|e| format!("Failed to read directory entry: {}", e))?;
        let path = entry.path();

        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|n| n.to_str())
            .ok_or_else(|| format!("Invalid locale file name: {}", path.display()))?;

        if stem.is_empty() || stem.contains('-') || stem.to_lowercase() != stem {
            return Err(format!(
                "Locale file names must be lowercase primary subtags: {}",
                path.display()
            ));
        }

        locale_files.insert(stem.to_string(), path);
    }

    if locale_files.is_empty() {
        return Err("No locale files found".to_string());
    }

    Ok(locale_files)
}

/// Check the catalogs against the fallback catalog
fn check_consistency(
    fallback: &str,
    all_leaves: &BTreeMap<String, Leaves>,
) -> Result<(), String> {
    let reference = all_leaves
        .get(fallback)
        .ok_or_else(|| format!("Fallback locale '{fallback}' has no catalog"))?;

    let mut errors = Vec::new();

    for (locale, leaves) in all_leaves {
        if locale == fallback {
            continue;
        }

        for (key, params) in leaves {
            match reference.get(key) {
                None => errors.push(format!(
                    "❌ {locale}: key '{key}' is missing from fallback catalog '{fallback}'"
                )),
                Some(reference_params) if reference_params != params => errors.push(format!(
                    "❌ {locale}: placeholder mismatch for '{key}'. Expected: {reference_params:?}, Found: {params:?}"
                )),
                Some(_) => {}
            }
        }

        let untranslated = reference.keys().filter(|key| !leaves.contains_key(*key)).count();
        if untranslated > 0 {
            println!(
                "cargo:warning={locale}: {untranslated} key(s) untranslated, '{fallback}' will be used"
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(format!("Consistency errors:\n{}", errors.join("\n")))
    }
}

/// Write the embedded resource table
fn write_embedded(locale_files: &BTreeMap<String, PathBuf>) -> Result<(), String> {
    let out_dir = env::var("OUT_DIR").map_err(|_| "OUT_DIR not set")?;

    let mut source = String::from(
        "/// Catalog resources from `locales/`, as `(locale code, JSON source)` pairs.\n\
         pub const EMBEDDED_RESOURCES: &[(&str, &str)] = &[\n",
    );
    for (locale, path) in locale_files {
        let absolute = path
            .canonicalize()
            .map_err(|e| format!("Failed to resolve {}: {}", path.display(), e))?;
        writeln!(
            source,
            "    ({:?}, include_str!({:?})),",
            locale,
            absolute.to_string_lossy()
        )
        .map_err(|e| e.to_string())?;
    }
    source.push_str("];\n");

    fs::write(Path::new(&out_dir).join("embedded_locales.rs"), source)
        .map_err(|e| format!("Failed to write embedded locales: {}", e))
}

/// Main validation function
fn validate_locales() -> Result<(), String> {
    println!("cargo:rerun-if-changed=locales");
    println!("cargo:rerun-if-env-changed=HELPDESK_BUILD_FALLBACK_LOCALE");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").map_err(|_| "CARGO_MANIFEST_DIR not set")?;
    let locales_dir = Path::new(&manifest_dir).join("locales");
    let fallback = env::var("HELPDESK_BUILD_FALLBACK_LOCALE")
        .unwrap_or_else(|_| DEFAULT_BUILD_FALLBACK.to_string());

    let placeholder = Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}")
        .map_err(|e| format!("Invalid placeholder pattern: {}", e))?;

    let locale_files = find_locale_files(&locales_dir)?;

    let mut all_leaves = BTreeMap::new();
    let mut validation_errors = Vec::new();

    for (locale, path) in &locale_files {
        match validate_locale_file(path, &placeholder) {
            Ok(leaves) => {
                all_leaves.insert(locale.clone(), leaves);
            }
            Err(e) => validation_errors.push(format!("❌ {}: {}", locale, e)),
        }
    }

    if !validation_errors.is_empty() {
        return Err(format!("Validation errors:\n{}", validation_errors.join("\n")));
    }

    check_consistency(&fallback, &all_leaves)?;
    write_embedded(&locale_files)
}

fn main() {
    if let Err(e) = validate_locales() {
        eprintln!("Locale validation failed:\n{}", e);
        process::exit(1);
    }
}
