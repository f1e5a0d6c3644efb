//! Catalog loading and fixture authoring.
//!
//! The production catalog ships compiled in; a TOML file can substitute a
//! fixture catalog for tests or a staging warehouse set. Either way the
//! catalog is validated before anything consumes it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::core::catalog::Catalog;

/// Load a catalog from a TOML file.
///
/// If the file is missing, returns the validated [`Catalog::builtin`].
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        let catalog = Catalog::builtin();
        ensure_valid(&catalog)?;
        return Ok(catalog);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let catalog: Catalog =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    ensure_valid(&catalog)?;
    Ok(catalog)
}

/// Atomically write a catalog as TOML (temp file + rename).
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<()> {
    ensure_valid(catalog)?;
    let mut buf = toml::to_string_pretty(catalog).context("serialize catalog toml")?;
    buf.push('\n');

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, &buf)
        .with_context(|| format!("write temp catalog {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace catalog {}", path.display()))?;
    Ok(())
}

fn ensure_valid(catalog: &Catalog) -> Result<()> {
    let errors = catalog.validate();
    if !errors.is_empty() {
        bail!("catalog violations:\n- {}", errors.join("\n- "));
    }
    Ok(())
}
