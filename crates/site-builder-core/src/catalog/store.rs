//! Catalog Store
//!
//! Whole-document persistence of the catalog as pretty-printed JSON.
//! Saves go through a temp file in the target directory and a rename, so a
//! failed write never leaves a truncated catalog behind.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use super::model::Catalog;
use crate::error::{Result, SiteBuilderError};

/// Default catalog filename, relative to the working directory
pub const DEFAULT_CATALOG_FILE: &str = "config.json";

#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the full catalog
    pub fn load(&self) -> Result<Catalog> {
        self.load_with_fingerprint().map(|(catalog, _)| catalog)
    }

    /// Load the catalog and the `sha256:<hex>` of the exact bytes it was parsed from
    pub fn load_with_fingerprint(&self) -> Result<(Catalog, String)> {
        let bytes = self.read_bytes()?;
        let catalog: Catalog =
            serde_json::from_slice(&bytes).map_err(|e| SiteBuilderError::MalformedData {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!(
            path = %self.path.display(),
            categories = catalog.categories().len(),
            models = catalog.models.len(),
            datasets = catalog.datasets.len(),
            "catalog loaded"
        );
        Ok((catalog, compute_hash(&bytes)))
    }

    /// Overwrite the backing file with `catalog`
    ///
    /// Returns the fingerprint of the bytes written.
    pub fn save(&self, catalog: &Catalog) -> Result<String> {
        let content = to_document(catalog)?;
        write_atomic(&self.path, content.as_bytes())?;
        tracing::debug!(path = %self.path.display(), bytes = content.len(), "catalog saved");
        Ok(compute_hash(content.as_bytes()))
    }

    /// `sha256:<hex>` of the file as it is on disk, `None` if absent
    pub fn fingerprint(&self) -> Result<Option<String>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(compute_hash(&bytes))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write the starter catalog; refuses to clobber unless `force`
    pub fn init(&self, force: bool) -> Result<Catalog> {
        if self.exists() && !force {
            return Err(SiteBuilderError::AlreadyExists {
                path: self.path.clone(),
            });
        }
        let catalog = Catalog::starter();
        self.save(&catalog)?;
        Ok(catalog)
    }

    fn read_bytes(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SiteBuilderError::CatalogNotFound {
                path: self.path.clone(),
            },
            _ => e.into(),
        })
    }
}

/// Serialized form: two-space indent, non-ASCII kept as-is, trailing newline
pub fn to_document(catalog: &Catalog) -> Result<String> {
    let mut content = serde_json::to_string_pretty(catalog).map_err(std::io::Error::from)?;
    content.push('\n');
    Ok(content)
}

pub fn compute_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("sha256:{}", hex::encode(hasher.finalize()))
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| SiteBuilderError::Io(e.error))?;
    Ok(())
}
