//! Editing session over one catalog file
//!
//! Holds the loaded catalog together with the fingerprint of the file it came
//! from. Every mutation runs on a working copy, is persisted, and only then
//! replaces the session state. If the file changed underneath us since the
//! last load/save the write is refused with [`SiteBuilderError::Conflict`].

use super::model::{Catalog, Category, Dataset, Model};
use super::mutation::{NewCategory, NewDataset, NewModel, RemoveKind, SiteUpdate};
use super::store::CatalogStore;
use super::validation::{validate, ValidationError};
use crate::error::{Result, SiteBuilderError};

#[derive(Debug)]
pub struct CatalogSession {
    store: CatalogStore,
    catalog: Catalog,
    fingerprint: String,
}

impl CatalogSession {
    /// Load the catalog behind `store`
    pub fn open(store: CatalogStore) -> Result<Self> {
        let (catalog, fingerprint) = store.load_with_fingerprint()?;
        Ok(Self {
            store,
            catalog,
            fingerprint,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Discard in-memory state and re-read the file
    pub fn reload(&mut self) -> Result<()> {
        let (catalog, fingerprint) = self.store.load_with_fingerprint()?;
        self.catalog = catalog;
        self.fingerprint = fingerprint;
        Ok(())
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        validate(&self.catalog)
    }

    pub fn update_site(&mut self, update: SiteUpdate) -> Result<()> {
        self.apply(|catalog| {
            catalog.update_site(update);
            Ok(())
        })
    }

    pub fn add_category(&mut self, new: NewCategory) -> Result<Category> {
        self.apply(|catalog| catalog.add_category(new).cloned())
    }

    pub fn add_model(&mut self, new: NewModel) -> Result<Model> {
        self.apply(|catalog| Ok(catalog.add_model(new).clone()))
    }

    pub fn add_dataset(&mut self, new: NewDataset) -> Result<Dataset> {
        self.apply(|catalog| Ok(catalog.add_dataset(new).clone()))
    }

    pub fn remove(&mut self, kind: RemoveKind, name: &str) -> Result<usize> {
        self.apply(|catalog| catalog.remove(kind, name))
    }

    /// Remove exactly the entry at `index`; returns its name (id for categories)
    pub fn remove_at(&mut self, kind: RemoveKind, index: usize) -> Result<String> {
        self.apply(|catalog| catalog.remove_at(kind, index))
    }

    /// Run `mutate` on a copy, persist it, then commit it to the session
    fn apply<T>(&mut self, mutate: impl FnOnce(&mut Catalog) -> Result<T>) -> Result<T> {
        let mut working = self.catalog.clone();
        let value = mutate(&mut working)?;

        let on_disk = self.store.fingerprint()?;
        if on_disk.as_deref() != Some(self.fingerprint.as_str()) {
            tracing::warn!(
                path = %self.store.path().display(),
                "catalog changed on disk, refusing to overwrite"
            );
            return Err(SiteBuilderError::Conflict {
                path: self.store.path().to_path_buf(),
            });
        }

        self.fingerprint = self.store.save(&working)?;
        self.catalog = working;
        tracing::info!(path = %self.store.path().display(), "catalog updated");
        Ok(value)
    }
}
