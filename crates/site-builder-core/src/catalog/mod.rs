//! # Catalog Module
//!
//! The site catalog: one JSON document holding the site header, an ordered
//! list of categories, and the models and datasets filed under them.
//!
//! ## Module layout
//!
//! - `model`: document types
//! - `store`: whole-file load/save
//! - `validation`: referential integrity checks
//! - `mutation`: add/update/remove on an in-memory catalog
//! - `session`: load, mutate, persist with a stale-write check
//! - `projection`: markup-free view model for renderers
//!
//! ## Example
//!
//! ```rust
//! use site_builder_core::catalog::{project, validate, Catalog, NewCategory, Site};
//!
//! let mut catalog = Catalog::new(Site::default());
//! catalog
//!     .add_category(NewCategory {
//!         id: "nlp".to_string(),
//!         name: "NLP".to_string(),
//!         ..NewCategory::default()
//!     })
//!     .unwrap();
//!
//! assert!(validate(&catalog).is_empty());
//! let view = project(&catalog, None);
//! assert!(view.sections[0].items.is_empty());
//! ```
//!
//! ### Editing a file on disk
//!
//! ```rust,ignore
//! use site_builder_core::catalog::{CatalogSession, CatalogStore, RemoveKind};
//!
//! let mut session = CatalogSession::open(CatalogStore::new("config.json"))?;
//! let removed = session.remove(RemoveKind::Model, "tiny-bert")?;
//! ```

mod model;
mod mutation;
mod projection;
mod session;
mod store;
mod validation;

// Re-exports
pub use model::{
    Catalog, Category, Dataset, Item, ItemKind, Model, Site, DEFAULT_CATEGORY_ICON,
    DEFAULT_THEME_COLOR,
};
pub use mutation::{parse_tags, NewCategory, NewDataset, NewModel, RemoveKind, SiteUpdate};
pub use projection::{
    project, source_url, Card, CardLink, CategorySection, LinkKind, SectionItems, SiteHeader,
    SocialLink, ViewFilter, ViewModel, HUB_BASE_URL,
};
pub use session::CatalogSession;
pub use store::{compute_hash, to_document, CatalogStore, DEFAULT_CATALOG_FILE};
pub use validation::{validate, ValidationError};
