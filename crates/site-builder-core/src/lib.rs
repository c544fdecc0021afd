pub mod catalog;
pub mod config;
pub mod error;

pub use catalog::{
    project, validate, Catalog, CatalogSession, CatalogStore, Category, Dataset, ItemKind, Model,
    RemoveKind, Site, SiteUpdate, ValidationError, ViewFilter, ViewModel,
};
pub use config::Config;
pub use error::{Result, SiteBuilderError};
