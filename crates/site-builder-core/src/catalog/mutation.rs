//! Catalog Mutation API
//!
//! In-memory edits on a [`Catalog`]. Each operation either applies fully or
//! returns an error with the catalog untouched; persisting is the caller's
//! job (see [`super::CatalogSession`]).

use super::model::{Catalog, Category, Dataset, Model, DEFAULT_CATEGORY_ICON};
use crate::error::{Result, SiteBuilderError};

/// Partial site update; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub theme_color: Option<String>,
    /// (platform, url) pairs; an empty url removes the platform
    pub social_links: Vec<(String, String)>,
}

impl SiteUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.author.is_none()
            && self.theme_color.is_none()
            && self.social_links.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewCategory {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewModel {
    pub name: String,
    pub repo: String,
    pub category: String,
    pub description: Option<String>,
    /// Raw comma-separated tag list
    pub tags: Option<String>,
    pub demo_url: Option<String>,
    pub paper_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewDataset {
    pub name: String,
    pub repo: String,
    pub category: String,
    pub description: Option<String>,
    /// Raw comma-separated tag list
    pub tags: Option<String>,
    pub size: Option<String>,
}

/// What `remove` matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveKind {
    Model,
    Dataset,
    Category,
}

impl RemoveKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Model => "Model",
            Self::Dataset => "Dataset",
            Self::Category => "Category",
        }
    }
}

/// Split a comma-separated tag string, trimming and dropping empty segments
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Treat blank optional input the same as absent input
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Catalog {
    pub fn update_site(&mut self, update: SiteUpdate) {
        let site = self.site_mut();
        if let Some(title) = update.title {
            site.title = title;
        }
        if let Some(description) = update.description {
            site.description = description;
        }
        if let Some(author) = update.author {
            site.author = author;
        }
        if let Some(theme_color) = update.theme_color {
            site.theme_color = theme_color;
        }
        for (platform, url) in update.social_links {
            if url.trim().is_empty() {
                site.social_links.remove(&platform);
            } else {
                site.social_links.insert(platform, url);
            }
        }
    }

    pub fn add_category(&mut self, new: NewCategory) -> Result<&Category> {
        if self.has_category(&new.id) {
            return Err(SiteBuilderError::DuplicateId { id: new.id });
        }

        let categories = self.categories_mut();
        categories.push(Category {
            id: new.id,
            name: new.name,
            icon: non_blank(new.icon).unwrap_or_else(|| DEFAULT_CATEGORY_ICON.to_string()),
            description: new.description.unwrap_or_default(),
        });
        Ok(&categories[categories.len() - 1])
    }

    /// Appends without checking the category; `validate` reports dangling ids
    pub fn add_model(&mut self, new: NewModel) -> &Model {
        self.models.push(Model {
            name: new.name,
            repo: new.repo,
            category: new.category,
            description: new.description.unwrap_or_default(),
            tags: new.tags.as_deref().map(parse_tags).unwrap_or_default(),
            demo_url: non_blank(new.demo_url),
            paper_url: non_blank(new.paper_url),
        });
        &self.models[self.models.len() - 1]
    }

    /// Appends without checking the category; `validate` reports dangling ids
    pub fn add_dataset(&mut self, new: NewDataset) -> &Dataset {
        self.datasets.push(Dataset {
            name: new.name,
            repo: new.repo,
            category: new.category,
            description: new.description.unwrap_or_default(),
            tags: new.tags.as_deref().map(parse_tags).unwrap_or_default(),
            size: non_blank(new.size),
        });
        &self.datasets[self.datasets.len() - 1]
    }

    /// Remove every entry whose name (id for categories) equals `name`
    ///
    /// Returns how many entries were removed.
    pub fn remove(&mut self, kind: RemoveKind, name: &str) -> Result<usize> {
        let removed = match kind {
            RemoveKind::Model => retain_counting(&mut self.models, |m| m.name != name),
            RemoveKind::Dataset => retain_counting(&mut self.datasets, |d| d.name != name),
            RemoveKind::Category => match self.categories.as_mut() {
                Some(categories) => retain_counting(categories, |c| c.id != name),
                None => 0,
            },
        };

        if removed == 0 {
            return Err(SiteBuilderError::EntryNotFound {
                kind: kind.label().to_string(),
                name: name.to_string(),
            });
        }
        Ok(removed)
    }

    /// Remove the single entry at `index`, returning its name (id for categories)
    pub fn remove_at(&mut self, kind: RemoveKind, index: usize) -> Result<String> {
        let removed = match kind {
            RemoveKind::Model => take_at(&mut self.models, index).map(|m| m.name),
            RemoveKind::Dataset => take_at(&mut self.datasets, index).map(|d| d.name),
            RemoveKind::Category => self
                .categories
                .as_mut()
                .and_then(|categories| take_at(categories, index))
                .map(|c| c.id),
        };

        removed.ok_or_else(|| SiteBuilderError::EntryNotFound {
            kind: kind.label().to_string(),
            name: format!("#{index}"),
        })
    }
}

fn take_at<T>(items: &mut Vec<T>, index: usize) -> Option<T> {
    (index < items.len()).then(|| items.remove(index))
}

fn retain_counting<T>(items: &mut Vec<T>, keep: impl FnMut(&T) -> bool) -> usize {
    let before = items.len();
    items.retain(keep);
    before - items.len()
}
