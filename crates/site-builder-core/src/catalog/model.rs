//! Catalog data model
//!
//! Mirrors the persisted JSON document one-to-one:
//!
//! ```text
//! {
//!   "site":       { title, description, author, theme_color, social_links },
//!   "categories": [ { id, name, icon, description } ],
//!   "models":     [ { name, repo, category, description, tags, demo_url?, paper_url? } ],
//!   "datasets":   [ { name, repo, category, description, tags, size? } ]
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Icon used for a category when none is supplied
pub const DEFAULT_CATEGORY_ICON: &str = "📁";

/// Theme color used when the site section does not set one
pub const DEFAULT_THEME_COLOR: &str = "#4F46E5";

/// The whole persisted document
///
/// `site` and `categories` are optional so that a document missing those
/// sections still loads; the validation engine reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<Site>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(default)]
    pub models: Vec<Model>,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

impl Catalog {
    /// Empty catalog with both required sections present
    pub fn new(site: Site) -> Self {
        Self {
            site: Some(site),
            categories: Some(Vec::new()),
            models: Vec::new(),
            datasets: Vec::new(),
        }
    }

    /// Categories in display order (empty when the section is missing)
    pub fn categories(&self) -> &[Category] {
        self.categories.as_deref().unwrap_or(&[])
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories().iter().find(|c| c.id == id)
    }

    pub fn has_category(&self, id: &str) -> bool {
        self.category(id).is_some()
    }

    /// Mutable categories, creating the section if it is missing
    pub fn categories_mut(&mut self) -> &mut Vec<Category> {
        self.categories.get_or_insert_with(Vec::new)
    }

    /// Mutable site section, creating it with defaults if it is missing
    pub fn site_mut(&mut self) -> &mut Site {
        self.site.get_or_insert_with(Site::default)
    }

    /// Number of models and datasets filed under `category_id`
    pub fn item_count(&self, category_id: &str) -> usize {
        self.models
            .iter()
            .filter(|m| m.category == category_id)
            .count()
            + self
                .datasets
                .iter()
                .filter(|d| d.category == category_id)
                .count()
    }

    /// Starter document written by `site-builder init`
    pub fn starter() -> Self {
        let mut catalog = Self::new(Site {
            title: "My AI Portfolio".to_string(),
            description: "Models and datasets I have published on Hugging Face".to_string(),
            author: String::new(),
            ..Site::default()
        });
        catalog.categories_mut().push(Category {
            id: "nlp".to_string(),
            name: "Natural Language Processing".to_string(),
            icon: "💬".to_string(),
            description: "Text models and corpora".to_string(),
        });
        catalog
    }
}

/// Site-wide information shown in the page header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default = "default_theme_color")]
    pub theme_color: String,
    /// platform name -> URL
    #[serde(default)]
    pub social_links: BTreeMap<String, String>,
}

fn default_theme_color() -> String {
    DEFAULT_THEME_COLOR.to_string()
}

impl Default for Site {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            author: String::new(),
            theme_color: default_theme_color(),
            social_links: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default)]
    pub description: String,
}

fn default_icon() -> String {
    DEFAULT_CATEGORY_ICON.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    pub repo: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub repo: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// Kind tag distinguishing the two item shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Model,
    Dataset,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Dataset => "dataset",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Model => "Model",
            Self::Dataset => "Dataset",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fields shared by models and datasets
pub trait Item {
    const KIND: ItemKind;

    fn name(&self) -> &str;
    fn repo(&self) -> &str;
    fn category(&self) -> &str;
    fn description(&self) -> &str;
    fn tags(&self) -> &[String];
}

impl Item for Model {
    const KIND: ItemKind = ItemKind::Model;

    fn name(&self) -> &str {
        &self.name
    }
    fn repo(&self) -> &str {
        &self.repo
    }
    fn category(&self) -> &str {
        &self.category
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl Item for Dataset {
    const KIND: ItemKind = ItemKind::Dataset;

    fn name(&self) -> &str {
        &self.name
    }
    fn repo(&self) -> &str {
        &self.repo
    }
    fn category(&self) -> &str {
        &self.category
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_deserialize_as_absent() {
        let catalog: Catalog = serde_json::from_str(r#"{"models": []}"#).unwrap();
        assert!(catalog.site.is_none());
        assert!(catalog.categories.is_none());
        assert!(catalog.categories().is_empty());
        assert!(catalog.datasets.is_empty());
    }

    #[test]
    fn optional_fields_take_defaults() {
        let json = r#"{
            "site": {"title": "T"},
            "categories": [{"id": "cv", "name": "Vision"}],
            "models": [{"name": "m", "repo": "u/m", "category": "cv", "demo_url": null}]
        }"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();

        let site = catalog.site.as_ref().unwrap();
        assert_eq!(site.theme_color, DEFAULT_THEME_COLOR);
        assert!(site.social_links.is_empty());
        assert_eq!(catalog.categories()[0].icon, DEFAULT_CATEGORY_ICON);
        assert_eq!(catalog.models[0].description, "");
        assert!(catalog.models[0].tags.is_empty());
        assert!(catalog.models[0].demo_url.is_none());
    }

    #[test]
    fn item_count_covers_both_kinds() {
        let mut catalog = Catalog::starter();
        catalog.models.push(Model {
            name: "m".to_string(),
            repo: "u/m".to_string(),
            category: "nlp".to_string(),
            description: String::new(),
            tags: Vec::new(),
            demo_url: None,
            paper_url: None,
        });
        catalog.datasets.push(Dataset {
            name: "d".to_string(),
            repo: "u/d".to_string(),
            category: "nlp".to_string(),
            description: String::new(),
            tags: Vec::new(),
            size: None,
        });
        assert_eq!(catalog.item_count("nlp"), 2);
        assert_eq!(catalog.item_count("cv"), 0);
    }

    #[test]
    fn accessors_create_missing_sections() {
        let mut catalog = Catalog::default();
        catalog.site_mut().title = "Hello".to_string();
        catalog.categories_mut();
        assert_eq!(catalog.site.unwrap().title, "Hello");
        assert_eq!(catalog.categories, Some(Vec::new()));
    }
}
