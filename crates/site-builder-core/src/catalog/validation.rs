//! Validation Engine
//!
//! Referential and structural checks over an in-memory catalog. Every rule
//! runs; violations are returned as data and never stop a load.

use std::collections::HashSet;

use super::model::{Catalog, Item, ItemKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingSite,
    MissingCategories,
    DuplicateCategoryId {
        id: String,
    },
    InvalidCategory {
        kind: ItemKind,
        name: String,
        category: String,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSite => write!(f, "Missing 'site' section"),
            Self::MissingCategories => write!(f, "Missing 'categories' section"),
            Self::DuplicateCategoryId { id } => {
                write!(f, "Category id '{}' is defined more than once", id)
            }
            Self::InvalidCategory {
                kind,
                name,
                category,
            } => write!(f, "{} '{}' has invalid category: {}", kind.label(), name, category),
        }
    }
}

/// Collect every violation in `catalog`; empty means valid
pub fn validate(catalog: &Catalog) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if catalog.site.is_none() {
        errors.push(ValidationError::MissingSite);
    }
    if catalog.categories.is_none() {
        errors.push(ValidationError::MissingCategories);
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for category in catalog.categories() {
        let id = category.id.as_str();
        if !seen.insert(id) && reported.insert(id) {
            errors.push(ValidationError::DuplicateCategoryId { id: id.to_string() });
        }
    }

    check_items(&catalog.models, &seen, &mut errors);
    check_items(&catalog.datasets, &seen, &mut errors);

    errors
}

fn check_items<I: Item>(
    items: &[I],
    category_ids: &HashSet<&str>,
    errors: &mut Vec<ValidationError>,
) {
    for item in items {
        if !category_ids.contains(item.category()) {
            errors.push(ValidationError::InvalidCategory {
                kind: I::KIND,
                name: item.name().to_string(),
                category: item.category().to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::{Category, Dataset, Model, Site};

    fn category(id: &str) -> Category {
        Category {
            id: id.to_string(),
            name: id.to_uppercase(),
            icon: "📁".to_string(),
            description: String::new(),
        }
    }

    fn model(name: &str, category: &str) -> Model {
        Model {
            name: name.to_string(),
            repo: format!("user/{name}"),
            category: category.to_string(),
            description: String::new(),
            tags: Vec::new(),
            demo_url: None,
            paper_url: None,
        }
    }

    fn dataset(name: &str, category: &str) -> Dataset {
        Dataset {
            name: name.to_string(),
            repo: format!("user/{name}"),
            category: category.to_string(),
            description: String::new(),
            tags: Vec::new(),
            size: None,
        }
    }

    #[test]
    fn valid_catalog_has_no_errors() {
        let mut catalog = Catalog::new(Site::default());
        catalog.categories_mut().push(category("nlp"));
        catalog.models.push(model("bert", "nlp"));
        catalog.datasets.push(dataset("squad", "nlp"));
        assert!(validate(&catalog).is_empty());
    }

    #[test]
    fn unknown_category_reports_exactly_the_model() {
        let mut catalog = Catalog::new(Site::default());
        catalog.categories_mut().push(category("nlp"));
        catalog.models.push(model("bert", "nlp"));
        catalog.models.push(model("yolo", "cv"));

        let errors = validate(&catalog);
        assert_eq!(
            errors,
            vec![ValidationError::InvalidCategory {
                kind: ItemKind::Model,
                name: "yolo".to_string(),
                category: "cv".to_string(),
            }]
        );
        assert_eq!(errors[0].to_string(), "Model 'yolo' has invalid category: cv");
    }

    #[test]
    fn all_rules_are_collected() {
        let mut catalog = Catalog::default();
        catalog.models.push(model("bert", "nlp"));
        catalog.datasets.push(dataset("squad", "qa"));

        let errors = validate(&catalog);
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[0], ValidationError::MissingSite);
        assert_eq!(errors[1], ValidationError::MissingCategories);
        assert_eq!(errors[3].to_string(), "Dataset 'squad' has invalid category: qa");
    }

    #[test]
    fn duplicate_ids_reported_once() {
        let mut catalog = Catalog::new(Site::default());
        catalog
            .categories_mut()
            .extend([category("nlp"), category("nlp"), category("nlp")]);

        assert_eq!(
            validate(&catalog),
            vec![ValidationError::DuplicateCategoryId {
                id: "nlp".to_string()
            }]
        );
    }

    #[test]
    fn validation_is_repeatable() {
        let mut catalog = Catalog::new(Site::default());
        catalog.models.push(model("bert", "nlp"));
        assert_eq!(validate(&catalog), validate(&catalog));
    }
}
