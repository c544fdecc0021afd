//! Rendering Projection
//!
//! Pure mapping from a [`Catalog`] to a markup-free [`ViewModel`]. The same
//! input always yields the same output, so the result can be serialized and
//! compared directly in tests.

use serde::Serialize;

use super::model::{Catalog, Dataset, Item, ItemKind, Model, Site};

/// Prefix for source links when `repo` is a bare `owner/name`
pub const HUB_BASE_URL: &str = "https://huggingface.co/";

/// Platforms shown first in the header, with their display labels
const KNOWN_PLATFORMS: &[(&str, &str)] = &[
    ("github", "GitHub"),
    ("twitter", "Twitter"),
    ("linkedin", "LinkedIn"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub site: SiteHeader,
    pub sections: Vec<CategorySection>,
    /// Every model, then every dataset, regardless of category
    pub all_items: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteHeader {
    pub title: String,
    pub description: String,
    pub author: String,
    pub theme_color: String,
    pub social_links: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    pub platform: String,
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySection {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub items: SectionItems,
}

/// Cards of one category; `Empty` lets the renderer show a placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "cards", rename_all = "lowercase")]
pub enum SectionItems {
    Empty,
    Cards(Vec<Card>),
}

impl SectionItems {
    fn from_cards(cards: Vec<Card>) -> Self {
        if cards.is_empty() {
            Self::Empty
        } else {
            Self::Cards(cards)
        }
    }

    pub fn cards(&self) -> &[Card] {
        match self {
            Self::Empty => &[],
            Self::Cards(cards) => cards,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub kind: ItemKind,
    pub name: String,
    pub description: String,
    /// Dataset size descriptor
    pub size: Option<String>,
    pub tags: Vec<String>,
    pub links: Vec<CardLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardLink {
    pub kind: LinkKind,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Source,
    Demo,
    Paper,
}

/// Narrows what a projection shows; all fields are optional and combine with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    /// Only emit the section for this category id
    pub category: Option<String>,
    /// Case-insensitive exact tag match
    pub tag: Option<String>,
    pub kind: Option<ItemKind>,
    /// Case-insensitive substring of name or description
    pub query: Option<String>,
}

impl ViewFilter {
    fn accepts<I: Item>(&self, item: &I) -> bool {
        if self.kind.is_some_and(|k| k != I::KIND) {
            return false;
        }
        if let Some(tag) = &self.tag {
            let tag = tag.to_lowercase();
            if !item.tags().iter().any(|t| t.to_lowercase() == tag) {
                return false;
            }
        }
        if let Some(query) = &self.query {
            let query = query.to_lowercase();
            if !item.name().to_lowercase().contains(&query)
                && !item.description().to_lowercase().contains(&query)
            {
                return false;
            }
        }
        true
    }
}

pub fn project(catalog: &Catalog, filter: Option<&ViewFilter>) -> ViewModel {
    let default_filter = ViewFilter::default();
    let filter = filter.unwrap_or(&default_filter);

    let sections = catalog
        .categories()
        .iter()
        .filter(|c| filter.category.as_ref().map_or(true, |id| *id == c.id))
        .map(|category| CategorySection {
            id: category.id.clone(),
            name: category.name.clone(),
            icon: category.icon.clone(),
            description: category.description.clone(),
            items: SectionItems::from_cards(cards(catalog, filter, Some(&category.id))),
        })
        .collect();

    ViewModel {
        site: site_header(catalog.site.as_ref()),
        sections,
        all_items: cards(catalog, filter, None),
    }
}

/// Models first, then datasets, each in insertion order
fn cards(catalog: &Catalog, filter: &ViewFilter, category: Option<&str>) -> Vec<Card> {
    let in_scope = |item_category: &str| category.map_or(true, |id| id == item_category);

    let models = catalog
        .models
        .iter()
        .filter(|m| in_scope(&m.category) && filter.accepts(*m))
        .map(model_card);
    let datasets = catalog
        .datasets
        .iter()
        .filter(|d| in_scope(&d.category) && filter.accepts(*d))
        .map(dataset_card);

    models.chain(datasets).collect()
}

fn model_card(model: &Model) -> Card {
    let mut card = base_card(model);
    push_link(&mut card.links, LinkKind::Demo, model.demo_url.as_deref());
    push_link(&mut card.links, LinkKind::Paper, model.paper_url.as_deref());
    card
}

fn dataset_card(dataset: &Dataset) -> Card {
    let mut card = base_card(dataset);
    card.size = dataset.size.clone().filter(|s| !s.trim().is_empty());
    card
}

fn base_card<I: Item>(item: &I) -> Card {
    let mut links = Vec::new();
    let source = source_url(item.repo());
    push_link(&mut links, LinkKind::Source, source.as_deref());

    Card {
        kind: I::KIND,
        name: item.name().to_string(),
        description: item.description().to_string(),
        size: None,
        tags: item.tags().to_vec(),
        links,
    }
}

fn push_link(links: &mut Vec<CardLink>, kind: LinkKind, url: Option<&str>) {
    if let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) {
        links.push(CardLink {
            kind,
            url: url.to_string(),
        });
    }
}

/// Hub page for `repo`; absolute URLs pass through untouched
pub fn source_url(repo: &str) -> Option<String> {
    let repo = repo.trim();
    if repo.is_empty() {
        None
    } else if repo.starts_with("http://") || repo.starts_with("https://") {
        Some(repo.to_string())
    } else {
        Some(format!("{}{}", HUB_BASE_URL, repo.trim_start_matches('/')))
    }
}

fn is_known_platform(name: &str) -> bool {
    KNOWN_PLATFORMS.iter().any(|(platform, _)| *platform == name)
}

fn site_header(site: Option<&Site>) -> SiteHeader {
    let default_site = Site::default();
    let site = site.unwrap_or(&default_site);

    let mut social_links: Vec<SocialLink> = KNOWN_PLATFORMS
        .iter()
        .filter_map(|(platform, label)| {
            site.social_links.get(*platform).map(|url| SocialLink {
                platform: platform.to_string(),
                label: label.to_string(),
                url: url.clone(),
            })
        })
        .collect();
    // BTreeMap iteration keeps the remaining platforms in name order
    social_links.extend(
        site.social_links
            .iter()
            .filter(|(platform, _)| !is_known_platform(platform))
            .map(|(platform, url)| SocialLink {
                platform: platform.clone(),
                label: platform.clone(),
                url: url.clone(),
            }),
    );
    social_links.retain(|link| !link.url.trim().is_empty());

    SiteHeader {
        title: site.title.clone(),
        description: site.description.clone(),
        author: site.author.clone(),
        theme_color: site.theme_color.clone(),
        social_links,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::mutation::{NewCategory, NewDataset, NewModel};

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new(Site {
            title: "Lab".to_string(),
            ..Site::default()
        });
        for (id, name) in [("nlp", "NLP"), ("cv", "Vision"), ("audio", "Audio")] {
            catalog
                .add_category(NewCategory {
                    id: id.to_string(),
                    name: name.to_string(),
                    ..NewCategory::default()
                })
                .unwrap();
        }
        catalog.add_dataset(NewDataset {
            name: "squad".to_string(),
            repo: "rajpurkar/squad".to_string(),
            category: "nlp".to_string(),
            tags: Some("qa".to_string()),
            size: Some("100K samples".to_string()),
            ..NewDataset::default()
        });
        catalog.add_model(NewModel {
            name: "bert".to_string(),
            repo: "google/bert".to_string(),
            category: "nlp".to_string(),
            description: Some("Bidirectional encoder".to_string()),
            tags: Some("encoder, QA".to_string()),
            paper_url: Some("https://arxiv.org/abs/1810.04805".to_string()),
            ..NewModel::default()
        });
        catalog.add_model(NewModel {
            name: "yolo".to_string(),
            repo: "ultralytics/yolo".to_string(),
            category: "cv".to_string(),
            demo_url: Some("https://demo.example".to_string()),
            ..NewModel::default()
        });
        catalog
    }

    fn names(cards: &[Card]) -> Vec<&str> {
        cards.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn sections_follow_category_order_models_first() {
        let view = project(&catalog(), None);

        let ids: Vec<_> = view.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["nlp", "cv", "audio"]);
        assert_eq!(names(view.sections[0].items.cards()), vec!["bert", "squad"]);
        assert_eq!(names(view.sections[1].items.cards()), vec!["yolo"]);
    }

    #[test]
    fn empty_category_gets_explicit_marker() {
        let view = project(&catalog(), None);
        assert_eq!(view.sections[2].items, SectionItems::Empty);
    }

    #[test]
    fn all_items_lists_models_then_datasets() {
        let view = project(&catalog(), None);
        assert_eq!(names(&view.all_items), vec!["bert", "yolo", "squad"]);
    }

    #[test]
    fn links_are_conditional_and_ordered() {
        let view = project(&catalog(), None);
        let bert = &view.all_items[0];
        let kinds: Vec<_> = bert.links.iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![LinkKind::Source, LinkKind::Paper]);
        assert_eq!(bert.links[0].url, "https://huggingface.co/google/bert");

        let yolo = &view.all_items[1];
        let kinds: Vec<_> = yolo.links.iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![LinkKind::Source, LinkKind::Demo]);
    }

    #[test]
    fn size_only_on_datasets() {
        let view = project(&catalog(), None);
        assert_eq!(view.all_items[0].size, None);
        assert_eq!(view.all_items[2].size.as_deref(), Some("100K samples"));
        assert_eq!(view.all_items[2].kind, ItemKind::Dataset);
    }

    #[test]
    fn projection_is_deterministic() {
        let catalog = catalog();
        let first = project(&catalog, None);
        let second = project(&catalog, None);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn category_filter_limits_sections_only() {
        let filter = ViewFilter {
            category: Some("cv".to_string()),
            ..ViewFilter::default()
        };
        let view = project(&catalog(), Some(&filter));
        assert_eq!(view.sections.len(), 1);
        assert_eq!(view.sections[0].id, "cv");
        assert_eq!(view.all_items.len(), 3);
    }

    #[test]
    fn tag_filter_can_empty_a_section() {
        let filter = ViewFilter {
            tag: Some("qa".to_string()),
            ..ViewFilter::default()
        };
        let view = project(&catalog(), Some(&filter));
        assert_eq!(names(view.sections[0].items.cards()), vec!["bert", "squad"]);
        assert!(view.sections[1].items.is_empty());
        assert_eq!(names(&view.all_items), vec!["bert", "squad"]);
    }

    #[test]
    fn tag_filter_folds_non_ascii_case() {
        let mut catalog = catalog();
        catalog.add_model(NewModel {
            name: "gbert".to_string(),
            repo: "deepset/gbert".to_string(),
            category: "nlp".to_string(),
            tags: Some("Übersetzung".to_string()),
            ..NewModel::default()
        });
        let filter = ViewFilter {
            tag: Some("übersetzung".to_string()),
            ..ViewFilter::default()
        };
        let view = project(&catalog, Some(&filter));
        assert_eq!(names(&view.all_items), vec!["gbert"]);
    }

    #[test]
    fn kind_and_query_filters() {
        let filter = ViewFilter {
            kind: Some(ItemKind::Model),
            query: Some("ENCODER".to_string()),
            ..ViewFilter::default()
        };
        let view = project(&catalog(), Some(&filter));
        assert_eq!(names(&view.all_items), vec!["bert"]);
    }

    #[test]
    fn header_orders_known_platforms_first() {
        let mut catalog = catalog();
        let social = &mut catalog.site_mut().social_links;
        social.insert("bluesky".to_string(), "https://bsky.app/ana".to_string());
        social.insert("linkedin".to_string(), "https://linkedin.com/in/ana".to_string());
        social.insert("github".to_string(), "https://github.com/ana".to_string());
        social.insert("twitter".to_string(), String::new());

        let header = project(&catalog, None).site;
        let labels: Vec<_> = header.social_links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["GitHub", "LinkedIn", "bluesky"]);
    }

    #[test]
    fn missing_site_uses_defaults() {
        let view = project(&Catalog::default(), None);
        assert_eq!(view.site.title, "");
        assert_eq!(view.site.theme_color, crate::catalog::model::DEFAULT_THEME_COLOR);
        assert!(view.sections.is_empty());
    }

    #[test]
    fn source_url_passes_absolute_urls() {
        assert_eq!(
            source_url("https://github.com/a/b").as_deref(),
            Some("https://github.com/a/b")
        );
        assert_eq!(
            source_url("a/b").as_deref(),
            Some("https://huggingface.co/a/b")
        );
        assert_eq!(source_url("  "), None);
    }
}
