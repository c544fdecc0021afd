//! Static HTML rendering of a [`ViewModel`]
//!
//! Markup only; the page links an optional `style.css` next to it for looks.

use std::fmt::Write;

use site_builder_core::catalog::{Card, ItemKind, LinkKind, SectionItems, SiteHeader, ViewModel};

const EMPTY_SECTION_MESSAGE: &str = "No items in this category yet.";

pub fn render_page(view: &ViewModel) -> String {
    let mut out = String::new();
    let title = escape(&view.site.title);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    let _ = writeln!(
        out,
        "<meta name=\"theme-color\" content=\"{}\">",
        escape(&view.site.theme_color)
    );
    let _ = writeln!(out, "<title>{}</title>", title);
    out.push_str("<link rel=\"stylesheet\" href=\"style.css\">\n");
    out.push_str("</head>\n<body>\n");

    render_header(&mut out, &view.site);

    out.push_str("<h2 class=\"section-title\">📂 Categories</h2>\n<div class=\"categories-grid\">\n");
    for section in &view.sections {
        let _ = writeln!(
            out,
            "<a class=\"category-card\" href=\"#{}\"><div class=\"category-icon\">{}</div><h3>{}</h3><p>{}</p></a>",
            escape(&section.id),
            escape(&section.icon),
            escape(&section.name),
            escape(&section.description)
        );
    }
    out.push_str("</div>\n");

    for section in &view.sections {
        let _ = writeln!(
            out,
            "<section id=\"{}\">\n<h2>{} {}</h2>\n<p class=\"category-description\">{}</p>",
            escape(&section.id),
            escape(&section.icon),
            escape(&section.name),
            escape(&section.description)
        );
        match &section.items {
            SectionItems::Empty => {
                let _ = writeln!(out, "<p class=\"no-items\">{}</p>", EMPTY_SECTION_MESSAGE);
            }
            SectionItems::Cards(cards) => render_grid(&mut out, cards),
        }
        out.push_str("</section>\n");
    }

    out.push_str("<section id=\"all-items\">\n<h2>🌐 All Items</h2>\n");
    render_grid(&mut out, &view.all_items);
    out.push_str("</section>\n</body>\n</html>\n");
    out
}

fn render_header(out: &mut String, site: &SiteHeader) {
    out.push_str("<header class=\"site-header\">\n");
    let _ = writeln!(out, "<h1>{}</h1>", escape(&site.title));
    let _ = writeln!(
        out,
        "<p class=\"site-description\">{}</p>",
        escape(&site.description)
    );
    if !site.author.is_empty() {
        let _ = writeln!(out, "<p class=\"site-author\">by {}</p>", escape(&site.author));
    }
    if !site.social_links.is_empty() {
        let links: Vec<String> = site
            .social_links
            .iter()
            .map(|link| anchor(&link.url, &link.label, None))
            .collect();
        let _ = writeln!(out, "<div class=\"social-links\">{}</div>", links.join(" · "));
    }
    out.push_str("</header>\n");
}

fn render_grid(out: &mut String, cards: &[Card]) {
    out.push_str("<div class=\"items-grid\">\n");
    for card in cards {
        render_card(out, card);
    }
    out.push_str("</div>\n");
}

fn render_card(out: &mut String, card: &Card) {
    let kind = match card.kind {
        ItemKind::Model => "model",
        ItemKind::Dataset => "dataset",
    };
    let _ = writeln!(out, "<div class=\"item-card {}\">", kind);
    let _ = writeln!(out, "<h3>{}</h3>", escape(&card.name));
    let _ = writeln!(
        out,
        "<p class=\"card-description\">{}</p>",
        escape(&card.description)
    );
    if let Some(size) = &card.size {
        let _ = writeln!(out, "<div class=\"card-size\">{}</div>", escape(size));
    }

    let tags: Vec<String> = card
        .tags
        .iter()
        .map(|t| format!("<span class=\"tag\">{}</span>", escape(t)))
        .collect();
    let _ = writeln!(out, "<div class=\"card-tags\">{}</div>", tags.join(" "));

    let links: Vec<String> = card
        .links
        .iter()
        .map(|link| {
            let label = match link.kind {
                LinkKind::Source => "🤗 View on HF",
                LinkKind::Demo => "🚀 Demo",
                LinkKind::Paper => "📄 Paper",
            };
            anchor(&link.url, label, Some("card-link"))
        })
        .collect();
    let _ = writeln!(out, "<div class=\"card-links\">{}</div>", links.join(" "));
    out.push_str("</div>\n");
}

fn anchor(url: &str, label: &str, class: Option<&str>) -> String {
    let class = class
        .map(|c| format!(" class=\"{}\"", c))
        .unwrap_or_default();
    format!(
        "<a href=\"{}\" target=\"_blank\" rel=\"noopener\"{}>{}</a>",
        escape(url),
        class,
        escape(label)
    )
}

/// Escape text for element content and double-quoted attributes
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use site_builder_core::catalog::{project, Catalog, NewCategory, NewDataset, Site};

    fn view() -> ViewModel {
        let mut catalog = Catalog::new(Site {
            title: "Ana's <Lab>".to_string(),
            ..Site::default()
        });
        for id in ["nlp", "cv"] {
            catalog
                .add_category(NewCategory {
                    id: id.to_string(),
                    name: id.to_uppercase(),
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
        project(&catalog, None)
    }

    #[test]
    fn escape_handles_markup() {
        assert_eq!(
            escape(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn page_escapes_site_title() {
        let page = render_page(&view());
        assert!(page.contains("<title>Ana&#39;s &lt;Lab&gt;</title>"));
        assert!(!page.contains("<Lab>"));
    }

    #[test]
    fn empty_section_shows_placeholder() {
        let page = render_page(&view());
        assert_eq!(page.matches(EMPTY_SECTION_MESSAGE).count(), 1);
        assert!(page.contains("<section id=\"cv\">"));
    }

    #[test]
    fn dataset_card_has_size_tags_and_source_link() {
        let page = render_page(&view());
        assert!(page.contains("<div class=\"card-size\">100K samples</div>"));
        assert!(page.contains("<span class=\"tag\">qa</span>"));
        assert!(page.contains("href=\"https://huggingface.co/rajpurkar/squad\""));
        assert!(!page.contains("🚀 Demo"));
    }

    #[test]
    fn rendering_is_stable() {
        assert_eq!(render_page(&view()), render_page(&view()));
    }
}
