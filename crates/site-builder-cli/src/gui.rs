use std::path::PathBuf;

use eframe::egui;

use site_builder_core::catalog::{
    project, Catalog, CatalogSession, CatalogStore, NewCategory, NewDataset, NewModel, RemoveKind,
    SectionItems, SiteUpdate, DEFAULT_CATEGORY_ICON,
};
use site_builder_core::{Result, SiteBuilderError};

pub fn run(catalog_path: PathBuf) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([500.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "site-builder",
        options,
        Box::new(move |cc| Ok(Box::new(SiteBuilderApp::new(cc, catalog_path)))),
    )
    .map_err(|e| SiteBuilderError::Gui(e.to_string()))?;

    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Site,
    Categories,
    Models,
    Datasets,
    Preview,
}

enum MessageType {
    Success,
    Error,
    Info,
}

/// User intent collected while drawing, applied once the frame's borrows end
enum Action {
    SaveSite(SiteUpdate),
    AddCategory(NewCategory),
    AddModel(NewModel),
    AddDataset(NewDataset),
    RequestRemove(RemoveKind, usize, String),
    ConfirmRemove,
    CancelRemove,
    Validate,
    Reload,
    Open(PathBuf),
    CreateStarter,
    Warn(String),
}

#[derive(Default)]
struct SiteForm {
    title: String,
    description: String,
    author: String,
    theme_color: String,
    github: String,
    twitter: String,
    linkedin: String,
}

impl SiteForm {
    fn from_catalog(catalog: &Catalog) -> Self {
        let site = catalog.site.clone().unwrap_or_default();
        let link = |platform: &str| site.social_links.get(platform).cloned().unwrap_or_default();
        Self {
            github: link("github"),
            twitter: link("twitter"),
            linkedin: link("linkedin"),
            title: site.title,
            description: site.description,
            author: site.author,
            theme_color: site.theme_color,
        }
    }

    fn to_update(&self) -> SiteUpdate {
        SiteUpdate {
            title: Some(self.title.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            author: Some(self.author.trim().to_string()),
            theme_color: Some(self.theme_color.trim().to_string()),
            social_links: vec![
                ("github".to_string(), self.github.trim().to_string()),
                ("twitter".to_string(), self.twitter.trim().to_string()),
                ("linkedin".to_string(), self.linkedin.trim().to_string()),
            ],
        }
    }
}

#[derive(Default)]
struct CategoryForm {
    id: String,
    name: String,
    icon: String,
    description: String,
}

#[derive(Default)]
struct ItemForm {
    name: String,
    repo: String,
    category: String,
    description: String,
    tags: String,
    demo_url: String,
    paper_url: String,
    size: String,
}

impl ItemForm {
    fn missing_required(&self) -> bool {
        self.name.trim().is_empty() || self.repo.trim().is_empty() || self.category.is_empty()
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

struct SiteBuilderApp {
    catalog_path: PathBuf,
    session: Option<CatalogSession>,
    tab: Tab,
    site_form: SiteForm,
    category_form: CategoryForm,
    model_form: ItemForm,
    dataset_form: ItemForm,
    /// Row index into the session's catalog plus its label for the prompt
    pending_remove: Option<(RemoveKind, usize, String)>,
    status_message: Option<(String, MessageType)>,
}

impl SiteBuilderApp {
    fn new(_cc: &eframe::CreationContext<'_>, catalog_path: PathBuf) -> Self {
        let mut app = Self {
            catalog_path,
            session: None,
            tab: Tab::Site,
            site_form: SiteForm::default(),
            category_form: CategoryForm::default(),
            model_form: ItemForm::default(),
            dataset_form: ItemForm::default(),
            pending_remove: None,
            status_message: None,
        };
        app.open();
        app
    }

    fn open(&mut self) {
        match CatalogSession::open(CatalogStore::new(&self.catalog_path)) {
            Ok(session) => {
                self.site_form = SiteForm::from_catalog(session.catalog());
                self.session = Some(session);
                self.status_message = Some((
                    format!("Loaded {}", self.catalog_path.display()),
                    MessageType::Info,
                ));
            }
            Err(e) => {
                self.session = None;
                self.status_message =
                    Some((format!("Failed to load catalog: {e}"), MessageType::Error));
            }
        }
    }

    fn apply(&mut self, action: Action) {
        let action = match action {
            Action::Open(path) => {
                self.catalog_path = path;
                self.pending_remove = None;
                self.open();
                return;
            }
            Action::CreateStarter => {
                match CatalogStore::new(&self.catalog_path).init(false) {
                    Ok(_) => self.open(),
                    Err(e) => self.error(e),
                }
                return;
            }
            Action::Warn(message) => {
                self.status_message = Some((message, MessageType::Error));
                return;
            }
            other => other,
        };

        let Some(session) = self.session.as_mut() else {
            return;
        };

        let outcome: Result<String> = match action {
            Action::SaveSite(update) => session
                .update_site(update)
                .map(|()| "Site information saved".to_string()),
            Action::AddCategory(new) => session.add_category(new).map(|c| {
                self.category_form = CategoryForm::default();
                format!("Category '{}' added", c.name)
            }),
            Action::AddModel(new) => session.add_model(new).map(|m| {
                self.model_form = ItemForm::default();
                format!("Model '{}' added", m.name)
            }),
            Action::AddDataset(new) => session.add_dataset(new).map(|d| {
                self.dataset_form = ItemForm::default();
                format!("Dataset '{}' added", d.name)
            }),
            Action::RequestRemove(kind, index, name) => {
                self.pending_remove = Some((kind, index, name));
                return;
            }
            Action::CancelRemove => {
                self.pending_remove = None;
                return;
            }
            Action::ConfirmRemove => match self.pending_remove.take() {
                Some((kind, index, _)) => session
                    .remove_at(kind, index)
                    .map(|name| format!("{} '{}' deleted", kind.label(), name)),
                None => return,
            },
            Action::Validate => {
                let errors = session.validate();
                if errors.is_empty() {
                    Ok("✅ Configuration is valid!".to_string())
                } else {
                    let lines: Vec<String> = errors.iter().map(|e| format!("• {e}")).collect();
                    self.status_message = Some((
                        format!("Validation failed:\n{}", lines.join("\n")),
                        MessageType::Error,
                    ));
                    return;
                }
            }
            Action::Reload => {
                self.pending_remove = None;
                session
                    .reload()
                    .map(|()| "Configuration reloaded".to_string())
            }
            Action::Open(_) | Action::CreateStarter | Action::Warn(_) => return,
        };

        match outcome {
            Ok(message) => {
                self.site_form = SiteForm::from_catalog(session.catalog());
                self.status_message = Some((message, MessageType::Success));
            }
            Err(e) => self.error(e),
        }
    }

    fn error(&mut self, e: SiteBuilderError) {
        let hint = match e {
            SiteBuilderError::Conflict { .. } => " (press Reload to pick up the other changes)",
            _ => "",
        };
        self.status_message = Some((format!("{e}{hint}"), MessageType::Error));
    }
}

impl eframe::App for SiteBuilderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut action: Option<Action> = None;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading("🚀 HF Site Builder");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Validate").clicked() {
                        action = Some(Action::Validate);
                    }
                    if ui.button("Reload").clicked() {
                        action = Some(Action::Reload);
                    }
                    if ui.button("Open...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("JSON", &["json"])
                            .pick_file()
                        {
                            action = Some(Action::Open(path));
                        }
                    }
                });
            });
            ui.label(self.catalog_path.display().to_string());
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, Tab::Site, "🏠 Site Info");
                ui.selectable_value(&mut self.tab, Tab::Categories, "📂 Categories");
                ui.selectable_value(&mut self.tab, Tab::Models, "🤖 Models");
                ui.selectable_value(&mut self.tab, Tab::Datasets, "📊 Datasets");
                ui.selectable_value(&mut self.tab, Tab::Preview, "👁 Preview");
            });
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let mut clear_status = false;
            if let Some((msg, msg_type)) = &self.status_message {
                let color = match msg_type {
                    MessageType::Success => egui::Color32::GREEN,
                    MessageType::Error => egui::Color32::RED,
                    MessageType::Info => egui::Color32::LIGHT_BLUE,
                };
                ui.horizontal(|ui| {
                    ui.colored_label(color, msg.clone());
                    if ui.small_button("x").clicked() {
                        clear_status = true;
                    }
                });
                ui.separator();
            }
            if clear_status {
                self.status_message = None;
            }

            let Some(session) = &self.session else {
                ui.vertical_centered(|ui| {
                    ui.add_space(100.0);
                    ui.heading("No catalog loaded");
                    if ui.button("Create starter catalog here").clicked() {
                        action = Some(Action::CreateStarter);
                    }
                    ui.label("Or create one using the CLI:");
                    ui.code("site-builder init");
                });
                return;
            };
            let catalog = session.catalog();

            if let Some((kind, _, name)) = &self.pending_remove {
                ui.horizontal(|ui| {
                    ui.colored_label(
                        egui::Color32::YELLOW,
                        format!("Delete {} '{}'?", kind.label().to_lowercase(), name),
                    );
                    if ui.button("Delete").clicked() {
                        action = Some(Action::ConfirmRemove);
                    }
                    if ui.button("Cancel").clicked() {
                        action = Some(Action::CancelRemove);
                    }
                });
                ui.separator();
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                let tab_action = match self.tab {
                    Tab::Site => site_tab(ui, &mut self.site_form),
                    Tab::Categories => categories_tab(ui, catalog, &mut self.category_form),
                    Tab::Models => items_tab(ui, catalog, RemoveKind::Model, &mut self.model_form),
                    Tab::Datasets => {
                        items_tab(ui, catalog, RemoveKind::Dataset, &mut self.dataset_form)
                    }
                    Tab::Preview => {
                        preview_tab(ui, catalog);
                        None
                    }
                };
                if tab_action.is_some() {
                    action = tab_action;
                }
            });
        });

        if let Some(action) = action {
            self.apply(action);
        }
    }
}

fn form_row(ui: &mut egui::Ui, label: &str, value: &mut String) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.text_edit_singleline(value);
    });
}

fn site_tab(ui: &mut egui::Ui, form: &mut SiteForm) -> Option<Action> {
    ui.heading("Site Information");
    ui.add_space(8.0);
    form_row(ui, "Site Title:", &mut form.title);
    form_row(ui, "Description:", &mut form.description);
    form_row(ui, "Author:", &mut form.author);
    form_row(ui, "Theme Color:", &mut form.theme_color);

    ui.add_space(12.0);
    ui.heading("Social Links");
    form_row(ui, "GitHub:", &mut form.github);
    form_row(ui, "Twitter:", &mut form.twitter);
    form_row(ui, "LinkedIn:", &mut form.linkedin);

    ui.add_space(12.0);
    ui.button("💾 Save Site Info")
        .clicked()
        .then(|| Action::SaveSite(form.to_update()))
}

fn categories_tab(
    ui: &mut egui::Ui,
    catalog: &Catalog,
    form: &mut CategoryForm,
) -> Option<Action> {
    let mut action = None;

    ui.heading("Existing Categories");
    if catalog.categories().is_empty() {
        ui.label("No categories yet");
    }
    for (index, category) in catalog.categories().iter().enumerate() {
        ui.horizontal(|ui| {
            ui.label(format!(
                "{} {} ({}) - {} items",
                category.icon,
                category.name,
                category.id,
                catalog.item_count(&category.id)
            ));
            if ui.small_button("🗑").clicked() {
                action = Some(Action::RequestRemove(
                    RemoveKind::Category,
                    index,
                    category.id.clone(),
                ));
            }
        });
    }

    ui.separator();
    ui.heading("Add New Category");
    form_row(ui, "ID:", &mut form.id);
    form_row(ui, "Name:", &mut form.name);
    form_row(ui, &format!("Icon (default {DEFAULT_CATEGORY_ICON}):"), &mut form.icon);
    form_row(ui, "Description:", &mut form.description);

    if ui.button("➕ Add Category").clicked() {
        action = Some(if form.id.trim().is_empty() || form.name.trim().is_empty() {
            Action::Warn("Category ID and Name are required!".to_string())
        } else {
            Action::AddCategory(NewCategory {
                id: form.id.trim().to_string(),
                name: form.name.trim().to_string(),
                icon: optional(&form.icon),
                description: optional(&form.description),
            })
        });
    }
    action
}

fn items_tab(
    ui: &mut egui::Ui,
    catalog: &Catalog,
    kind: RemoveKind,
    form: &mut ItemForm,
) -> Option<Action> {
    let mut action = None;
    let rows: Vec<(&str, &str)> = match kind {
        RemoveKind::Dataset => catalog
            .datasets
            .iter()
            .map(|d| (d.name.as_str(), d.category.as_str()))
            .collect(),
        _ => catalog
            .models
            .iter()
            .map(|m| (m.name.as_str(), m.category.as_str()))
            .collect(),
    };

    ui.heading(format!("Existing {}s", kind.label()));
    if rows.is_empty() {
        ui.label(format!("No {}s yet", kind.label().to_lowercase()));
    }
    for (index, (name, category)) in rows.into_iter().enumerate() {
        ui.horizontal(|ui| {
            ui.label(format!("{name} [{category}]"));
            if !catalog.has_category(category) {
                ui.colored_label(egui::Color32::YELLOW, "unknown category");
            }
            if ui.small_button("🗑").clicked() {
                action = Some(Action::RequestRemove(kind, index, name.to_string()));
            }
        });
    }

    ui.separator();
    ui.heading(format!("Add New {}", kind.label()));
    form_row(ui, "Name:", &mut form.name);
    form_row(ui, "Repo (user/name):", &mut form.repo);
    ui.horizontal(|ui| {
        ui.label("Category:");
        egui::ComboBox::from_id_salt(("category", kind.label()))
            .selected_text(form.category.clone())
            .show_ui(ui, |ui| {
                for category in catalog.categories() {
                    ui.selectable_value(
                        &mut form.category,
                        category.id.clone(),
                        format!("{} {}", category.icon, category.name),
                    );
                }
            });
    });
    form_row(ui, "Description:", &mut form.description);
    form_row(ui, "Tags (comma-separated):", &mut form.tags);
    if kind == RemoveKind::Dataset {
        form_row(ui, "Size:", &mut form.size);
    } else {
        form_row(ui, "Demo URL:", &mut form.demo_url);
        form_row(ui, "Paper URL:", &mut form.paper_url);
    }

    if ui.button(format!("➕ Add {}", kind.label())).clicked() {
        action = Some(if form.missing_required() {
            Action::Warn("Name, Repo, and Category are required!".to_string())
        } else if kind == RemoveKind::Dataset {
            Action::AddDataset(NewDataset {
                name: form.name.trim().to_string(),
                repo: form.repo.trim().to_string(),
                category: form.category.clone(),
                description: optional(&form.description),
                tags: optional(&form.tags),
                size: optional(&form.size),
            })
        } else {
            Action::AddModel(NewModel {
                name: form.name.trim().to_string(),
                repo: form.repo.trim().to_string(),
                category: form.category.clone(),
                description: optional(&form.description),
                tags: optional(&form.tags),
                demo_url: optional(&form.demo_url),
                paper_url: optional(&form.paper_url),
            })
        });
    }
    action
}

fn preview_tab(ui: &mut egui::Ui, catalog: &Catalog) {
    let view = project(catalog, None);

    ui.heading(&view.site.title);
    ui.label(&view.site.description);
    if !view.site.author.is_empty() {
        ui.label(format!("by {}", view.site.author));
    }
    ui.horizontal_wrapped(|ui| {
        for link in &view.site.social_links {
            ui.hyperlink_to(&link.label, &link.url);
        }
    });

    for section in &view.sections {
        ui.separator();
        ui.heading(format!("{} {}", section.icon, section.name));
        ui.label(&section.description);
        match &section.items {
            SectionItems::Empty => {
                ui.label("No items in this category yet.");
            }
            SectionItems::Cards(cards) => {
                for card in cards {
                    ui.group(|ui| {
                        ui.strong(&card.name);
                        if !card.description.is_empty() {
                            ui.label(&card.description);
                        }
                        if let Some(size) = &card.size {
                            ui.label(size);
                        }
                        if !card.tags.is_empty() {
                            ui.label(card.tags.join(" · "));
                        }
                        ui.horizontal_wrapped(|ui| {
                            for link in &card.links {
                                ui.hyperlink_to(format!("{:?}", link.kind), &link.url);
                            }
                        });
                    });
                }
            }
        }
    }
}
