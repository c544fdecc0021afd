use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use site_builder_core::catalog::{
    project, validate, Catalog, CatalogSession, CatalogStore, NewCategory, NewDataset, NewModel,
    RemoveKind, SiteUpdate, ViewFilter,
};
use site_builder_core::config::Config;
use site_builder_core::{Result, SiteBuilderError};

mod args;
mod html;
use args::{Cli, Commands, ConfigAction, FilterArgs, Shell};

#[cfg(feature = "gui")]
mod gui;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let base_dir = resolve_base_dir(cli.base_dir);

    // Usable even when config.toml does not parse
    let command = match cli.command {
        Some(Commands::Config { action }) => return handle_config(action, &base_dir),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            return Ok(());
        }
        other => other,
    };

    let config = Config::load(&base_dir)?;
    let catalog_path = resolve_catalog_path(cli.catalog, &config);

    // Handle GUI flag
    #[cfg(feature = "gui")]
    if cli.gui {
        return gui::run(catalog_path);
    }

    #[cfg(not(feature = "gui"))]
    if cli.gui {
        return Err(SiteBuilderError::Gui(
            "not available. Build with: cargo install --path crates/site-builder-cli --features gui"
                .to_string(),
        ));
    }

    let ctx = Context {
        store: CatalogStore::new(catalog_path),
        quiet: cli.quiet,
    };

    match command {
        Some(Commands::Init { force }) => handle_init(&ctx, force),
        Some(Commands::Site {
            title,
            description,
            author,
            theme_color,
            github,
            twitter,
            linkedin,
            social,
        }) => {
            let mut social_links: Vec<(String, String)> = [
                ("github", github),
                ("twitter", twitter),
                ("linkedin", linkedin),
            ]
            .into_iter()
            .filter_map(|(platform, url)| url.map(|url| (platform.to_string(), url)))
            .collect();
            social_links.extend(social);

            handle_site(
                &ctx,
                SiteUpdate {
                    title,
                    description,
                    author,
                    theme_color,
                    social_links,
                },
            )
        }
        Some(Commands::AddCategory {
            id,
            name,
            icon,
            description,
        }) => handle_add_category(
            &ctx,
            NewCategory {
                id,
                name,
                icon,
                description,
            },
        ),
        Some(Commands::AddModel {
            name,
            repo,
            category,
            description,
            tags,
            demo_url,
            paper_url,
        }) => handle_add_model(
            &ctx,
            NewModel {
                name,
                repo,
                category,
                description,
                tags,
                demo_url,
                paper_url,
            },
        ),
        Some(Commands::AddDataset {
            name,
            repo,
            category,
            description,
            tags,
            size,
        }) => handle_add_dataset(
            &ctx,
            NewDataset {
                name,
                repo,
                category,
                description,
                tags,
                size,
            },
        ),
        Some(Commands::List) => handle_list(&ctx),
        Some(Commands::Remove { kind, name }) => handle_remove(&ctx, kind.into(), &name),
        Some(Commands::Validate) => handle_validate(&ctx),
        Some(Commands::View { filter }) => handle_view(&ctx, filter),
        Some(Commands::Render {
            output,
            stdout,
            filter,
        }) => {
            let output = output.unwrap_or_else(|| config.render.output.clone());
            handle_render(&ctx, filter, (!stdout).then_some(output.as_path()))
        }
        // dispatched above
        Some(Commands::Config { .. } | Commands::Completions { .. }) => Ok(()),
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    }
}

struct Context {
    store: CatalogStore,
    quiet: bool,
}

impl Context {
    fn session(&self) -> Result<CatalogSession> {
        CatalogSession::open(self.store.clone())
    }

    fn success(&self, message: impl AsRef<str>) {
        if !self.quiet {
            println!("{} {}", "✔".green(), message.as_ref());
        }
    }

    fn warn(&self, message: impl AsRef<str>) {
        if !self.quiet {
            eprintln!("{} {}", "[WARN]".yellow().bold(), message.as_ref());
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "site-builder", &mut io::stdout());
}

fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("SITE_BUILDER_BASE") {
        return PathBuf::from(base);
    }

    Config::default_base_dir().unwrap_or_else(|_| PathBuf::from(".site-builder"))
}

fn resolve_catalog_path(cli_catalog: Option<PathBuf>, config: &Config) -> PathBuf {
    if let Some(path) = cli_catalog {
        return path;
    }

    if let Ok(path) = std::env::var("SITE_BUILDER_CATALOG") {
        return PathBuf::from(path);
    }

    config.catalog.path.clone()
}

fn handle_init(ctx: &Context, force: bool) -> Result<()> {
    let catalog = ctx.store.init(force)?;
    ctx.success(format!("Created {}", ctx.store.path().display()));
    if !ctx.quiet {
        println!();
        println!("Next steps:");
        println!("  1. site-builder site --title \"...\" --author \"...\"");
        println!(
            "  2. site-builder add-model <name> <user/repo> {}",
            catalog
                .categories()
                .first()
                .map(|c| c.id.as_str())
                .unwrap_or("<category>")
        );
        println!("  3. site-builder render");
    }
    Ok(())
}

fn handle_site(ctx: &Context, update: SiteUpdate) -> Result<()> {
    if update.is_empty() {
        ctx.warn("Nothing to update. See `site-builder site --help`.");
        return Ok(());
    }

    let mut session = ctx.session()?;
    session.update_site(update)?;
    ctx.success("Site information updated");
    Ok(())
}

fn handle_add_category(ctx: &Context, new: NewCategory) -> Result<()> {
    let mut session = ctx.session()?;
    let category = session.add_category(new)?;
    ctx.success(format!(
        "Category '{}' added ({} {})",
        category.name, category.icon, category.id
    ));
    Ok(())
}

fn handle_add_model(ctx: &Context, new: NewModel) -> Result<()> {
    let mut session = ctx.session()?;
    let model = session.add_model(new)?;
    ctx.success(format!("Model '{}' added", model.name));
    warn_unknown_category(ctx, session.catalog(), &model.category);
    Ok(())
}

fn handle_add_dataset(ctx: &Context, new: NewDataset) -> Result<()> {
    let mut session = ctx.session()?;
    let dataset = session.add_dataset(new)?;
    ctx.success(format!("Dataset '{}' added", dataset.name));
    warn_unknown_category(ctx, session.catalog(), &dataset.category);
    Ok(())
}

fn warn_unknown_category(ctx: &Context, catalog: &Catalog, category: &str) {
    if !catalog.has_category(category) {
        ctx.warn(format!(
            "Category '{}' does not exist yet; `site-builder validate` will fail until it is added",
            category
        ));
    }
}

fn handle_list(ctx: &Context) -> Result<()> {
    let catalog = ctx.store.load()?;

    println!();
    println!("{}", "🏠 Site Information:".cyan().bold());
    match &catalog.site {
        Some(site) => {
            println!("  Title: {}", site.title);
            println!("  Author: {}", site.author);
            println!("  Description: {}", site.description);
            println!("  Theme color: {}", site.theme_color);
            for (platform, url) in &site.social_links {
                println!("  {}: {}", platform, url);
            }
        }
        None => println!("  {}", "(missing)".dimmed()),
    }

    println!();
    println!("{}", "📂 Categories:".cyan().bold());
    for category in catalog.categories() {
        println!(
            "  {} {} ({}) {}",
            category.icon,
            category.name,
            category.id.yellow(),
            format!("[{} items]", catalog.item_count(&category.id)).dimmed()
        );
    }

    println!();
    println!(
        "{}",
        format!("🤖 Models ({}):", catalog.models.len()).cyan().bold()
    );
    for model in &catalog.models {
        println!("  - {} [{}]", model.name, model.category.yellow());
    }

    println!();
    println!(
        "{}",
        format!("📊 Datasets ({}):", catalog.datasets.len())
            .cyan()
            .bold()
    );
    for dataset in &catalog.datasets {
        let size = dataset
            .size
            .as_deref()
            .map(|s| format!(" ({})", s))
            .unwrap_or_default();
        println!("  - {} [{}]{}", dataset.name, dataset.category.yellow(), size);
    }
    println!();

    Ok(())
}

fn handle_remove(ctx: &Context, kind: RemoveKind, name: &str) -> Result<()> {
    let mut session = ctx.session()?;
    let removed = session.remove(kind, name)?;
    ctx.success(format!(
        "{} '{}' removed{}",
        kind.label(),
        name,
        if removed > 1 {
            format!(" ({} entries)", removed)
        } else {
            String::new()
        }
    ));

    if kind == RemoveKind::Category {
        let orphaned = session.catalog().item_count(name);
        if orphaned > 0 {
            ctx.warn(format!(
                "{} item(s) still reference category '{}'",
                orphaned, name
            ));
        }
    }
    Ok(())
}

fn handle_validate(ctx: &Context) -> Result<()> {
    let catalog = ctx.store.load()?;
    let errors = validate(&catalog);

    if errors.is_empty() {
        ctx.success("Configuration is valid");
        return Ok(());
    }

    eprintln!("{}", "Configuration validation failed:".red().bold());
    for error in &errors {
        eprintln!("  - {}", error);
    }
    Err(SiteBuilderError::Invalid {
        count: errors.len(),
    })
}

fn build_filter(args: FilterArgs) -> ViewFilter {
    ViewFilter {
        category: args.category,
        tag: args.tag,
        kind: args.kind.map(Into::into),
        query: args.search,
    }
}

fn handle_view(ctx: &Context, filter: FilterArgs) -> Result<()> {
    let catalog = ctx.store.load()?;
    let view = project(&catalog, Some(&build_filter(filter)));
    let json = serde_json::to_string_pretty(&view).map_err(io::Error::from)?;
    println!("{}", json);
    Ok(())
}

fn handle_render(ctx: &Context, filter: FilterArgs, output: Option<&Path>) -> Result<()> {
    let catalog = ctx.store.load()?;
    let errors = validate(&catalog);
    if !errors.is_empty() {
        ctx.warn(format!(
            "Catalog has {} validation error(s); rendering anyway",
            errors.len()
        ));
    }

    let page = html::render_page(&project(&catalog, Some(&build_filter(filter))));
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, page)?;
            tracing::info!(path = %path.display(), "page rendered");
            ctx.success(format!("Rendered {}", path.display()));
        }
        None => print!("{}", page),
    }
    Ok(())
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(base_dir)?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}", value);
                }
                None => {
                    return Err(SiteBuilderError::ConfigKeyNotFound { key });
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(base_dir)?;
            config.set(&key, &value)?;
            config.save(base_dir)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            let path = Config::path(base_dir);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("site-builder").chain(args.iter().copied())).unwrap()
    }

    fn run_with(global: &[&str], rest: &[&str]) -> Result<()> {
        let args: Vec<&str> = global.iter().chain(rest).copied().collect();
        run(cli(&args))
    }

    fn quiet_ctx(catalog: &Path) -> Context {
        Context {
            store: CatalogStore::new(catalog),
            quiet: true,
        }
    }

    #[test]
    fn render_writes_page_into_new_directory() {
        let temp = TempDir::new().unwrap();
        let ctx = quiet_ctx(&temp.path().join("config.json"));
        ctx.store.init(false).unwrap();
        let output = temp.path().join("public").join("index.html");

        handle_render(&ctx, FilterArgs::default(), Some(&output)).unwrap();

        let page = fs::read_to_string(&output).unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("My AI Portfolio"));
    }

    #[test]
    fn render_without_catalog_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let ctx = quiet_ctx(&temp.path().join("missing.json"));
        let output = temp.path().join("index.html");

        let err = handle_render(&ctx, FilterArgs::default(), Some(&output)).unwrap_err();
        assert!(matches!(err, SiteBuilderError::CatalogNotFound { .. }));
        assert_eq!(err.exit_code(), 2);
        assert!(!output.exists());
    }

    #[test]
    fn validate_fails_with_error_count() {
        let temp = TempDir::new().unwrap();
        let ctx = quiet_ctx(&temp.path().join("config.json"));
        ctx.store.init(false).unwrap();
        assert!(handle_validate(&ctx).is_ok());

        ctx.session()
            .unwrap()
            .add_dataset(NewDataset {
                name: "coco".to_string(),
                repo: "user/coco".to_string(),
                category: "cv".to_string(),
                ..NewDataset::default()
            })
            .unwrap();

        let err = handle_validate(&ctx).unwrap_err();
        assert!(matches!(err, SiteBuilderError::Invalid { count: 1 }));
        assert_eq!(err.exit_code(), 7);
    }

    #[test]
    fn config_commands_work_with_broken_config_file() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().to_str().unwrap();
        fs::write(temp.path().join("config.toml"), "[catalog\npath = 1").unwrap();

        run(cli(&["--base-dir", base, "config", "path"])).unwrap();
        run(cli(&["--base-dir", base, "config", "init"])).unwrap();

        let err = run(cli(&["--base-dir", base, "-q", "list"])).unwrap_err();
        assert!(matches!(err, SiteBuilderError::ConfigParse { .. }));
    }

    #[test]
    fn commands_edit_the_catalog_given_by_flag() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("base");
        let catalog = temp.path().join("site").join("catalog.json");
        let base = base.to_str().unwrap();
        let catalog_arg = catalog.to_str().unwrap();
        let global = ["-q", "--base-dir", base, "--catalog", catalog_arg];

        run_with(&global, &["init"]).unwrap();
        run_with(&global, &["add-model", "bert", "a/one", "nlp"]).unwrap();
        run_with(&global, &["add-model", "bert", "b/two", "nlp", "--tags", "qa"]).unwrap();
        run_with(&global, &["remove", "model", "bert"]).unwrap();

        let loaded = CatalogStore::new(&catalog).load().unwrap();
        assert!(loaded.models.is_empty());
        assert!(matches!(
            run_with(&global, &["remove", "model", "bert"]).unwrap_err(),
            SiteBuilderError::EntryNotFound { .. }
        ));
    }
}
