use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use site_builder_core::catalog::{ItemKind, RemoveKind};

#[derive(Parser)]
#[command(name = "site-builder")]
#[command(about = "Manage the models and datasets shown on your Hugging Face Space")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base directory for config.toml (default: ~/.site-builder)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Catalog file (default: catalog.path from config, then ./config.json)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Launch the desktop editor (requires the gui feature)
    #[arg(long)]
    pub gui: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EntryType {
    Model,
    Dataset,
    Category,
}

impl From<EntryType> for RemoveKind {
    fn from(value: EntryType) -> Self {
        match value {
            EntryType::Model => RemoveKind::Model,
            EntryType::Dataset => RemoveKind::Dataset,
            EntryType::Category => RemoveKind::Category,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindFilter {
    Model,
    Dataset,
}

impl From<KindFilter> for ItemKind {
    fn from(value: KindFilter) -> Self {
        match value {
            KindFilter::Model => ItemKind::Model,
            KindFilter::Dataset => ItemKind::Dataset,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a starter catalog file
    Init {
        /// Overwrite an existing catalog
        #[arg(short, long)]
        force: bool,
    },

    /// Update site information (only the given fields change)
    Site {
        /// Site title
        #[arg(long)]
        title: Option<String>,

        /// Site description
        #[arg(long)]
        description: Option<String>,

        /// Author name
        #[arg(long)]
        author: Option<String>,

        /// Theme color (hex)
        #[arg(long)]
        theme_color: Option<String>,

        /// GitHub profile URL (empty string removes it)
        #[arg(long)]
        github: Option<String>,

        /// Twitter profile URL (empty string removes it)
        #[arg(long)]
        twitter: Option<String>,

        /// LinkedIn profile URL (empty string removes it)
        #[arg(long)]
        linkedin: Option<String>,

        /// Any other social link as PLATFORM=URL (repeatable)
        #[arg(long, value_name = "PLATFORM=URL", value_parser = parse_social)]
        social: Vec<(String, String)>,
    },

    /// Add a new category
    AddCategory {
        /// Category ID (e.g., nlp)
        id: String,

        /// Category name
        name: String,

        /// Category icon (emoji)
        #[arg(long)]
        icon: Option<String>,

        /// Category description
        #[arg(long)]
        description: Option<String>,
    },

    /// Add a new model
    AddModel {
        /// Model name
        name: String,

        /// Hugging Face repo (username/repo-name)
        repo: String,

        /// Category ID
        category: String,

        /// Model description
        #[arg(long)]
        description: Option<String>,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,

        /// Demo URL
        #[arg(long)]
        demo_url: Option<String>,

        /// Paper URL
        #[arg(long)]
        paper_url: Option<String>,
    },

    /// Add a new dataset
    AddDataset {
        /// Dataset name
        name: String,

        /// Hugging Face repo (username/repo-name)
        repo: String,

        /// Category ID
        category: String,

        /// Dataset description
        #[arg(long)]
        description: Option<String>,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,

        /// Dataset size (e.g., 100K samples)
        #[arg(long)]
        size: Option<String>,
    },

    /// List site info, categories, models and datasets
    List,

    /// Remove models/datasets by name or a category by ID
    Remove {
        /// Entry type
        #[arg(value_enum)]
        kind: EntryType,

        /// Item name or category ID
        name: String,
    },

    /// Check the catalog for missing sections and dangling category IDs
    Validate,

    /// Print the view model as JSON
    View {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Render the catalog to a static HTML page
    Render {
        /// Output file (default: render.output from config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args, Debug, Default)]
pub struct FilterArgs {
    /// Only show this category
    #[arg(long)]
    pub category: Option<String>,

    /// Only show items with this tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Only show models or datasets
    #[arg(long, value_enum)]
    pub kind: Option<KindFilter>,

    /// Only show items whose name or description contains this text
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., catalog.path)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., catalog.path)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Create config file with commented defaults
    Init,
}

fn parse_social(raw: &str) -> Result<(String, String), String> {
    let (platform, url) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected PLATFORM=URL, got '{raw}'"))?;
    let platform = platform.trim();
    if platform.is_empty() {
        return Err("platform name must not be empty".to_string());
    }
    Ok((platform.to_lowercase(), url.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_social_splits_on_first_equals() {
        assert_eq!(
            parse_social("Mastodon=https://x.social/@a?b=c").unwrap(),
            ("mastodon".to_string(), "https://x.social/@a?b=c".to_string())
        );
        assert_eq!(
            parse_social("github=").unwrap(),
            ("github".to_string(), String::new())
        );
        assert!(parse_social("github").is_err());
        assert!(parse_social("=https://a").is_err());
    }

    #[test]
    fn remove_parses_entry_type() {
        let cli = Cli::try_parse_from(["site-builder", "remove", "dataset", "squad"]).unwrap();
        match cli.command {
            Some(Commands::Remove { kind, name }) => {
                assert_eq!(kind, EntryType::Dataset);
                assert_eq!(name, "squad");
            }
            _ => panic!("expected remove command"),
        }
    }

    #[test]
    fn add_model_accepts_optional_flags() {
        let cli = Cli::try_parse_from([
            "site-builder",
            "--catalog",
            "site.json",
            "add-model",
            "bert",
            "google/bert",
            "nlp",
            "--tags",
            "encoder, qa",
            "--paper-url",
            "https://arxiv.org/abs/1810.04805",
        ])
        .unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("site.json")));
        match cli.command {
            Some(Commands::AddModel { tags, demo_url, .. }) => {
                assert_eq!(tags.as_deref(), Some("encoder, qa"));
                assert!(demo_url.is_none());
            }
            _ => panic!("expected add-model command"),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
