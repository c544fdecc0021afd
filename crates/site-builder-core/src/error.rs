use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteBuilderError {
    #[error("Catalog not found: {path}")]
    CatalogNotFound { path: PathBuf },

    #[error("{kind} not found: {name}")]
    EntryNotFound { kind: String, name: String },

    #[error("Malformed catalog {path}: {message}")]
    MalformedData { path: PathBuf, message: String },

    #[error("Category id already exists: {id}")]
    DuplicateId { id: String },

    #[error("Catalog already exists: {path}")]
    AlreadyExists { path: PathBuf },

    #[error("Catalog was modified by another writer since it was loaded: {path}")]
    Conflict { path: PathBuf },

    #[error("Catalog validation failed with {count} error(s)")]
    Invalid { count: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Home directory not found")]
    HomeNotFound,

    #[error("GUI error: {0}")]
    Gui(String),
}

pub type Result<T> = std::result::Result<T, SiteBuilderError>;

impl SiteBuilderError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CatalogNotFound { .. } | Self::EntryNotFound { .. } => 2,
            Self::MalformedData { .. } => 3,
            Self::DuplicateId { .. } | Self::AlreadyExists { .. } => 4,
            Self::Conflict { .. } => 6,
            Self::Invalid { .. } => 7,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_errors_share_exit_code() {
        let store = SiteBuilderError::CatalogNotFound {
            path: PathBuf::from("config.json"),
        };
        let entry = SiteBuilderError::EntryNotFound {
            kind: "Model".to_string(),
            name: "bert".to_string(),
        };
        assert_eq!(store.exit_code(), 2);
        assert_eq!(entry.exit_code(), 2);
        assert_eq!(entry.to_string(), "Model not found: bert");
    }

    #[test]
    fn io_errors_fall_back_to_generic_code() {
        let err: SiteBuilderError = std::io::Error::other("disk full").into();
        assert_eq!(err.exit_code(), 1);
    }
}
