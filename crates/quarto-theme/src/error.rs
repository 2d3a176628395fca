//! Error types for quarto-theme

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Theme configuration error: {0}")]
    Configuration(String),

    #[error("Unsupported theme format '{0}' (supported formats: version0)")]
    UnsupportedFormat(String),

    #[error("Theme not found: {}", describe_theme(.name, .theme_type.as_deref()))]
    ThemeNotFound {
        name: String,
        theme_type: Option<String>,
    },

    #[error("The resource was not found: {0}")]
    ResourceNotFound(String),

    #[error("{message}; expected to find it at '{}'", .path.display())]
    Filesystem { message: String, path: PathBuf },

    #[error("Illegal state: {0}")]
    IllegalState(String),

    #[error("Failed to parse theme config: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(String),
}

impl Error {
    pub(crate) fn theme_not_found(name: &str, theme_type: Option<&str>) -> Self {
        Error::ThemeNotFound {
            name: name.to_string(),
            theme_type: theme_type.map(str::to_string),
        }
    }

    /// Whether this error should surface as a 404 at the HTTP boundary.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::ThemeNotFound { .. } | Error::ResourceNotFound(_)
        )
    }
}

fn describe_theme(name: &str, theme_type: Option<&str>) -> String {
    match theme_type {
        Some(t) => format!("'{}' (type '{}')", name, t),
        None => format!("'{}'", name),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
