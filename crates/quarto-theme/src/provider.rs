//! The active theme, and the template search paths it contributes.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::manager::ThemeManager;
use crate::settings::ThemeSettings;
use crate::theme::Theme;

/// Provides the theme in effect for the application.
#[derive(Debug, Clone, Default)]
pub struct ThemeProvider {
    theme: Option<Arc<Theme>>,
}

impl ThemeProvider {
    pub fn new(theme: Arc<Theme>) -> Self {
        Self { theme: Some(theme) }
    }

    /// A provider with no active theme.
    pub fn none() -> Self {
        Self::default()
    }

    /// Determine and register the active theme from settings.
    ///
    /// When `active_type` is set, the descriptor configured for that type is
    /// used. Otherwise the untyped `descriptor` is used. With neither, the
    /// theme cannot be determined and this is a configuration error.
    pub fn from_settings(settings: &ThemeSettings, manager: &mut ThemeManager) -> Result<Self> {
        let (descriptor, theme_type) = match settings.active_type.as_deref() {
            Some(theme_type) if !theme_type.is_empty() => {
                let descriptor = settings.types.get(theme_type).ok_or_else(|| {
                    Error::Configuration(format!(
                        "could not determine theme; no descriptor configured for type '{}' (looked in [types.{}])",
                        theme_type, theme_type
                    ))
                })?;
                (descriptor, Some(theme_type))
            }
            _ => match &settings.descriptor {
                Some(descriptor) => (descriptor, None),
                None => {
                    return Err(Error::Configuration(
                        "could not determine theme; looked for 'active_type' and 'descriptor'"
                            .to_string(),
                    ));
                }
            },
        };

        let theme = manager.register_theme(descriptor, theme_type)?;
        Ok(Self::new(theme))
    }

    pub fn provide_theme(&self) -> Option<&Arc<Theme>> {
        self.theme.as_ref()
    }
}

/// Ordered template search paths handed to the template engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplatePaths {
    paths: Vec<PathBuf>,
}

impl TemplatePaths {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Append the active theme's `templates` directory.
    ///
    /// A provider without a theme leaves the paths untouched. A theme without
    /// a `templates` directory is a [`Error::Filesystem`] error naming the
    /// expected location.
    pub fn augment(&mut self, provider: &ThemeProvider) -> Result<()> {
        let Some(theme) = provider.provide_theme() else {
            return Ok(());
        };

        let template_path = theme.templates_dir();
        if !template_path.is_dir() {
            return Err(Error::Filesystem {
                message: "Theme is missing its template directory".to_string(),
                path: template_path,
            });
        }

        debug!(path = %template_path.display(), "Adding theme template path");
        self.paths.push(template_path);
        Ok(())
    }
}
