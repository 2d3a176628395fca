//! In-memory theme registry
//!
//! Themes are registered while the application boots and looked up while it
//! serves requests. Once the registry is frozen, further registration is
//! rejected with [`Error::IllegalState`].

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::theme::{Theme, ThemeKey};

/// Storage for registered themes, keyed by name and optional type.
pub trait Registry: Send + Sync {
    /// Store a theme, replacing any theme registered under the same key.
    fn register(&mut self, theme: Arc<Theme>) -> Result<()>;

    /// Find the theme registered under `(name, theme_type)`.
    fn find(&self, name: &str, theme_type: Option<&str>) -> Result<Arc<Theme>>;

    /// Stop accepting registrations.
    fn freeze(&mut self);

    fn is_frozen(&self) -> bool;
}

/// [`Registry`] backed by an ordered map.
#[derive(Debug, Default)]
pub struct ArrayRegistry {
    themes: BTreeMap<ThemeKey, Arc<Theme>>,
    frozen: bool,
}

impl ArrayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Registered themes in key order.
    pub fn themes(&self) -> impl Iterator<Item = &Arc<Theme>> {
        self.themes.values()
    }
}

impl Registry for ArrayRegistry {
    fn register(&mut self, theme: Arc<Theme>) -> Result<()> {
        if self.frozen {
            return Err(Error::IllegalState(format!(
                "cannot register theme '{}' after the registry was frozen",
                theme.key()
            )));
        }

        let key = theme.key();
        if let Some(previous) = self.themes.insert(key.clone(), theme) {
            debug!(%key, previous_root = %previous.root_path().display(), "Replaced registered theme");
        }
        Ok(())
    }

    fn find(&self, name: &str, theme_type: Option<&str>) -> Result<Arc<Theme>> {
        self.themes
            .get(&ThemeKey::new(name, theme_type))
            .cloned()
            .ok_or_else(|| Error::theme_not_found(name, theme_type))
    }

    fn freeze(&mut self) {
        self.frozen = true;
    }

    fn is_frozen(&self) -> bool {
        self.frozen
    }
}
