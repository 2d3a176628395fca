//! Theme manager - registration and lookup
//!
//! Ties together the factory (descriptor to theme), the path locator (theme
//! to root directory) and the registry (storage).

use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::factory::ThemeFactory;
use crate::path_locator::CompositePathLocator;
use crate::registry::{ArrayRegistry, Registry};
use crate::theme::{Theme, ThemeDescriptor};

#[derive(Debug)]
pub struct ThemeManager {
    registry: ArrayRegistry,
    path_locator: CompositePathLocator,
    theme_factory: ThemeFactory,
}

impl ThemeManager {
    pub fn new(
        registry: ArrayRegistry,
        path_locator: CompositePathLocator,
        theme_factory: ThemeFactory,
    ) -> Self {
        Self {
            registry,
            path_locator,
            theme_factory,
        }
    }

    /// Build, locate and register a theme.
    ///
    /// Fails with [`Error::ThemeNotFound`](crate::Error::ThemeNotFound) when no
    /// locator can place the theme, and with
    /// [`Error::IllegalState`](crate::Error::IllegalState) once the manager is frozen.
    pub fn register_theme(
        &mut self,
        descriptor: &ThemeDescriptor,
        theme_type: Option<&str>,
    ) -> Result<Arc<Theme>> {
        let unresolved = self.theme_factory.create(descriptor, theme_type)?;
        let root = self.path_locator.locate_or_fail(&unresolved)?;
        let theme = Arc::new(unresolved.resolve(root));

        self.registry.register(theme.clone())?;

        info!(
            name = theme.name(),
            theme_type = theme.theme_type(),
            root = %theme.root_path().display(),
            "Registered theme"
        );

        Ok(theme)
    }

    pub fn find_theme_by_name(&self, name: &str, theme_type: Option<&str>) -> Result<Arc<Theme>> {
        self.registry.find(name, theme_type)
    }

    /// Reject any further registration. Called once boot is complete.
    pub fn freeze(&mut self) {
        self.registry.freeze();
    }

    pub fn registry(&self) -> &ArrayRegistry {
        &self.registry
    }
}
