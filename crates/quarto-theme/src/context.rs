//! Theme context - the assembled theme services
//!
//! [`ThemeContext::assemble`] builds every service from [`ThemeSettings`] in
//! dependency order, registers the configured themes, resolves the active
//! theme and freezes the registry. The result is shared read-only across
//! request handlers.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::content_type::ContentTypeResolver;
use crate::error::Result;
use crate::factory::ThemeFactory;
use crate::manager::ThemeManager;
use crate::path_locator::{
    CompositePathLocator, FilesystemPathLocator, NamespacePathLocator, PathMapperPathLocator,
    PrefixResourceLocator,
};
use crate::path_mapper::PatternPathMapper;
use crate::provider::{TemplatePaths, ThemeProvider};
use crate::registry::ArrayRegistry;
use crate::resource_url::{ResourceUrlGenerator, RouteUrlGenerator, UrlGenerator};
use crate::settings::ThemeSettings;

/// Where the HTTP server listens.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "127.0.0.1".to_string(),
        }
    }
}

/// Shared theme services.
#[derive(Debug)]
pub struct ThemeContext {
    settings: ThemeSettings,
    path_mapper: Arc<PatternPathMapper>,
    manager: ThemeManager,
    provider: ThemeProvider,
    content_types: ContentTypeResolver,
    resource_urls: ResourceUrlGenerator,
}

impl ThemeContext {
    /// Assemble the services and run boot-time registration.
    ///
    /// This:
    /// 1. Selects the theme factory for the configured format
    /// 2. Builds the path mapper and the locator chain (path mapper,
    ///    filesystem, and the namespace locator when namespaces are configured)
    /// 3. Registers every typed descriptor, then the untyped descriptor
    /// 4. Resolves the active theme
    /// 5. Freezes the registry
    pub fn assemble(settings: ThemeSettings) -> Result<Self> {
        Self::assemble_with_url_generator(settings, Arc::new(RouteUrlGenerator::default()))
    }

    /// Like [`ThemeContext::assemble`], with a host-provided URL generator.
    pub fn assemble_with_url_generator(
        settings: ThemeSettings,
        url_generator: Arc<dyn UrlGenerator>,
    ) -> Result<Self> {
        let theme_factory: ThemeFactory = settings.format.parse()?;

        let path_mapper = Arc::new(
            PatternPathMapper::new(settings.resolved_docroot())
                .with_url_template(settings.url_template.clone())
                .with_typed_url_template(settings.typed_url_template.clone()),
        );

        let mut path_locator = CompositePathLocator::new(vec![
            Box::new(PathMapperPathLocator::new(path_mapper.clone())),
            Box::new(FilesystemPathLocator::new(
                settings.base_dir.clone(),
                settings.resolved_search_paths(),
            )),
        ]);
        if !settings.namespaces.is_empty() {
            path_locator.add_path_locator(Box::new(NamespacePathLocator::new(Box::new(
                PrefixResourceLocator::new(settings.resolved_namespaces()),
            ))));
        }

        let mut manager = ThemeManager::new(ArrayRegistry::new(), path_locator, theme_factory);

        for (theme_type, descriptor) in &settings.types {
            manager.register_theme(descriptor, Some(theme_type))?;
        }
        if let Some(descriptor) = &settings.descriptor {
            manager.register_theme(descriptor, None)?;
        }

        let provider = if settings.descriptor.is_some() || settings.active_type.is_some() {
            ThemeProvider::from_settings(&settings, &mut manager)?
        } else {
            warn!("No active theme configured; only explicitly addressed themes are served");
            ThemeProvider::none()
        };

        manager.freeze();

        let content_types = ContentTypeResolver::new(settings.content_type.clone());
        let resource_urls = ResourceUrlGenerator::new(provider.clone(), url_generator);

        info!(
            format = %theme_factory,
            registered = manager.registry().len(),
            active = ?provider.provide_theme().map(|t| t.key()),
            "Theme services assembled"
        );

        Ok(Self {
            settings,
            path_mapper,
            manager,
            provider,
            content_types,
            resource_urls,
        })
    }

    pub fn settings(&self) -> &ThemeSettings {
        &self.settings
    }

    pub fn path_mapper(&self) -> &PatternPathMapper {
        &self.path_mapper
    }

    pub fn manager(&self) -> &ThemeManager {
        &self.manager
    }

    pub fn provider(&self) -> &ThemeProvider {
        &self.provider
    }

    pub fn content_types(&self) -> &ContentTypeResolver {
        &self.content_types
    }

    pub fn resource_urls(&self) -> &ResourceUrlGenerator {
        &self.resource_urls
    }

    /// Template search paths with the active theme's templates appended.
    pub fn template_paths(&self, base: Vec<PathBuf>) -> Result<TemplatePaths> {
        let mut paths = TemplatePaths::new(base);
        paths.augment(&self.provider)?;
        Ok(paths)
    }
}

/// Type alias for the shared context used in axum handlers.
pub type SharedContext = Arc<ThemeContext>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::registry::Registry;
    use crate::theme::ThemeDescriptor;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_assemble_registers_typed_and_untyped_themes() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("web/themes/acme")).unwrap();
        fs::create_dir_all(temp.path().join("web/themes/mobile/acme")).unwrap();

        let mut settings = ThemeSettings {
            docroot: Some(PathBuf::from("web")),
            descriptor: Some(ThemeDescriptor::named("acme")),
            base_dir: Some(temp.path().to_path_buf()),
            ..ThemeSettings::default()
        };
        settings
            .types
            .insert("mobile".to_string(), ThemeDescriptor::named("acme"));

        let ctx = ThemeContext::assemble(settings).unwrap();
        let manager = ctx.manager();
        assert_eq!(manager.registry().len(), 2);
        assert_eq!(
            manager.find_theme_by_name("acme", Some("mobile")).unwrap().root_path(),
            temp.path().join("web/themes/mobile/acme")
        );

        let active = ctx.provider().provide_theme().unwrap();
        assert_eq!(active.theme_type(), None);
        assert!(manager.registry().is_frozen());
    }

    #[test]
    fn test_docroot_mapping_takes_precedence_over_path_hint() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("web/themes/acme")).unwrap();
        fs::create_dir_all(temp.path().join("vendor/acme")).unwrap();

        // The path mapper locator comes first, so the docroot location wins
        // over the descriptor hint handled by the filesystem locator.
        let settings = ThemeSettings {
            docroot: Some(PathBuf::from("web")),
            descriptor: Some(ThemeDescriptor::named("acme").with_path("vendor/acme")),
            base_dir: Some(temp.path().to_path_buf()),
            ..ThemeSettings::default()
        };

        let ctx = ThemeContext::assemble(settings).unwrap();
        assert_eq!(
            ctx.provider().provide_theme().unwrap().root_path(),
            temp.path().join("web/themes/acme")
        );
    }

    #[test]
    fn test_namespace_locator_is_last_resort() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("vendor/Acme/Theme")).unwrap();

        let mut settings = ThemeSettings {
            descriptor: Some(ThemeDescriptor::named("acme").with_namespace("Acme\\Theme")),
            base_dir: Some(temp.path().to_path_buf()),
            ..ThemeSettings::default()
        };
        settings
            .namespaces
            .insert("Acme".to_string(), PathBuf::from("vendor"));

        let ctx = ThemeContext::assemble(settings).unwrap();
        assert_eq!(
            ctx.provider().provide_theme().unwrap().root_path(),
            temp.path().join("vendor/Acme/Theme")
        );
    }

    #[test]
    fn test_unsupported_format_aborts_assembly() {
        let settings = ThemeSettings {
            format: "version7".to_string(),
            ..ThemeSettings::default()
        };
        assert!(matches!(
            ThemeContext::assemble(settings),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_unlocatable_theme_aborts_assembly() {
        let temp = TempDir::new().unwrap();
        let settings = ThemeSettings {
            descriptor: Some(ThemeDescriptor::named("ghost")),
            base_dir: Some(temp.path().to_path_buf()),
            ..ThemeSettings::default()
        };
        assert!(matches!(
            ThemeContext::assemble(settings),
            Err(Error::ThemeNotFound { .. })
        ));
    }

    #[test]
    fn test_no_theme_configured() {
        let ctx = ThemeContext::assemble(ThemeSettings::default()).unwrap();
        assert!(ctx.provider().provide_theme().is_none());
        assert_eq!(ctx.resource_urls().resource_url("style.css").unwrap(), None);

        let paths = ctx.template_paths(vec![PathBuf::from("/app")]).unwrap();
        assert_eq!(paths.paths(), &[PathBuf::from("/app")]);
    }

    #[test]
    fn test_template_paths_for_active_theme() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("themes/acme/templates")).unwrap();

        let settings = ThemeSettings {
            search_paths: vec![PathBuf::from("themes")],
            descriptor: Some(ThemeDescriptor::named("acme")),
            base_dir: Some(temp.path().to_path_buf()),
            ..ThemeSettings::default()
        };

        let ctx = ThemeContext::assemble(settings).unwrap();
        let paths = ctx.template_paths(Vec::new()).unwrap();
        assert_eq!(paths.paths(), &[temp.path().join("themes/acme/templates")]);
        assert_eq!(
            ctx.resource_urls().resource_url("style.css").unwrap().as_deref(),
            Some("/_theme/acme/resources/style.css")
        );
    }
}
