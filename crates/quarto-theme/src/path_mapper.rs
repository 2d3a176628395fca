//! Template-based mapping from theme identity to public and filesystem paths.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Two templates are configured: one for untyped themes (`/themes/%name%`) and
//! one for typed themes (`/themes/%type%/%name%`). The mapper substitutes the
//! theme's name and type into the right template and builds resource paths
//! underneath it.

use std::path::PathBuf;

use crate::error::{Error, Result};

pub const NAME_PLACEHOLDER: &str = "%name%";
pub const TYPE_PLACEHOLDER: &str = "%type%";

pub const DEFAULT_URL_TEMPLATE: &str = "/themes/%name%";
pub const DEFAULT_TYPED_URL_TEMPLATE: &str = "/themes/%type%/%name%";

/// Anything the mapper can place: registered themes and themes still being located.
pub trait ThemeIdentity {
    fn name(&self) -> &str;
    fn theme_type(&self) -> Option<&str>;
}

impl ThemeIdentity for crate::theme::Theme {
    fn name(&self) -> &str {
        crate::theme::Theme::name(self)
    }

    fn theme_type(&self) -> Option<&str> {
        crate::theme::Theme::theme_type(self)
    }
}

impl ThemeIdentity for crate::theme::UnresolvedTheme {
    fn name(&self) -> &str {
        crate::theme::UnresolvedTheme::name(self)
    }

    fn theme_type(&self) -> Option<&str> {
        crate::theme::UnresolvedTheme::theme_type(self)
    }
}

/// Maps themes onto paths by placeholder substitution.
#[derive(Debug, Clone)]
pub struct PatternPathMapper {
    docroot: Option<PathBuf>,
    url_template: String,
    typed_url_template: String,
}

impl Default for PatternPathMapper {
    fn default() -> Self {
        Self::new(None)
    }
}

impl PatternPathMapper {
    /// Create a mapper with the default templates.
    ///
    /// `docroot` is only needed for the filesystem variants.
    pub fn new(docroot: Option<PathBuf>) -> Self {
        Self {
            docroot,
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            typed_url_template: DEFAULT_TYPED_URL_TEMPLATE.to_string(),
        }
    }

    pub fn with_url_template(mut self, template: impl Into<String>) -> Self {
        self.url_template = template.into();
        self
    }

    pub fn with_typed_url_template(mut self, template: impl Into<String>) -> Self {
        self.typed_url_template = template.into();
        self
    }

    pub fn docroot(&self) -> Option<&std::path::Path> {
        self.docroot.as_deref()
    }

    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    pub fn typed_url_template(&self) -> &str {
        &self.typed_url_template
    }

    /// Public path of the theme itself, e.g. `/themes/mobile/acme`.
    pub fn generate_public_path(&self, theme: &impl ThemeIdentity) -> Result<String> {
        match theme.theme_type() {
            Some(theme_type) => {
                let template = &self.typed_url_template;
                require_placeholder(template, NAME_PLACEHOLDER, "typed_url_template")?;
                require_placeholder(template, TYPE_PLACEHOLDER, "typed_url_template")?;
                Ok(template
                    .replace(TYPE_PLACEHOLDER, theme_type)
                    .replace(NAME_PLACEHOLDER, theme.name()))
            }
            None => {
                let template = &self.url_template;
                require_placeholder(template, NAME_PLACEHOLDER, "url_template")?;
                Ok(template.replace(NAME_PLACEHOLDER, theme.name()))
            }
        }
    }

    /// Public path of a theme resource, e.g. `/themes/acme/resources/style.css`.
    pub fn resolve_public_path(
        &self,
        theme: &impl ThemeIdentity,
        resource_name: &str,
    ) -> Result<String> {
        let base = self.generate_public_path(theme)?;
        Ok(format!(
            "{}/resources/{}",
            base.trim_end_matches('/'),
            resource_name.trim_start_matches('/')
        ))
    }

    /// Theme root under the docroot, e.g. `<docroot>/themes/acme`.
    pub fn generate_filesystem_root(&self, theme: &impl ThemeIdentity) -> Result<PathBuf> {
        let docroot = self.docroot.as_ref().ok_or_else(|| {
            Error::Configuration(
                "no docroot configured; cannot map themes onto the filesystem".to_string(),
            )
        })?;
        let public_path = self.generate_public_path(theme)?;
        Ok(docroot.join(public_path.trim_start_matches('/')))
    }

    /// Filesystem path of a public resource under the docroot,
    /// e.g. `<docroot>/themes/acme/public/style.css`.
    ///
    /// For hosts that serve the docroot themselves. The resource routes serve
    /// from the located theme root instead (see
    /// [`Theme::public_resource_path`](crate::Theme::public_resource_path)),
    /// which also covers themes found outside the docroot.
    pub fn resolve_filesystem_path(
        &self,
        theme: &impl ThemeIdentity,
        resource_name: &str,
    ) -> Result<PathBuf> {
        Ok(self
            .generate_filesystem_root(theme)?
            .join("public")
            .join(resource_name.trim_start_matches('/')))
    }
}

fn require_placeholder(template: &str, placeholder: &str, setting: &str) -> Result<()> {
    if template.contains(placeholder) {
        Ok(())
    } else {
        Err(Error::Configuration(format!(
            "{} '{}' is missing the {} placeholder",
            setting, template, placeholder
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    fn untyped() -> Theme {
        Theme::new("acme", None, PathBuf::from("/unused"))
    }

    fn typed() -> Theme {
        Theme::new("acme", Some("mobile"), PathBuf::from("/unused"))
    }

    #[test]
    fn test_generate_public_path_defaults() {
        let mapper = PatternPathMapper::default();
        assert_eq!(mapper.generate_public_path(&untyped()).unwrap(), "/themes/acme");
        assert_eq!(
            mapper.generate_public_path(&typed()).unwrap(),
            "/themes/mobile/acme"
        );
    }

    #[test]
    fn test_resolve_public_path() {
        let mapper = PatternPathMapper::default();
        assert_eq!(
            mapper.resolve_public_path(&untyped(), "css/style.css").unwrap(),
            "/themes/acme/resources/css/style.css"
        );
        assert_eq!(
            mapper.resolve_public_path(&typed(), "logo.png").unwrap(),
            "/themes/mobile/acme/resources/logo.png"
        );
    }

    #[test]
    fn test_resolve_public_path_is_deterministic() {
        let mapper = PatternPathMapper::default().with_url_template("/t/%name%/");
        let first = mapper.resolve_public_path(&untyped(), "a.css").unwrap();
        let second = mapper.resolve_public_path(&untyped(), "a.css").unwrap();
        assert_eq!(first, second);
        assert_eq!(first, "/t/acme/resources/a.css");
    }

    #[test]
    fn test_custom_templates() {
        let mapper = PatternPathMapper::default()
            .with_url_template("/assets/%name%")
            .with_typed_url_template("/assets/%name%-%type%");
        assert_eq!(mapper.generate_public_path(&untyped()).unwrap(), "/assets/acme");
        assert_eq!(
            mapper.generate_public_path(&typed()).unwrap(),
            "/assets/acme-mobile"
        );
    }

    #[test]
    fn test_typed_template_requires_type_placeholder() {
        let mapper = PatternPathMapper::default().with_typed_url_template("/themes/%name%");
        let err = mapper.generate_public_path(&typed()).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("%type%"));

        // Untyped themes never look at the typed template
        assert!(mapper.generate_public_path(&untyped()).is_ok());
    }

    #[test]
    fn test_untyped_template_requires_name_placeholder() {
        let mapper = PatternPathMapper::default().with_url_template("/themes");
        assert!(matches!(
            mapper.generate_public_path(&untyped()),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_filesystem_paths() {
        let mapper = PatternPathMapper::new(Some(PathBuf::from("/var/www")));
        assert_eq!(
            mapper.generate_filesystem_root(&typed()).unwrap(),
            PathBuf::from("/var/www/themes/mobile/acme")
        );
        assert_eq!(
            mapper.resolve_filesystem_path(&untyped(), "style.css").unwrap(),
            PathBuf::from("/var/www/themes/acme/public/style.css")
        );
    }

    #[test]
    fn test_filesystem_paths_require_docroot() {
        let mapper = PatternPathMapper::default();
        assert!(matches!(
            mapper.resolve_filesystem_path(&untyped(), "style.css"),
            Err(Error::Configuration(_))
        ));
    }
}
