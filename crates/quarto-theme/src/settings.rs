//! Theme configuration loaded from `theme.toml`.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! ```toml
//! format = "version0"
//! url_template = "/themes/%name%"
//! typed_url_template = "/themes/%type%/%name%"
//! docroot = "web"
//! search_paths = ["themes"]
//! active_type = "mobile"
//! descriptor = "acme"
//!
//! [types]
//! mobile = { name = "acme-mobile", path = "themes/mobile/acme" }
//!
//! [namespaces]
//! "Acme" = "vendor/acme/src"
//!
//! [content_type]
//! external_tool = true
//! program = "file"
//! timeout_ms = 2000
//! ```
//!
//! Every key is optional. Relative paths are resolved against the directory
//! holding the configuration file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::content_type::ContentTypeConfig;
use crate::error::{Error, Result};
use crate::factory::DEFAULT_FORMAT;
use crate::path_mapper::{DEFAULT_TYPED_URL_TEMPLATE, DEFAULT_URL_TEMPLATE};
use crate::theme::ThemeDescriptor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeSettings {
    /// Descriptor format, selects the theme factory
    pub format: String,

    /// Public path template for untyped themes
    pub url_template: String,

    /// Public path template for typed themes
    pub typed_url_template: String,

    /// Web document root the path mapper resolves public paths against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docroot: Option<PathBuf>,

    /// Directories searched for `<name>` and `<type>/<name>` theme roots
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub search_paths: Vec<PathBuf>,

    /// The untyped theme
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<ThemeDescriptor>,

    /// Selects the active theme from `types`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_type: Option<String>,

    /// Typed themes, keyed by type
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub types: BTreeMap<String, ThemeDescriptor>,

    /// Namespace prefixes for the legacy namespace locator
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub namespaces: BTreeMap<String, PathBuf>,

    pub content_type: ContentTypeConfig,

    /// Directory relative paths are resolved against (the config file's directory)
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            typed_url_template: DEFAULT_TYPED_URL_TEMPLATE.to_string(),
            docroot: None,
            search_paths: Vec::new(),
            descriptor: None,
            active_type: None,
            types: BTreeMap::new(),
            namespaces: BTreeMap::new(),
            content_type: ContentTypeConfig::default(),
            base_dir: None,
        }
    }
}

impl ThemeSettings {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let base_dir = path.parent().map(Path::to_path_buf);
        debug!(path = %path.display(), "Loading theme settings");
        Self::from_toml_str(&content, base_dir)
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str, base_dir: Option<PathBuf>) -> Result<Self> {
        let mut settings: ThemeSettings =
            toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))?;
        settings.base_dir = base_dir;
        Ok(settings)
    }

    /// Resolve a configured path against the base directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    pub fn resolved_docroot(&self) -> Option<PathBuf> {
        self.docroot.as_deref().map(|p| self.resolve_path(p))
    }

    pub fn resolved_search_paths(&self) -> Vec<PathBuf> {
        self.search_paths
            .iter()
            .map(|p| self.resolve_path(p))
            .collect()
    }

    pub fn resolved_namespaces(&self) -> BTreeMap<String, PathBuf> {
        self.namespaces
            .iter()
            .map(|(prefix, dir)| (prefix.clone(), self.resolve_path(dir)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = ThemeSettings::from_toml_str("", None).unwrap();
        assert_eq!(settings.format, "version0");
        assert_eq!(settings.url_template, "/themes/%name%");
        assert_eq!(settings.typed_url_template, "/themes/%type%/%name%");
        assert!(settings.descriptor.is_none());
        assert!(settings.types.is_empty());
        assert!(settings.content_type.external_tool);
    }

    #[test]
    fn test_full_config() {
        let content = r#"
            format = "version0"
            docroot = "web"
            search_paths = ["themes", "/opt/themes"]
            active_type = "mobile"
            descriptor = "acme"

            [types]
            mobile = { name = "acme-mobile", path = "themes/mobile/acme" }
            desktop = "acme-desktop"

            [namespaces]
            "Acme" = "vendor/acme/src"

            [content_type]
            external_tool = false
            timeout_ms = 250
        "#;
        let settings =
            ThemeSettings::from_toml_str(content, Some(PathBuf::from("/srv/site"))).unwrap();

        assert_eq!(settings.descriptor, Some(ThemeDescriptor::named("acme")));
        assert_eq!(settings.active_type.as_deref(), Some("mobile"));
        assert_eq!(
            settings.types.get("mobile"),
            Some(&ThemeDescriptor::named("acme-mobile").with_path("themes/mobile/acme"))
        );
        assert_eq!(
            settings.types.get("desktop"),
            Some(&ThemeDescriptor::named("acme-desktop"))
        );
        assert_eq!(settings.resolved_docroot(), Some(PathBuf::from("/srv/site/web")));
        assert_eq!(
            settings.resolved_search_paths(),
            vec![PathBuf::from("/srv/site/themes"), PathBuf::from("/opt/themes")]
        );
        assert_eq!(
            settings.resolved_namespaces().get("Acme"),
            Some(&PathBuf::from("/srv/site/vendor/acme/src"))
        );
        assert!(!settings.content_type.external_tool);
        assert_eq!(settings.content_type.program, "file");
        assert_eq!(settings.content_type.timeout_ms, 250);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result = ThemeSettings::from_toml_str("descriptor_param = \"theme.descriptor\"", None);
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_load_uses_file_directory_as_base() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("theme.toml");
        fs::write(&path, "docroot = \"public_html\"\n").unwrap();

        let settings = ThemeSettings::load(&path).unwrap();
        assert_eq!(settings.base_dir.as_deref(), Some(temp.path()));
        assert_eq!(
            settings.resolved_docroot(),
            Some(temp.path().join("public_html"))
        );
    }
}
