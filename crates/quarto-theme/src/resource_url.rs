//! URL generation for theme resources.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! [`ResourceUrlGenerator`] answers "where can a browser fetch resource X of
//! the active theme?" by asking a [`UrlGenerator`] for one of the two resource
//! routes. Hosts with their own router implement [`UrlGenerator`];
//! [`RouteUrlGenerator`] knows the routes this crate serves.

use std::collections::BTreeMap;
use std::sync::Arc;

use url::Url;

use crate::error::{Error, Result};
use crate::provider::ThemeProvider;
use crate::theme::Theme;

pub const THEME_ROUTE: &str = "_theme";
pub const TYPED_THEME_ROUTE: &str = "_theme_typed";

pub const THEME_ROUTE_PATTERN: &str = "/_theme/{name}/resources/{resource}";
pub const TYPED_THEME_ROUTE_PATTERN: &str = "/_theme_typed/{type}/{name}/resources/{resource}";

/// Parameter whose value may span several path segments.
const MULTI_SEGMENT_PARAM: &str = "resource";

/// Host URL generation: route name plus parameters to URL.
pub trait UrlGenerator: Send + Sync + std::fmt::Debug {
    fn generate(&self, route: &str, params: &[(&str, &str)]) -> Result<String>;
}

/// [`UrlGenerator`] over a table of named route patterns.
///
/// Patterns use `{param}` placeholders, one per path segment. Values are
/// percent-encoded; the `resource` parameter keeps its `/` separators. Without
/// a base URL, generated URLs are absolute paths.
#[derive(Debug, Clone)]
pub struct RouteUrlGenerator {
    routes: BTreeMap<String, String>,
    base_url: Option<Url>,
}

impl Default for RouteUrlGenerator {
    fn default() -> Self {
        let mut routes = BTreeMap::new();
        routes.insert(THEME_ROUTE.to_string(), THEME_ROUTE_PATTERN.to_string());
        routes.insert(
            TYPED_THEME_ROUTE.to_string(),
            TYPED_THEME_ROUTE_PATTERN.to_string(),
        );
        Self {
            routes,
            base_url: None,
        }
    }
}

impl RouteUrlGenerator {
    /// Generate absolute URLs under `base_url` instead of bare paths.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url)
            .map_err(|e| Error::Configuration(format!("invalid base URL '{}': {}", base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(Error::Configuration(format!(
                "base URL '{}' cannot carry a path",
                base_url
            )));
        }
        self.base_url = Some(url);
        Ok(self)
    }

    pub fn add_route(&mut self, name: impl Into<String>, pattern: impl Into<String>) {
        self.routes.insert(name.into(), pattern.into());
    }
}

impl UrlGenerator for RouteUrlGenerator {
    fn generate(&self, route: &str, params: &[(&str, &str)]) -> Result<String> {
        let pattern = self
            .routes
            .get(route)
            .ok_or_else(|| Error::Configuration(format!("unknown route '{}'", route)))?;

        let mut url = match &self.base_url {
            Some(base) => base.clone(),
            None => Url::parse("http://localhost/")
                .map_err(|e| Error::Configuration(format!("invalid placeholder base URL: {}", e)))?,
        };

        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                Error::Configuration("base URL cannot carry a path".to_string())
            })?;
            segments.pop_if_empty();

            for part in pattern.split('/').filter(|p| !p.is_empty()) {
                let Some(param) = part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) else {
                    segments.push(part);
                    continue;
                };

                let value = params
                    .iter()
                    .find(|(key, _)| *key == param)
                    .map(|(_, value)| *value)
                    .ok_or_else(|| {
                        Error::Configuration(format!(
                            "route '{}' is missing parameter '{}'",
                            route, param
                        ))
                    })?;

                if param == MULTI_SEGMENT_PARAM {
                    segments.extend(value.split('/').filter(|s| !s.is_empty()));
                } else {
                    segments.push(value);
                }
            }
        }

        Ok(match self.base_url {
            Some(_) => url.to_string(),
            None => url.path().to_string(),
        })
    }
}

/// Public URLs for the resources of the active theme.
#[derive(Debug, Clone)]
pub struct ResourceUrlGenerator {
    provider: ThemeProvider,
    url_generator: Arc<dyn UrlGenerator>,
}

impl ResourceUrlGenerator {
    pub fn new(provider: ThemeProvider, url_generator: Arc<dyn UrlGenerator>) -> Self {
        Self {
            provider,
            url_generator,
        }
    }

    /// URL of `resource` in the active theme, or `None` without an active theme.
    pub fn resource_url(&self, resource: &str) -> Result<Option<String>> {
        self.provider
            .provide_theme()
            .map(|theme| self.theme_resource_url(theme, resource))
            .transpose()
    }

    /// URL of `resource` in a specific theme.
    pub fn theme_resource_url(&self, theme: &Theme, resource: &str) -> Result<String> {
        match theme.theme_type() {
            Some(theme_type) => self.url_generator.generate(
                TYPED_THEME_ROUTE,
                &[
                    ("type", theme_type),
                    ("name", theme.name()),
                    ("resource", resource),
                ],
            ),
            None => self.url_generator.generate(
                THEME_ROUTE,
                &[("name", theme.name()), ("resource", resource)],
            ),
        }
    }
}
