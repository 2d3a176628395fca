//! Legacy namespace-to-directory resolution
//!
//! Older theme packages identify themselves by a code namespace such as
//! `Acme\Theme\Dark` instead of a path. A [`NamespaceResourceLocator`] maps
//! such a namespace onto a directory the same way a prefix-based autoloader
//! would: the matching prefix picks a base directory and the full namespace
//! becomes the relative path underneath it.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::PathLocator;
use crate::error::Result;
use crate::theme::UnresolvedTheme;

/// Host-provided lookup from a namespace to a directory.
pub trait NamespaceResourceLocator: Send + Sync + std::fmt::Debug {
    /// The first existing directory for `namespace`, if any.
    fn find_first_directory(&self, namespace: &str) -> Option<PathBuf>;
}

/// [`NamespaceResourceLocator`] over a table of namespace prefixes.
///
/// Longer prefixes are tried before shorter ones.
#[derive(Debug, Clone, Default)]
pub struct PrefixResourceLocator {
    prefixes: BTreeMap<String, PathBuf>,
}

impl PrefixResourceLocator {
    pub fn new(prefixes: BTreeMap<String, PathBuf>) -> Self {
        Self { prefixes }
    }

    pub fn add_prefix(&mut self, prefix: impl Into<String>, dir: impl Into<PathBuf>) {
        self.prefixes.insert(prefix.into(), dir.into());
    }
}

/// Split a namespace on `\`, `::` and `.` separators.
fn namespace_segments(namespace: &str) -> Vec<&str> {
    namespace
        .split(['\\', '.', ':'])
        .filter(|segment| !segment.is_empty())
        .collect()
}

impl NamespaceResourceLocator for PrefixResourceLocator {
    fn find_first_directory(&self, namespace: &str) -> Option<PathBuf> {
        let segments = namespace_segments(namespace);
        if segments.is_empty() {
            return None;
        }

        let mut matches: Vec<(usize, &PathBuf)> = self
            .prefixes
            .iter()
            .filter_map(|(prefix, dir)| {
                let prefix_segments = namespace_segments(prefix);
                let is_prefix = !prefix_segments.is_empty()
                    && prefix_segments.len() <= segments.len()
                    && prefix_segments.iter().zip(&segments).all(|(a, b)| a == b);
                is_prefix.then_some((prefix_segments.len(), dir))
            })
            .collect();
        matches.sort_by(|a, b| b.0.cmp(&a.0));

        matches.into_iter().find_map(|(_, dir)| {
            let candidate = segments.iter().fold(dir.clone(), |path, s| path.join(s));
            candidate.is_dir().then_some(candidate)
        })
    }
}

/// Locates themes whose descriptor carries a namespace hint.
#[derive(Debug)]
pub struct NamespacePathLocator {
    resource_locator: Box<dyn NamespaceResourceLocator>,
}

impl NamespacePathLocator {
    pub fn new(resource_locator: Box<dyn NamespaceResourceLocator>) -> Self {
        Self { resource_locator }
    }
}

impl PathLocator for NamespacePathLocator {
    fn locate(&self, theme: &UnresolvedTheme) -> Result<Option<PathBuf>> {
        Ok(theme
            .hints()
            .namespace
            .as_deref()
            .and_then(|namespace| self.resource_locator.find_first_directory(namespace)))
    }
}
