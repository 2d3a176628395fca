//! Locate themes by explicit path hints and directory conventions

use std::path::{Path, PathBuf};

use tracing::trace;

use super::PathLocator;
use crate::error::{Error, Result};
use crate::theme::UnresolvedTheme;

/// Finds a theme root on the filesystem.
///
/// Tried in order:
/// 1. The descriptor's `path` hint. Relative hints are resolved against the
///    base directory. A hint that does not point at a directory is an error,
///    since the configuration named it explicitly.
/// 2. For each search path: `<search_path>/<type>/<name>` (typed themes only),
///    then `<search_path>/<name>`.
#[derive(Debug, Clone, Default)]
pub struct FilesystemPathLocator {
    base_dir: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
}

impl FilesystemPathLocator {
    pub fn new(base_dir: Option<PathBuf>, search_paths: Vec<PathBuf>) -> Self {
        Self {
            base_dir,
            search_paths,
        }
    }

    fn resolve_hint(&self, hint: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if hint.is_relative() => base.join(hint),
            _ => hint.to_path_buf(),
        }
    }
}

impl PathLocator for FilesystemPathLocator {
    fn locate(&self, theme: &UnresolvedTheme) -> Result<Option<PathBuf>> {
        if let Some(hint) = &theme.hints().path {
            let root = self.resolve_hint(hint);
            if root.is_dir() {
                return Ok(Some(root));
            }
            return Err(Error::Filesystem {
                message: format!("Theme '{}' names a root directory that does not exist", theme.key()),
                path: root,
            });
        }

        for search_path in &self.search_paths {
            let search_path = self.resolve_hint(search_path);
            let mut candidates = Vec::with_capacity(2);
            if let Some(theme_type) = theme.theme_type() {
                candidates.push(search_path.join(theme_type).join(theme.name()));
            }
            candidates.push(search_path.join(theme.name()));

            for candidate in candidates {
                trace!(candidate = %candidate.display(), "Checking conventional theme root");
                if candidate.is_dir() {
                    return Ok(Some(candidate));
                }
            }
        }

        Ok(None)
    }
}
