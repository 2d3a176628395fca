//! Locate themes at the conventional docroot location of their public path

use std::path::PathBuf;
use std::sync::Arc;

use super::PathLocator;
use crate::error::Result;
use crate::path_mapper::PatternPathMapper;
use crate::theme::UnresolvedTheme;

/// Finds `<docroot>/<public path>` (for example `web/themes/acme`) when it exists.
///
/// Declines when the mapper has no docroot.
#[derive(Debug, Clone)]
pub struct PathMapperPathLocator {
    path_mapper: Arc<PatternPathMapper>,
}

impl PathMapperPathLocator {
    pub fn new(path_mapper: Arc<PatternPathMapper>) -> Self {
        Self { path_mapper }
    }
}

impl PathLocator for PathMapperPathLocator {
    fn locate(&self, theme: &UnresolvedTheme) -> Result<Option<PathBuf>> {
        if self.path_mapper.docroot().is_none() {
            return Ok(None);
        }

        let root = self.path_mapper.generate_filesystem_root(theme)?;
        Ok(root.is_dir().then_some(root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::theme::LocationHints;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_locates_existing_mapped_directory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("themes/mobile/acme")).unwrap();

        let mapper = Arc::new(PatternPathMapper::new(Some(temp.path().to_path_buf())));
        let locator = PathMapperPathLocator::new(mapper);

        let typed = UnresolvedTheme::new("acme", Some("mobile"), LocationHints::default());
        assert_eq!(
            locator.locate(&typed).unwrap(),
            Some(temp.path().join("themes/mobile/acme"))
        );

        let untyped = UnresolvedTheme::new("acme", None, LocationHints::default());
        assert_eq!(locator.locate(&untyped).unwrap(), None);
    }

    #[test]
    fn test_declines_without_docroot() {
        let locator = PathMapperPathLocator::new(Arc::new(PatternPathMapper::default()));
        let theme = UnresolvedTheme::new("acme", None, LocationHints::default());
        assert_eq!(locator.locate(&theme).unwrap(), None);
    }

    #[test]
    fn test_bad_template_is_an_error() {
        let temp = TempDir::new().unwrap();
        let mapper = PatternPathMapper::new(Some(temp.path().to_path_buf()))
            .with_typed_url_template("/themes/%name%");
        let locator = PathMapperPathLocator::new(Arc::new(mapper));

        let theme = UnresolvedTheme::new("acme", Some("mobile"), LocationHints::default());
        assert!(matches!(
            locator.locate(&theme),
            Err(Error::Configuration(_))
        ));
    }
}
