//! Ordered chain of path locators

use std::path::PathBuf;

use tracing::{debug, trace};

use super::PathLocator;
use crate::error::{Error, Result};
use crate::theme::UnresolvedTheme;

/// Tries each locator in order and returns the first root found.
#[derive(Debug, Default)]
pub struct CompositePathLocator {
    locators: Vec<Box<dyn PathLocator>>,
}

impl CompositePathLocator {
    pub fn new(locators: Vec<Box<dyn PathLocator>>) -> Self {
        Self { locators }
    }

    /// Append a locator with the lowest precedence so far.
    pub fn add_path_locator(&mut self, locator: Box<dyn PathLocator>) {
        self.locators.push(locator);
    }

    pub fn len(&self) -> usize {
        self.locators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }

    /// Like [`PathLocator::locate`], but a theme nobody could place is an error.
    pub fn locate_or_fail(&self, theme: &UnresolvedTheme) -> Result<PathBuf> {
        self.locate(theme)?
            .ok_or_else(|| Error::theme_not_found(theme.name(), theme.theme_type()))
    }
}

impl PathLocator for CompositePathLocator {
    fn locate(&self, theme: &UnresolvedTheme) -> Result<Option<PathBuf>> {
        for (index, locator) in self.locators.iter().enumerate() {
            if let Some(root) = locator.locate(theme)? {
                debug!(
                    theme = %theme.key(),
                    strategy = index,
                    root = %root.display(),
                    "Located theme root"
                );
                return Ok(Some(root));
            }
            trace!(theme = %theme.key(), strategy = index, "Path locator declined");
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_locator::FilesystemPathLocator;
    use crate::theme::LocationHints;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Debug)]
    struct FixedLocator(Option<PathBuf>);

    impl PathLocator for FixedLocator {
        fn locate(&self, _theme: &UnresolvedTheme) -> Result<Option<PathBuf>> {
            Ok(self.0.clone())
        }
    }

    #[derive(Debug)]
    struct FailingLocator;

    impl PathLocator for FailingLocator {
        fn locate(&self, theme: &UnresolvedTheme) -> Result<Option<PathBuf>> {
            Err(Error::Configuration(format!("cannot place {}", theme.name())))
        }
    }

    fn acme() -> UnresolvedTheme {
        UnresolvedTheme::new("acme", None, LocationHints::default())
    }

    #[test]
    fn test_first_successful_strategy_wins() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("acme")).unwrap();

        let convention = FilesystemPathLocator::new(None, vec![temp.path().to_path_buf()]);
        // Sanity check: the convention alone would find a valid directory
        assert_eq!(
            convention.locate(&acme()).unwrap(),
            Some(temp.path().join("acme"))
        );

        let composite = CompositePathLocator::new(vec![
            Box::new(FixedLocator(Some(PathBuf::from("/explicit/path")))),
            Box::new(convention),
        ]);

        assert_eq!(
            composite.locate_or_fail(&acme()).unwrap(),
            PathBuf::from("/explicit/path")
        );
    }

    #[test]
    fn test_falls_through_declining_strategies() {
        let mut composite = CompositePathLocator::new(vec![Box::new(FixedLocator(None))]);
        composite.add_path_locator(Box::new(FixedLocator(Some(PathBuf::from("/second")))));

        assert_eq!(composite.len(), 2);
        assert_eq!(
            composite.locate_or_fail(&acme()).unwrap(),
            PathBuf::from("/second")
        );
    }

    #[test]
    fn test_all_strategies_decline() {
        let composite = CompositePathLocator::new(vec![
            Box::new(FixedLocator(None)),
            Box::new(FixedLocator(None)),
        ]);

        let err = composite.locate_or_fail(&acme()).unwrap_err();
        assert!(matches!(err, Error::ThemeNotFound { ref name, .. } if name == "acme"));
    }

    #[test]
    fn test_hard_failure_stops_the_chain() {
        let composite = CompositePathLocator::new(vec![
            Box::new(FailingLocator),
            Box::new(FixedLocator(Some(PathBuf::from("/never")))),
        ]);

        assert!(matches!(
            composite.locate(&acme()),
            Err(Error::Configuration(_))
        ));
    }
}
