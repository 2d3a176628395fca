//! Theme factories, one per descriptor format.
//!
//! Copyright (c) 2025 Posit, PBC

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::theme::{LocationHints, ThemeDescriptor, UnresolvedTheme};

pub const DEFAULT_FORMAT: &str = "version0";

/// Builds unresolved themes from descriptors.
///
/// The set of supported descriptor formats is closed; adding a format means
/// adding a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeFactory {
    #[default]
    Version0,
}

impl ThemeFactory {
    /// The format tag this factory handles.
    pub fn format(&self) -> &'static str {
        match self {
            ThemeFactory::Version0 => "version0",
        }
    }

    pub fn create(
        &self,
        descriptor: &ThemeDescriptor,
        theme_type: Option<&str>,
    ) -> Result<UnresolvedTheme> {
        match self {
            ThemeFactory::Version0 => create_version0(descriptor, theme_type),
        }
    }
}

fn create_version0(
    descriptor: &ThemeDescriptor,
    theme_type: Option<&str>,
) -> Result<UnresolvedTheme> {
    let name = descriptor.name.trim();
    if name.is_empty() {
        return Err(Error::Configuration(
            "theme descriptor has an empty name".to_string(),
        ));
    }

    // An empty type string means "untyped" rather than a type named ""
    let theme_type = theme_type.filter(|t| !t.is_empty());

    Ok(UnresolvedTheme::new(
        name,
        theme_type,
        LocationHints {
            path: descriptor.path.clone(),
            namespace: descriptor.namespace.clone(),
        },
    ))
}

impl FromStr for ThemeFactory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "version0" => Ok(ThemeFactory::Version0),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ThemeFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.format())
    }
}
