//! Theme descriptors and resolved themes.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! A theme moves through three stages:
//!
//! 1. [`ThemeDescriptor`] - what the configuration says (a name plus optional
//!    location hints).
//! 2. [`UnresolvedTheme`] - what a [`ThemeFactory`](crate::ThemeFactory) builds
//!    from a descriptor and an optional type. It knows who the theme is but not
//!    where it lives.
//! 3. [`Theme`] - an unresolved theme plus the root directory a
//!    [`PathLocator`](crate::PathLocator) found for it.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration value describing a theme to register.
///
/// In TOML a descriptor is either a bare theme name or a table:
///
/// ```toml
/// descriptor = "acme"
/// descriptor = { name = "acme", path = "vendor/acme-theme" }
/// descriptor = { name = "acme", namespace = "Acme\\Theme" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DescriptorRepr")]
pub struct ThemeDescriptor {
    /// Theme name (registry key)
    pub name: String,

    /// Explicit theme root, absolute or relative to the config directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Legacy namespace hint resolved through a namespace resource locator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl ThemeDescriptor {
    /// Descriptor with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            namespace: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DescriptorRepr {
    Name(String),
    Table {
        name: String,
        #[serde(default)]
        path: Option<PathBuf>,
        #[serde(default)]
        namespace: Option<String>,
    },
}

impl From<DescriptorRepr> for ThemeDescriptor {
    fn from(repr: DescriptorRepr) -> Self {
        match repr {
            DescriptorRepr::Name(name) => ThemeDescriptor::named(name),
            DescriptorRepr::Table {
                name,
                path,
                namespace,
            } => ThemeDescriptor {
                name,
                path,
                namespace,
            },
        }
    }
}

/// Registry key: theme name plus optional type.
///
/// `None` is its own key and never matches a concrete type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThemeKey {
    pub name: String,
    pub theme_type: Option<String>,
}

impl ThemeKey {
    pub fn new(name: impl Into<String>, theme_type: Option<&str>) -> Self {
        Self {
            name: name.into(),
            theme_type: theme_type.map(str::to_string),
        }
    }
}

impl fmt::Display for ThemeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.theme_type {
            Some(t) => write!(f, "{}/{}", t, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Location hints carried from the descriptor to the path locators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationHints {
    pub path: Option<PathBuf>,
    pub namespace: Option<String>,
}

/// A theme whose identity is known but whose root has not been located yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedTheme {
    name: String,
    theme_type: Option<String>,
    hints: LocationHints,
}

impl UnresolvedTheme {
    pub fn new(name: impl Into<String>, theme_type: Option<&str>, hints: LocationHints) -> Self {
        Self {
            name: name.into(),
            theme_type: theme_type.map(str::to_string),
            hints,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn theme_type(&self) -> Option<&str> {
        self.theme_type.as_deref()
    }

    pub fn hints(&self) -> &LocationHints {
        &self.hints
    }

    pub fn key(&self) -> ThemeKey {
        ThemeKey::new(&self.name, self.theme_type())
    }

    /// Attach the located root directory.
    pub fn resolve(self, root_path: PathBuf) -> Theme {
        Theme {
            name: self.name,
            theme_type: self.theme_type,
            root_path,
        }
    }
}

/// A registered theme with a resolved root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    name: String,
    theme_type: Option<String>,
    root_path: PathBuf,
}

impl Theme {
    pub fn new(name: impl Into<String>, theme_type: Option<&str>, root_path: PathBuf) -> Self {
        Self {
            name: name.into(),
            theme_type: theme_type.map(str::to_string),
            root_path,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn theme_type(&self) -> Option<&str> {
        self.theme_type.as_deref()
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn key(&self) -> ThemeKey {
        ThemeKey::new(&self.name, self.theme_type())
    }

    /// Directory holding the theme's templates.
    pub fn templates_dir(&self) -> PathBuf {
        self.root_path.join("templates")
    }

    /// Directory holding the theme's public static resources.
    pub fn public_dir(&self) -> PathBuf {
        self.root_path.join("public")
    }

    /// Filesystem path of a public resource.
    ///
    /// Returns `None` when the resource name would escape the public directory
    /// (`..`, absolute paths) or has no normal components at all.
    pub fn public_resource_path(&self, resource: &str) -> Option<PathBuf> {
        let relative = Path::new(resource);
        let mut saw_normal = false;
        for component in relative.components() {
            match component {
                Component::Normal(_) => saw_normal = true,
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }
        if !saw_normal {
            return None;
        }
        Some(self.public_dir().join(relative))
    }
}
