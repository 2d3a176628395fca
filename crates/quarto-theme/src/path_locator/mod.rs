//! Strategies for finding a theme's root directory on disk.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! A [`PathLocator`] either finds a root for a theme, declines (`Ok(None)`), or
//! fails hard. [`CompositePathLocator`] tries its strategies in order and the
//! first one that finds a root wins, so explicit mappings configured earlier
//! override the filesystem conventions configured later.

use std::path::PathBuf;

use crate::error::Result;
use crate::theme::UnresolvedTheme;

mod composite;
mod filesystem;
mod namespace;
mod path_mapper;

pub use composite::CompositePathLocator;
pub use filesystem::FilesystemPathLocator;
pub use namespace::{NamespacePathLocator, NamespaceResourceLocator, PrefixResourceLocator};
pub use path_mapper::PathMapperPathLocator;

/// One way of turning a theme identity into a root directory.
pub trait PathLocator: Send + Sync + std::fmt::Debug {
    /// Find the theme's root directory.
    ///
    /// Returns `Ok(None)` when this strategy has nothing to say about the theme.
    fn locate(&self, theme: &UnresolvedTheme) -> Result<Option<PathBuf>>;
}
