//! quarto-theme: theme registration, resolution and resource serving
//!
//! This crate provides:
//! - Theme descriptors, a closed set of descriptor formats, and a registry
//! - Path mapping and a chain of path locators to find theme roots on disk
//! - The active theme provider and template search path augmentation
//! - Content type detection and an HTTP server for theme static resources
//! - URL generation for theme resources

pub mod content_type;
pub mod context;
pub mod error;
pub mod factory;
pub mod manager;
pub mod path_locator;
pub mod path_mapper;
pub mod provider;
pub mod registry;
pub mod resource_url;
pub mod server;
pub mod settings;
pub mod theme;

pub use content_type::{ContentTypeConfig, ContentTypeResolver};
pub use context::{ServerConfig, SharedContext, ThemeContext};
pub use error::{Error, Result};
pub use factory::ThemeFactory;
pub use manager::ThemeManager;
pub use path_locator::{
    CompositePathLocator, FilesystemPathLocator, NamespacePathLocator, NamespaceResourceLocator,
    PathLocator, PathMapperPathLocator, PrefixResourceLocator,
};
pub use path_mapper::PatternPathMapper;
pub use provider::{TemplatePaths, ThemeProvider};
pub use registry::{ArrayRegistry, Registry};
pub use resource_url::{ResourceUrlGenerator, RouteUrlGenerator, UrlGenerator};
pub use settings::ThemeSettings;
pub use theme::{Theme, ThemeDescriptor, ThemeKey, UnresolvedTheme};
