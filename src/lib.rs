//! Typed, validated site configuration for the Jangle docs.
//!
//! Load a config with [`SiteConfig::load`] (in-memory value),
//! [`SiteConfig::from_str`] or [`SiteConfig::from_path`] (TOML / JSON), and
//! layer partial configs over it with [`SiteConfig::merge`].

pub mod cli;
pub mod config;
pub mod logger;
mod utils;

pub use config::{
    ConfigDiagnostic, ConfigDiagnostics, ConfigError, ConfigFormat, HeadDirective, NavEntry,
    NavGroup, NavLink, SidebarMode, SiteConfig, SiteOverlay, ThemeConfig,
};
