//! Site configuration for the Jangle docs.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Typed sections
//! │   ├── head       # head directives (<link>, <style>)
//! │   ├── nav        # themeConfig.nav
//! │   └── theme      # themeConfig (sidebar, repo, edit links)
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! ├── raw.rs         # Raw input (TOML / JSON / in-memory value)
//! ├── overlay.rs     # SiteOverlay, merge
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Example
//!
//! ```toml
//! title = "Jangle"
//! description = "a cms for humans."
//! head = [
//!   ["link", { rel = "icon", href = "/favicon.png" }],
//! ]
//!
//! [themeConfig]
//! sidebar = "auto"
//! docsRepo = "jangle-cms/io"
//! editLinks = true
//! nav = [
//!   { text = "Guide", link = "/guide/" },
//!   { text = "Docs", items = [{ text = "Jangle API", link = "/docs/api/" }] },
//! ]
//! ```
//!
//! A loaded [`SiteConfig`] is a plain value: build it once, then pass it by
//! reference to whatever renders the site.

mod overlay;
mod raw;
pub mod section;
pub mod types;

pub use overlay::{SiteOverlay, ThemeOverlay};
pub use raw::ConfigFormat;
pub use section::{HeadDirective, NavEntry, NavGroup, NavLink, SidebarMode, ThemeConfig};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use serde::Serialize;
use serde_json::Value;
use std::path::Path;

use overlay::warn_ignored;
use raw::{Parsed, RawSiteConfig};

// ============================================================================
// root configuration
// ============================================================================

/// Validated site configuration, as handed to the site generator.
///
/// Serializes back to the camelCase shape it was loaded from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Site description, used in metadata tags.
    pub description: String,

    /// Tags injected into every page's `<head>`, in declaration order.
    pub head: Vec<HeadDirective>,

    /// Navigation, sidebar and edit links.
    pub theme_config: ThemeConfig,
}

impl SiteConfig {
    /// Load and validate a raw config object.
    ///
    /// Warnings are printed; errors are all returned at once.
    pub fn load(raw: &Value) -> Result<Self, ConfigError> {
        Self::loaded(Self::check_value(raw)?)
    }

    /// Parse and validate config text.
    pub fn from_str(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        Self::loaded(Self::check_str(content, format)?)
    }

    /// Read and validate a config file (`.toml` or `.json`).
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        Self::loaded(Self::check_path(path)?)
    }

    /// Like [`SiteConfig::load`], returning warnings instead of printing them.
    pub fn check_value(raw: &Value) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        Self::validate(RawSiteConfig::from_value(raw)?)
    }

    /// Like [`SiteConfig::from_str`], returning warnings instead of printing them.
    pub fn check_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        Self::validate(RawSiteConfig::parse(content, format)?)
    }

    /// Like [`SiteConfig::from_path`], returning warnings instead of printing them.
    pub fn check_path(path: &Path) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        crate::debug!("config"; "reading {}", path.display());
        Self::validate(RawSiteConfig::read(path)?)
    }

    fn loaded((config, diag): (Self, ConfigDiagnostics)) -> Result<Self, ConfigError> {
        diag.print_warnings();
        Ok(config)
    }

    /// Validate a parsed raw config.
    ///
    /// Collects all validation errors and returns them at once.
    fn validate((raw, ignored): Parsed) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        warn_ignored(ignored, &mut diag);

        let root = FieldPath::default();
        if raw.title.is_none() {
            diag.error(ConfigDiagnostic::MissingField {
                field: root.key("title"),
            });
        }
        if raw.description.is_none() {
            diag.error(ConfigDiagnostic::MissingField {
                field: root.key("description"),
            });
        }

        let overlay = SiteOverlay::from_raw(raw, &mut diag);
        let mut diag = diag.into_result()?;

        let config = Self::default().merge(&overlay);
        config.theme_config.validate(
            &root.key("themeConfig"),
            overlay.theme.docs_branch.is_some(),
            &mut diag,
        );

        crate::debug!(
            "config";
            "loaded \"{}\": {} head tags, {} nav entries",
            config.title,
            config.head.len(),
            config.theme_config.nav.len()
        );
        Ok((config, diag))
    }

    /// Merge an overlay over this config.
    ///
    /// Scalars the overlay sets replace ours; `head` and `nav` are replaced
    /// wholesale. `config.merge(&config.clone().into()) == config`.
    pub fn merge(&self, overlay: &SiteOverlay) -> Self {
        let mut merged = self.clone();
        overlay.apply_to(&mut merged);
        merged
    }

    /// All head directives rendered as HTML, one per line.
    pub fn head_html(&self) -> String {
        self.head
            .iter()
            .map(HeadDirective::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Edit URL for a page source path, if edit links are configured.
    pub fn edit_link(&self, page: &str) -> Option<String> {
        self.theme_config.edit_link(page)
    }
}

// ============================================================================
// tests
// ============================================================================
