//! Partial configs merged over a base.
//!
//! An overlay has the same shape as a full config but nothing is required.
//! Merging replaces every field the overlay sets: scalars are replaced, and
//! `head` / `nav` are replaced wholesale rather than appended.

use serde_json::Value;
use std::path::Path;

use super::raw::{ConfigFormat, Parsed, RawSiteConfig, RawThemeConfig};
use super::section::{HeadDirective, NavEntry, SidebarMode, parse_head, parse_nav};
use super::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath, SiteConfig};

/// Site config with every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteOverlay {
    pub title: Option<String>,
    pub description: Option<String>,
    pub head: Option<Vec<HeadDirective>>,
    pub theme: ThemeOverlay,
}

/// `themeConfig` with every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeOverlay {
    pub nav: Option<Vec<NavEntry>>,
    pub sidebar: Option<SidebarMode>,
    /// `Some(None)` clears the base repository.
    pub docs_repo: Option<Option<String>>,
    pub docs_branch: Option<String>,
    pub docs_dir: Option<String>,
    pub edit_links: Option<bool>,
    pub edit_link_text: Option<String>,
}

impl SiteOverlay {
    /// Load an overlay from an in-memory value.
    pub fn load(raw: &Value) -> Result<Self, ConfigError> {
        Self::finish(RawSiteConfig::from_value(raw)?)
    }

    /// Parse an overlay from config text.
    pub fn from_str(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        Self::finish(RawSiteConfig::parse(content, format)?)
    }

    /// Load an overlay file (`.toml` or `.json`).
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        Self::finish(RawSiteConfig::read(path)?)
    }

    fn finish(parsed: Parsed) -> Result<Self, ConfigError> {
        let (raw, ignored) = parsed;
        let mut diag = ConfigDiagnostics::new();
        warn_ignored(ignored, &mut diag);

        let overlay = Self::from_raw(raw, &mut diag);
        let diag = diag.into_result()?;
        diag.print_warnings();
        Ok(overlay)
    }

    /// Validate and normalize a raw config.
    ///
    /// Present-but-blank `title`/`description` are reported; absent ones are
    /// left to the caller, since only full configs require them.
    pub(super) fn from_raw(raw: RawSiteConfig, diag: &mut ConfigDiagnostics) -> Self {
        let root = FieldPath::default();
        Self {
            title: non_blank(raw.title, root.key("title"), diag),
            description: non_blank(raw.description, root.key("description"), diag),
            head: raw
                .head
                .map(|head| parse_head(&head, &root.key("head"), diag)),
            theme: ThemeOverlay::from_raw(raw.theme_config, &root.key("themeConfig"), diag),
        }
    }

    /// Write every field this overlay sets into `config`.
    pub fn apply_to(&self, config: &mut SiteConfig) {
        update_option(&mut config.title, self.title.as_ref());
        update_option(&mut config.description, self.description.as_ref());
        update_option(&mut config.head, self.head.as_ref());

        let theme = &mut config.theme_config;
        update_option(&mut theme.nav, self.theme.nav.as_ref());
        update_option(&mut theme.sidebar, self.theme.sidebar.as_ref());
        update_option(&mut theme.docs_repo, self.theme.docs_repo.as_ref());
        update_option(&mut theme.docs_branch, self.theme.docs_branch.as_ref());
        update_option(&mut theme.docs_dir, self.theme.docs_dir.as_ref());
        update_option(&mut theme.edit_links, self.theme.edit_links.as_ref());
        update_option(&mut theme.edit_link_text, self.theme.edit_link_text.as_ref());
    }
}

impl ThemeOverlay {
    fn from_raw(raw: RawThemeConfig, field: &FieldPath, diag: &mut ConfigDiagnostics) -> Self {
        let nav_field = field.key("nav");
        Self {
            nav: raw.nav.map(|nav| match nav.as_array() {
                Some(values) => parse_nav(values, &nav_field, diag),
                None => {
                    diag.error(ConfigDiagnostic::MalformedNavEntry {
                        field: nav_field.clone(),
                        reason: "expected a list of nav entries".into(),
                    });
                    Vec::new()
                }
            }),
            sidebar: raw.sidebar,
            docs_repo: raw.docs_repo.map(|repo| trimmed(Some(repo))),
            docs_branch: trimmed(raw.docs_branch),
            docs_dir: raw
                .docs_dir
                .map(|dir| dir.trim().trim_matches('/').to_string()),
            edit_links: raw.edit_links,
            edit_link_text: trimmed(raw.edit_link_text),
        }
    }
}

/// A full config overrides everything.
impl From<SiteConfig> for SiteOverlay {
    fn from(config: SiteConfig) -> Self {
        let theme = config.theme_config;
        Self {
            title: Some(config.title),
            description: Some(config.description),
            head: Some(config.head),
            theme: ThemeOverlay {
                nav: Some(theme.nav),
                sidebar: Some(theme.sidebar),
                docs_repo: Some(theme.docs_repo),
                docs_branch: Some(theme.docs_branch),
                docs_dir: Some(theme.docs_dir),
                edit_links: Some(theme.edit_links),
                edit_link_text: Some(theme.edit_link_text),
            },
        }
    }
}

pub(super) fn warn_ignored(ignored: Vec<String>, diag: &mut ConfigDiagnostics) {
    for path in ignored {
        diag.warn(FieldPath::new(path), "unknown field, ignored");
    }
}

/// Update config option if the overlay value is provided.
fn update_option<T: Clone>(config_option: &mut T, overlay_option: Option<&T>) {
    if let Some(option) = overlay_option {
        *config_option = option.clone();
    }
}

/// Trimmed text; blank counts as not set.
fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Trimmed text; blank is reported as a missing field.
fn non_blank(
    value: Option<String>,
    field: FieldPath,
    diag: &mut ConfigDiagnostics,
) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        diag.error(ConfigDiagnostic::MissingField { field });
        return None;
    }
    Some(value.to_string())
}
