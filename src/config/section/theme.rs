//! `[themeConfig]`: menu, sidebar and "edit this page" links.
//!
//! # Example
//!
//! ```toml
//! [themeConfig]
//! sidebar = "auto"
//! docsRepo = "jangle-cms/io"   # or a full URL
//! docsBranch = "master"        # default
//! docsDir = "site"             # docs location inside the repo, default: root
//! editLinks = true
//! editLinkText = "Edit this page"
//! ```

use serde::{Deserialize, Serialize};

use super::nav::NavEntry;
use crate::config::{ConfigDiagnostics, FieldPath};

/// Branch used for edit links when `docsBranch` is not set.
pub const DEFAULT_DOCS_BRANCH: &str = "master";

/// Label of the edit affordance when `editLinkText` is not set.
pub const DEFAULT_EDIT_LINK_TEXT: &str = "Edit this page";

/// Per-page sidebar mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarMode {
    /// No sidebar (`sidebar` not set).
    #[default]
    #[serde(skip)]
    Disabled,

    /// Sidebar derived from the page's headings.
    Auto,
}

impl SidebarMode {
    #[inline]
    pub fn is_disabled(&self) -> bool {
        *self == Self::Disabled
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Top navigation menu.
    pub nav: Vec<NavEntry>,

    #[serde(skip_serializing_if = "SidebarMode::is_disabled")]
    pub sidebar: SidebarMode,

    /// Repository backing edit links: `owner/name` (GitHub) or a full URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_repo: Option<String>,

    pub docs_branch: String,

    /// Directory of the docs inside the repository, empty for the root.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub docs_dir: String,

    pub edit_links: bool,

    pub edit_link_text: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            nav: Vec::new(),
            sidebar: SidebarMode::Disabled,
            docs_repo: None,
            docs_branch: DEFAULT_DOCS_BRANCH.into(),
            docs_dir: String::new(),
            edit_links: false,
            edit_link_text: DEFAULT_EDIT_LINK_TEXT.into(),
        }
    }
}

impl ThemeConfig {
    /// Resolved repository URL, if `docsRepo` is set and understood.
    pub fn repo_url(&self) -> Option<String> {
        resolve_repo_url(self.docs_repo.as_deref()?)
    }

    /// Edit URL for a page source path (e.g. `guide/README.md`).
    ///
    /// `None` unless edit links are enabled and the repository resolves.
    pub fn edit_link(&self, page: &str) -> Option<String> {
        if !self.edit_links {
            return None;
        }
        let repo = self.repo_url()?;
        let page = page.trim_start_matches('/');
        let path = if self.docs_dir.is_empty() {
            page.to_string()
        } else {
            format!("{}/{page}", self.docs_dir)
        };
        Some(format!("{repo}/edit/{}/{path}", self.docs_branch))
    }

    /// Check edit-link linkage.
    ///
    /// Broken linkage only produces broken links, so everything here is
    /// a warning. `branch_set` tells whether `docsBranch` was written by
    /// the user rather than defaulted.
    pub fn validate(&self, field: &FieldPath, branch_set: bool, diag: &mut ConfigDiagnostics) {
        match &self.docs_repo {
            None if self.edit_links => diag.warn(
                field.key("docsRepo"),
                "`editLinks` is enabled but `docsRepo` is not set, no edit links will be rendered",
            ),
            None if branch_set => diag.warn(
                field.key("docsBranch"),
                "`docsBranch` has no effect without `docsRepo`",
            ),
            Some(repo) if self.edit_links && resolve_repo_url(repo).is_none() => diag.warn(
                field.key("docsRepo"),
                format!(
                    "cannot build edit links from \"{repo}\", use `owner/name` or an https URL"
                ),
            ),
            _ => {}
        }
    }
}

/// Resolve a repository identifier to its web URL.
///
/// - `owner/name` → `https://github.com/owner/name`
/// - `https://host/path` → as-is, without trailing slash
///
/// Returns `None` for anything else.
pub fn resolve_repo_url(repo: &str) -> Option<String> {
    if repo.contains("://") {
        let parsed = url::Url::parse(repo).ok()?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return None;
        }
        return Some(parsed.as_str().trim_end_matches('/').to_string());
    }

    let (owner, name) = repo.split_once('/')?;
    let valid = |part: &str| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    };
    (valid(owner) && valid(name)).then(|| format!("https://github.com/{owner}/{name}"))
}
