//! Configuration section definitions.
//!
//! Each module corresponds to a part of the site config:
//!
//! | Module  | Field            | Purpose                                   |
//! |---------|------------------|-------------------------------------------|
//! | `head`  | `head`           | `<link>` / `<style>` tags for every page  |
//! | `nav`   | `themeConfig.nav`| Top navigation links and dropdown groups  |
//! | `theme` | `themeConfig`    | Sidebar mode, repository and edit links   |

pub mod head;
pub mod nav;
pub mod theme;

pub use head::{Attributes, HeadDirective, parse_head};
pub use nav::{NavEntry, NavGroup, NavLink, parse_nav};
pub use theme::{
    DEFAULT_DOCS_BRANCH, DEFAULT_EDIT_LINK_TEXT, SidebarMode, ThemeConfig, resolve_repo_url,
};
