//! `dump`, `head` and `edit-link`: inspect a loaded config.

use anyhow::{Context, Result, bail};
use std::fs;
use std::io::Write;
use std::path::Path;

use super::args::{DumpFormat, SourceArgs};
use crate::config::{SiteConfig, SiteOverlay};
use crate::log;

/// Load the base config and merge the overlay over it, if one was given.
pub fn load_source(source: &SourceArgs) -> Result<SiteConfig> {
    let config = SiteConfig::from_path(&source.file)
        .with_context(|| format!("failed to load {}", source.file.display()))?;

    let Some(path) = &source.overlay else {
        return Ok(config);
    };
    let overlay = SiteOverlay::from_path(path)
        .with_context(|| format!("failed to load overlay {}", path.display()))?;
    crate::debug!("config"; "merging overlay {}", path.display());
    Ok(config.merge(&overlay))
}

/// Serialize the normalized config.
pub fn render_dump(config: &SiteConfig, format: DumpFormat) -> Result<String> {
    Ok(match format {
        DumpFormat::Json => serde_json::to_string_pretty(config)?,
        DumpFormat::Toml => toml::to_string(config)?,
    })
}

pub fn dump(source: &SourceArgs, format: DumpFormat, output: Option<&Path>) -> Result<()> {
    let config = load_source(source)?;
    let formatted = render_dump(&config, format)?;

    // Output to file or stdout
    if let Some(output_path) = output {
        let mut file = fs::File::create(output_path)
            .with_context(|| format!("failed to create {}", output_path.display()))?;
        writeln!(file, "{}", formatted.trim_end())?;
        log!("config"; "wrote config to {}", output_path.display());
    } else {
        println!("{}", formatted.trim_end());
    }
    Ok(())
}

pub fn head(source: &SourceArgs) -> Result<()> {
    let config = load_source(source)?;
    if config.head.is_empty() {
        crate::debug!("config"; "no head directives");
        return Ok(());
    }
    println!("{}", config.head_html());
    Ok(())
}

pub fn edit_link(source: &SourceArgs, page: &str) -> Result<()> {
    let config = load_source(source)?;
    match config.edit_link(page) {
        Some(url) => {
            println!("{url}");
            Ok(())
        }
        None if !config.theme_config.edit_links => {
            bail!("edit links are disabled, set `themeConfig.editLinks = true`")
        }
        None => bail!("no repository configured, set `themeConfig.docsRepo`"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;
    use std::path::PathBuf;

    const SITE_TOML: &str = include_str!("../../fixtures/site/config.toml");

    fn source(file: PathBuf, overlay: Option<PathBuf>) -> SourceArgs {
        SourceArgs { file, overlay }
    }

    #[test]
    fn test_load_source_with_overlay() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("config.toml");
        fs::write(&base, SITE_TOML).unwrap();
        let overlay = dir.path().join("local.json");
        fs::write(&overlay, r#"{"themeConfig": {"docsBranch": "develop"}}"#).unwrap();

        let config = load_source(&source(base.clone(), None)).unwrap();
        assert_eq!(config.theme_config.docs_branch, "master");

        let merged = load_source(&source(base, Some(overlay))).unwrap();
        assert_eq!(merged.theme_config.docs_branch, "develop");
        assert_eq!(merged.title, config.title);
        assert_eq!(merged.theme_config.nav, config.theme_config.nav);
    }

    #[test]
    fn test_load_source_reports_file() {
        let err = load_source(&source(PathBuf::from("/no/such/config.toml"), None)).unwrap_err();
        assert!(err.to_string().contains("/no/such/config.toml"));
    }

    #[test]
    fn test_dump_json_loads_back() {
        let config = SiteConfig::from_str(SITE_TOML, ConfigFormat::Toml).unwrap();
        let json = render_dump(&config, DumpFormat::Json).unwrap();
        assert_eq!(SiteConfig::from_str(&json, ConfigFormat::Json).unwrap(), config);
    }

    #[test]
    fn test_dump_toml_loads_back() {
        let config = SiteConfig::from_str(SITE_TOML, ConfigFormat::Toml).unwrap();
        let toml = render_dump(&config, DumpFormat::Toml).unwrap();
        assert!(toml.contains("[themeConfig]"));
        assert_eq!(SiteConfig::from_str(&toml, ConfigFormat::Toml).unwrap(), config);
    }

    #[test]
    fn test_dump_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("config.toml");
        fs::write(&base, SITE_TOML).unwrap();
        let out = dir.path().join("out.json");

        dump(&source(base, None), DumpFormat::Json, Some(&out)).unwrap();
        let written = fs::read_to_string(&out).unwrap();
        assert!(written.ends_with("}\n"));
        assert!(written.contains("\"docsRepo\": \"jangle-cms/io\""));
    }

    #[test]
    fn test_edit_link_needs_repo() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("config.json");
        fs::write(
            &base,
            r#"{"title": "t", "description": "d", "themeConfig": {"editLinks": false}}"#,
        )
        .unwrap();

        let err = edit_link(&source(base, None), "README.md").unwrap_err();
        assert!(err.to_string().contains("editLinks"));
    }
}
