//! `check`: validate config files independently.

use anyhow::{Result, bail};
use std::path::Path;

use crate::config::{ConfigError, SiteConfig};
use crate::log;

/// Validate each file on its own, reporting every failure.
///
/// Files are not merged: two configs for the same site are alternates.
pub fn check_files(files: &[impl AsRef<Path>]) -> Result<()> {
    let failed = files
        .iter()
        .filter(|path| !check_file(path.as_ref()))
        .count();

    if failed > 0 {
        bail!("{failed} of {} config file(s) failed validation", files.len());
    }
    Ok(())
}

/// Validate one file and report the outcome. Returns true if it loaded.
fn check_file(path: &Path) -> bool {
    match SiteConfig::check_path(path) {
        Ok((config, diag)) => {
            diag.print_warnings();
            log!(
                "check";
                "{}: ok, \"{}\" with {} head tag(s), {} nav entr{}",
                path.display(),
                config.title,
                config.head.len(),
                config.theme_config.nav.len(),
                if config.theme_config.nav.len() == 1 { "y" } else { "ies" }
            );
            true
        }
        Err(ConfigError::Invalid(diag)) => {
            diag.print_warnings();
            log!("error"; "{}:", path.display());
            eprintln!("{diag}\n");
            false
        }
        Err(err) => {
            log!("error"; "{}: {:#}", path.display(), anyhow::Error::from(err));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_check_files() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("config.toml");
        fs::write(&good, "title = \"Jangle\"\ndescription = \"a cms for humans.\"").unwrap();
        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "title = \"Jangle\"").unwrap();
        let missing = dir.path().join("missing.json");

        assert!(check_files(&[&good]).is_ok());

        let err = check_files(&[&good, &bad, &missing]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "2 of 3 config file(s) failed validation"
        );
    }
}
