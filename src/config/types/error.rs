//! Configuration error types.

use super::FieldPath;
use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// ConfigError
// ============================================================================

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("config file parsing error")]
    Json(#[from] serde_json::Error),

    #[error("unsupported config format `{0}`, expected a .toml or .json file")]
    UnsupportedFormat(PathBuf),

    // NOTE: No #[from] here - we don't want source() which causes duplicate output
    #[error("{0}")]
    Invalid(ConfigDiagnostics),
}

impl ConfigError {
    /// Validation findings, if this is a validation failure.
    pub fn diagnostics(&self) -> Option<&ConfigDiagnostics> {
        match self {
            Self::Invalid(diag) => Some(diag),
            _ => None,
        }
    }
}

// ============================================================================
// ConfigDiagnostic
// ============================================================================

/// A single validation failure, tied to the field that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigDiagnostic {
    #[error("required field is missing or empty")]
    MissingField { field: FieldPath },

    #[error("malformed head directive: {reason}")]
    MalformedHeadDirective { field: FieldPath, reason: String },

    #[error("malformed nav entry: {reason}")]
    MalformedNavEntry { field: FieldPath, reason: String },

    #[error("duplicate nav label \"{label}\"")]
    DuplicateNavLabel { field: FieldPath, label: String },
}

impl ConfigDiagnostic {
    pub fn field(&self) -> &FieldPath {
        match self {
            Self::MissingField { field }
            | Self::MalformedHeadDirective { field, .. }
            | Self::MalformedNavEntry { field, .. }
            | Self::DuplicateNavLabel { field, .. } => field,
        }
    }

    pub const fn hint(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "set a non-empty string value",
            Self::MalformedHeadDirective { .. } => {
                r#"use ["link", { rel = "...", href = "..." }] or ["style", { type = "text/css" }, "..."]"#
            }
            Self::MalformedNavEntry { .. } => {
                r#"use { text = "...", link = "/path/" } or { text = "...", items = [...] }"#
            }
            Self::DuplicateNavLabel { .. } => "labels must be unique within the same menu level",
        }
    }

    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Field path in cyan brackets
        writeln!(
            f,
            "{}{}{}",
            "[".dimmed(),
            self.field().as_str().cyan(),
            "]".dimmed()
        )?;
        // Error message with red bullet
        write!(f, "{} {}", "→".red(), self)?;
        write!(f, "\n  {} {}", "hint:".yellow(), self.hint())
    }
}

// ============================================================================
// ConfigDiagnostics
// ============================================================================

/// Everything validation found in one config source.
///
/// Errors fail the load; warnings are reported and the load goes on.
#[derive(Debug, Clone, Default)]
pub struct ConfigDiagnostics {
    errors: Vec<ConfigDiagnostic>,
    warnings: Vec<(FieldPath, String)>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, diagnostic: ConfigDiagnostic) {
        self.errors.push(diagnostic);
    }

    pub fn warn(&mut self, field: FieldPath, message: impl Into<String>) {
        self.warnings.push((field, message.into()));
    }

    /// Print collected warnings in a grouped format.
    pub fn print_warnings(&self) {
        if self.warnings.is_empty() {
            return;
        }

        crate::log!("warning"; "config has {} warning(s):", self.warnings.len());
        for (field, message) in &self.warnings {
            eprintln!("- {field}: {message}");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ConfigDiagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[(FieldPath, String)] {
        &self.warnings
    }

    /// Convert to Result (returns Err if there are errors).
    pub fn into_result(self) -> Result<Self, ConfigError> {
        if self.errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(self))
        }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n", "config validation failed:".red().bold())?;
        for (i, err) in self.errors.iter().enumerate() {
            err.render(f)?;
            if i + 1 < self.errors.len() {
                writeln!(f, "\n")?;
            }
        }
        if self.errors.len() > 1 {
            write!(
                f,
                "\n\n{} {} {}",
                "found".dimmed(),
                self.errors.len().to_string().red().bold(),
                "errors".dimmed()
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}
