//! Environment-export policy (`--export=` in scheduler terms)

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ExportEntry {
    /// Copy the variable from the submitting environment, if set
    Inherit(String),
    /// Set the variable to a literal value
    Set(String, String),
}

impl ExportEntry {
    pub(crate) fn name(&self) -> &str {
        match self {
            ExportEntry::Inherit(name) | ExportEntry::Set(name, _) => name,
        }
    }
}

impl fmt::Display for ExportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportEntry::Inherit(name) => f.write_str(name),
            ExportEntry::Set(name, value) => write!(f, "{name}={value}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "RawExport")]
pub(crate) enum ExportPolicy {
    /// Inherit the whole submitting environment
    #[default]
    All,
    /// Start the child from an empty environment
    None,
    /// Empty environment plus exactly these variables
    List(Vec<ExportEntry>),
}

/// TOML accepts a keyword/SLURM string or an array of entries
#[derive(Deserialize)]
#[serde(untagged)]
enum RawExport {
    Text(String),
    Entries(Vec<String>),
}

impl TryFrom<RawExport> for ExportPolicy {
    type Error = AppError;

    fn try_from(raw: RawExport) -> Result<Self, Self::Error> {
        match raw {
            RawExport::Text(text) => text.parse(),
            RawExport::Entries(entries) => {
                let parsed = entries
                    .iter()
                    .map(|e| parse_entry(e, e))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ExportPolicy::List(parsed))
            }
        }
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

fn parse_entry(entry: &str, whole: &str) -> Result<ExportEntry, AppError> {
    let invalid = |reason: &str| AppError::InvalidExport {
        input: whole.to_string(),
        reason: reason.to_string(),
    };
    let (name, value) = match entry.split_once('=') {
        Some((name, value)) => (name.trim(), Some(value)),
        None => (entry.trim(), None),
    };
    if name.eq_ignore_ascii_case("ALL") || name.eq_ignore_ascii_case("NONE") {
        return Err(invalid("ALL/NONE cannot be combined with variable names"));
    }
    if !is_valid_name(name) {
        return Err(invalid(&format!("\"{name}\" is not a valid variable name")));
    }
    Ok(match value {
        Some(value) => ExportEntry::Set(name.to_string(), value.to_string()),
        None => ExportEntry::Inherit(name.to_string()),
    })
}

impl FromStr for ExportPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("ALL") {
            return Ok(ExportPolicy::All);
        }
        if trimmed.eq_ignore_ascii_case("NONE") {
            return Ok(ExportPolicy::None);
        }
        if trimmed.is_empty() {
            return Err(AppError::InvalidExport {
                input: String::new(),
                reason: "empty policy".to_string(),
            });
        }
        trimmed
            .split(',')
            .map(|entry| parse_entry(entry, trimmed))
            .collect::<Result<Vec<_>, _>>()
            .map(ExportPolicy::List)
    }
}

impl fmt::Display for ExportPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportPolicy::All => f.write_str("ALL"),
            ExportPolicy::None => f.write_str("NONE"),
            ExportPolicy::List(entries) => {
                let joined: Vec<String> = entries.iter().map(ToString::to_string).collect();
                f.write_str(&joined.join(","))
            }
        }
    }
}
