//! Command settings for the timeline viewer.
//!
//! All settings come from environment variables:
//!
//! | Variable | Meaning |
//! |---|---|
//! | `EMERGENCE_EVENTS` | Event file, JSON array or newline-delimited JSON (required) |
//! | `EMERGENCE_NAMES` | Name tables, YAML or JSON (optional) |
//! | `EMERGENCE_TIMELINE_CONFIG` | Observer YAML config (optional) |
//! | `EMERGENCE_CATEGORY` | Category filter, or `all` |
//! | `EMERGENCE_SEVERITIES` | Comma-separated severities to show |
//! | `EMERGENCE_SEARCH` | Free-text search |
//! | `EMERGENCE_OUTPUT` | `text` (default) or `json` |

use std::path::PathBuf;

use anyhow::{Context, bail};
use emergence_observer::{Category, Severity, SeveritySet};

/// How the projected view is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text, one line per event.
    Text,
    /// The view model as pretty-printed JSON.
    Json,
}

/// Settings for one run of the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Event file to load.
    pub events_path: PathBuf,
    /// Name tables file.
    pub names_path: Option<PathBuf>,
    /// Observer config file.
    pub config_path: Option<PathBuf>,
    /// Category filter; `None` is "all".
    pub category: Option<Category>,
    /// Severity filter; `None` keeps the configured default.
    pub severities: Option<SeveritySet>,
    /// Search text.
    pub search: String,
    /// Output format.
    pub output: OutputFormat,
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let events_path = get("EMERGENCE_EVENTS")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .context("EMERGENCE_EVENTS must name an event file")?;

        let category = parse_category(get("EMERGENCE_CATEGORY").as_deref().unwrap_or(""))?;
        let severities = get("EMERGENCE_SEVERITIES")
            .filter(|v| !v.trim().is_empty())
            .map(|v| parse_severities(&v))
            .transpose()?;
        let output = match get("EMERGENCE_OUTPUT").as_deref().map(str::trim) {
            None | Some("" | "text") => OutputFormat::Text,
            Some("json") => OutputFormat::Json,
            Some(other) => bail!("invalid EMERGENCE_OUTPUT: {other} (expected text or json)"),
        };

        Ok(Self {
            events_path,
            names_path: get("EMERGENCE_NAMES")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            config_path: get("EMERGENCE_TIMELINE_CONFIG")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            category,
            severities,
            search: get("EMERGENCE_SEARCH").unwrap_or_default(),
            output,
        })
    }
}

fn parse_category(raw: &str) -> anyhow::Result<Option<Category>> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    Category::parse(raw)
        .map(Some)
        .with_context(|| format!("invalid EMERGENCE_CATEGORY: {raw}"))
}

fn parse_severities(raw: &str) -> anyhow::Result<SeveritySet> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Severity::parse(s).with_context(|| format!("invalid severity: {s}")))
        .collect()
}
