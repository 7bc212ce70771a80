//! Terminal viewer for the Emergence event timeline.
//!
//! Loads an event log, the agent/location name tables, and the observer
//! config, applies the filters named in the environment, and prints the
//! projected timeline (newest tick first).
//!
//! ```text
//! event file --> EventLog --> Timeline (filter, group, narrate) --> stdout
//! ```
//!
//! See [`settings`] for the environment variables.

mod render;
mod settings;

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use emergence_observer::{NameTables, ObserverConfig, SessionAction, Timeline};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::settings::{OutputFormat, Settings};

/// Application entry point.
///
/// # Errors
///
/// Returns an error if settings, configuration, names, or events cannot be
/// loaded, or if writing to stdout fails.
fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;
    let config = load_config(settings.config_path.as_deref())?;

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(
        events = %settings.events_path.display(),
        max_events = config.timeline.max_events,
        "emergence-timeline starting"
    );

    let names = if let Some(path) = &settings.names_path {
        load_names(path)?
    } else {
        warn!("EMERGENCE_NAMES not set, agents and locations will show id prefixes");
        NameTables::default()
    };
    info!(
        agents = names.agents.len(),
        locations = names.locations.len(),
        "name tables loaded"
    );

    let mut timeline = Timeline::new(&config.timeline).with_names(names);
    let contents = std::fs::read_to_string(&settings.events_path)
        .with_context(|| format!("reading {}", settings.events_path.display()))?;
    let added = if contents.trim_start().starts_with('[') {
        timeline.log_mut().ingest_json_array(&contents)
    } else {
        timeline.log_mut().ingest_json_lines(&contents)
    }
    .with_context(|| format!("decoding {}", settings.events_path.display()))?;
    info!(
        added,
        held = timeline.log().len(),
        latest_tick = timeline.log().latest_tick(),
        "events loaded"
    );

    timeline.dispatch(SessionAction::SetCategory(settings.category));
    if let Some(severities) = settings.severities {
        timeline.dispatch(SessionAction::SetSeverities(severities));
    }
    timeline.dispatch(SessionAction::SetSearch(settings.search));

    let view = timeline.view();
    info!(
        matched = view.matched_events,
        groups = view.groups.len(),
        "timeline projected"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match settings.output {
        OutputFormat::Text => render::write_text(&mut out, &view)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, view.as_ref())?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ObserverConfig> {
    match path {
        Some(path) => ObserverConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(ObserverConfig::parse("")?),
    }
}

fn load_names(path: &Path) -> anyhow::Result<NameTables> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading names {}", path.display()))?;
    // YAML is a superset of JSON, so one parser covers both formats.
    serde_yml::from_str(&contents).with_context(|| format!("parsing names {}", path.display()))
}
