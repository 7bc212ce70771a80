//! Plain-text rendering of a projected timeline.

use std::io::{self, Write};

use emergence_observer::{EventRow, Narrative, TickEnvironment, TickGroupView, TimelineView};

/// Write the view as text: a header per tick group, one line per event.
pub fn write_text<W: Write>(out: &mut W, view: &TimelineView) -> io::Result<()> {
    writeln!(
        out,
        "{} of {} events shown (critical {}, notable {}, warning {}, routine {}, info {})",
        view.matched_events,
        view.total_events,
        view.severity_counts.critical,
        view.severity_counts.notable,
        view.severity_counts.warning,
        view.severity_counts.routine,
        view.severity_counts.info,
    )?;
    if view.groups.is_empty() {
        writeln!(out, "No events match the current filters.")?;
        return Ok(());
    }
    for group in &view.groups {
        write_group(out, group)?;
    }
    Ok(())
}

fn write_group<W: Write>(out: &mut W, group: &TickGroupView) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "== Tick {} | {} ==",
        group.tick,
        environment_line(&group.environment)
    )?;
    if group.collapsed {
        writeln!(out, "   ({} events hidden)", group.rows.len())?;
        return Ok(());
    }
    for row in &group.rows {
        write_row(out, row)?;
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, row: &EventRow) -> io::Result<()> {
    writeln!(
        out,
        "   [{:<8}] {}",
        row.severity.as_str(),
        emphasized_text(&row.narrative)
    )?;
    if row.expanded {
        writeln!(out, "              {}", row.details)?;
    }
    Ok(())
}

/// Header text for a group's world snapshot; unknown fields read `?`.
pub fn environment_line(env: &TickEnvironment) -> String {
    let era = env.era.map_or_else(|| "?".to_owned(), |e| format!("{e:?}"));
    let season = env.season.map_or_else(|| "?".to_owned(), |s| format!("{s:?}"));
    let weather = env.weather.map_or_else(|| "?".to_owned(), |w| format!("{w:?}"));
    let population = env
        .population
        .map_or_else(|| "?".to_owned(), |p| p.to_string());
    format!("{era} | {season} | {weather} | pop {population}")
}

/// Narrative text with emphasized runs wrapped in asterisks.
pub fn emphasized_text(narrative: &Narrative) -> String {
    narrative
        .fragments()
        .iter()
        .map(|f| {
            if f.emphasized {
                format!("*{}*", f.text)
            } else {
                f.text.clone()
            }
        })
        .collect()
}
