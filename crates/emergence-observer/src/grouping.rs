//! Per-tick grouping.
//!
//! Groups are derived, never stored: they are rebuilt from the filtered
//! event list on every projection. The first event seen for a tick seeds
//! that group's environment snapshot.

use std::collections::BTreeMap;

use emergence_types::{Era, Season, Weather, WorldContext};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::event::TimelineEvent;

/// World snapshot shown in a tick group's header.
///
/// Fields are absent when the seeding event carried no world context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TickEnvironment {
    /// Civilizational era.
    pub era: Option<Era>,
    /// Season.
    pub season: Option<Season>,
    /// Weather.
    pub weather: Option<Weather>,
    /// Living population.
    pub population: Option<u32>,
}

impl From<Option<&WorldContext>> for TickEnvironment {
    fn from(context: Option<&WorldContext>) -> Self {
        context.map_or_else(Self::default, |c| Self {
            era: Some(c.era),
            season: Some(c.season),
            weather: Some(c.weather),
            population: Some(c.population),
        })
    }
}

/// Events sharing one tick, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickGroup<'a> {
    /// Simulation tick.
    pub tick: u64,
    /// Environment captured from the first event at this tick.
    pub environment: TickEnvironment,
    /// The events, in input order.
    pub events: Vec<&'a TimelineEvent>,
}

/// Partition `events` by tick, newest tick first.
///
/// Every input event lands in exactly one group; within a group the input
/// order is preserved.
pub fn group_by_tick<'a>(events: &[&'a TimelineEvent]) -> Vec<TickGroup<'a>> {
    let mut groups: BTreeMap<u64, TickGroup<'a>> = BTreeMap::new();
    for &event in events {
        groups
            .entry(event.tick())
            .or_insert_with(|| TickGroup {
                tick: event.tick(),
                environment: TickEnvironment::from(event.world_context()),
                events: Vec::new(),
            })
            .events
            .push(event);
    }
    groups.into_values().rev().collect()
}
