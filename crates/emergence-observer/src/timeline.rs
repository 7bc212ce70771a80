//! The live timeline: event log, session, name tables, and a memoized view.
//!
//! [`EventLog`] is the in-memory tail of the simulation's event stream,
//! capped like the engine's observer snapshot (oldest entries drained
//! first). [`Timeline`] owns the log together with the session state and
//! name tables and re-projects only when one of them changed since the last
//! call to [`Timeline::view`].

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use emergence_types::{Event, EventId};
use tracing::debug;

use crate::config::TimelineConfig;
use crate::error::ObserverError;
use crate::event::TimelineEvent;
use crate::lookup::NameTables;
use crate::projection::{TimelineView, project};
use crate::session::{SessionAction, SessionState};

// ---------------------------------------------------------------------------
// EventLog
// ---------------------------------------------------------------------------

/// Append-only, capacity-bounded event log.
#[derive(Debug, Clone)]
pub struct EventLog {
    events: VecDeque<TimelineEvent>,
    ids: HashSet<EventId>,
    capacity: usize,
    version: u64,
}

impl EventLog {
    /// Create an empty log holding at most `capacity` events (minimum one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::new(),
            ids: HashSet::new(),
            capacity: capacity.max(1),
            version: 0,
        }
    }

    /// Append one event, parsing its payload.
    ///
    /// Returns `false` when an event with the same id is already held.
    pub fn push(&mut self, raw: Event) -> bool {
        if self.ids.contains(&raw.id) {
            debug!(event_id = %raw.id, "dropping duplicate event");
            return false;
        }
        if let Some(last) = self.latest_tick()
            && raw.tick < last
        {
            debug!(
                event_id = %raw.id,
                tick = raw.tick,
                latest_tick = last,
                "event arrived out of tick order"
            );
        }

        self.ids.insert(raw.id.clone());
        self.events.push_back(TimelineEvent::ingest(raw));

        while self.events.len() > self.capacity {
            if let Some(evicted) = self.events.pop_front() {
                self.ids.remove(evicted.id());
            }
        }
        self.version = self.version.wrapping_add(1);
        true
    }

    /// Append a batch, returning how many were new.
    pub fn extend<I: IntoIterator<Item = Event>>(&mut self, events: I) -> usize {
        events
            .into_iter()
            .map(|event| self.push(event))
            .filter(|appended| *appended)
            .count()
    }

    /// Decode newline-delimited JSON events and append them.
    ///
    /// Blank lines are skipped. The batch is all-or-nothing: if any line
    /// fails to decode, nothing is appended.
    pub fn ingest_json_lines(&mut self, input: &str) -> Result<usize, ObserverError> {
        let mut batch = Vec::new();
        for (index, line) in input.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let event: Event = serde_json::from_str(line).map_err(|source| {
                ObserverError::Decode {
                    line: index.saturating_add(1),
                    source,
                }
            })?;
            batch.push(event);
        }
        Ok(self.extend(batch))
    }

    /// Decode a JSON array of events and append them.
    ///
    /// Malformed JSON reports the input line; a well-formed element that is
    /// not an event reports its one-based array position.
    pub fn ingest_json_array(&mut self, input: &str) -> Result<usize, ObserverError> {
        let values: Vec<serde_json::Value> =
            serde_json::from_str(input).map_err(|source| ObserverError::Decode {
                line: source.line(),
                source,
            })?;
        let mut batch = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            let event: Event =
                serde_json::from_value(value).map_err(|source| ObserverError::DecodeElement {
                    position: index.saturating_add(1),
                    source,
                })?;
            batch.push(event);
        }
        Ok(self.extend(batch))
    }

    /// Events in arrival order, oldest first.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, TimelineEvent> {
        self.events.iter()
    }

    /// Number of events held.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Maximum number of events held.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes every time an event is appended.
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Tick of the most recently appended event.
    pub fn latest_tick(&self) -> Option<u64> {
        self.events.back().map(TimelineEvent::tick)
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(TimelineConfig::default().max_events)
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a TimelineEvent;
    type IntoIter = std::collections::vec_deque::Iter<'a, TimelineEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// What the previous projection showed, for auto-follow.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FollowMark {
    matched: usize,
    newest: Option<EventId>,
}

impl FollowMark {
    fn of(view: &TimelineView) -> Self {
        Self {
            matched: view.matched_events,
            newest: view
                .groups
                .first()
                .and_then(|group| group.rows.last())
                .map(|row| row.id.clone()),
        }
    }
}

/// Inputs a cached view was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ViewKey {
    log: u64,
    session: u64,
    names: u64,
}

/// Event log plus session, with the last projection memoized.
#[derive(Debug, Clone)]
pub struct Timeline {
    log: EventLog,
    session: SessionState,
    names: NameTables,
    session_version: u64,
    names_version: u64,
    cached: Option<(ViewKey, Arc<TimelineView>)>,
    last_mark: Option<FollowMark>,
}

impl Timeline {
    /// An empty timeline using the configured capacity and session defaults.
    pub fn new(config: &TimelineConfig) -> Self {
        Self {
            log: EventLog::with_capacity(config.max_events),
            session: SessionState::from_config(config),
            names: NameTables::default(),
            session_version: 0,
            names_version: 0,
            cached: None,
            last_mark: None,
        }
    }

    /// Replace the name tables.
    #[must_use]
    pub fn with_names(mut self, names: NameTables) -> Self {
        self.set_names(names);
        self
    }

    /// The event log.
    pub const fn log(&self) -> &EventLog {
        &self.log
    }

    /// Mutable access to the event log for ingestion.
    pub const fn log_mut(&mut self) -> &mut EventLog {
        &mut self.log
    }

    /// The current session state.
    pub const fn session(&self) -> &SessionState {
        &self.session
    }

    /// The current name tables.
    pub const fn names(&self) -> &NameTables {
        &self.names
    }

    /// Append one event.
    pub fn push(&mut self, event: Event) -> bool {
        self.log.push(event)
    }

    /// Apply a user interaction to the session.
    pub fn dispatch(&mut self, action: SessionAction) {
        let next = self.session.clone().apply(action);
        if next != self.session {
            self.session = next;
            self.session_version = self.session_version.wrapping_add(1);
        }
    }

    /// Replace the name tables (e.g. after an agent is born or renamed).
    pub fn set_names(&mut self, names: NameTables) {
        if names != self.names {
            self.names = names;
            self.names_version = self.names_version.wrapping_add(1);
        }
    }

    /// The current view, re-projected only if an input changed.
    ///
    /// With auto-follow on, `follow_latest` is set whenever the number of
    /// matched events or the newest matched event differs from the previous
    /// projection. The newest event matters once the log is at capacity,
    /// where every append also evicts and the count stays flat.
    pub fn view(&mut self) -> Arc<TimelineView> {
        let key = ViewKey {
            log: self.log.version(),
            session: self.session_version,
            names: self.names_version,
        };
        if let Some((cached_key, view)) = &self.cached
            && *cached_key == key
        {
            return Arc::clone(view);
        }

        let mut view = project(&self.log, &self.session, &self.names);
        let mark = FollowMark::of(&view);
        view.follow_latest = self.session.auto_follow && self.last_mark.as_ref() != Some(&mark);
        self.last_mark = Some(mark);

        debug!(
            log_version = key.log,
            session_version = key.session,
            names_version = key.names,
            follow_latest = view.follow_latest,
            "timeline re-projected"
        );

        let view = Arc::new(view);
        self.cached = Some((key, Arc::clone(&view)));
        view
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(&TimelineConfig::default())
    }
}
