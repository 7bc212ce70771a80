//! Integration tests for the timeline engine.
//!
//! Exercise the public pipeline end to end: ingestion from wire JSON,
//! classification, narration, filtering, grouping, and the memoized view.

#![allow(clippy::unwrap_used)]

use emergence_observer::{
    Category, EventLog, FilterCriteria, NameTables, SessionAction, SessionState, Severity,
    SeveritySet, Timeline, TimelineConfig, TimelineEvent, classify, filter_events,
    group_by_tick, narrate, project,
};
use emergence_observer::severity::classify_parts;
use emergence_types::{ActionType, Era, Event, EventType, Season, Weather, WorldContext};
use serde_json::json;

const KORA: &str = "0191f3a2-0000-7000-8000-000000000001";
const TAM: &str = "0191f3a2-0000-7000-8000-000000000002";
const RIVERBANK: &str = "0191f3a2-0000-7000-8000-0000000000aa";

fn names() -> NameTables {
    NameTables::new()
        .with_agent(KORA, "Kora")
        .with_agent(TAM, "Tam")
        .with_location(RIVERBANK, "Riverbank")
}

fn context(population: u32) -> WorldContext {
    WorldContext {
        tick: None,
        era: Era::Primitive,
        season: Season::Spring,
        weather: Weather::Clear,
        population,
    }
}

/// A small mixed log spanning three ticks.
fn mixed_log() -> EventLog {
    let mut log = EventLog::default();
    let input = [
        json!({"id": "e01", "tick": 8, "event_type": "TickStart"}),
        json!({"id": "e02", "tick": 8, "event_type": "ResourceGathered", "agent_id": KORA,
               "location_id": RIVERBANK, "details": {"resource": "Wood", "quantity": 3}}),
        json!({"id": "e03", "tick": 8, "event_type": "TickEnd"}),
        json!({"id": "e04", "tick": 9, "event_type": "TickStart"}),
        json!({"id": "e05", "tick": 9, "event_type": "ActionSubmitted", "agent_id": TAM,
               "details": {"action_type": "Build"}}),
        json!({"id": "e06", "tick": 9, "event_type": "ActionSucceeded", "agent_id": TAM,
               "location_id": RIVERBANK,
               "details": {"action_type": "Build", "parameters": {"structure_type": "BasicHut"}}}),
        json!({"id": "e07", "tick": 9, "event_type": "TradeFailed", "agent_id": KORA,
               "details": {"target_id": TAM, "reason": "InsufficientResources"}}),
        json!({"id": "e08", "tick": 9, "event_type": "TickEnd"}),
        json!({"id": "e09", "tick": 10, "event_type": "AgentDied", "agent_id": KORA,
               "details": {"cause": "Starvation", "final_age": 42}}),
        json!({"id": "e10", "tick": 10, "event_type": "CustomRitual", "agent_id": TAM}),
    ];
    let lines: Vec<String> = input.iter().map(ToString::to_string).collect();
    log.ingest_json_lines(&lines.join("\n")).unwrap();
    log
}

fn single(event: Event) -> TimelineEvent {
    TimelineEvent::ingest(event)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_gathered_wood() {
    let event = single(
        Event::new("a", 5, EventType::ResourceGathered)
            .with_agent(KORA)
            .with_location(RIVERBANK)
            .with_details(json!({"resource": "Wood", "quantity": 3})),
    );
    assert_eq!(
        narrate(&event, &names()).plain_text(),
        "Kora gathered 3 Wood at Riverbank"
    );
    assert_eq!(classify(&event), Severity::Routine);
    assert_eq!(Category::of(event.event_type()), Some(Category::Economy));
}

#[test]
fn scenario_starvation_death() {
    let event = single(
        Event::new("b", 7, EventType::AgentDied)
            .with_agent(KORA)
            .with_details(json!({"cause": "Starvation", "final_age": 42})),
    );
    assert_eq!(classify(&event), Severity::Critical);
    let text = narrate(&event, &names()).plain_text();
    assert!(text.contains("Kora"), "{text}");
    assert!(text.contains("42"), "{text}");
    assert!(text.contains("Starvation"), "{text}");
}

#[test]
fn scenario_unrecognised_event_type() {
    let event = single(Event::new("c", 3, EventType::from("CustomRitual")).with_agent(KORA));
    assert_eq!(classify(&event), Severity::Info);
    assert_eq!(narrate(&event, &names()).plain_text(), "CustomRitual by Kora");
}

#[test]
fn scenario_ticks_group_newest_first() {
    let events = [
        single(Event::new("x", 9, EventType::MessageSent).with_context(context(4))),
        single(Event::new("y", 10, EventType::MessageSent).with_context(context(5))),
        single(Event::new("z", 9, EventType::MessageSent).with_context(context(6))),
    ];
    let refs: Vec<&TimelineEvent> = events.iter().collect();
    let groups = group_by_tick(&refs);

    let ticks: Vec<u64> = groups.iter().map(|g| g.tick).collect();
    assert_eq!(ticks, vec![10, 9]);

    let nine = groups.iter().find(|g| g.tick == 9).unwrap();
    let ids: Vec<&str> = nine.events.iter().map(|e| e.id().as_str()).collect();
    assert_eq!(ids, vec!["x", "z"]);
    assert_eq!(nine.environment.population, Some(4));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn classify_is_total_over_known_tags() {
    for event_type in EventType::KNOWN {
        let _ = classify_parts(event_type, None);
        for action in ActionType::KNOWN {
            let severity = classify_parts(event_type, Some(action));
            assert!(Severity::ALL.contains(&severity));
        }
    }
    let odd = ActionType::from("Juggle");
    assert_eq!(
        classify_parts(&EventType::ActionSucceeded, Some(&odd)),
        Severity::Info
    );
}

#[test]
fn grouping_partitions_every_filter_state() {
    let log = mixed_log();
    let names = names();
    let criteria_list = [
        FilterCriteria::default(),
        FilterCriteria {
            category: Some(Category::System),
            ..FilterCriteria::default()
        },
        FilterCriteria {
            severities: [Severity::Warning, Severity::Info].into_iter().collect(),
            ..FilterCriteria::default()
        },
        FilterCriteria {
            search: "kora".to_owned(),
            ..FilterCriteria::default()
        },
    ];

    for criteria in &criteria_list {
        let filtered = filter_events(&log, criteria, &names);
        let groups = group_by_tick(&filtered);

        let mut flattened: Vec<&str> = groups
            .iter()
            .flat_map(|g| g.events.iter().map(|e| e.id().as_str()))
            .collect();
        let mut expected: Vec<&str> = filtered.iter().map(|e| e.id().as_str()).collect();
        flattened.sort_unstable();
        expected.sort_unstable();
        assert_eq!(flattened, expected);

        assert!(
            groups
                .windows(2)
                .all(|w| matches!(w, [newer, older] if newer.tick > older.tick))
        );
    }
}

#[test]
fn filtering_is_idempotent() {
    let log = mixed_log();
    let names = names();
    let criteria = FilterCriteria {
        severities: SeveritySet::all().toggled(Severity::Routine),
        search: "a".to_owned(),
        ..FilterCriteria::default()
    };
    let once = filter_events(&log, &criteria, &names);
    let twice = filter_events(once.iter().copied(), &criteria, &names);
    assert_eq!(once, twice);
}

#[test]
fn empty_search_equals_skipping_the_stage() {
    let log = mixed_log();
    let names = names();
    for category in Category::ALL.into_iter().map(Some).chain([None]) {
        let criteria = FilterCriteria {
            category,
            ..FilterCriteria::default()
        };
        let with_empty = filter_events(&log, &criteria, &names);
        let without: Vec<&TimelineEvent> = log
            .iter()
            .filter(|e| emergence_observer::filter::matches_category(e, category))
            .filter(|e| emergence_observer::filter::matches_severity(e, &criteria.severities))
            .collect();
        assert_eq!(with_empty, without);
    }
}

#[test]
fn default_view_hides_tick_boundaries() {
    let log = mixed_log();
    let view = project(&log, &SessionState::default(), &names());
    let types: Vec<&str> = view
        .groups
        .iter()
        .flat_map(|g| g.rows.iter().map(|r| r.event_type.as_str()))
        .collect();
    assert!(!types.contains(&"TickStart"));
    assert!(!types.contains(&"TickEnd"));
    assert_eq!(view.total_events, 10);
    assert_eq!(view.matched_events, 6);
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

#[test]
fn submitted_then_succeeded_keep_their_order() {
    let log = mixed_log();
    let view = project(&log, &SessionState::default(), &names());
    let tick_nine = view.groups.iter().find(|g| g.tick == 9).unwrap();
    let narratives: Vec<String> = tick_nine
        .rows
        .iter()
        .map(|r| r.narrative.plain_text())
        .collect();
    assert_eq!(
        narratives,
        vec![
            "Tam submitted build",
            "Tam built a Basic Hut at Riverbank",
            "Trade between Kora and Tam failed: Insufficient Resources",
        ]
    );
}

#[test]
fn timeline_reacts_to_session_changes() {
    let mut timeline = Timeline::new(&TimelineConfig::default()).with_names(names());
    let log = mixed_log();
    for event in &log {
        timeline.push(event.raw().clone());
    }

    let view = timeline.view();
    assert_eq!(view.matched_events, 6);
    assert!(view.follow_latest);

    timeline.dispatch(SessionAction::SetCategory(Some(Category::Lifecycle)));
    let lifecycle = timeline.view();
    assert_eq!(lifecycle.matched_events, 1);
    assert_eq!(
        lifecycle.groups.first().map(|g| g.tick),
        Some(10)
    );

    timeline.dispatch(SessionAction::SetCategory(None));
    timeline.dispatch(SessionAction::SetSearch("ritual".to_owned()));
    let search = timeline.view();
    assert_eq!(search.matched_events, 1);
    let row = search.groups.first().and_then(|g| g.rows.first()).unwrap();
    assert_eq!(row.event_type, "CustomRitual");
    assert_eq!(row.category, None);
    assert_eq!(row.narrative.plain_text(), "CustomRitual by Tam");
}

#[test]
fn stale_names_fall_back_to_id_prefix() {
    let log = mixed_log();
    let view = project(&log, &SessionState::default(), &NameTables::new());
    let death = view
        .groups
        .first()
        .and_then(|g| g.rows.iter().find(|r| r.event_type == "AgentDied"))
        .unwrap();
    assert!(death.narrative.plain_text().starts_with("0191f3a2 died of"));
    assert_eq!(death.narrative.emphasized().count(), 0);
}
