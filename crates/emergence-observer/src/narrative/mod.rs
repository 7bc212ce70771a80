//! Narrative generation.
//!
//! [`narrate`] turns one ingested event into a human-readable sentence. It
//! is total: missing or mistyped payload fields degrade to placeholder
//! tokens (`?`, `unknown reason`, `items`) instead of failing.
//!
//! Agent and location names are emphasized fragments so the presentation
//! layer decides how emphasis looks.
//!
//! # Modules
//!
//! - [`fragment`] -- The [`Narrative`] and [`Fragment`] output types
//! - [`format`] -- Reference resolution, humanizing, resource summaries
//! - [`actions`] -- Per-action sentences for the action wrappers

pub mod actions;
pub mod format;
pub mod fragment;

use emergence_types::{
    CombatDetails, EnvironmentChange, EventDetails, StructureDetails, TheftDetails,
};

pub use self::format::{humanize, summarize_resources};
pub use self::fragment::{Fragment, Narrative};

use self::format::{Line, MISSING, SOME_STRUCTURE, UNKNOWN_REASON, quantity, score};
use crate::event::TimelineEvent;
use crate::lookup::NameLookup;

/// Narrate an event against the current name tables.
#[allow(clippy::too_many_lines)]
pub fn narrate(event: &TimelineEvent, names: &dyn NameLookup) -> Narrative {
    let agent = event.agent_id();
    let location = event.location_id();
    let line = Line::new(names);

    match event.details() {
        EventDetails::TickStart => line
            .text("Tick ")
            .text(&event.tick().to_string())
            .text(" began")
            .finish(),
        EventDetails::TickEnd => line
            .text("Tick ")
            .text(&event.tick().to_string())
            .text(" ended")
            .finish(),

        EventDetails::AgentBorn(birth) => {
            let line = line.agent(agent).text(" was born");
            let line = match (&birth.parent_a, &birth.parent_b) {
                (Some(a), Some(b)) => line
                    .text(" to ")
                    .agent(Some(a))
                    .text(" and ")
                    .agent(Some(b)),
                (Some(p), None) | (None, Some(p)) => line.text(" to ").agent(Some(p)),
                (None, None) => line,
            };
            line.at(location).finish()
        }
        EventDetails::AgentDied(death) => line
            .agent(agent)
            .text(" died of ")
            .humanized(death.cause.as_deref(), UNKNOWN_REASON)
            .text(" at age ")
            .or(death.final_age.map(|age| age.to_string()).as_deref(), MISSING)
            .at(location)
            .finish(),

        EventDetails::ActionSubmitted(action) => actions::narrate_submission(action, event, names),
        EventDetails::ActionSucceeded(action) => actions::narrate_success(action, event, names),
        EventDetails::ActionRejected(rejection) => {
            let label = rejection
                .action_type
                .as_ref()
                .map(|a| humanize(a.as_str()).to_lowercase());
            let reason = rejection
                .reason
                .as_deref()
                .map(humanize)
                .or_else(|| rejection.message.clone());
            line.agent(agent)
                .text("'s ")
                .or(label.as_deref(), "action")
                .text(" was rejected: ")
                .or(reason.as_deref(), UNKNOWN_REASON)
                .finish()
        }

        EventDetails::ResourceGathered(gather) => line
            .agent(agent)
            .text(" gathered ")
            .text(&quantity(gather.quantity.as_ref()))
            .text(" ")
            .humanized(gather.resource.as_deref(), MISSING)
            .at(location)
            .finish(),
        EventDetails::ResourceConsumed(consume) => {
            let line = line.agent(agent).text(" consumed ");
            let line = match &consume.resource {
                Some(resource) if consume.consumed.is_empty() => line
                    .text(&quantity(consume.quantity.as_ref()))
                    .text(" ")
                    .humanized(Some(resource), MISSING),
                _ => line.resources(&consume.consumed),
            };
            line.finish()
        }
        EventDetails::TradeCompleted(trade) => line
            .agent(trade.agent_a.as_ref().or(agent))
            .text(" traded ")
            .resources(&trade.gave)
            .text(" with ")
            .agent(trade.agent_b.as_ref())
            .text(" for ")
            .resources(&trade.received)
            .finish(),
        EventDetails::TradeFailed(failure) => line
            .text("Trade between ")
            .agent(failure.offerer.as_ref().or(agent))
            .text(" and ")
            .agent(failure.target.as_ref())
            .text(" failed: ")
            .humanized(failure.reason.as_deref(), UNKNOWN_REASON)
            .finish(),
        EventDetails::TheftOccurred(theft) => theft_sentence(line, event, theft, true),
        EventDetails::TheftFailed(theft) => theft_sentence(line, event, theft, false),

        EventDetails::StructureBuilt(structure) => line
            .agent(agent)
            .text(" built a ")
            .humanized(structure.structure_type.as_deref(), SOME_STRUCTURE)
            .at(location)
            .finish(),
        EventDetails::StructureDestroyed(structure) => line
            .text("A ")
            .humanized(structure.structure_type.as_deref(), SOME_STRUCTURE)
            .at(location)
            .text(" was destroyed (")
            .humanized(structure.cause.as_deref(), UNKNOWN_REASON)
            .text(")")
            .finish(),
        EventDetails::StructureRepaired(structure) => repair_sentence(line, event, structure),
        EventDetails::StructureClaimed(structure) => {
            let line = line
                .agent(agent)
                .text(" claimed a ")
                .humanized(structure.structure_type.as_deref(), SOME_STRUCTURE);
            let line = match &structure.previous_owner {
                Some(owner) => line.text(" from ").agent(Some(owner)),
                None => line,
            };
            line.at(location).finish()
        }
        EventDetails::RouteImproved(route) if route.is_repair == Some(true) => line
            .agent(agent)
            .text(" repaired a ")
            .humanized(route.new_path_type.as_deref(), MISSING)
            .text(" route")
            .finish(),
        EventDetails::RouteImproved(route) => line
            .agent(agent)
            .text(" improved a route from ")
            .humanized(route.old_path_type.as_deref(), MISSING)
            .text(" to ")
            .humanized(route.new_path_type.as_deref(), MISSING)
            .finish(),
        EventDetails::RouteDegraded(route) => line
            .text("A route degraded from ")
            .humanized(route.old_path_type.as_deref(), MISSING)
            .text(" to ")
            .humanized(route.new_path_type.as_deref(), MISSING)
            .finish(),
        EventDetails::LocationDiscovered(discovery) => line
            .agent(agent)
            .text(" discovered ")
            .location(discovery.location.as_ref().or(location), "a new location")
            .finish(),

        EventDetails::KnowledgeDiscovered(knowledge) => {
            let line = line
                .agent(agent)
                .text(" discovered ")
                .or(knowledge.knowledge.as_deref(), MISSING);
            let line = match &knowledge.method {
                Some(method) => line.text(" through ").humanized(Some(method), MISSING),
                None => line,
            };
            line.finish()
        }
        EventDetails::KnowledgeTaught(teaching) => {
            let verb = if teaching.success == Some(false) {
                " failed to teach "
            } else {
                " taught "
            };
            line.agent(teaching.teacher.as_ref().or(agent))
                .text(verb)
                .or(teaching.knowledge.as_deref(), MISSING)
                .text(" to ")
                .agent(teaching.student.as_ref())
                .finish()
        }

        EventDetails::MessageSent(message) => {
            let line = line.agent(agent);
            let line = match &message.recipient {
                Some(recipient) => line.text(" told ").agent(Some(recipient)).text(": \""),
                None => line.text(" said: \""),
            };
            line.or(message.content.as_deref(), MISSING)
                .text("\"")
                .finish()
        }
        EventDetails::GroupFormed(group) => {
            let line = line
                .agent(agent)
                .text(" founded ")
                .or(group.group_name.as_deref(), MISSING);
            let line = match group.member_count {
                Some(count) => line
                    .text(" with ")
                    .text(&count.to_string())
                    .text(" members"),
                None => line,
            };
            line.finish()
        }
        EventDetails::RelationshipChanged(rel) => {
            let line = line
                .text("Relationship between ")
                .agent(rel.agent_a.as_ref().or(agent))
                .text(" and ")
                .agent(rel.agent_b.as_ref())
                .text(" changed from ")
                .text(&score(rel.old_score))
                .text(" to ")
                .text(&score(rel.new_score));
            let line = match &rel.cause {
                Some(cause) => line.text(" (").humanized(Some(cause), MISSING).text(")"),
                None => line,
            };
            line.finish()
        }
        EventDetails::RuleCreated(rule) => line
            .agent(agent)
            .text(" created the rule ")
            .or(rule.rule_name.as_deref(), MISSING)
            .finish(),
        EventDetails::EnforcementApplied(enforcement) => {
            let line = line
                .agent(agent)
                .text(" enforced a rule against ")
                .agent(enforcement.target.as_ref());
            let line = match &enforcement.consequence {
                Some(consequence) => line.text(": ").humanized(Some(consequence), MISSING),
                None => line,
            };
            line.finish()
        }
        EventDetails::CombatInitiated(combat) => line
            .agent(agent)
            .text(" attacked ")
            .agent(combat.target.as_ref())
            .at(location)
            .finish(),
        EventDetails::CombatResolved(combat) => combat_sentence(line, event, combat),

        EventDetails::WeatherChanged(change) => change_sentence(line, "Weather", change),
        EventDetails::SeasonChanged(change) => change_sentence(line, "Season", change),

        EventDetails::LedgerAnomaly(anomaly) => line
            .text("Ledger anomaly: ")
            .or(anomaly.message.as_deref(), "conservation check failed")
            .finish(),

        EventDetails::Unknown => {
            let line = line.text(event.event_type().as_str());
            let line = match agent {
                Some(_) => line.text(" by ").agent(agent),
                None => line,
            };
            line.at(location).finish()
        }
    }
}

fn theft_sentence(
    line: Line<'_>,
    event: &TimelineEvent,
    theft: &TheftDetails,
    succeeded: bool,
) -> Narrative {
    let line = line.agent(event.agent_id());
    let line = if succeeded {
        line.text(" stole ").resources(&theft.stolen).text(" from ")
    } else {
        line.text(" failed to steal from ")
    };
    line.agent(theft.victim.as_ref())
        .at(event.location_id())
        .finish()
}

fn repair_sentence(line: Line<'_>, event: &TimelineEvent, structure: &StructureDetails) -> Narrative {
    let line = line
        .agent(event.agent_id())
        .text(" repaired a ")
        .humanized(structure.structure_type.as_deref(), SOME_STRUCTURE);
    let line = match (structure.durability_before, structure.durability_after) {
        (Some(before), Some(after)) => line
            .text(" (durability ")
            .text(&before.to_string())
            .text(" to ")
            .text(&after.to_string())
            .text(")"),
        _ => line,
    };
    line.at(event.location_id()).finish()
}

fn combat_sentence(line: Line<'_>, event: &TimelineEvent, combat: &CombatDetails) -> Narrative {
    match (&combat.winner, &combat.loser) {
        (Some(winner), Some(loser)) => line
            .agent(Some(winner))
            .text(" defeated ")
            .agent(Some(loser))
            .at(event.location_id())
            .finish(),
        _ => line
            .text("Combat involving ")
            .agent(event.agent_id())
            .text(" was resolved")
            .finish(),
    }
}

fn change_sentence(line: Line<'_>, subject: &str, change: &EnvironmentChange) -> Narrative {
    let line = line.text(subject).text(" changed");
    let line = match &change.previous {
        Some(previous) => line.text(" from ").text(previous),
        None => line,
    };
    line.text(" to ")
        .or(change.current.as_deref(), MISSING)
        .finish()
}

#[cfg(test)]
mod tests {
    use emergence_types::{Event, EventType};
    use serde_json::{Value, json};

    use super::*;
    use crate::lookup::NameTables;

    fn names() -> NameTables {
        NameTables::new()
            .with_agent("a-1", "Kora")
            .with_agent("a-2", "Tam")
            .with_location("l-1", "Riverbank")
    }

    fn text_of(event_type: EventType, details: Value) -> String {
        let event = TimelineEvent::ingest(
            Event::new("e-1", 4, event_type)
                .with_agent("a-1")
                .with_location("l-1")
                .with_details(details),
        );
        narrate(&event, &names()).plain_text()
    }

    #[test]
    fn gathered_resource_reads_naturally() {
        assert_eq!(
            text_of(
                EventType::ResourceGathered,
                json!({"resource": "Wood", "quantity": 3})
            ),
            "Kora gathered 3 Wood at Riverbank"
        );
    }

    #[test]
    fn gathered_resource_with_missing_fields_uses_placeholders() {
        assert_eq!(
            text_of(EventType::ResourceGathered, json!({"quantity": "three"})),
            "Kora gathered ? ? at Riverbank"
        );
    }

    #[test]
    fn death_mentions_cause_and_age() {
        assert_eq!(
            text_of(
                EventType::AgentDied,
                json!({"cause": "OldAge", "final_age": 90})
            ),
            "Kora died of Old Age at age 90 at Riverbank"
        );
        assert_eq!(
            text_of(EventType::AgentDied, json!({})),
            "Kora died of unknown reason at age ? at Riverbank"
        );
    }

    #[test]
    fn names_are_emphasized() {
        let event = TimelineEvent::ingest(
            Event::new("e-1", 4, EventType::ResourceGathered)
                .with_agent("a-1")
                .with_location("l-1")
                .with_details(json!({"resource": "Wood", "quantity": 3})),
        );
        let narrative = narrate(&event, &names());
        assert_eq!(
            narrative.emphasized().collect::<Vec<_>>(),
            vec!["Kora", "Riverbank"]
        );
    }

    #[test]
    fn trade_summarizes_both_sides() {
        assert_eq!(
            text_of(
                EventType::TradeCompleted,
                json!({
                    "agent_a": "a-1",
                    "agent_b": "a-2",
                    "gave": {"Wood": 2},
                    "received": {"FoodBerry": 3}
                })
            ),
            "Kora traded 2 Wood with Tam for 3 Food Berry"
        );
    }

    #[test]
    fn failed_trade_without_reason() {
        assert_eq!(
            text_of(EventType::TradeFailed, json!({"target_id": "a-2"})),
            "Trade between Kora and Tam failed: unknown reason"
        );
    }

    #[test]
    fn rejection_names_action_and_reason() {
        assert_eq!(
            text_of(
                EventType::ActionRejected,
                json!({"action_type": "FarmPlant", "reason": "InsufficientEnergy"})
            ),
            "Kora's farm plant was rejected: Insufficient Energy"
        );
    }

    #[test]
    fn structure_destroyed_reports_cause() {
        assert_eq!(
            text_of(
                EventType::StructureDestroyed,
                json!({"structure_type": "BasicHut", "cause": "Decay"})
            ),
            "A Basic Hut at Riverbank was destroyed (Decay)"
        );
    }

    #[test]
    fn consumption_falls_back_to_items() {
        assert_eq!(
            text_of(EventType::ResourceConsumed, json!({})),
            "Kora consumed items"
        );
        assert_eq!(
            text_of(
                EventType::ResourceConsumed,
                json!({"resource": "Water", "quantity": 1})
            ),
            "Kora consumed 1 Water"
        );
    }

    #[test]
    fn message_with_and_without_recipient() {
        assert_eq!(
            text_of(
                EventType::MessageSent,
                json!({"recipient_id": "a-2", "content": "hello"})
            ),
            "Kora told Tam: \"hello\""
        );
        assert_eq!(
            text_of(EventType::MessageSent, json!({"content": "hello all"})),
            "Kora said: \"hello all\""
        );
    }

    #[test]
    fn season_change_reads_from_and_to() {
        assert_eq!(
            text_of(
                EventType::SeasonChanged,
                json!({"old_season": "Autumn", "new_season": "Winter"})
            ),
            "Season changed from Autumn to Winter"
        );
    }

    #[test]
    fn relationship_scores_are_formatted() {
        assert_eq!(
            text_of(
                EventType::RelationshipChanged,
                json!({"agent_b": "a-2", "old_score": "0.30", "new_score": "0.45"})
            ),
            "Relationship between Kora and Tam changed from 0.3 to 0.45"
        );
    }

    #[test]
    fn unknown_type_omits_absent_clauses() {
        let event = TimelineEvent::ingest(
            Event::new("e-9", 2, EventType::from("CustomRitual")).with_agent("a-1"),
        );
        assert_eq!(narrate(&event, &names()).plain_text(), "CustomRitual by Kora");

        let bare = TimelineEvent::ingest(Event::new("e-10", 2, EventType::from("Omen")));
        assert_eq!(narrate(&bare, &names()).plain_text(), "Omen");
    }

    #[test]
    fn unresolved_location_shows_id_prefix() {
        let event = TimelineEvent::ingest(
            Event::new("e-11", 2, EventType::StructureBuilt)
                .with_agent("a-1")
                .with_location("0191f3a2-aaaa-bbbb")
                .with_details(json!({"structure_type": "Campfire"})),
        );
        assert_eq!(
            narrate(&event, &names()).plain_text(),
            "Kora built a Campfire at 0191f3a2"
        );
    }

    #[test]
    fn every_known_type_narrates_with_empty_payload() {
        for event_type in EventType::KNOWN {
            let text = text_of(event_type.clone(), json!({}));
            assert!(!text.is_empty(), "{event_type} produced an empty narrative");
        }
    }
}
