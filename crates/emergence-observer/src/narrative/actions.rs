//! Sentences for completed actions.
//!
//! `ActionSucceeded` wraps any of the agent actions, so it gets a second
//! dispatch on the embedded action payload. Actions without a dedicated
//! sentence read `<agent> performed <action>`.

use emergence_types::{ActionDetails, ActionType};

use super::fragment::Narrative;
use super::format::{Line, MISSING, SOME_STRUCTURE, humanize, number};
use crate::event::TimelineEvent;
use crate::lookup::NameLookup;

/// Narrate a successful action.
#[allow(clippy::too_many_lines)]
pub fn narrate_success(
    action: &ActionDetails,
    event: &TimelineEvent,
    names: &dyn NameLookup,
) -> Narrative {
    let line = Line::new(names).agent(event.agent_id());
    match action {
        ActionDetails::Gather { resource, quantity } => {
            let line = line.text(" gathered ");
            let line = match quantity {
                Some(qty) => line.text(&number(qty)).text(" "),
                None => line,
            };
            line.humanized(resource.as_deref(), MISSING)
                .at(event.location_id())
                .finish()
        }
        ActionDetails::Eat { food } => line
            .text(" ate ")
            .humanized(food.as_deref(), MISSING)
            .finish(),
        ActionDetails::Drink => line.text(" drank water").finish(),
        ActionDetails::Rest => line.text(" rested").finish(),
        ActionDetails::Move { destination } => line
            .text(" moved to ")
            .location(destination.as_ref(), MISSING)
            .finish(),
        ActionDetails::Build { structure_type } => line
            .text(" built a ")
            .humanized(structure_type.as_deref(), SOME_STRUCTURE)
            .at(event.location_id())
            .finish(),
        ActionDetails::Teach { student, knowledge } => line
            .text(" taught ")
            .or(knowledge.as_deref(), MISSING)
            .text(" to ")
            .agent(student.as_ref())
            .finish(),
        ActionDetails::TradeOffer {
            target,
            offered,
            requested,
        } => line
            .text(" offered ")
            .resources(offered)
            .text(" to ")
            .agent(target.as_ref())
            .text(" for ")
            .resources(requested)
            .finish(),
        ActionDetails::TradeAccept => line.text(" accepted a trade").finish(),
        ActionDetails::TradeReject => line.text(" rejected a trade").finish(),
        ActionDetails::Reproduce { partner } => line
            .text(" had a child with ")
            .agent(partner.as_ref())
            .finish(),
        ActionDetails::Communicate { target, message } => line
            .text(" told ")
            .agent(target.as_ref())
            .text(": \"")
            .or(message.as_deref(), MISSING)
            .text("\"")
            .finish(),
        ActionDetails::Broadcast { message } => line
            .text(" announced: \"")
            .or(message.as_deref(), MISSING)
            .text("\"")
            .finish(),
        ActionDetails::FormGroup { name } => line
            .text(" formed the group ")
            .or(name.as_deref(), MISSING)
            .finish(),
        ActionDetails::FarmPlant => line.text(" planted crops").finish(),
        ActionDetails::FarmHarvest { harvested } => {
            line.text(" harvested ").resources(harvested).finish()
        }
        ActionDetails::Craft { output } => line
            .text(" crafted ")
            .humanized(output.as_deref(), MISSING)
            .finish(),
        ActionDetails::Mine => line.text(" mined ore").finish(),
        ActionDetails::Smelt => line.text(" smelted metal").finish(),
        ActionDetails::Write { knowledge } => line
            .text(" wrote down ")
            .or(knowledge.as_deref(), MISSING)
            .finish(),
        ActionDetails::Read { knowledge } => line
            .text(" read about ")
            .or(knowledge.as_deref(), MISSING)
            .finish(),
        ActionDetails::Repair { structure_type } => line
            .text(" repaired a ")
            .humanized(structure_type.as_deref(), SOME_STRUCTURE)
            .finish(),
        ActionDetails::Demolish { structure_type } => line
            .text(" demolished a ")
            .humanized(structure_type.as_deref(), SOME_STRUCTURE)
            .finish(),
        ActionDetails::ImproveRoute {
            path_type,
            destination,
        } => {
            let line = line.text(" improved a route");
            let line = match destination {
                Some(_) => line
                    .text(" toward ")
                    .location(destination.as_ref(), MISSING),
                None => line,
            };
            let line = match path_type {
                Some(path) => line.text(" to a ").humanized(Some(path), MISSING),
                None => line,
            };
            line.finish()
        }
        ActionDetails::Claim { structure_type } => line
            .text(" claimed a ")
            .humanized(structure_type.as_deref(), SOME_STRUCTURE)
            .finish(),
        ActionDetails::Legislate { rule_name } => line
            .text(" enacted the rule ")
            .or(rule_name.as_deref(), MISSING)
            .finish(),
        ActionDetails::Enforce { target } => line
            .text(" enforced a rule against ")
            .agent(target.as_ref())
            .finish(),
        ActionDetails::Other { action_type } => line
            .text(" performed ")
            .or(
                action_type.as_ref().map(ActionType::lowercase).as_deref(),
                MISSING,
            )
            .finish(),
    }
}

/// Narrate a submitted (not yet resolved) action.
pub fn narrate_submission(
    action: &ActionDetails,
    event: &TimelineEvent,
    names: &dyn NameLookup,
) -> Narrative {
    let label = action
        .action_type()
        .map(|a| humanize(a.as_str()).to_lowercase());
    Line::new(names)
        .agent(event.agent_id())
        .text(" submitted ")
        .or(label.as_deref(), MISSING)
        .finish()
}
