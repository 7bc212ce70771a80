//! Typed event payloads.
//!
//! The simulation ships each event's payload as loosely-shaped JSON whose
//! fields depend on the event type (and, for the two action wrappers, on the
//! embedded `action_type`). [`EventDetails::parse`] validates that payload
//! once, at ingestion, into a closed tagged union so downstream consumers
//! pattern-match instead of probing optional JSON keys.
//!
//! Parsing is lenient by contract: a missing or mistyped field becomes
//! `None` (or an empty [`ResourceBundle`]) and never an error.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::enums::{ActionType, EventType};
use crate::ids::{AgentId, LocationId};

// ---------------------------------------------------------------------------
// Field access
// ---------------------------------------------------------------------------

/// Layered, read-only view over one or more JSON objects.
///
/// Lookups try each layer in order and return the first hit. Non-object
/// layers are ignored.
struct Fields<'a> {
    layers: Vec<&'a Map<String, Value>>,
}

impl<'a> Fields<'a> {
    fn of(value: &'a Value) -> Self {
        Self {
            layers: value.as_object().into_iter().collect(),
        }
    }

    /// Layers for an action wrapper: the payload itself, then its
    /// `parameters`, then its `outcome` (and the outcome's own `details`).
    ///
    /// `parameters` may be externally tagged (`{"Gather": {...}}`), in which
    /// case the inner object is used.
    fn of_action(value: &'a Value, tag: Option<&str>) -> Self {
        let mut layers: Vec<&'a Map<String, Value>> = value.as_object().into_iter().collect();
        if let Some(params) = value.get("parameters").and_then(Value::as_object) {
            let tagged = tag
                .and_then(|t| params.get(t))
                .and_then(Value::as_object)
                .filter(|_| params.len() == 1);
            layers.push(tagged.unwrap_or(params));
        }
        if let Some(outcome) = value.get("outcome").and_then(Value::as_object) {
            layers.push(outcome);
            if let Some(inner) = outcome.get("details").and_then(Value::as_object) {
                layers.push(inner);
            }
        }
        Self { layers }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.layers
            .iter()
            .copied()
            .find_map(|layer| layer.get(key).filter(|v| !v.is_null()))
    }

    fn first(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter().find_map(|key| self.get(key))
    }

    fn text(&self, keys: &[&str]) -> Option<String> {
        self.first(keys)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    }

    /// Decimals arrive as JSON strings (the ledger's encoding) or numbers.
    fn decimal(&self, keys: &[&str]) -> Option<Decimal> {
        match self.first(keys)? {
            Value::String(s) => Decimal::from_str(s).ok(),
            Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
            _ => None,
        }
    }

    fn number(&self, keys: &[&str]) -> Option<Number> {
        self.first(keys).and_then(Value::as_number).cloned()
    }

    fn unsigned(&self, keys: &[&str]) -> Option<u64> {
        self.first(keys).and_then(Value::as_u64)
    }

    fn flag(&self, keys: &[&str]) -> Option<bool> {
        self.first(keys).and_then(Value::as_bool)
    }

    fn agent(&self, keys: &[&str]) -> Option<AgentId> {
        self.text(keys).map(AgentId::from)
    }

    fn location(&self, keys: &[&str]) -> Option<LocationId> {
        self.text(keys).map(LocationId::from)
    }

    fn bundle(&self, keys: &[&str]) -> ResourceBundle {
        self.first(keys)
            .map(ResourceBundle::from_value)
            .unwrap_or_default()
    }

    fn count(&self, keys: &[&str]) -> Option<u64> {
        match self.first(keys)? {
            Value::Array(items) => u64::try_from(items.len()).ok(),
            Value::Number(n) => n.as_u64(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Resource bundles
// ---------------------------------------------------------------------------

/// One resource entry with a strictly positive quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceAmount {
    /// Resource name as emitted (e.g. `FoodBerry`).
    pub resource: String,
    /// Quantity, kept in its original numeric form.
    pub quantity: Number,
}

/// A resource-name to quantity payload, reduced to positive numeric entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceBundle {
    entries: Vec<ResourceAmount>,
}

impl ResourceBundle {
    /// Build a bundle from a JSON object, dropping non-numeric and
    /// non-positive quantities. Anything other than an object is empty.
    pub fn from_value(value: &Value) -> Self {
        let entries = value
            .as_object()
            .map(|map| {
                map.iter()
                    .filter_map(|(resource, qty)| {
                        let quantity = qty.as_number()?;
                        is_positive(quantity).then(|| ResourceAmount {
                            resource: resource.clone(),
                            quantity: quantity.clone(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { entries }
    }

    /// The retained entries, in payload key order.
    pub fn entries(&self) -> &[ResourceAmount] {
        &self.entries
    }

    /// Whether no positive entries remain.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_positive(n: &Number) -> bool {
    if let Some(u) = n.as_u64() {
        return u > 0;
    }
    if n.is_i64() {
        return false;
    }
    n.as_f64().is_some_and(|f| f > 0.0)
}

// ---------------------------------------------------------------------------
// Per-event payloads
// ---------------------------------------------------------------------------

/// Payload of `AgentBorn`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BirthDetails {
    /// Name given to the newborn, if the emitter includes it.
    pub name: Option<String>,
    /// First parent.
    pub parent_a: Option<AgentId>,
    /// Second parent.
    pub parent_b: Option<AgentId>,
    /// Generation number.
    pub generation: Option<u64>,
}

/// Payload of `AgentDied`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeathDetails {
    /// Cause of death.
    pub cause: Option<String>,
    /// Age at death in ticks.
    pub final_age: Option<u64>,
    /// Inventory dropped at the death location.
    pub inventory_dropped: ResourceBundle,
}

/// Payload of `ActionRejected`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RejectionDetails {
    /// The action that was rejected.
    pub action_type: Option<ActionType>,
    /// Rejection reason code.
    pub reason: Option<String>,
    /// Human-readable explanation.
    pub message: Option<String>,
}

/// Payload of `ResourceGathered`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GatherDetails {
    /// Resource gathered.
    pub resource: Option<String>,
    /// Quantity gathered.
    pub quantity: Option<Number>,
}

/// Payload of `ResourceConsumed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsumeDetails {
    /// Single consumed resource, when emitted in scalar form.
    pub resource: Option<String>,
    /// Quantity of the single resource.
    pub quantity: Option<Number>,
    /// Multi-resource form.
    pub consumed: ResourceBundle,
}

/// Payload of `TradeCompleted`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TradeDetails {
    /// First party.
    pub agent_a: Option<AgentId>,
    /// Second party.
    pub agent_b: Option<AgentId>,
    /// Resources given by the first party.
    pub gave: ResourceBundle,
    /// Resources received by the first party.
    pub received: ResourceBundle,
}

/// Payload of `TradeFailed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TradeFailureDetails {
    /// Agent who proposed the trade.
    pub offerer: Option<AgentId>,
    /// Agent who was the target.
    pub target: Option<AgentId>,
    /// Why the trade failed.
    pub reason: Option<String>,
}

/// Payload shared by structure events (built, destroyed, repaired, claimed).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructureDetails {
    /// Structure type tag (e.g. `BasicHut`).
    pub structure_type: Option<String>,
    /// How the structure was destroyed.
    pub cause: Option<String>,
    /// Durability before a repair.
    pub durability_before: Option<u64>,
    /// Durability after a repair.
    pub durability_after: Option<u64>,
    /// Previous owner of a claimed structure.
    pub previous_owner: Option<AgentId>,
    /// Materials used or salvaged.
    pub materials: ResourceBundle,
}

/// Payload shared by route events (improved, degraded).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteDetails {
    /// Path type before the change (e.g. `DirtTrail`).
    pub old_path_type: Option<String>,
    /// Path type after the change.
    pub new_path_type: Option<String>,
    /// Whether an improvement was a durability repair.
    pub is_repair: Option<bool>,
}

/// Payload of `LocationDiscovered`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveryDetails {
    /// The discovered location, when different from the event's own location.
    pub location: Option<LocationId>,
}

/// Payload of `KnowledgeDiscovered`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KnowledgeDetails {
    /// Concept discovered.
    pub knowledge: Option<String>,
    /// How it was discovered.
    pub method: Option<String>,
}

/// Payload of `KnowledgeTaught`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeachingDetails {
    /// Concept taught.
    pub knowledge: Option<String>,
    /// Teaching agent.
    pub teacher: Option<AgentId>,
    /// Learning agent.
    pub student: Option<AgentId>,
    /// Whether the teaching succeeded.
    pub success: Option<bool>,
}

/// Payload of `MessageSent`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageDetails {
    /// Direct recipient, absent for broadcasts.
    pub recipient: Option<AgentId>,
    /// Message content.
    pub content: Option<String>,
}

/// Payload of `GroupFormed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupDetails {
    /// Group display name.
    pub group_name: Option<String>,
    /// Number of members including the founder.
    pub member_count: Option<u64>,
}

/// Payload of `RelationshipChanged`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelationshipDetails {
    /// First agent.
    pub agent_a: Option<AgentId>,
    /// Second agent.
    pub agent_b: Option<AgentId>,
    /// Score before the change.
    pub old_score: Option<Decimal>,
    /// Score after the change.
    pub new_score: Option<Decimal>,
    /// What caused the change.
    pub cause: Option<String>,
}

/// Payload of `RuleCreated`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleDetails {
    /// Rule display name.
    pub rule_name: Option<String>,
    /// Rule description.
    pub description: Option<String>,
}

/// Payload of `EnforcementApplied`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnforcementDetails {
    /// Agent the rule was enforced against.
    pub target: Option<AgentId>,
    /// Consequence applied.
    pub consequence: Option<String>,
}

/// Payload shared by `WeatherChanged` and `SeasonChanged`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnvironmentChange {
    /// Previous value.
    pub previous: Option<String>,
    /// New value.
    pub current: Option<String>,
}

/// Payload shared by theft events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TheftDetails {
    /// Victim of the theft.
    pub victim: Option<AgentId>,
    /// Resources taken.
    pub stolen: ResourceBundle,
}

/// Payload shared by combat events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CombatDetails {
    /// Defender.
    pub target: Option<AgentId>,
    /// Winner, once resolved.
    pub winner: Option<AgentId>,
    /// Loser, once resolved.
    pub loser: Option<AgentId>,
}

/// Payload of `LedgerAnomaly`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnomalyDetails {
    /// Description of the violation.
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Action payloads
// ---------------------------------------------------------------------------

/// Payload of the action wrappers, keyed by the embedded `action_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ActionDetails {
    /// Collect resources.
    Gather {
        /// Resource gathered.
        resource: Option<String>,
        /// Quantity gathered.
        quantity: Option<Number>,
    },
    /// Consume food.
    Eat {
        /// Food eaten.
        food: Option<String>,
    },
    /// Consume water.
    Drink,
    /// Recover energy.
    Rest,
    /// Travel.
    Move {
        /// Destination location.
        destination: Option<LocationId>,
    },
    /// Construct a structure.
    Build {
        /// Structure type tag.
        structure_type: Option<String>,
    },
    /// Transfer knowledge.
    Teach {
        /// Student.
        student: Option<AgentId>,
        /// Concept taught.
        knowledge: Option<String>,
    },
    /// Propose a trade.
    TradeOffer {
        /// Counterparty.
        target: Option<AgentId>,
        /// Resources offered.
        offered: ResourceBundle,
        /// Resources requested.
        requested: ResourceBundle,
    },
    /// Accept a trade.
    TradeAccept,
    /// Reject a trade.
    TradeReject,
    /// Have a child.
    Reproduce {
        /// Partner.
        partner: Option<AgentId>,
    },
    /// Direct message.
    Communicate {
        /// Recipient.
        target: Option<AgentId>,
        /// Message content.
        message: Option<String>,
    },
    /// Location-wide message.
    Broadcast {
        /// Message content.
        message: Option<String>,
    },
    /// Found a group.
    FormGroup {
        /// Group name.
        name: Option<String>,
    },
    /// Plant crops.
    FarmPlant,
    /// Harvest crops.
    FarmHarvest {
        /// Resources harvested.
        harvested: ResourceBundle,
    },
    /// Craft goods.
    Craft {
        /// Item produced.
        output: Option<String>,
    },
    /// Extract ore.
    Mine,
    /// Smelt ore.
    Smelt,
    /// Write knowledge to a library.
    Write {
        /// Concept written.
        knowledge: Option<String>,
    },
    /// Read knowledge from a library.
    Read {
        /// Concept read.
        knowledge: Option<String>,
    },
    /// Repair a structure.
    Repair {
        /// Structure type tag.
        structure_type: Option<String>,
    },
    /// Demolish a structure.
    Demolish {
        /// Structure type tag.
        structure_type: Option<String>,
    },
    /// Upgrade a route.
    ImproveRoute {
        /// Path type after the upgrade.
        path_type: Option<String>,
        /// Route destination.
        destination: Option<LocationId>,
    },
    /// Claim a structure.
    Claim {
        /// Structure type tag.
        structure_type: Option<String>,
    },
    /// Create a rule.
    Legislate {
        /// Rule name.
        rule_name: Option<String>,
    },
    /// Enforce a rule.
    Enforce {
        /// Agent the rule is enforced against.
        target: Option<AgentId>,
    },
    /// Any action without a dedicated payload, including unknown tags.
    Other {
        /// The action tag, when present.
        action_type: Option<ActionType>,
    },
}

impl ActionDetails {
    /// Parse an action wrapper payload.
    pub fn parse(details: &Value) -> Self {
        let action_type = details
            .get("action_type")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(ActionType::from);
        let f = Fields::of_action(details, action_type.as_ref().map(ActionType::as_str));

        let Some(action_type) = action_type else {
            return Self::Other { action_type: None };
        };

        match action_type {
            ActionType::Gather => {
                let resource = f.text(&["resource"]);
                let quantity = f.number(&["quantity"]).or_else(|| {
                    resource.as_deref().and_then(|r| {
                        f.get("resource_changes")
                            .and_then(|changes| changes.get(r))
                            .and_then(Value::as_number)
                            .filter(|n| is_positive(n))
                            .cloned()
                    })
                });
                Self::Gather { resource, quantity }
            }
            ActionType::Eat => Self::Eat {
                food: f.text(&["food_type", "food", "resource"]),
            },
            ActionType::Drink => Self::Drink,
            ActionType::Rest => Self::Rest,
            ActionType::Move => Self::Move {
                destination: f.location(&["destination", "destination_id", "to_location"]),
            },
            ActionType::Build => Self::Build {
                structure_type: f.text(&["structure_type"]),
            },
            ActionType::Teach => Self::Teach {
                student: f.agent(&["target_agent", "student_id"]),
                knowledge: f.text(&["knowledge"]),
            },
            ActionType::TradeOffer => Self::TradeOffer {
                target: f.agent(&["target_agent", "target_id"]),
                offered: f.bundle(&["offer", "offered_resources"]),
                requested: f.bundle(&["request", "requested_resources"]),
            },
            ActionType::TradeAccept => Self::TradeAccept,
            ActionType::TradeReject => Self::TradeReject,
            ActionType::Reproduce => Self::Reproduce {
                partner: f.agent(&["partner_agent", "partner_id"]),
            },
            ActionType::Communicate => Self::Communicate {
                target: f.agent(&["target_agent", "recipient_id"]),
                message: f.text(&["message", "content"]),
            },
            ActionType::Broadcast => Self::Broadcast {
                message: f.text(&["message", "content"]),
            },
            ActionType::FormGroup => Self::FormGroup {
                name: f.text(&["name", "group_name"]),
            },
            ActionType::FarmPlant => Self::FarmPlant,
            ActionType::FarmHarvest => Self::FarmHarvest {
                harvested: f.bundle(&["harvested", "resource_changes"]),
            },
            ActionType::Craft => Self::Craft {
                output: f.text(&["output", "item"]),
            },
            ActionType::Mine => Self::Mine,
            ActionType::Smelt => Self::Smelt,
            ActionType::Write => Self::Write {
                knowledge: f.text(&["knowledge"]),
            },
            ActionType::Read => Self::Read {
                knowledge: f.text(&["knowledge"]),
            },
            ActionType::Repair => Self::Repair {
                structure_type: f.text(&["structure_type"]),
            },
            ActionType::Demolish => Self::Demolish {
                structure_type: f.text(&["structure_type"]),
            },
            ActionType::ImproveRoute => Self::ImproveRoute {
                path_type: f.text(&["new_path_type", "path_type"]),
                destination: f.location(&["destination"]),
            },
            ActionType::Claim => Self::Claim {
                structure_type: f.text(&["structure_type"]),
            },
            ActionType::Legislate => Self::Legislate {
                rule_name: f.text(&["rule_name", "name"]),
            },
            ActionType::Enforce => Self::Enforce {
                target: f.agent(&["target_agent", "target"]),
            },
            other => Self::Other {
                action_type: Some(other),
            },
        }
    }

    /// The action tag this payload was parsed under.
    pub fn action_type(&self) -> Option<ActionType> {
        let tag = match self {
            Self::Gather { .. } => ActionType::Gather,
            Self::Eat { .. } => ActionType::Eat,
            Self::Drink => ActionType::Drink,
            Self::Rest => ActionType::Rest,
            Self::Move { .. } => ActionType::Move,
            Self::Build { .. } => ActionType::Build,
            Self::Teach { .. } => ActionType::Teach,
            Self::TradeOffer { .. } => ActionType::TradeOffer,
            Self::TradeAccept => ActionType::TradeAccept,
            Self::TradeReject => ActionType::TradeReject,
            Self::Reproduce { .. } => ActionType::Reproduce,
            Self::Communicate { .. } => ActionType::Communicate,
            Self::Broadcast { .. } => ActionType::Broadcast,
            Self::FormGroup { .. } => ActionType::FormGroup,
            Self::FarmPlant => ActionType::FarmPlant,
            Self::FarmHarvest { .. } => ActionType::FarmHarvest,
            Self::Craft { .. } => ActionType::Craft,
            Self::Mine => ActionType::Mine,
            Self::Smelt => ActionType::Smelt,
            Self::Write { .. } => ActionType::Write,
            Self::Read { .. } => ActionType::Read,
            Self::Repair { .. } => ActionType::Repair,
            Self::Demolish { .. } => ActionType::Demolish,
            Self::ImproveRoute { .. } => ActionType::ImproveRoute,
            Self::Claim { .. } => ActionType::Claim,
            Self::Legislate { .. } => ActionType::Legislate,
            Self::Enforce { .. } => ActionType::Enforce,
            Self::Other { action_type } => return action_type.clone(),
        };
        Some(tag)
    }
}

// ---------------------------------------------------------------------------
// EventDetails
// ---------------------------------------------------------------------------

/// Typed payload of an event, one variant per known [`EventType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EventDetails {
    /// Beginning of a tick.
    TickStart,
    /// End of a tick.
    TickEnd,
    /// An agent was born.
    AgentBorn(BirthDetails),
    /// An agent died.
    AgentDied(DeathDetails),
    /// An action was submitted.
    ActionSubmitted(ActionDetails),
    /// An action succeeded.
    ActionSucceeded(ActionDetails),
    /// An action was rejected.
    ActionRejected(RejectionDetails),
    /// Resources were gathered.
    ResourceGathered(GatherDetails),
    /// Resources were consumed.
    ResourceConsumed(ConsumeDetails),
    /// A trade completed.
    TradeCompleted(TradeDetails),
    /// A trade failed.
    TradeFailed(TradeFailureDetails),
    /// A structure was built.
    StructureBuilt(StructureDetails),
    /// A structure was destroyed.
    StructureDestroyed(StructureDetails),
    /// A structure was repaired.
    StructureRepaired(StructureDetails),
    /// A structure was claimed.
    StructureClaimed(StructureDetails),
    /// A route was improved.
    RouteImproved(RouteDetails),
    /// A route degraded.
    RouteDegraded(RouteDetails),
    /// A location was discovered.
    LocationDiscovered(DiscoveryDetails),
    /// Knowledge was discovered.
    KnowledgeDiscovered(KnowledgeDetails),
    /// Knowledge was taught.
    KnowledgeTaught(TeachingDetails),
    /// A message was sent.
    MessageSent(MessageDetails),
    /// A group was formed.
    GroupFormed(GroupDetails),
    /// A relationship changed.
    RelationshipChanged(RelationshipDetails),
    /// A rule was created.
    RuleCreated(RuleDetails),
    /// A rule was enforced.
    EnforcementApplied(EnforcementDetails),
    /// The weather changed.
    WeatherChanged(EnvironmentChange),
    /// The season changed.
    SeasonChanged(EnvironmentChange),
    /// A theft succeeded.
    TheftOccurred(TheftDetails),
    /// A theft failed.
    TheftFailed(TheftDetails),
    /// Combat started.
    CombatInitiated(CombatDetails),
    /// Combat resolved.
    CombatResolved(CombatDetails),
    /// Conservation law violated.
    LedgerAnomaly(AnomalyDetails),
    /// Unrecognised event type; the raw payload is all there is.
    Unknown,
}

impl EventDetails {
    /// Validate a raw payload against its event type.
    #[allow(clippy::too_many_lines)]
    pub fn parse(event_type: &EventType, details: &Value) -> Self {
        let f = Fields::of(details);
        match event_type {
            EventType::TickStart => Self::TickStart,
            EventType::TickEnd => Self::TickEnd,
            EventType::AgentBorn => Self::AgentBorn(BirthDetails {
                name: f.text(&["name", "agent_name"]),
                parent_a: f.agent(&["parent_a"]),
                parent_b: f.agent(&["parent_b"]),
                generation: f.unsigned(&["generation"]),
            }),
            EventType::AgentDied => Self::AgentDied(DeathDetails {
                cause: f.text(&["cause"]),
                final_age: f.unsigned(&["final_age", "age"]),
                inventory_dropped: f.bundle(&["inventory_dropped"]),
            }),
            EventType::ActionSubmitted => Self::ActionSubmitted(ActionDetails::parse(details)),
            EventType::ActionSucceeded => Self::ActionSucceeded(ActionDetails::parse(details)),
            EventType::ActionRejected => Self::ActionRejected(RejectionDetails {
                action_type: f.text(&["action_type"]).map(ActionType::from),
                reason: f.text(&["reason"]),
                message: f.text(&["message", "reason_details"]),
            }),
            EventType::ResourceGathered => Self::ResourceGathered(GatherDetails {
                resource: f.text(&["resource"]),
                quantity: f.number(&["quantity"]),
            }),
            EventType::ResourceConsumed => Self::ResourceConsumed(ConsumeDetails {
                resource: f.text(&["resource"]),
                quantity: f.number(&["quantity"]),
                consumed: f.bundle(&["resources", "consumed"]),
            }),
            EventType::TradeCompleted => Self::TradeCompleted(TradeDetails {
                agent_a: f.agent(&["agent_a", "offerer_id"]),
                agent_b: f.agent(&["agent_b", "target_id"]),
                gave: f.bundle(&["gave"]),
                received: f.bundle(&["received"]),
            }),
            EventType::TradeFailed => Self::TradeFailed(TradeFailureDetails {
                offerer: f.agent(&["offerer_id", "agent_a"]),
                target: f.agent(&["target_id", "agent_b"]),
                reason: f.text(&["reason"]),
            }),
            EventType::StructureBuilt => Self::StructureBuilt(structure(&f)),
            EventType::StructureDestroyed => Self::StructureDestroyed(structure(&f)),
            EventType::StructureRepaired => Self::StructureRepaired(structure(&f)),
            EventType::StructureClaimed => Self::StructureClaimed(structure(&f)),
            EventType::RouteImproved => Self::RouteImproved(route(&f)),
            EventType::RouteDegraded => Self::RouteDegraded(route(&f)),
            EventType::LocationDiscovered => Self::LocationDiscovered(DiscoveryDetails {
                location: f.location(&["location_id", "discovered_location"]),
            }),
            EventType::KnowledgeDiscovered => Self::KnowledgeDiscovered(KnowledgeDetails {
                knowledge: f.text(&["knowledge"]),
                method: f.text(&["method"]),
            }),
            EventType::KnowledgeTaught => Self::KnowledgeTaught(TeachingDetails {
                knowledge: f.text(&["knowledge"]),
                teacher: f.agent(&["teacher_id"]),
                student: f.agent(&["student_id"]),
                success: f.flag(&["success"]),
            }),
            EventType::MessageSent => Self::MessageSent(MessageDetails {
                recipient: f.agent(&["recipient_id", "target_agent"]),
                content: f.text(&["content", "message"]),
            }),
            EventType::GroupFormed => Self::GroupFormed(GroupDetails {
                group_name: f.text(&["group_name", "name"]),
                member_count: f.count(&["members", "member_count"]),
            }),
            EventType::RelationshipChanged => Self::RelationshipChanged(RelationshipDetails {
                agent_a: f.agent(&["agent_a"]),
                agent_b: f.agent(&["agent_b"]),
                old_score: f.decimal(&["old_score"]),
                new_score: f.decimal(&["new_score"]),
                cause: f.text(&["cause"]),
            }),
            EventType::RuleCreated => Self::RuleCreated(RuleDetails {
                rule_name: f.text(&["rule_name", "name"]),
                description: f.text(&["rule_description", "description"]),
            }),
            EventType::EnforcementApplied => Self::EnforcementApplied(EnforcementDetails {
                target: f.agent(&["target", "target_agent"]),
                consequence: f.text(&["consequence"]),
            }),
            EventType::WeatherChanged => Self::WeatherChanged(EnvironmentChange {
                previous: f.text(&["old_weather", "previous", "from"]),
                current: f.text(&["new_weather", "weather", "current", "to"]),
            }),
            EventType::SeasonChanged => Self::SeasonChanged(EnvironmentChange {
                previous: f.text(&["old_season", "previous", "from"]),
                current: f.text(&["new_season", "season", "current", "to"]),
            }),
            EventType::TheftOccurred => Self::TheftOccurred(theft(&f)),
            EventType::TheftFailed => Self::TheftFailed(theft(&f)),
            EventType::CombatInitiated => Self::CombatInitiated(combat(&f)),
            EventType::CombatResolved => Self::CombatResolved(combat(&f)),
            EventType::LedgerAnomaly => Self::LedgerAnomaly(AnomalyDetails {
                message: f.text(&["message", "description"]),
            }),
            EventType::Unknown(_) => Self::Unknown,
        }
    }

    /// The embedded action tag for the action wrapper and rejection payloads.
    pub fn action_type(&self) -> Option<ActionType> {
        match self {
            Self::ActionSubmitted(action) | Self::ActionSucceeded(action) => action.action_type(),
            Self::ActionRejected(rejection) => rejection.action_type.clone(),
            _ => None,
        }
    }
}

fn structure(f: &Fields<'_>) -> StructureDetails {
    StructureDetails {
        structure_type: f.text(&["structure_type"]),
        cause: f.text(&["cause"]),
        durability_before: f.unsigned(&["durability_before"]),
        durability_after: f.unsigned(&["durability_after"]),
        previous_owner: f.agent(&["previous_owner"]),
        materials: f.bundle(&["materials_used", "materials_salvaged"]),
    }
}

fn route(f: &Fields<'_>) -> RouteDetails {
    RouteDetails {
        old_path_type: f.text(&["old_path_type"]),
        new_path_type: f.text(&["new_path_type"]),
        is_repair: f.flag(&["is_repair"]),
    }
}

fn theft(f: &Fields<'_>) -> TheftDetails {
    TheftDetails {
        victim: f.agent(&["victim_id", "target_agent", "victim"]),
        stolen: f.bundle(&["stolen", "resources"]),
    }
}

fn combat(f: &Fields<'_>) -> CombatDetails {
    CombatDetails {
        target: f.agent(&["target_id", "defender_id", "target_agent"]),
        winner: f.agent(&["winner_id", "winner"]),
        loser: f.agent(&["loser_id", "loser"]),
    }
}
