//! Enumeration types carried on timeline events.
//!
//! [`EventType`] and [`ActionType`] are *open* enumerations: the simulation
//! grows new event and action kinds faster than the observer is released, so
//! any tag the observer does not know is preserved as `Unknown(tag)` instead
//! of failing ingestion. Both serialize as their `PascalCase` tag.
//!
//! [`Era`], [`Season`], and [`Weather`] are closed and mirror the world
//! engine's definitions one for one.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates `as_str`, `Display`, `From<T> for String`, and
/// `From<String> for T` for an open enum with an `Unknown(String)` variant,
/// plus a `KNOWN` slice listing every named variant.
macro_rules! open_enum {
    ($name:ident { $($variant:ident => $tag:literal),+ $(,)? }) => {
        impl $name {
            /// Every named (non-`Unknown`) variant, in declaration order.
            pub const KNOWN: &'static [Self] = &[$(Self::$variant),+];

            /// The wire tag for this variant.
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $tag,)+
                    Self::Unknown(tag) => tag,
                }
            }

            /// Whether this is a tag the observer does not recognise.
            pub const fn is_unknown(&self) -> bool {
                matches!(self, Self::Unknown(_))
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Unknown(tag) => tag,
                    other => other.as_str().to_owned(),
                }
            }
        }

        impl From<String> for $name {
            fn from(tag: String) -> Self {
                match tag.as_str() {
                    $($tag => Self::$variant,)+
                    _ => Self::Unknown(tag),
                }
            }
        }

        impl From<&str> for $name {
            fn from(tag: &str) -> Self {
                Self::from(tag.to_owned())
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Event Types
// ---------------------------------------------------------------------------

/// The kind of an event recorded by the simulation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum EventType {
    // --- System ---
    /// Beginning of a tick.
    TickStart,
    /// End of a tick.
    TickEnd,

    // --- Lifecycle ---
    /// A new agent was created.
    AgentBorn,
    /// An agent died.
    AgentDied,

    // --- Action ---
    /// An agent submitted an action.
    ActionSubmitted,
    /// An action completed successfully.
    ActionSucceeded,
    /// An action failed validation.
    ActionRejected,

    // --- Economy ---
    /// An agent collected resources from a location.
    ResourceGathered,
    /// An agent consumed resources.
    ResourceConsumed,
    /// Two agents completed a resource exchange.
    TradeCompleted,
    /// A trade was rejected or deemed invalid.
    TradeFailed,

    // --- World ---
    /// A new structure was created.
    StructureBuilt,
    /// A structure collapsed or was demolished.
    StructureDestroyed,
    /// A structure's durability was restored.
    StructureRepaired,
    /// A route's path type was upgraded.
    RouteImproved,
    /// A route's durability reached zero and it degraded.
    RouteDegraded,
    /// An agent discovered a previously unknown location.
    LocationDiscovered,

    // --- Knowledge ---
    /// An agent learned something new.
    KnowledgeDiscovered,
    /// Knowledge was transferred between agents.
    KnowledgeTaught,

    // --- Social ---
    /// An agent sent a message.
    MessageSent,
    /// A new social group was formed.
    GroupFormed,
    /// A relationship score was updated.
    RelationshipChanged,

    // --- Governance ---
    /// An agent claimed ownership of a structure.
    StructureClaimed,
    /// A governance rule was created by a group.
    RuleCreated,
    /// A governance rule was enforced against an agent.
    EnforcementApplied,

    // --- Environment ---
    /// The weather changed.
    WeatherChanged,
    /// The season transitioned.
    SeasonChanged,

    // --- Conflict ---
    /// A theft succeeded.
    TheftOccurred,
    /// A theft attempt failed.
    TheftFailed,
    /// A combat encounter was initiated.
    CombatInitiated,
    /// A combat encounter was resolved.
    CombatResolved,

    // --- System (alert) ---
    /// Conservation law violated.
    LedgerAnomaly,

    /// Any tag this build of the observer does not recognise.
    Unknown(String),
}

open_enum!(EventType {
    TickStart => "TickStart",
    TickEnd => "TickEnd",
    AgentBorn => "AgentBorn",
    AgentDied => "AgentDied",
    ActionSubmitted => "ActionSubmitted",
    ActionSucceeded => "ActionSucceeded",
    ActionRejected => "ActionRejected",
    ResourceGathered => "ResourceGathered",
    ResourceConsumed => "ResourceConsumed",
    TradeCompleted => "TradeCompleted",
    TradeFailed => "TradeFailed",
    StructureBuilt => "StructureBuilt",
    StructureDestroyed => "StructureDestroyed",
    StructureRepaired => "StructureRepaired",
    RouteImproved => "RouteImproved",
    RouteDegraded => "RouteDegraded",
    LocationDiscovered => "LocationDiscovered",
    KnowledgeDiscovered => "KnowledgeDiscovered",
    KnowledgeTaught => "KnowledgeTaught",
    MessageSent => "MessageSent",
    GroupFormed => "GroupFormed",
    RelationshipChanged => "RelationshipChanged",
    StructureClaimed => "StructureClaimed",
    RuleCreated => "RuleCreated",
    EnforcementApplied => "EnforcementApplied",
    WeatherChanged => "WeatherChanged",
    SeasonChanged => "SeasonChanged",
    TheftOccurred => "TheftOccurred",
    TheftFailed => "TheftFailed",
    CombatInitiated => "CombatInitiated",
    CombatResolved => "CombatResolved",
    LedgerAnomaly => "LedgerAnomaly",
});

impl EventType {
    /// Whether this is one of the two tick-boundary bookkeeping events.
    pub const fn is_tick_boundary(&self) -> bool {
        matches!(self, Self::TickStart | Self::TickEnd)
    }

    /// Whether the event's meaning is refined by an embedded `action_type`.
    pub const fn is_action_wrapper(&self) -> bool {
        matches!(self, Self::ActionSubmitted | Self::ActionSucceeded)
    }
}

// ---------------------------------------------------------------------------
// Action Types
// ---------------------------------------------------------------------------

/// An action an agent can submit to the World Engine.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ActionType {
    // --- Survival ---
    /// Collect resources from the current location.
    Gather,
    /// Consume food.
    Eat,
    /// Consume water.
    Drink,
    /// Recover energy.
    Rest,

    // --- Movement ---
    /// Travel to an adjacent location.
    Move,

    // --- Construction ---
    /// Create a new structure.
    Build,
    /// Restore durability to a structure.
    Repair,
    /// Destroy a structure and salvage materials.
    Demolish,
    /// Upgrade the path type of a route.
    ImproveRoute,

    // --- Social ---
    /// Send a direct message.
    Communicate,
    /// Post a message visible to everyone at the location.
    Broadcast,
    /// Propose a resource exchange.
    TradeOffer,
    /// Accept a pending trade offer.
    TradeAccept,
    /// Reject a pending trade offer.
    TradeReject,
    /// Create a named social group.
    FormGroup,
    /// Transfer knowledge to another agent.
    Teach,

    // --- Advanced ---
    /// Plant crops on a farm plot.
    FarmPlant,
    /// Harvest mature crops.
    FarmHarvest,
    /// Create tools or processed goods.
    Craft,
    /// Extract ore.
    Mine,
    /// Convert ore to metal.
    Smelt,
    /// Persist knowledge to a library.
    Write,
    /// Acquire knowledge from a library.
    Read,
    /// Take ownership of an unowned structure.
    Claim,
    /// Create a rule via group consensus.
    Legislate,
    /// Apply consequences for a rule violation.
    Enforce,
    /// Spawn a child with a consenting partner.
    Reproduce,

    // --- Conflict ---
    /// Take resources from another agent.
    Steal,
    /// Physical confrontation.
    Attack,
    /// Threaten without dealing damage.
    Intimidate,

    // --- Diplomacy ---
    /// Propose a group decision, alliance, or treaty.
    Propose,
    /// Vote on a pending proposal.
    Vote,
    /// Enter a formal partnership.
    Marry,
    /// Dissolve a formal partnership.
    Divorce,
    /// Secret coordination.
    Conspire,

    // --- Spiritual ---
    /// A spiritual or ritualistic action.
    Pray,

    // --- Freeform ---
    /// A novel action beyond the base catalog.
    Freeform,

    // --- System ---
    /// The agent did not act this tick.
    NoAction,

    /// Any tag this build of the observer does not recognise.
    Unknown(String),
}

open_enum!(ActionType {
    Gather => "Gather",
    Eat => "Eat",
    Drink => "Drink",
    Rest => "Rest",
    Move => "Move",
    Build => "Build",
    Repair => "Repair",
    Demolish => "Demolish",
    ImproveRoute => "ImproveRoute",
    Communicate => "Communicate",
    Broadcast => "Broadcast",
    TradeOffer => "TradeOffer",
    TradeAccept => "TradeAccept",
    TradeReject => "TradeReject",
    FormGroup => "FormGroup",
    Teach => "Teach",
    FarmPlant => "FarmPlant",
    FarmHarvest => "FarmHarvest",
    Craft => "Craft",
    Mine => "Mine",
    Smelt => "Smelt",
    Write => "Write",
    Read => "Read",
    Claim => "Claim",
    Legislate => "Legislate",
    Enforce => "Enforce",
    Reproduce => "Reproduce",
    Steal => "Steal",
    Attack => "Attack",
    Intimidate => "Intimidate",
    Propose => "Propose",
    Vote => "Vote",
    Marry => "Marry",
    Divorce => "Divorce",
    Conspire => "Conspire",
    Pray => "Pray",
    Freeform => "Freeform",
    NoAction => "NoAction",
});

impl ActionType {
    /// The tag in lower case (`TradeOffer` becomes `tradeoffer`).
    pub fn lowercase(&self) -> String {
        self.as_str().to_lowercase()
    }
}

// ---------------------------------------------------------------------------
// Seasons
// ---------------------------------------------------------------------------

/// A season in the simulation's annual cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Season {
    /// Resource regeneration +25%.
    Spring,
    /// Normal resource rates.
    Summer,
    /// Harvest +50%, regeneration -25%.
    Autumn,
    /// Regeneration -75%, hunger +50%.
    Winter,
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Current weather conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Weather {
    /// No weather effects.
    Clear,
    /// Travel slowed, farm growth up.
    Rain,
    /// Travel blocked, structure decay doubled.
    Storm,
    /// Farm growth stopped.
    Drought,
    /// Travel slowed, structure decay up, farm growth stopped.
    Snow,
}

// ---------------------------------------------------------------------------
// Eras
// ---------------------------------------------------------------------------

/// The current civilizational era.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Era {
    /// Starting era -- no organized society.
    Primitive,
    /// Group formation has emerged.
    Tribal,
    /// Farming has been discovered.
    Agricultural,
    /// Permanent structures are established.
    Settlement,
    /// Metalworking has been discovered.
    Bronze,
    /// Advanced metalworking.
    Iron,
    /// Written language and governance.
    Classical,
    /// Complex institutions.
    Medieval,
    /// Manufacturing.
    Industrial,
    /// Full technology.
    Modern,
}
