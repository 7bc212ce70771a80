//! Shared type definitions for the Emergence observer.
//!
//! This crate is the single source of truth for the event records the
//! observer consumes. Wire-facing types derive `ts-rs` so the dashboard gets
//! matching `TypeScript` bindings.
//!
//! # Modules
//!
//! - [`ids`] -- String-backed identifier wrappers
//! - [`enums`] -- Open event/action tags and closed environment enums
//! - [`structs`] -- The raw [`Event`] record and its [`WorldContext`]
//! - [`details`] -- Typed payloads validated once at ingestion

pub mod details;
pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use details::{
    ActionDetails, AnomalyDetails, BirthDetails, CombatDetails, ConsumeDetails, DeathDetails,
    DiscoveryDetails, EnforcementDetails, EnvironmentChange, EventDetails, GatherDetails,
    GroupDetails, KnowledgeDetails, MessageDetails, RejectionDetails, RelationshipDetails,
    ResourceAmount, ResourceBundle, RouteDetails, RuleDetails, StructureDetails,
    TeachingDetails, TheftDetails, TradeDetails, TradeFailureDetails,
};
pub use enums::{ActionType, Era, EventType, Season, Weather};
pub use ids::{AgentId, EventId, LocationId};
pub use structs::{Event, WorldContext};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the wire types.

    #[test]
    fn export_bindings() {
        // ts-rs writes the files to `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::AgentId::export_all();
        let _ = crate::ids::LocationId::export_all();
        let _ = crate::ids::EventId::export_all();

        let _ = crate::enums::Season::export_all();
        let _ = crate::enums::Weather::export_all();
        let _ = crate::enums::Era::export_all();

        let _ = crate::structs::WorldContext::export_all();
    }
}
