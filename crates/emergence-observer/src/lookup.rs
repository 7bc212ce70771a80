//! Identifier to display-name resolution.
//!
//! Name tables are owned by whatever feeds the dashboard. The engine only
//! reads them, and an id without an entry is normal (the table may lag the
//! event stream), never an error.

use std::collections::BTreeMap;

use emergence_types::{AgentId, LocationId};
use serde::{Deserialize, Serialize};

/// Read-only display-name lookup used by narration and search.
pub trait NameLookup {
    /// Display name for an agent, if known.
    fn agent_name(&self, id: &AgentId) -> Option<&str>;

    /// Display name for a location, if known.
    fn location_name(&self, id: &LocationId) -> Option<&str>;
}

/// In-memory name tables for agents and locations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameTables {
    /// Agent id to display name.
    #[serde(default)]
    pub agents: BTreeMap<AgentId, String>,
    /// Location id to display name.
    #[serde(default)]
    pub locations: BTreeMap<LocationId, String>,
}

impl NameTables {
    /// Create empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or rename) an agent.
    #[must_use]
    pub fn with_agent(mut self, id: impl Into<AgentId>, name: impl Into<String>) -> Self {
        self.agents.insert(id.into(), name.into());
        self
    }

    /// Register (or rename) a location.
    #[must_use]
    pub fn with_location(mut self, id: impl Into<LocationId>, name: impl Into<String>) -> Self {
        self.locations.insert(id.into(), name.into());
        self
    }
}

impl NameLookup for NameTables {
    fn agent_name(&self, id: &AgentId) -> Option<&str> {
        self.agents.get(id).map(String::as_str)
    }

    fn location_name(&self, id: &LocationId) -> Option<&str> {
        self.locations.get(id).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_resolves_registered_names() {
        let names = NameTables::new()
            .with_agent("a-1", "Kora")
            .with_location("l-1", "Riverbank");
        assert_eq!(names.agent_name(&AgentId::from("a-1")), Some("Kora"));
        assert_eq!(
            names.location_name(&LocationId::from("l-1")),
            Some("Riverbank")
        );
    }

    #[test]
    fn missing_ids_resolve_to_none() {
        let names = NameTables::new();
        assert_eq!(names.agent_name(&AgentId::from("ghost")), None);
        assert_eq!(names.location_name(&LocationId::from("nowhere")), None);
    }

    #[test]
    fn tables_deserialize_from_json() {
        let json = r#"{"agents": {"a-1": "Kora"}}"#;
        let names: Result<NameTables, _> = serde_json::from_str(json);
        assert!(names.is_ok_and(|n| n.agents.len() == 1 && n.locations.is_empty()));
    }
}
