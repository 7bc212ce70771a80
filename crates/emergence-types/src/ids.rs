//! Identifier wrappers for entities referenced by timeline events.
//!
//! The observer never owns agents or locations; it only carries the
//! identifiers the simulation stamped onto each event. Identifiers are kept
//! as opaque strings so that events from older or foreign emitters (which
//! may not use UUIDs) still ingest cleanly.
//!
//! The `new()` constructors mint UUID v7 strings for fixtures and tests.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a string-backed identifier newtype with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[serde(transparent)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Create a new identifier from a fresh UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Borrow the identifier text.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Return at most the first `len` characters of the identifier.
            ///
            /// Used as a compact stand-in when no display name is known.
            pub fn short(&self, len: usize) -> &str {
                match self.0.char_indices().nth(len) {
                    Some((end, _)) => self.0.get(..end).unwrap_or(&self.0),
                    None => &self.0,
                }
            }

            /// Consume the wrapper and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id! {
    /// Identifier of an agent in the simulation.
    AgentId
}

define_id! {
    /// Identifier of a location (node in the world graph).
    LocationId
}

define_id! {
    /// Identifier of an event in the simulation's event stream.
    EventId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_truncates_to_prefix() {
        let id = AgentId::from("0191f3a2-7c1e-7abc-9def-001122334455");
        assert_eq!(id.short(8), "0191f3a2");
    }

    #[test]
    fn short_keeps_ids_shorter_than_prefix() {
        let id = LocationId::from("L1");
        assert_eq!(id.short(8), "L1");
    }

    #[test]
    fn short_respects_char_boundaries() {
        let id = AgentId::from("ääääääääää");
        assert_eq!(id.short(3), "äää");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = EventId::from("evt-1");
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, "\"evt-1\"");
    }

    #[test]
    fn new_ids_are_distinct() {
        assert_ne!(AgentId::new(), AgentId::new());
    }
}
