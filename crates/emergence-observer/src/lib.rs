//! Event timeline engine for the Emergence observer dashboard.
//!
//! This crate turns the simulation's append-only event stream into the
//! dashboard's timeline view:
//!
//! - **Severity classification** of every event into one of five levels
//! - **Narrative sentences** with emphasized agent and location names
//! - **Tick grouping**, newest tick first, each with a world snapshot
//! - **Filtering** by category, severity, and free text
//!
//! # Architecture
//!
//! Every stage is a pure function of its inputs. [`Timeline`] holds the
//! only mutable state (the event log, the session, the name tables) and
//! memoizes the last [`TimelineView`] so repeated reads between changes
//! cost nothing. Session changes go through [`SessionState::apply`], a
//! reducer over [`SessionAction`] values.
//!
//! Event payloads are parsed into typed [`EventDetails`] once, when an
//! event enters the [`EventLog`].
//!
//! [`EventDetails`]: emergence_types::EventDetails

pub mod category;
pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod grouping;
pub mod lookup;
pub mod narrative;
pub mod projection;
pub mod session;
pub mod severity;
pub mod timeline;

// Re-export primary types for convenience.
pub use category::Category;
pub use config::{ConfigError, LoggingConfig, ObserverConfig, TimelineConfig};
pub use error::ObserverError;
pub use event::TimelineEvent;
pub use filter::{FilterCriteria, filter_events};
pub use grouping::{TickEnvironment, TickGroup, group_by_tick};
pub use lookup::{NameLookup, NameTables};
pub use narrative::{Fragment, Narrative, narrate};
pub use projection::{EventRow, SeverityCounts, TickGroupView, TimelineView, project};
pub use session::{SessionAction, SessionState};
pub use severity::{Severity, SeveritySet, classify};
pub use timeline::{EventLog, Timeline};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the view model.

    #[test]
    fn export_bindings() {
        // ts-rs writes the files to `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::severity::Severity::export_all();
        let _ = crate::category::Category::export_all();
        let _ = crate::narrative::Fragment::export_all();
        let _ = crate::narrative::Narrative::export_all();
        let _ = crate::grouping::TickEnvironment::export_all();
        let _ = crate::projection::EventRow::export_all();
        let _ = crate::projection::TickGroupView::export_all();
        let _ = crate::projection::SeverityCounts::export_all();
        let _ = crate::projection::TimelineView::export_all();
    }
}
