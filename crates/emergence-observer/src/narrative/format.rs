//! Shared formatting helpers for narrative sentences.

use emergence_types::{AgentId, LocationId, ResourceBundle};
use rust_decimal::Decimal;
use serde_json::Number;

use super::fragment::Narrative;
use crate::lookup::NameLookup;

/// Characters of an id shown when no display name is known.
pub const ID_PREFIX_LEN: usize = 8;

/// Stand-in for a missing scalar value.
pub const MISSING: &str = "?";

/// Stand-in for a missing reason or cause.
pub const UNKNOWN_REASON: &str = "unknown reason";

/// Stand-in for an empty resource bundle.
pub const NO_ITEMS: &str = "items";

/// Stand-in for a structure whose type was not reported.
pub const SOME_STRUCTURE: &str = "structure";

/// Stand-in for an absent agent id.
pub const UNKNOWN_AGENT: &str = "Unknown";

/// Insert a space before every capital letter that is not the first
/// character (`BasicHut` becomes `Basic Hut`).
pub fn humanize(token: &str) -> String {
    let mut out = String::with_capacity(token.len().saturating_add(4));
    for (i, ch) in token.chars().enumerate() {
        if i > 0 && ch.is_uppercase() {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// Render a bundle as `qty Name, qty Name`, or [`NO_ITEMS`] when empty.
pub fn summarize_resources(bundle: &ResourceBundle) -> String {
    if bundle.is_empty() {
        return NO_ITEMS.to_owned();
    }
    bundle
        .entries()
        .iter()
        .map(|entry| format!("{} {}", number(&entry.quantity), humanize(&entry.resource)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render an optional quantity.
pub fn quantity(value: Option<&Number>) -> String {
    value.map_or_else(|| MISSING.to_owned(), number)
}

/// Render a JSON number without trailing zeros (`3.0` reads `3`).
pub fn number(value: &Number) -> String {
    let text = value.to_string();
    text.parse::<Decimal>()
        .map_or(text, |d| d.normalize().to_string())
}

/// Render an optional score with at most two decimals.
pub fn score(value: Option<Decimal>) -> String {
    value.map_or_else(
        || MISSING.to_owned(),
        |d| d.round_dp(2).normalize().to_string(),
    )
}

/// Builder for one narrative sentence.
///
/// Reference methods resolve ids through the name tables: a known name is
/// emphasized, an unknown id shows its prefix in plain text.
pub struct Line<'n> {
    names: &'n dyn NameLookup,
    out: Narrative,
}

impl<'n> Line<'n> {
    /// Start an empty sentence.
    pub fn new(names: &'n dyn NameLookup) -> Self {
        Self {
            names,
            out: Narrative::new(),
        }
    }

    /// Plain text.
    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.out.push_plain(text);
        self
    }

    /// Optional text, or `placeholder` when absent.
    #[must_use]
    pub fn or(self, value: Option<&str>, placeholder: &str) -> Self {
        self.text(value.unwrap_or(placeholder))
    }

    /// Humanized token, or `placeholder` when absent.
    #[must_use]
    pub fn humanized(self, value: Option<&str>, placeholder: &str) -> Self {
        match value {
            Some(token) => self.text(&humanize(token)),
            None => self.text(placeholder),
        }
    }

    /// Agent reference; an absent id reads [`UNKNOWN_AGENT`].
    #[must_use]
    pub fn agent(mut self, id: Option<&AgentId>) -> Self {
        match id {
            Some(id) => match self.names.agent_name(id) {
                Some(name) => self.out.push_emphasized(name),
                None => self.out.push_plain(id.short(ID_PREFIX_LEN)),
            },
            None => self.out.push_plain(UNKNOWN_AGENT),
        }
        self
    }

    /// Location reference; an absent id reads `placeholder`.
    #[must_use]
    pub fn location(mut self, id: Option<&LocationId>, placeholder: &str) -> Self {
        match id {
            Some(id) => match self.names.location_name(id) {
                Some(name) => self.out.push_emphasized(name),
                None => self.out.push_plain(id.short(ID_PREFIX_LEN)),
            },
            None => self.out.push_plain(placeholder),
        }
        self
    }

    /// ` at <location>`, omitted entirely when the id is absent.
    #[must_use]
    pub fn at(self, id: Option<&LocationId>) -> Self {
        match id {
            Some(_) => self.text(" at ").location(id, MISSING),
            None => self,
        }
    }

    /// Resource summary of a bundle.
    #[must_use]
    pub fn resources(self, bundle: &ResourceBundle) -> Self {
        self.text(&summarize_resources(bundle))
    }

    /// Finish the sentence.
    pub fn finish(self) -> Narrative {
        self.out
    }
}
