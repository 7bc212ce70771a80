//! Narrative sentences as emphasis-marked fragments.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A run of narrative text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Fragment {
    /// The text of this run.
    pub text: String,
    /// Whether the presentation layer should emphasize it.
    pub emphasized: bool,
}

/// A narrative sentence.
///
/// Adjacent plain fragments are always merged, so two narratives with the
/// same text and emphasis compare equal regardless of how they were built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Narrative(Vec<Fragment>);

impl Narrative {
    /// An empty narrative.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append plain text.
    pub fn push_plain(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(last) = self.0.last_mut().filter(|f| !f.emphasized) {
            last.text.push_str(text);
            return;
        }
        self.0.push(Fragment {
            text: text.to_owned(),
            emphasized: false,
        });
    }

    /// Append emphasized text.
    pub fn push_emphasized(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.0.push(Fragment {
            text: text.to_owned(),
            emphasized: true,
        });
    }

    /// The fragments in reading order.
    pub fn fragments(&self) -> &[Fragment] {
        &self.0
    }

    /// The sentence without emphasis markers.
    pub fn plain_text(&self) -> String {
        self.0.iter().map(|f| f.text.as_str()).collect()
    }

    /// The emphasized runs, in order.
    pub fn emphasized(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|f| f.emphasized)
            .map(|f| f.text.as_str())
    }
}

impl core::fmt::Display for Narrative {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for fragment in &self.0 {
            f.write_str(&fragment.text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_plain_runs_merge() {
        let mut narrative = Narrative::new();
        narrative.push_emphasized("Kora");
        narrative.push_plain(" gathered ");
        narrative.push_plain("3 Wood");
        assert_eq!(narrative.fragments().len(), 2);
        assert_eq!(narrative.plain_text(), "Kora gathered 3 Wood");
    }

    #[test]
    fn emphasized_runs_stay_separate() {
        let mut narrative = Narrative::new();
        narrative.push_emphasized("Kora");
        narrative.push_emphasized("Riverbank");
        assert_eq!(narrative.fragments().len(), 2);
        assert_eq!(
            narrative.emphasized().collect::<Vec<_>>(),
            vec!["Kora", "Riverbank"]
        );
    }

    #[test]
    fn empty_pushes_are_ignored() {
        let mut narrative = Narrative::new();
        narrative.push_plain("");
        narrative.push_emphasized("");
        assert!(narrative.fragments().is_empty());
        assert_eq!(narrative.to_string(), "");
    }
}
