//! Dialogue and comment events

use crate::time::Time;

/// One `[Events]` entry, either `Dialogue:` or `Comment:`
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    /// Layer number, higher layers draw on top
    pub layer: i32,
    /// Start time
    pub start: Time,
    /// End time
    pub end: Time,
    /// Referenced style name
    pub style: String,
    /// Actor field, free text
    pub actor: String,
    /// Effect field, free text
    pub effect: String,
    /// Event text, override tags included
    pub text: String,
    /// True for `Comment:` lines
    pub comment: bool,
}

impl Event {
    /// Duration, `end - start`
    #[must_use]
    pub fn dur(&self) -> Time {
        self.end - self.start
    }

    /// Temporal midpoint
    #[must_use]
    pub fn mid(&self) -> Time {
        self.start + self.dur() / 2
    }

    /// Serialize as a `Dialogue:` or `Comment:` line
    ///
    /// Event margins always write as `0000`; per-line margin overrides are
    /// not modeled, positions come from override tags.
    #[must_use]
    pub fn to_ass_string(&self) -> String {
        let kind = if self.comment { "Comment" } else { "Dialogue" };
        format!(
            "{}: {},{},{},{},{},0000,0000,0000,{},{}",
            kind,
            self.layer,
            self.start.to_ass_string(),
            self.end.to_ass_string(),
            self.style,
            self.actor,
            self.effect,
            self.text,
        )
    }
}
