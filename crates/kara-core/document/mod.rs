//! ASS script document model
//!
//! A [`Document`] is the in-memory form of one script: script metadata,
//! optional video/audio references, a style table and the event list.
//! [`reader`] builds one from script text, [`writer`] serializes one back,
//! synthesizing sensible defaults for anything missing so a document built
//! from scratch still produces a playable script.

pub mod event;
pub mod reader;
pub mod style;
pub mod writer;

use ahash::AHashMap;

pub use event::Event;
pub use style::Style;

/// Script play resolution in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    /// `PlayResX`
    pub width: u32,
    /// `PlayResY`
    pub height: u32,
}

impl Default for Resolution {
    /// The ASS legacy default, assumed when a script declares no resolution
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

/// Script-info free-text fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// `Title`
    pub title: Option<String>,
    /// `Original Script`
    pub original_script: Option<String>,
    /// `Original Translation`
    pub translation: Option<String>,
    /// `Original Timing`
    pub timing: Option<String>,
    /// Path this document was loaded from, if any
    pub source_file: Option<String>,
}

/// Video reference carried in the project-garbage section
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Video {
    /// `Video File` path (or a dummy-video descriptor)
    pub path: String,
    /// `Video Zoom Percent` as a unit fraction (1.0 = 100%)
    pub zoom: Option<f64>,
    /// `Video Position` frame number
    pub position: Option<i64>,
    /// `Video AR Value` width over height
    pub aspect_ratio: Option<f64>,
}

impl Video {
    /// Video reference with only a path, editor state left unset
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            zoom: None,
            position: None,
            aspect_ratio: None,
        }
    }
}

/// One parsed ASS script
///
/// Events keep their source order. Styles are keyed by name; events refer to
/// styles by name and the reader guarantees every reference resolves.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    /// Declared play resolution, if any
    pub resolution: Option<Resolution>,
    /// Script-info text fields
    pub metadata: Metadata,
    /// Video reference, if any
    pub video: Option<Video>,
    /// Audio reference, if any
    pub audio: Option<String>,
    /// Style table keyed by style name
    pub styles: AHashMap<String, Style>,
    /// Dialogue and comment events in source order
    pub events: Vec<Event>,
}

impl Document {
    /// Empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declared resolution, or the 640x480 legacy default
    #[must_use]
    pub fn effective_resolution(&self) -> Resolution {
        self.resolution.unwrap_or_default()
    }

    /// Serialize to ASS script text
    ///
    /// See [`writer::to_ass_string`] for the defaults synthesized along the
    /// way.
    #[must_use]
    pub fn to_ass_string(&self) -> String {
        writer::to_ass_string(self)
    }
}
