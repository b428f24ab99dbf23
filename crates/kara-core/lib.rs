//! # Kara-RS Core
//!
//! ASS (Advanced `SubStation` Alpha) karaoke-effect toolkit. Parses subtitle
//! scripts into a mutable document model, decomposes timed dialogue lines into
//! syllable and character units with derived timing and on-screen positions,
//! and serializes generated effect events back to the ASS text format.
//!
//! Text measurement (font metrics) is an external capability: the
//! decomposition engine is parametric over the [`karaoke::TextMeasurer`]
//! trait, so it runs against a stub in tests and against any real font
//! backend in applications.
//!
//! ## Quick Start
//!
//! ```rust
//! use kara_core::document::reader;
//! use kara_core::karaoke::{decompose, TextMeasurer};
//! use kara_core::document::Style;
//!
//! struct Fixed;
//! impl TextMeasurer for Fixed {
//!     fn measure(&self, _style: &Style, text: &str) -> (f64, f64) {
//!         (10.0 * text.chars().count() as f64, 20.0)
//!     }
//! }
//!
//! let script = "\
//! [Script Info]
//! PlayResX: 1280
//! PlayResY: 720
//!
//! [V4+ Styles]
//! Style: Default,Arial,20,&H00FFFFFF,&H00FFFFFF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,0,2,0010,0020,0010,0
//!
//! [Events]
//! Dialogue: 0,0:00:00.00,0:00:05.00,Default,,0000,0000,0000,,{\\k30}ka{\\k16}shi
//! ";
//! let doc = reader::parse(script)?;
//! let event = &doc.events[0];
//! let style = &doc.styles[&event.style];
//! let kara = decompose(event, style, doc.effective_resolution(), &Fixed);
//! assert_eq!(kara.syls.len(), 2);
//! # Ok::<(), kara_core::Error>(())
//! ```

pub mod color;
pub mod document;
pub mod error;
pub mod generator;
pub mod interp;
pub mod karaoke;
pub mod tags;
pub mod time;
pub mod utils;

pub use color::Color;
pub use document::{Document, Event, Resolution, Style};
pub use error::{Error, Result};
pub use generator::Generator;
pub use karaoke::{decompose, Fragment, Karaoke, TextMeasurer};
pub use time::Time;

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
