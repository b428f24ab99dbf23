//! [`Document`] to ASS script text serialization
//!
//! The writer fills in whatever a bare document lacks so the output always
//! loads in an editor: a legacy 640x480 resolution, a `Default` style, a
//! placeholder event when there are none, a dummy video sized to the script
//! and a silent dummy audio track. Only styles actually referenced by events
//! are written.

use tracing::debug;

use super::{Document, Event, Style};
use crate::time::{Time, FPS_NTSC_FILM};

/// Dummy video frame rate label, NTSC film to six places
const DUMMY_FPS: &str = "23.976000";
/// Silent mono track long enough for any song
const DUMMY_AUDIO: &str = "dummy-audio:silence?sr=44100&bd=16&ch=1&ln=396900000:";

/// Serialize a document to ASS script text
#[must_use]
pub fn to_ass_string(doc: &Document) -> String {
    let resolution = doc.effective_resolution();
    let events = effective_events(doc);
    let styles = referenced_styles(doc, &events);
    debug!(
        events = events.len(),
        styles = styles.len(),
        "serializing document"
    );

    let mut out = String::new();

    out.push_str("[Script Info]\n");
    out.push_str("; Script generated by kara-rs\n");
    let title = doc.metadata.title.as_deref().unwrap_or("Default Kara file");
    out.push_str(&format!("Title: {title}\n"));
    if let Some(original) = original_script(doc) {
        out.push_str(&format!("Original Script: {original}\n"));
    }
    if let Some(translation) = &doc.metadata.translation {
        out.push_str(&format!("Original Translation: {translation}\n"));
    }
    if let Some(timing) = &doc.metadata.timing {
        out.push_str(&format!("Original Timing: {timing}\n"));
    }
    out.push_str("ScriptType: v4.00+\n");
    out.push_str("WrapStyle: 2\n");
    out.push_str("ScaledBorderAndShadow: yes\n");
    out.push_str("YCbCr Matrix: TV.601\n");
    out.push_str(&format!("PlayResX: {}\n", resolution.width));
    out.push_str(&format!("PlayResY: {}\n", resolution.height));
    out.push('\n');

    out.push_str("[Aegisub Project Garbage]\n");
    out.push_str(&format!("Audio File: {}\n", audio_reference(doc)));
    let video = video_reference(doc, &events);
    out.push_str(&format!("Video File: {video}\n"));
    if let Some(v) = &doc.video {
        if let Some(zoom) = v.zoom {
            out.push_str(&format!("Video Zoom Percent: {zoom:.6}\n"));
        }
        if let Some(position) = v.position {
            out.push_str(&format!("Video Position: {position}\n"));
        }
        if let Some(ar) = v.aspect_ratio {
            out.push_str("Video AR Mode: 4\n");
            out.push_str(&format!("Video AR Value: {ar:.6}\n"));
        }
    }
    out.push('\n');

    out.push_str("[V4+ Styles]\n");
    out.push_str(
        "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, \
         BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, \
         BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding\n",
    );
    for style in &styles {
        out.push_str(&style.to_ass_string());
        out.push('\n');
    }
    out.push('\n');

    out.push_str("[Events]\n");
    out.push_str("Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n");
    for event in &events {
        out.push_str(&event.to_ass_string());
        out.push('\n');
    }

    out
}

/// Document events, or a five-minute placeholder when there are none
fn effective_events(doc: &Document) -> Vec<Event> {
    if doc.events.is_empty() {
        vec![Event {
            end: Time::from_seconds(300.0),
            style: "Default".to_string(),
            ..Event::default()
        }]
    } else {
        doc.events.clone()
    }
}

/// Styles the events reference, sorted by name for stable output
///
/// Names with no definition in the style table fall back to a default style
/// under that name.
fn referenced_styles(doc: &Document, events: &[Event]) -> Vec<Style> {
    let mut names: Vec<&str> = events.iter().map(|e| e.style.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    names
        .into_iter()
        .map(|name| {
            doc.styles
                .get(name)
                .cloned()
                .unwrap_or_else(|| Style::named(name))
        })
        .collect()
}

/// `Original Script` value: explicit metadata, else the source file name
fn original_script(doc: &Document) -> Option<String> {
    if let Some(original) = &doc.metadata.original_script {
        return Some(original.clone());
    }
    let source = doc.metadata.source_file.as_deref()?;
    let basename = source
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(source);
    Some(basename.to_string())
}

/// Audio reference: explicit audio, else the video file, else silence
fn audio_reference(doc: &Document) -> String {
    if let Some(audio) = &doc.audio {
        return audio.clone();
    }
    if let Some(video) = &doc.video {
        if !video.path.starts_with("?dummy") {
            return video.path.clone();
        }
    }
    DUMMY_AUDIO.to_string()
}

/// Video reference: explicit video, else a dummy sized to the last event
fn video_reference(doc: &Document, events: &[Event]) -> String {
    if let Some(video) = &doc.video {
        return video.path.clone();
    }
    let resolution = doc.effective_resolution();
    let last_end = events
        .iter()
        .map(|e| e.end)
        .max()
        .unwrap_or_else(|| Time::from_seconds(300.0));
    let frames = last_end.frames(FPS_NTSC_FILM) + 1;
    format!(
        "?dummy:{DUMMY_FPS}:{frames}:{}:{}:0:0:0:",
        resolution.width, resolution.height
    )
}
