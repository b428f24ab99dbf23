//! ASS script text to [`Document`] parsing
//!
//! The reader is line-oriented and section-agnostic: section headers,
//! comments and format declarations are skipped, every remaining line is a
//! `Key: value` pair and the key alone decides its meaning. Unknown keys are
//! ignored, so scripts carrying editor-specific state still load.

use ahash::AHashMap;
use tracing::debug;

use super::{Document, Event, Metadata, Resolution, Style, Video};
use crate::error::{Error, Result};
use crate::time::Time;

/// Aegisub zoom dropdown stops, as written to the project-garbage section
const ZOOM_STOPS: [(&str, f64); 12] = [
    ("12.5%", 0.125),
    ("25%", 0.25),
    ("50%", 0.5),
    ("75%", 0.75),
    ("87.5%", 0.875),
    ("100%", 1.0),
    ("112.5%", 1.125),
    ("125%", 1.25),
    ("125.5%", 1.255),
    ("150%", 1.5),
    ("175%", 1.75),
    ("200%", 2.0),
];

/// Parse ASS script text into a [`Document`]
///
/// A leading UTF-8 BOM is accepted. Events with empty text are dropped.
///
/// # Errors
///
/// Fails on malformed dialogue, style or time fields, and when an event
/// references a style the script never defines.
pub fn parse(source: &str) -> Result<Document> {
    let source = source.strip_prefix('\u{FEFF}').unwrap_or(source);

    let mut resolution_x: Option<u32> = None;
    let mut resolution_y: Option<u32> = None;
    let mut metadata = Metadata::default();
    let mut video_path: Option<String> = None;
    let mut zoom: Option<f64> = None;
    let mut position: Option<i64> = None;
    let mut aspect_ratio: Option<f64> = None;
    let mut audio: Option<String> = None;
    let mut styles: AHashMap<String, Style> = AHashMap::new();
    let mut events: Vec<Event> = Vec::new();

    for raw in source.lines() {
        let line = raw.trim();
        if line.is_empty()
            || line.starts_with(';')
            || line.starts_with("!:")
            || line.starts_with('[')
        {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim_start();
        match normalize_key(key).as_str() {
            "dialogue" => {
                if let Some(event) = parse_event(value, false, line)? {
                    events.push(event);
                }
            }
            "comment" => {
                if let Some(event) = parse_event(value, true, line)? {
                    events.push(event);
                }
            }
            "style" => {
                let style = parse_style(value, line)?;
                styles.insert(style.name.clone(), style);
            }
            "playresx" => resolution_x = value.parse().ok(),
            "playresy" => resolution_y = value.parse().ok(),
            "title" => metadata.title = Some(value.to_string()),
            "original_script" => metadata.original_script = Some(value.to_string()),
            "original_translation" => metadata.translation = Some(value.to_string()),
            "original_timing" => metadata.timing = Some(value.to_string()),
            "video_file" => video_path = Some(value.to_string()),
            "video_zoom" | "video_zoom_percent" => zoom = parse_zoom(value),
            "video_position" => position = value.parse().ok(),
            "video_ar_value" | "video_aspect_ratio" => aspect_ratio = parse_aspect_ratio(value),
            "audio_file" | "audio_uri" => audio = Some(value.to_string()),
            other => debug!(key = other, "skipping unrecognized script key"),
        }
    }

    for event in &events {
        if !styles.contains_key(&event.style) {
            return Err(Error::UndefinedStyle(event.style.clone()));
        }
    }

    let resolution = match (resolution_x, resolution_y) {
        (Some(width), Some(height)) => Some(Resolution { width, height }),
        _ => None,
    };
    let video = video_path.map(|path| Video {
        path,
        zoom,
        position,
        aspect_ratio,
    });

    Ok(Document {
        resolution,
        metadata,
        video,
        audio,
        styles,
        events,
    })
}

/// Lowercase, spaces to underscores, `+` to `p` (`V4+ Styles` style keys)
fn normalize_key(key: &str) -> String {
    key.trim()
        .chars()
        .map(|c| match c {
            ' ' => '_',
            '+' => 'p',
            _ => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Zoom value, either a dropdown percentage or a bare fraction
fn parse_zoom(value: &str) -> Option<f64> {
    if let Some(&(_, zoom)) = ZOOM_STOPS.iter().find(|(label, _)| *label == value) {
        return Some(zoom);
    }
    match value.strip_suffix('%') {
        Some(percent) => percent.parse::<f64>().ok().map(|p| p / 100.0),
        None => value.parse().ok(),
    }
}

/// Aspect ratio, either `W:H` or a bare ratio, `c` suffix tolerated
fn parse_aspect_ratio(value: &str) -> Option<f64> {
    let value = value.trim_end_matches('c').trim();
    if let Some((w, h)) = value.split_once(':') {
        let w: f64 = w.trim().parse().ok()?;
        let h: f64 = h.trim().parse().ok()?;
        if h == 0.0 {
            return None;
        }
        return Some(w / h);
    }
    value.parse().ok()
}

/// Parse the 10 comma fields of an event; text absorbs any further commas
///
/// Returns `None` for events with empty text.
fn parse_event(value: &str, comment: bool, line: &str) -> Result<Option<Event>> {
    let fields: Vec<&str> = value.splitn(10, ',').collect();
    let [layer, start, end, style, actor, _ml, _mr, _mv, effect, text] = fields[..] else {
        return Err(Error::format("dialogue", line));
    };
    if text.is_empty() {
        return Ok(None);
    }
    let layer: i32 = layer
        .trim()
        .parse()
        .map_err(|_| Error::format("dialogue", line))?;
    let start: Time = start.parse()?;
    let end: Time = end.parse()?;
    Ok(Some(Event {
        layer,
        start,
        end,
        style: style.to_string(),
        actor: actor.to_string(),
        effect: effect.to_string(),
        text: text.to_string(),
        comment,
    }))
}

/// Parse the 23 comma fields of a `Style:` line into the tracked subset
fn parse_style(value: &str, line: &str) -> Result<Style> {
    let fields: Vec<&str> = value.splitn(23, ',').collect();
    let [name, fontname, fontsize, primary, secondary, outline_colour, back, bold, italic, _underline, _strikeout, scale_x, scale_y, spacing, _angle, _border_style, outline, shadow, alignment, margin_l, margin_r, margin_v, _encoding] =
        fields[..]
    else {
        return Err(Error::format("style", line));
    };
    let err = || Error::format("style", line);
    let int = |s: &str| s.trim().parse::<i32>().map_err(|_| err());
    let float = |s: &str| s.trim().parse::<f64>().map_err(|_| err());
    let flag = |s: &str| Ok::<bool, Error>(int(s)? != 0);

    let mut style = Style {
        name: name.trim().to_string(),
        fontname: fontname.trim().to_string(),
        fontsize: float(fontsize)? as i32,
        primary_colour: primary.trim().to_string(),
        secondary_colour: secondary.trim().to_string(),
        outline_colour: outline_colour.trim().to_string(),
        back_colour: back.trim().to_string(),
        bold: flag(bold)?,
        italic: flag(italic)?,
        scale_x: float(scale_x)?,
        scale_y: float(scale_y)?,
        spacing: float(spacing)? as i32,
        outline: float(outline)?,
        shadow: float(shadow)?,
        margin_l: int(margin_l)?,
        margin_r: int(margin_r)?,
        margin_v: int(margin_v)?,
        ..Style::default()
    };
    style.set_alignment(int(alignment)?.try_into().map_err(|_| err())?)?;
    Ok(style)
}
