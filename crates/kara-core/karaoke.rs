//! Karaoke decomposition of dialogue lines
//!
//! A timed dialogue line like `{\k30}ka{\k16}shi` carries per-syllable
//! durations in centiseconds. [`decompose`] breaks such a line into three
//! granularities, each a [`Fragment`] with absolute timing and on-screen
//! geometry:
//!
//! - the **line** itself, positioned by its style's numpad alignment,
//! - **syllables**, one per `\k`/`\kf`/`\ko` span, laid out left to right
//!   from the line's left edge,
//! - **characters**, splitting each syllable's duration evenly.
//!
//! Timing is drift-free: the last syllable ends exactly at the line end and
//! the last character of each syllable ends exactly at the syllable end,
//! whatever the rounding of the intermediate durations.
//!
//! Geometry needs font metrics, which are an external capability behind the
//! [`TextMeasurer`] trait.

use crate::document::{Event, Resolution, Style};
use crate::time::Time;

/// Font metrics provider
///
/// Implementations return the rendered extent of `text` under `style` in
/// script pixels. Tests use fixed-advance stubs; applications plug in a real
/// font backend.
pub trait TextMeasurer {
    /// Width and height of `text` rendered with `style`
    fn measure(&self, style: &Style, text: &str) -> (f64, f64);
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    fn measure(&self, style: &Style, text: &str) -> (f64, f64) {
        (**self).measure(style, text)
    }
}

/// One positioned, timed unit of a dialogue line
///
/// The same record serves all three granularities. Edge coordinates are
/// absolute script pixels; [`Fragment::x`] and [`Fragment::y`] pick the edge
/// matching the style's alignment, so `\pos(frag.x(), frag.y())` reproduces
/// the fragment's natural position.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// Layer inherited from the source event
    pub layer: i32,
    /// Absolute start time
    pub start: Time,
    /// Absolute end time
    pub end: Time,
    /// Style of the source event
    pub style: Style,
    /// Actor inherited from the source event
    pub actor: String,
    /// Effect inherited from the source event
    pub effect: String,
    /// Visible text, outer whitespace trimmed
    pub text: String,
    /// Rendered width of `text`
    pub width: f64,
    /// Rendered height of `text`
    pub height: f64,
    /// Left edge
    pub left: f64,
    /// Horizontal center
    pub center: f64,
    /// Right edge
    pub right: f64,
    /// Top edge
    pub top: f64,
    /// Vertical center
    pub middle: f64,
    /// Bottom edge
    pub bottom: f64,
    /// Inline modifier from the karaoke tag (`{\k30-fx}` carries `fx`)
    pub inline: Option<String>,
    /// Owning syllable's time span, set on character fragments
    pub syl_span: Option<(Time, Time)>,
}

impl Fragment {
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

    /// Anchor x for the style's alignment column
    #[must_use]
    pub fn x(&self) -> f64 {
        match self.style.alignment % 3 {
            1 => self.left,
            2 => self.center,
            _ => self.right,
        }
    }

    /// Anchor y for the style's alignment row
    #[must_use]
    pub fn y(&self) -> f64 {
        match self.style.alignment {
            7..=9 => self.top,
            4..=6 => self.middle,
            _ => self.bottom,
        }
    }
}

/// A decomposed dialogue line at all three granularities
#[derive(Debug, Clone, PartialEq)]
pub struct Karaoke {
    /// The whole line
    pub line: Fragment,
    /// Syllable fragments in text order; empty for untimed lines
    pub syls: Vec<Fragment>,
    /// Character fragments in text order; empty for untimed lines
    pub chars: Vec<Fragment>,
}

/// Strip `{...}` override blocks, leaving the visible text
#[must_use]
pub fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Raw karaoke span before timing and geometry are derived
struct Span {
    /// Tag duration in centiseconds
    dur_cs: i64,
    /// Inline modifier, the part after `-` in the tag
    inline: Option<String>,
    /// Accumulated visible text, whitespace included
    raw: String,
}

/// Decompose one dialogue line into line, syllable and character fragments
///
/// `style` must be the style the event references; `resolution` is the
/// script play resolution the geometry is derived in.
pub fn decompose<M: TextMeasurer + ?Sized>(
    event: &Event,
    style: &Style,
    resolution: Resolution,
    measurer: &M,
) -> Karaoke {
    let line = line_fragment(event, style, resolution, measurer);
    let syls = syllables(event, style, resolution, &line, measurer);
    let chars = characters(style, resolution, &syls, measurer);
    Karaoke { line, syls, chars }
}

fn line_fragment<M: TextMeasurer + ?Sized>(
    event: &Event,
    style: &Style,
    resolution: Resolution,
    measurer: &M,
) -> Fragment {
    let text = strip_tags(&event.text).trim().to_string();
    let (width, height) = measurer.measure(style, &text);
    let geo = position(style, resolution, width, height);
    Fragment {
        layer: event.layer,
        start: event.start,
        end: event.end,
        style: style.clone(),
        actor: event.actor.clone(),
        effect: event.effect.clone(),
        text,
        width,
        height,
        left: geo.0,
        center: geo.1,
        right: geo.2,
        top: geo.3,
        middle: geo.4,
        bottom: geo.5,
        inline: None,
        syl_span: None,
    }
}

fn syllables<M: TextMeasurer + ?Sized>(
    event: &Event,
    style: &Style,
    resolution: Resolution,
    line: &Fragment,
    measurer: &M,
) -> Vec<Fragment> {
    let spans = scan_spans(&event.text);
    let count = spans.len();
    let mut syls = Vec::with_capacity(count);
    let mut cursor_time = event.start;
    let mut cursor_x = line.left;
    for (i, span) in spans.into_iter().enumerate() {
        let start = cursor_time;
        let end = if i == count - 1 {
            event.end
        } else {
            start + Time::from_cs(span.dur_cs as f64)
        };
        cursor_time = start + Time::from_cs(span.dur_cs as f64);

        // The advance includes surrounding whitespace; the fragment itself
        // carries only the visible trimmed text.
        let (advance, _) = measurer.measure(style, &span.raw);
        let text = span.raw.trim().to_string();
        let (width, height) = measurer.measure(style, &text);
        let geo = position(style, resolution, width, height);
        syls.push(Fragment {
            layer: event.layer,
            start,
            end,
            style: style.clone(),
            actor: event.actor.clone(),
            effect: event.effect.clone(),
            text,
            width,
            height,
            left: cursor_x,
            center: cursor_x + width / 2.0,
            right: cursor_x + width,
            top: geo.3,
            middle: geo.4,
            bottom: geo.5,
            inline: span.inline,
            syl_span: None,
        });
        cursor_x += advance + style.fix_width;
    }
    syls
}

fn characters<M: TextMeasurer + ?Sized>(
    style: &Style,
    resolution: Resolution,
    syls: &[Fragment],
    measurer: &M,
) -> Vec<Fragment> {
    let mut chars = Vec::new();
    for syl in syls {
        let glyphs: Vec<char> = syl.text.chars().collect();
        let count = glyphs.len();
        let step = if count <= 1 {
            syl.dur()
        } else {
            Time::new(syl.dur().ms() as f64 / count as f64)
        };
        let mut cursor_time = syl.start;
        let mut cursor_x = syl.left;
        for (i, glyph) in glyphs.iter().enumerate() {
            let start = cursor_time;
            let end = if i == count - 1 { syl.end } else { start + step };
            cursor_time = end;

            let raw = glyph.to_string();
            let (advance, _) = measurer.measure(style, &raw);
            let text = raw.trim().to_string();
            let (width, height) = measurer.measure(style, &text);
            let geo = position(style, resolution, width, height);
            chars.push(Fragment {
                layer: syl.layer,
                start,
                end,
                style: style.clone(),
                actor: syl.actor.clone(),
                effect: syl.effect.clone(),
                text,
                width,
                height,
                left: cursor_x,
                center: cursor_x + width / 2.0,
                right: cursor_x + width,
                top: geo.3,
                middle: geo.4,
                bottom: geo.5,
                inline: syl.inline.clone(),
                syl_span: Some((syl.start, syl.end)),
            });
            cursor_x += advance + style.fix_width;
        }
    }
    chars
}

/// Extract karaoke spans from tagged text
///
/// Each `\k`, `\kf` or `\ko` tag opens a span; following visible text
/// accumulates into the open span. Text before the first tag is discarded.
/// Leading whitespace of a span belongs to the previous span's advance, so
/// it is moved there (and dropped for the first span).
fn scan_spans(text: &str) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        if let Some(block_start) = rest.find('{') {
            if let Some(run) = rest.get(..block_start) {
                if let Some(span) = spans.last_mut() {
                    span.raw.push_str(run);
                }
            }
            let after = &rest[block_start + 1..];
            let Some(block_end) = after.find('}') else {
                break;
            };
            for tag in parse_karaoke_tags(&after[..block_end]) {
                spans.push(tag);
            }
            rest = &after[block_end + 1..];
        } else {
            if let Some(span) = spans.last_mut() {
                span.raw.push_str(rest);
            }
            break;
        }
    }

    // Reassign leading whitespace before any geometry is derived.
    for i in 0..spans.len() {
        let trimmed = spans[i].raw.trim_start();
        let prespace_len = spans[i].raw.len() - trimmed.len();
        if prespace_len == 0 {
            continue;
        }
        let prespace = spans[i].raw[..prespace_len].to_string();
        spans[i].raw.drain(..prespace_len);
        if i > 0 {
            spans[i - 1].raw.push_str(&prespace);
        }
    }
    spans
}

/// Karaoke tags inside one override block
///
/// Accepted forms: `\k30`, `\kf30`, `\ko30`, each optionally followed by an
/// inline modifier: `\k30-fx`. Other override tags in the block are ignored.
fn parse_karaoke_tags(block: &str) -> Vec<Span> {
    let mut tags = Vec::new();
    for part in block.split('\\').skip(1) {
        let Some(body) = part.strip_prefix('k') else {
            continue;
        };
        let body = body
            .strip_prefix('f')
            .or_else(|| body.strip_prefix('o'))
            .unwrap_or(body);
        let digits_len = body.chars().take_while(char::is_ascii_digit).count();
        if digits_len == 0 {
            continue;
        }
        let Ok(dur_cs) = body[..digits_len].parse::<i64>() else {
            continue;
        };
        let inline = body[digits_len..]
            .strip_prefix('-')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        tags.push(Span {
            dur_cs,
            inline,
            raw: String::new(),
        });
    }
    tags
}

/// Geometry tuple for the line box
type Edges = (f64, f64, f64, f64, f64, f64);

/// Edge coordinates of a `width` x `height` box placed by the style's
/// numpad alignment inside the script resolution
fn position(style: &Style, resolution: Resolution, width: f64, height: f64) -> Edges {
    let res_w = f64::from(resolution.width);
    let res_h = f64::from(resolution.height);

    let (left, center, right) = match style.alignment % 3 {
        1 => {
            let left = f64::from(style.margin_l);
            (left, left + width / 2.0, left + width)
        }
        2 => {
            let center = res_w / 2.0;
            (center - width / 2.0, center, center + width / 2.0)
        }
        _ => {
            let right = res_w - f64::from(style.margin_r);
            (right - width, right - width / 2.0, right)
        }
    };
    let (top, middle, bottom) = match style.alignment {
        7..=9 => {
            let top = f64::from(style.margin_v);
            (top, top + height / 2.0, top + height)
        }
        4..=6 => {
            let middle = res_h / 2.0;
            (middle - height / 2.0, middle, middle + height / 2.0)
        }
        _ => {
            let bottom = res_h - f64::from(style.margin_v);
            (bottom - height, bottom - height / 2.0, bottom)
        }
    };
    (left, center, right, top, middle, bottom)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed-advance metrics: 10 px per char, 20 px tall
    struct Fixed;

    impl TextMeasurer for Fixed {
        fn measure(&self, _style: &Style, text: &str) -> (f64, f64) {
            (10.0 * text.chars().count() as f64, 20.0)
        }
    }

    fn resolution() -> Resolution {
        Resolution {
            width: 1280,
            height: 720,
        }
    }

    fn event(text: &str) -> Event {
        Event {
            start: Time::from_ms(1000),
            end: Time::from_ms(4000),
            style: "Default".to_string(),
            text: text.to_string(),
            ..Event::default()
        }
    }

    #[test]
    fn strip_tags_removes_override_blocks() {
        assert_eq!(strip_tags("{\\k30}ka{\\k16}shi"), "kashi");
        assert_eq!(strip_tags("plain"), "plain");
        assert_eq!(strip_tags("{\\pos(1,2)}a{\\b1}b"), "ab");
    }

    #[test]
    fn syllable_timing_accumulates_from_line_start() {
        let e = event("{\\k30}ka{\\k16}shi{\\k20}wo");
        let k = decompose(&e, &Style::default(), resolution(), &Fixed);
        assert_eq!(k.syls.len(), 3);
        assert_eq!(k.syls[0].start.ms(), 1000);
        assert_eq!(k.syls[0].end.ms(), 1300);
        assert_eq!(k.syls[1].start.ms(), 1300);
        assert_eq!(k.syls[1].end.ms(), 1460);
        assert_eq!(k.syls[2].start.ms(), 1460);
    }

    #[test]
    fn last_syllable_ends_at_line_end() {
        // Tag durations sum to 460 ms but the line is 3000 ms long.
        let e = event("{\\k30}ka{\\k16}shi");
        let k = decompose(&e, &Style::default(), resolution(), &Fixed);
        assert_eq!(k.syls.last().unwrap().end, e.end);
    }

    #[test]
    fn prespace_moves_to_previous_syllable() {
        let e = event("{\\k30}ka{\\k16} shi");
        let k = decompose(&e, &Style::default(), resolution(), &Fixed);
        // Visible texts are trimmed.
        assert_eq!(k.syls[0].text, "ka");
        assert_eq!(k.syls[1].text, "shi");
        // The advance of "ka " is 30 px, so "shi" starts 30 px after "ka".
        assert_eq!(k.syls[1].left - k.syls[0].left, 30.0);
    }

    #[test]
    fn leading_text_before_first_tag_is_discarded() {
        let e = event("oops{\\k30}ka{\\k16}shi");
        let k = decompose(&e, &Style::default(), resolution(), &Fixed);
        assert_eq!(k.syls.len(), 2);
        assert_eq!(k.syls[0].text, "ka");
    }

    #[test]
    fn line_geometry_bottom_center() {
        // Alignment 2, 1280x720, text "kashifont?" is 100 px wide, 20 tall.
        let e = event("{\\k30}kashi{\\k16}font?");
        let style = Style::default();
        let k = decompose(&e, &style, resolution(), &Fixed);
        assert_eq!(k.line.width, 100.0);
        assert_eq!(k.line.center, 640.0);
        assert_eq!(k.line.left, 590.0);
        assert_eq!(k.line.bottom, 710.0);
        assert_eq!(k.line.top, 690.0);
        assert_eq!(k.line.x(), 640.0);
        assert_eq!(k.line.y(), 710.0);
    }

    #[test]
    fn syllables_lay_out_from_line_left() {
        let e = event("{\\k30}ka{\\k16}shi");
        let k = decompose(&e, &Style::default(), resolution(), &Fixed);
        // Line is "kashi", 50 px wide, centered at 640 so left is 615.
        assert_eq!(k.line.left, 615.0);
        assert_eq!(k.syls[0].left, 615.0);
        assert_eq!(k.syls[0].right, 635.0);
        assert_eq!(k.syls[1].left, 635.0);
        assert_eq!(k.syls[1].right, 665.0);
    }

    #[test]
    fn fix_width_pads_each_advance() {
        let e = event("{\\k30}ka{\\k16}shi");
        let mut style = Style::default();
        style.fix_width = 3.0;
        let k = decompose(&e, &style, resolution(), &Fixed);
        assert_eq!(k.syls[1].left - k.syls[0].left, 23.0);
    }

    #[test]
    fn characters_split_syllable_duration_evenly() {
        let e = event("{\\k30}kas{\\k16}hi");
        let k = decompose(&e, &Style::default(), resolution(), &Fixed);
        let first: Vec<&Fragment> = k
            .chars
            .iter()
            .filter(|c| c.syl_span == Some((k.syls[0].start, k.syls[0].end)))
            .collect();
        assert_eq!(first.len(), 3);
        assert_eq!(first[0].start.ms(), 1000);
        assert_eq!(first[0].end.ms(), 1100);
        assert_eq!(first[1].end.ms(), 1200);
        // Last character absorbs the rounding remainder.
        assert_eq!(first[2].end, k.syls[0].end);
    }

    #[test]
    fn characters_advance_within_their_syllable() {
        let e = event("{\\k30}ka{\\k16}shi");
        let k = decompose(&e, &Style::default(), resolution(), &Fixed);
        assert_eq!(k.chars.len(), 5);
        assert_eq!(k.chars[0].left, k.syls[0].left);
        assert_eq!(k.chars[1].left, k.chars[0].left + 10.0);
        assert_eq!(k.chars[2].left, k.syls[1].left);
    }

    #[test]
    fn inline_modifier_is_captured() {
        let e = event("{\\k30-fx}ka{\\kf16}shi");
        let k = decompose(&e, &Style::default(), resolution(), &Fixed);
        assert_eq!(k.syls[0].inline.as_deref(), Some("fx"));
        assert_eq!(k.syls[1].inline, None);
        // Characters inherit their syllable's modifier.
        assert_eq!(k.chars[0].inline.as_deref(), Some("fx"));
    }

    #[test]
    fn kf_and_ko_variants_are_recognized() {
        let e = event("{\\kf30}ka{\\ko16}shi");
        let k = decompose(&e, &Style::default(), resolution(), &Fixed);
        assert_eq!(k.syls.len(), 2);
        assert_eq!(k.syls[0].dur().ms(), 300);
    }

    #[test]
    fn untimed_line_has_no_syllables() {
        let e = event("plain dialogue");
        let k = decompose(&e, &Style::default(), resolution(), &Fixed);
        assert!(k.syls.is_empty());
        assert!(k.chars.is_empty());
        assert_eq!(k.line.text, "plain dialogue");
    }

    #[test]
    fn other_tags_in_blocks_are_ignored() {
        let e = event("{\\pos(1,2)\\k30}ka{\\b1}{\\k16}shi");
        let k = decompose(&e, &Style::default(), resolution(), &Fixed);
        assert_eq!(k.syls.len(), 2);
        assert_eq!(k.syls[0].text, "ka");
        assert_eq!(k.syls[1].text, "shi");
    }
}
