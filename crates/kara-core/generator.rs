//! Effect generation driver
//!
//! [`Generator`] owns a source [`Document`] and an output event list. An
//! effect script decomposes the source lines through [`Generator::lines`],
//! derives styled fragments into new events with [`Generator::add_fragment`]
//! (or raw events with [`Generator::add_event`]), and serializes the result
//! with [`Generator::to_ass_string`]. The source events can be carried along
//! as comments for later re-generation via [`Generator::seed_original`].

use tracing::{debug, info};

use crate::document::{Document, Event, Style};
use crate::error::{Error, Result};
use crate::karaoke::{decompose, Fragment, Karaoke, TextMeasurer};
use crate::time::Time;

/// Divider comment written before the carried-along source events
const ORIGINAL_MARKER: &str = "### Original Karaoke ###";
/// Divider comment written before the generated effect events
const EFFECT_MARKER: &str = "### Karaoke Effect ###";

/// Karaoke effect generator over one source document
pub struct Generator<M: TextMeasurer> {
    doc: Document,
    measurer: M,
    output: Vec<Event>,
}

impl<M: TextMeasurer> Generator<M> {
    /// Wrap a source document; a `Default` style is ensured
    #[must_use]
    pub fn new(mut doc: Document, measurer: M) -> Self {
        doc.styles
            .entry("Default".to_string())
            .or_insert_with(Style::default);
        Self {
            doc,
            measurer,
            output: Vec::new(),
        }
    }

    /// The source document
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Generated output events so far
    #[must_use]
    pub fn output(&self) -> &[Event] {
        &self.output
    }

    /// Look up a style by name
    ///
    /// # Errors
    ///
    /// Fails when no style of that name is defined.
    pub fn style(&self, name: &str) -> Result<&Style> {
        self.doc
            .styles
            .get(name)
            .ok_or_else(|| Error::UndefinedStyle(name.to_string()))
    }

    /// Defined styles, in no particular order
    pub fn styles(&self) -> impl Iterator<Item = &Style> {
        self.doc.styles.values()
    }

    /// Add a style to the document
    ///
    /// # Errors
    ///
    /// Fails when the name is already defined and `overwrite` is false.
    pub fn add_style(&mut self, style: Style, overwrite: bool) -> Result<()> {
        if !overwrite && self.doc.styles.contains_key(&style.name) {
            return Err(Error::Value(format!(
                "style `{}` is already defined",
                style.name
            )));
        }
        self.doc.styles.insert(style.name.clone(), style);
        Ok(())
    }

    /// Set the per-fragment advance padding on one style, or on all of them
    ///
    /// # Errors
    ///
    /// Fails when `name` is given but not defined.
    pub fn set_fix_width(&mut self, fix_width: f64, name: Option<&str>) -> Result<()> {
        match name {
            Some(name) => {
                let style = self
                    .doc
                    .styles
                    .get_mut(name)
                    .ok_or_else(|| Error::UndefinedStyle(name.to_string()))?;
                style.fix_width = fix_width;
            }
            None => {
                for style in self.doc.styles.values_mut() {
                    style.fix_width = fix_width;
                }
            }
        }
        Ok(())
    }

    /// Source dialogue events, comments excluded
    pub fn dialogs(&self) -> impl Iterator<Item = &Event> {
        self.doc.events.iter().filter(|e| !e.comment)
    }

    /// Decompose every source dialogue line
    ///
    /// # Errors
    ///
    /// Fails when an event references an undefined style.
    pub fn lines(&self) -> Result<Vec<Karaoke>> {
        let resolution = self.doc.effective_resolution();
        let mut lines = Vec::new();
        for event in self.doc.events.iter().filter(|e| !e.comment) {
            let style = self.style(&event.style)?;
            lines.push(decompose(event, style, resolution, &self.measurer));
        }
        debug!(lines = lines.len(), "decomposed source dialogue");
        Ok(lines)
    }

    /// Append a raw event to the output
    pub fn add_event(&mut self, event: Event) {
        self.output.push(event);
    }

    /// Append a plain dialogue event to the output
    ///
    /// # Errors
    ///
    /// Fails when `style` names an undefined style.
    pub fn add_dialog(
        &mut self,
        start: Time,
        end: Time,
        style: &str,
        text: impl Into<String>,
    ) -> Result<()> {
        self.style(style)?;
        self.output.push(Event {
            start,
            end,
            style: style.to_string(),
            text: text.into(),
            ..Event::default()
        });
        Ok(())
    }

    /// Append a fragment as an output event, its text wrapped in `tag`
    ///
    /// The event inherits the fragment's layer, timing, style, actor and
    /// effect fields; `tag` becomes a leading `{...}` override block.
    pub fn add_fragment(&mut self, fragment: &Fragment, tag: &str) {
        self.output.push(Event {
            layer: fragment.layer,
            start: fragment.start,
            end: fragment.end,
            style: fragment.style.name.clone(),
            actor: fragment.actor.clone(),
            effect: fragment.effect.clone(),
            text: format!("{{{tag}}}{}", fragment.text),
            comment: false,
        });
    }

    /// Carry the source events into the output as a commented block
    ///
    /// Writes an `### Original Karaoke ###` divider, every source event as a
    /// comment, then an `### Karaoke Effect ###` divider ahead of the
    /// generated events. Re-running a generator on its own output can then
    /// recover the original timing.
    pub fn seed_original(&mut self) {
        self.output.push(marker(ORIGINAL_MARKER));
        for event in &self.doc.events {
            let mut copy = event.clone();
            copy.comment = true;
            self.output.push(copy);
        }
        self.output.push(marker(EFFECT_MARKER));
    }

    /// Serialize the generated script
    ///
    /// Output styles are forced to alignment 5 so generated `\pos` tags
    /// anchor at the point the fragments were measured around.
    #[must_use]
    pub fn to_ass_string(&self) -> String {
        let mut doc = self.doc.clone();
        for style in doc.styles.values_mut() {
            style.alignment = 5;
        }
        doc.events = self.output.clone();
        info!(events = doc.events.len(), "serializing generated script");
        doc.to_ass_string()
    }
}

/// Divider comment event
fn marker(text: &str) -> Event {
    Event {
        end: Time::from_seconds(5.0),
        style: "Default".to_string(),
        text: text.to_string(),
        comment: true,
        ..Event::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Resolution;

    struct Fixed;

    impl TextMeasurer for Fixed {
        fn measure(&self, _style: &Style, text: &str) -> (f64, f64) {
            (10.0 * text.chars().count() as f64, 20.0)
        }
    }

    fn source() -> Document {
        let mut doc = Document::new();
        doc.resolution = Some(Resolution {
            width: 1280,
            height: 720,
        });
        doc.styles.insert("Default".to_string(), Style::default());
        doc.events.push(Event {
            start: Time::from_ms(1000),
            end: Time::from_ms(4000),
            style: "Default".to_string(),
            text: "{\\k30}ka{\\k16}shi".to_string(),
            ..Event::default()
        });
        doc.events.push(Event {
            start: Time::from_ms(5000),
            end: Time::from_ms(6000),
            style: "Default".to_string(),
            text: "skip me".to_string(),
            comment: true,
            ..Event::default()
        });
        doc
    }

    #[test]
    fn ensures_a_default_style() {
        let gen = Generator::new(Document::new(), Fixed);
        assert!(gen.style("Default").is_ok());
        assert!(gen.style("Missing").is_err());
    }

    #[test]
    fn lines_skip_comments() {
        let gen = Generator::new(source(), Fixed);
        let lines = gen.lines().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].syls.len(), 2);
        assert_eq!(gen.dialogs().count(), 1);
    }

    #[test]
    fn add_style_duplicate_needs_overwrite() {
        let mut gen = Generator::new(source(), Fixed);
        assert!(gen.add_style(Style::default(), false).is_err());
        assert!(gen.add_style(Style::default(), true).is_ok());
        assert!(gen.add_style(Style::named("Romaji"), false).is_ok());
    }

    #[test]
    fn set_fix_width_targets_one_or_all() {
        let mut gen = Generator::new(source(), Fixed);
        gen.add_style(Style::named("Romaji"), false).unwrap();
        gen.set_fix_width(2.5, Some("Romaji")).unwrap();
        assert_eq!(gen.style("Romaji").unwrap().fix_width, 2.5);
        assert_eq!(gen.style("Default").unwrap().fix_width, 0.0);
        gen.set_fix_width(1.0, None).unwrap();
        assert_eq!(gen.style("Default").unwrap().fix_width, 1.0);
        assert!(gen.set_fix_width(1.0, Some("Missing")).is_err());
    }

    #[test]
    fn add_dialog_validates_the_style() {
        let mut gen = Generator::new(source(), Fixed);
        gen.add_dialog(Time::from_ms(0), Time::from_ms(1000), "Default", "hi")
            .unwrap();
        assert_eq!(gen.output()[0].text, "hi");
        assert!(gen
            .add_dialog(Time::from_ms(0), Time::from_ms(1000), "Missing", "hi")
            .is_err());
        assert_eq!(gen.styles().count(), 1);
    }

    #[test]
    fn fragments_become_tag_wrapped_events() {
        let mut gen = Generator::new(source(), Fixed);
        let lines = gen.lines().unwrap();
        let syl = lines[0].syls[0].clone();
        gen.add_fragment(&syl, "\\pos(615,710)");
        assert_eq!(gen.output().len(), 1);
        let event = &gen.output()[0];
        assert_eq!(event.text, "{\\pos(615,710)}ka");
        assert_eq!(event.start, syl.start);
        assert_eq!(event.style, "Default");
    }

    #[test]
    fn seed_original_brackets_source_as_comments() {
        let mut gen = Generator::new(source(), Fixed);
        gen.seed_original();
        let output = gen.output();
        assert_eq!(output.len(), 4);
        assert_eq!(output[0].text, "### Original Karaoke ###");
        assert!(output[1].comment);
        assert_eq!(output[1].text, "{\\k30}ka{\\k16}shi");
        assert!(output[2].comment);
        assert_eq!(output[3].text, "### Karaoke Effect ###");
    }

    #[test]
    fn serialized_output_forces_center_anchor() {
        let mut gen = Generator::new(source(), Fixed);
        gen.seed_original();
        let text = gen.to_ass_string();
        // Alignment field of the Default style line is forced to 5.
        assert!(text.contains(",2,0,5,0010,0020,0010,0\n"));
        assert!(text.contains("Comment: 0,0:00:00.00,0:00:05.00,Default,,0000,0000,0000,,### Original Karaoke ###"));
        // The source document itself is untouched.
        assert_eq!(gen.document().styles["Default"].alignment, 2);
    }
}
