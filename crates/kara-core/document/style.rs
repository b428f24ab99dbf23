//! Style definitions for ASS documents

use crate::error::{Error, Result};
use crate::utils::format_num;

/// One `[V4+ Styles]` entry
///
/// Colors stay in their native `&HAABBGGRR` text form; convert through
/// [`crate::Color`] when channel math is needed. `fix_width` is not an ASS
/// field: it is a per-style horizontal padding added after each measured
/// fragment during karaoke decomposition, compensating for fonts whose
/// advance widths under-report.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// Style name, the key events refer to
    pub name: String,
    /// Font family
    pub fontname: String,
    /// Font size in script pixels
    pub fontsize: i32,
    /// Primary fill color, native encoding
    pub primary_colour: String,
    /// Secondary (karaoke) fill color, native encoding
    pub secondary_colour: String,
    /// Outline color, native encoding
    pub outline_colour: String,
    /// Shadow color, native encoding
    pub back_colour: String,
    /// Bold flag
    pub bold: bool,
    /// Italic flag
    pub italic: bool,
    /// Horizontal scale percent
    pub scale_x: f64,
    /// Vertical scale percent
    pub scale_y: f64,
    /// Extra inter-character spacing in pixels
    pub spacing: i32,
    /// Outline width in pixels
    pub outline: f64,
    /// Shadow offset in pixels
    pub shadow: f64,
    /// Numpad alignment, 1 through 9
    pub alignment: u8,
    /// Left margin in pixels
    pub margin_l: i32,
    /// Right margin in pixels
    pub margin_r: i32,
    /// Vertical margin in pixels
    pub margin_v: i32,
    /// Horizontal padding per measured fragment, not serialized
    pub fix_width: f64,
}

impl Default for Style {
    /// `Default` style matching the writer's synthesized fallback
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            fontname: "Arial".to_string(),
            fontsize: 20,
            primary_colour: "&H00FFFFFF".to_string(),
            secondary_colour: "&H00FFFFFF".to_string(),
            outline_colour: "&H00000000".to_string(),
            back_colour: "&H00000000".to_string(),
            bold: false,
            italic: false,
            scale_x: 100.0,
            scale_y: 100.0,
            spacing: 0,
            outline: 2.0,
            shadow: 0.0,
            alignment: 2,
            margin_l: 10,
            margin_r: 20,
            margin_v: 10,
            fix_width: 0.0,
        }
    }
}

impl Style {
    /// Default style under a different name
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the numpad alignment, validating the 1-9 domain
    pub fn set_alignment(&mut self, alignment: u8) -> Result<()> {
        if (1..=9).contains(&alignment) {
            self.alignment = alignment;
            Ok(())
        } else {
            Err(Error::range(
                "alignment",
                f64::from(alignment),
                1.0,
                9.0,
            ))
        }
    }

    /// Serialize as a `Style:` line
    ///
    /// Fields the model does not track (underline, strikeout, angle,
    /// border style, encoding) are written with their ASS defaults.
    #[must_use]
    pub fn to_ass_string(&self) -> String {
        let flag = |b: bool| if b { "-1" } else { "0" };
        format!(
            "Style: {},{},{},{},{},{},{},{},{},0,0,{},{},{},0,1,{},{},{},{:04},{:04},{:04},0",
            self.name,
            self.fontname,
            self.fontsize,
            self.primary_colour,
            self.secondary_colour,
            self.outline_colour,
            self.back_colour,
            flag(self.bold),
            flag(self.italic),
            format_num(self.scale_x, 2),
            format_num(self.scale_y, 2),
            self.spacing,
            format_num(self.outline, 2),
            format_num(self.shadow, 2),
            self.alignment,
            self.margin_l,
            self.margin_r,
            self.margin_v,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_line() {
        let style = Style::default();
        assert_eq!(
            style.to_ass_string(),
            "Style: Default,Arial,20,&H00FFFFFF,&H00FFFFFF,&H00000000,&H00000000,\
             0,0,0,0,100,100,0,0,1,2,0,2,0010,0020,0010,0"
        );
    }

    #[test]
    fn bold_italic_use_negative_one() {
        let mut style = Style::default();
        style.bold = true;
        style.italic = true;
        let line = style.to_ass_string();
        assert!(line.contains(",-1,-1,0,0,"));
    }

    #[test]
    fn alignment_domain_is_validated() {
        let mut style = Style::default();
        assert!(style.set_alignment(0).is_err());
        assert!(style.set_alignment(10).is_err());
        assert!(style.set_alignment(5).is_ok());
        assert_eq!(style.alignment, 5);
    }
}
