//! ASS override tag builders
//!
//! Small formatting helpers producing override tag text for generated
//! events. Numbers go through [`format_num`] so tags stay compact
//! (`\pos(640,710)` rather than `\pos(640.00,710.00)`). Tags with a
//! restricted domain return a `Result`; the rest are plain strings.

use crate::color::Color;
use crate::error::{Error, Result};
use crate::time::Time;
use crate::utils::format_num;

/// `\pos(x,y)`
#[must_use]
pub fn pos(x: f64, y: f64) -> String {
    format!("\\pos({},{})", format_num(x, 2), format_num(y, 2))
}

/// `\move(x1,y1,x2,y2)`
#[must_use]
pub fn mov(x1: f64, y1: f64, x2: f64, y2: f64) -> String {
    format!(
        "\\move({},{},{},{})",
        format_num(x1, 2),
        format_num(y1, 2),
        format_num(x2, 2),
        format_num(y2, 2)
    )
}

/// `\move(x1,y1,x2,y2,t1,t2)`, times relative to the event start
#[must_use]
pub fn mov_t(x1: f64, y1: f64, x2: f64, y2: f64, t1: Time, t2: Time) -> String {
    format!(
        "\\move({},{},{},{},{},{})",
        format_num(x1, 2),
        format_num(y1, 2),
        format_num(x2, 2),
        format_num(y2, 2),
        t1.ms(),
        t2.ms()
    )
}

/// `\an<alignment>`
///
/// # Errors
///
/// Fails outside the numpad 1-9 domain.
pub fn an(alignment: u8) -> Result<String> {
    if (1..=9).contains(&alignment) {
        Ok(format!("\\an{alignment}"))
    } else {
        Err(Error::range("alignment", f64::from(alignment), 1.0, 9.0))
    }
}

/// `\blur<strength>`
#[must_use]
pub fn blur(strength: f64) -> String {
    format!("\\blur{}", format_num(strength, 2))
}

/// `\be<strength>`, rounded up to the integer domain the renderer accepts
#[must_use]
pub fn be(strength: f64) -> String {
    format!("\\be{}", strength.ceil() as i64)
}

/// `\fad(in,out)`, fade durations in milliseconds
#[must_use]
pub fn fad(fade_in: Time, fade_out: Time) -> String {
    format!("\\fad({},{})", fade_in.ms(), fade_out.ms())
}

/// `\fscx<x>\fscy<y>`, scale percents rounded up
#[must_use]
pub fn fsc(x: f64, y: f64) -> String {
    format!("{}{}", fscx(x), fscy(y))
}

/// `\fscx<scale>`
#[must_use]
pub fn fscx(scale: f64) -> String {
    format!("\\fscx{}", scale.ceil() as i64)
}

/// `\fscy<scale>`
#[must_use]
pub fn fscy(scale: f64) -> String {
    format!("\\fscy{}", scale.ceil() as i64)
}

/// `\bord<width>`
#[must_use]
pub fn bord(width: f64) -> String {
    format!("\\bord{}", format_num(width, 2))
}

/// `\xbord<width>`
#[must_use]
pub fn bord_x(width: f64) -> String {
    format!("\\xbord{}", format_num(width, 2))
}

/// `\ybord<width>`
#[must_use]
pub fn bord_y(width: f64) -> String {
    format!("\\ybord{}", format_num(width, 2))
}

/// `\shad<depth>`
#[must_use]
pub fn shad(depth: f64) -> String {
    format!("\\shad{}", format_num(depth, 2))
}

/// `\xshad<depth>`
#[must_use]
pub fn shad_x(depth: f64) -> String {
    format!("\\xshad{}", format_num(depth, 2))
}

/// `\yshad<depth>`
#[must_use]
pub fn shad_y(depth: f64) -> String {
    format!("\\yshad{}", format_num(depth, 2))
}

/// `\c&HBBGGRR&`, the primary fill color
#[must_use]
pub fn c(color: Color) -> String {
    format!("\\c{}", color.ass())
}

/// `\<kind>c&HBBGGRR&` for fill kinds 1 (primary) through 4 (shadow)
///
/// # Errors
///
/// Fails outside the 1-4 kind domain.
pub fn c_n(kind: u8, color: Color) -> Result<String> {
    if (1..=4).contains(&kind) {
        Ok(format!("\\{kind}c{}", color.ass()))
    } else {
        Err(Error::range("color kind", f64::from(kind), 1.0, 4.0))
    }
}

/// `\alpha&HAA&`, 0 opaque through 255 transparent
#[must_use]
pub fn alpha(value: u8) -> String {
    format!("\\alpha&H{value:02X}&")
}

/// `\k<cs>`, highlight duration in centiseconds
#[must_use]
pub fn k(cs: i64) -> String {
    format!("\\k{cs}")
}

/// `\kf<cs>`, sweeping highlight
#[must_use]
pub fn kf(cs: i64) -> String {
    format!("\\kf{cs}")
}

/// `\ko<cs>`, outline highlight
#[must_use]
pub fn ko(cs: i64) -> String {
    format!("\\ko{cs}")
}

/// `\t(<tags>)`, animated over the whole event
#[must_use]
pub fn t(tags: &str) -> String {
    format!("\\t({tags})")
}

/// `\t(<accel>,<tags>)`
#[must_use]
pub fn t_accel(accel: f64, tags: &str) -> String {
    format!("\\t({},{tags})", format_num(accel, 2))
}

/// `\t(t1,t2,<tags>)`, times relative to the event start
#[must_use]
pub fn t_times(t1: Time, t2: Time, tags: &str) -> String {
    format!("\\t({},{},{tags})", t1.ms(), t2.ms())
}

/// `\t(t1,t2,<accel>,<tags>)`
#[must_use]
pub fn t_full(t1: Time, t2: Time, accel: f64, tags: &str) -> String {
    format!("\\t({},{},{},{tags})", t1.ms(), t2.ms(), format_num(accel, 2))
}

/// `\frz<angle>` (z-axis rotation)
#[must_use]
pub fn fr(angle: f64) -> String {
    format!("\\frz{}", format_num(angle, 2))
}

/// `\frx<angle>`
#[must_use]
pub fn frx(angle: f64) -> String {
    format!("\\frx{}", format_num(angle, 2))
}

/// `\fry<angle>`
#[must_use]
pub fn fry(angle: f64) -> String {
    format!("\\fry{}", format_num(angle, 2))
}
