//! RGB color values with ASS native-encoding and color-space conversions
//!
//! ASS stores colors byte-order-reversed relative to conventional hex:
//! `&HBBGGRR&`, optionally with an alpha prefix (`&HAABBGGRR&`) which is
//! ignored on read and written as a fully-opaque `00`. [`Color`] converts
//! between hex strings, the native encoding, HSV and HLS, and provides the
//! gradient generators the effect layer blends with.

use crate::error::{Error, Result};
use crate::interp;

/// Default channel blend for gradients (perceptually-corrected linear)
pub const DEFAULT_INTERPOLATE: interp::Ease = interp::linear_sq;

/// Fixed 3-component RGB color, each channel 0-255
///
/// Channels are `u8`, so the 0-255 invariant holds by construction; the
/// fallible constructors ([`Color::from_hsv`], [`Color::from_hex`], ...)
/// validate their wider input domains.
///
/// # Examples
///
/// ```rust
/// use kara_core::Color;
///
/// let c = Color::from_hex("#93BEC2")?;
/// assert_eq!(c.ass(), "&HC2BE93&");
/// assert_eq!(Color::from_ass(&c.ass())?, c);
/// # Ok::<(), kara_core::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Create from channel values
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create from real-valued channels, truncating; fails outside [0, 255]
    pub fn from_channels(r: f64, g: f64, b: f64) -> Result<Self> {
        let channel = |v: f64| -> Result<u8> {
            if (0.0..256.0).contains(&v) {
                Ok(v as u8)
            } else {
                Err(Error::range("color channel", v, 0.0, 255.0))
            }
        };
        Ok(Self::new(channel(r)?, channel(g)?, channel(b)?))
    }

    /// Channels clamped and truncated, for interpolated values
    fn from_blend(r: f64, g: f64, b: f64) -> Self {
        let channel = |v: f64| v.clamp(0.0, 255.0) as u8;
        Self::new(channel(r), channel(g), channel(b))
    }

    /// Channels as a real-valued triple
    #[must_use]
    pub fn channels(&self) -> [f64; 3] {
        [f64::from(self.r), f64::from(self.g), f64::from(self.b)]
    }

    /// Parse a hex color string: `#RRGGBB`, `RRGGBB` or 3-digit shorthand
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || Error::Value(format!("`{hex}` is not a valid hexadecimal color value"));
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let expand = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                let mut chans = [0u8; 3];
                for (slot, c) in chans.iter_mut().zip(digits.chars()) {
                    let v = expand(&c.to_string())?;
                    *slot = v * 16 + v;
                }
                Ok(Self::new(chans[0], chans[1], chans[2]))
            }
            6 => Ok(Self::new(
                expand(&digits[0..2])?,
                expand(&digits[2..4])?,
                expand(&digits[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Hex string form `#RRGGBB`
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse the ASS native encoding `&H[AA]BBGGRR&`
    ///
    /// The alpha byte, when present, is ignored. Case-insensitive; the
    /// trailing `&` is optional (style lines omit it).
    pub fn from_ass(color: &str) -> Result<Self> {
        let invalid = || Error::Value(format!("`{color}` is not a valid ASS color value"));
        let trimmed = color.trim();
        let digits = trimmed
            .strip_prefix("&H")
            .or_else(|| trimmed.strip_prefix("&h"))
            .ok_or_else(invalid)?
            .trim_end_matches('&');
        if digits.len() < 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        // Alpha (or any longer prefix) is dropped; the low 6 digits are BBGGRR.
        let bgr = &digits[digits.len() - 6..];
        let parse = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        Ok(Self::new(
            parse(&bgr[4..6])?,
            parse(&bgr[2..4])?,
            parse(&bgr[0..2])?,
        ))
    }

    /// ASS native encoding `&HBBGGRR&`
    #[must_use]
    pub fn ass(&self) -> String {
        format!("&H{:02X}{:02X}{:02X}&", self.b, self.g, self.r)
    }

    /// ASS native encoding with the fully-opaque alpha prefix `&H00BBGGRR&`
    #[must_use]
    pub fn ass_long(&self) -> String {
        format!("&H00{:02X}{:02X}{:02X}&", self.b, self.g, self.r)
    }

    /// Create from HSV components: H in [0, 360], S and V in [0, 100]
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Result<Self> {
        validate_hue(h)?;
        validate_percent("saturation", s)?;
        validate_percent("value", v)?;
        let (r, g, b) = hsv_to_rgb(h / 360.0, s / 100.0, v / 100.0);
        Ok(Self::from_blend(r * 255.0, g * 255.0, b * 255.0))
    }

    /// HSV components: H in [0, 360], S and V in [0, 100]
    #[must_use]
    pub fn hsv(&self) -> (f64, f64, f64) {
        let [r, g, b] = self.channels().map(|c| c / 255.0);
        let (h, s, v) = rgb_to_hsv(r, g, b);
        (h * 360.0, s * 100.0, v * 100.0)
    }

    /// Create from HLS components: H in [0, 360], L and S in [0, 100]
    pub fn from_hls(h: f64, l: f64, s: f64) -> Result<Self> {
        validate_hue(h)?;
        validate_percent("lightness", l)?;
        validate_percent("saturation", s)?;
        let (r, g, b) = hls_to_rgb(h / 360.0, l / 100.0, s / 100.0);
        Ok(Self::from_blend(r * 255.0, g * 255.0, b * 255.0))
    }

    /// HLS components: H in [0, 360], L and S in [0, 100]
    #[must_use]
    pub fn hls(&self) -> (f64, f64, f64) {
        let [r, g, b] = self.channels().map(|c| c / 255.0);
        let (h, l, s) = rgb_to_hls(r, g, b);
        (h * 360.0, l * 100.0, s * 100.0)
    }

    /// Complementary color (hue + 180, wrapped)
    #[must_use]
    pub fn complementary(&self) -> Self {
        let (h, s, v) = self.hsv();
        // Domains were produced by hsv(), so the reverse conversion is total.
        Self::from_hsv((h + 180.0) % 360.0, s, v).unwrap_or(*self)
    }

    /// `n` analogous colors at `separation` degrees around the base hue
    ///
    /// Hues alternate below and above the base, the separation widening
    /// every second step.
    #[must_use]
    pub fn analog(&self, n: usize, separation: f64) -> Vec<Self> {
        let (base_h, s, v) = self.hsv();
        let mut colors = Vec::with_capacity(n);
        let mut h = base_h;
        let mut sep = separation;
        let mut sign = -1.0;
        for i in 1..=n {
            h = (h + sep * sign).rem_euclid(360.0);
            let color = Self::from_hsv(h, s, v).unwrap_or(*self);
            if sign < 0.0 {
                colors.insert(0, color);
            } else {
                colors.push(color);
            }
            if i % 2 == 1 {
                sep += separation;
            }
            sign = -sign;
        }
        colors
    }

    /// Lighter version: HLS lightness raised by `amount`, clamped to [0, 100]
    #[must_use]
    pub fn lighter(&self, amount: f64) -> Self {
        let (h, l, s) = self.hls();
        Self::from_hls(h, (l + amount).clamp(0.0, 100.0), s).unwrap_or(*self)
    }

    /// Darker version: HLS lightness lowered by `amount`, clamped to [0, 100]
    #[must_use]
    pub fn darker(&self, amount: f64) -> Self {
        let (h, l, s) = self.hls();
        Self::from_hls(h, (l - amount).clamp(0.0, 100.0), s).unwrap_or(*self)
    }

    /// Desaturate to the luma gray (0.3 R + 0.59 G + 0.11 B)
    #[must_use]
    pub fn grayscale(&self) -> Self {
        let [r, g, b] = self.channels();
        let luma = 0.3 * r + 0.59 * g + 0.11 * b;
        Self::from_blend(luma, luma, luma)
    }

    /// Linear blend toward `other` by `bias` (0 = this color, 1 = `other`)
    #[must_use]
    pub fn tinted(&self, other: Self, bias: f64) -> Self {
        let unbias = 1.0 - bias;
        let [r1, g1, b1] = self.channels();
        let [r2, g2, b2] = other.channels();
        Self::from_blend(
            r1 * unbias + r2 * bias,
            g1 * unbias + g2 * bias,
            b1 * unbias + b2 * bias,
        )
    }

    /// Channel-wise negative
    #[must_use]
    pub const fn invert(&self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b)
    }

    /// Gradient from this color to `target`, `steps` stops inclusive
    #[must_use]
    pub fn gradient(
        &self,
        target: Self,
        steps: usize,
        func: impl Fn(f64, f64, f64) -> f64,
    ) -> Vec<Self> {
        segment(*self, target, steps, &func)
    }
}

fn validate_hue(h: f64) -> Result<()> {
    if (0.0..=360.0).contains(&h) {
        Ok(())
    } else {
        Err(Error::range("hue", h, 0.0, 360.0))
    }
}

fn validate_percent(what: &'static str, v: f64) -> Result<()> {
    if (0.0..=100.0).contains(&v) {
        Ok(())
    } else {
        Err(Error::range(what, v, 0.0, 100.0))
    }
}

/// Two-color gradient segment, per-channel interpolation
fn segment(from: Color, to: Color, steps: usize, func: &impl Fn(f64, f64, f64) -> f64) -> Vec<Color> {
    let [r1, g1, b1] = from.channels();
    let [r2, g2, b2] = to.channels();
    let rs = interp::interpolate_range(r1, r2, steps, func);
    let gs = interp::interpolate_range(g1, g2, steps, func);
    let bs = interp::interpolate_range(b1, b2, steps, func);
    rs.into_iter()
        .zip(gs)
        .zip(bs)
        .map(|((r, g), b)| Color::from_blend(r, g, b))
        .collect()
}

/// Piecewise gradient through two or more colors
///
/// Produces exactly `steps` stops, `floor(steps / (n-1))` per segment with
/// the remainder absorbed into the last segment. First stop equals
/// `colors[0]`, last equals `colors[n-1]`.
///
/// # Errors
///
/// Fails when `steps` is smaller than the number of colors.
pub fn gradient(
    colors: &[Color],
    steps: usize,
    func: impl Fn(f64, f64, f64) -> f64,
) -> Result<Vec<Color>> {
    if colors.len() > steps {
        return Err(Error::Value(
            "the number of colors can not be greater than the steps".into(),
        ));
    }
    if steps == colors.len() {
        return Ok(colors.to_vec());
    }
    let segments = colors.len() - 1;
    let base = steps / segments;
    let mut out = Vec::with_capacity(steps);
    for (i, pair) in colors.windows(2).enumerate() {
        let count = if i == segments - 1 {
            steps - base * (segments - 1)
        } else {
            base
        };
        out.extend(segment(pair[0], pair[1], count, &func));
    }
    Ok(out)
}

/// Bezier-blended gradient across all colors at once
///
/// The colors are the control points of one vector-valued bezier; unlike
/// [`gradient`] the intermediate colors are influenced by every control
/// point, not just the neighboring pair.
///
/// # Errors
///
/// Fails when `steps` is smaller than the number of colors.
pub fn gradient_bezier(colors: &[Color], steps: usize) -> Result<Vec<Color>> {
    if colors.len() > steps {
        return Err(Error::Value(
            "the number of colors can not be greater than the steps".into(),
        ));
    }
    if steps == colors.len() {
        return Ok(colors.to_vec());
    }
    let points: Vec<[f64; 3]> = colors.iter().map(Color::channels).collect();
    Ok(interp::bezier_curve_range(steps, &points)
        .into_iter()
        .map(|[r, g, b]| Color::from_blend(r, g, b))
        .collect())
}

/// `n` fully-saturated hues evenly spaced around the color circle
///
/// # Errors
///
/// Fails when `s` or `v` are outside [0, 100].
pub fn rainbow(n: usize, s: f64, v: f64, func: impl Fn(f64, f64, f64) -> f64) -> Result<Vec<Color>> {
    interp::circle_range(n, func)
        .into_iter()
        .map(|hue| Color::from_hsv(hue, s, v))
        .collect()
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let i = (h * 6.0).floor();
    let f = h * 6.0 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (i as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    if maxc == minc {
        return (0.0, 0.0, maxc);
    }
    let s = (maxc - minc) / maxc;
    (hue_of(r, g, b, maxc, minc), s, maxc)
}

fn rgb_to_hls(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    let l = (minc + maxc) / 2.0;
    if maxc == minc {
        return (0.0, l, 0.0);
    }
    let s = if l <= 0.5 {
        (maxc - minc) / (maxc + minc)
    } else {
        (maxc - minc) / (2.0 - maxc - minc)
    };
    (hue_of(r, g, b, maxc, minc), l, s)
}

/// Shared hue computation for the HSV/HLS decompositions, result in [0, 1)
fn hue_of(r: f64, g: f64, b: f64, maxc: f64, minc: f64) -> f64 {
    let span = maxc - minc;
    let rc = (maxc - r) / span;
    let gc = (maxc - g) / span;
    let bc = (maxc - b) / span;
    let h = if r == maxc {
        bc - gc
    } else if g == maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    (h / 6.0).rem_euclid(1.0)
}

fn hls_to_rgb(h: f64, l: f64, s: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    (
        hls_component(m1, m2, h + 1.0 / 3.0),
        hls_component(m1, m2, h),
        hls_component(m1, m2, h - 1.0 / 3.0),
    )
}

fn hls_component(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::linear;

    #[test]
    fn hex_round_trip() {
        for hex in ["#000000", "#FFFFFF", "#93BEC2", "#FF00FF", "#0A0B0C"] {
            let color = Color::from_hex(hex).unwrap();
            assert_eq!(color.hex(), *hex);
            assert_eq!(Color::from_hex(&color.hex()).unwrap(), color);
        }
    }

    #[test]
    fn hex_shorthand_and_case() {
        assert_eq!(Color::from_hex("fff").unwrap(), Color::new(255, 255, 255));
        assert_eq!(Color::from_hex("#F0a").unwrap(), Color::new(255, 0, 170));
        assert_eq!(
            Color::from_hex("93bec2").unwrap(),
            Color::from_hex("#93BEC2").unwrap()
        );
    }

    #[test]
    fn hex_rejects_garbage() {
        assert!(Color::from_hex("#GGGGGG").is_err());
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn ass_encoding_is_byte_order_reversed() {
        let color = Color::new(0x12, 0x34, 0x56);
        assert_eq!(color.ass(), "&H563412&");
        assert_eq!(color.ass_long(), "&H00563412&");
    }

    #[test]
    fn ass_round_trip() {
        for color in [
            Color::new(0, 0, 0),
            Color::new(255, 255, 255),
            Color::new(0x93, 0xBE, 0xC2),
        ] {
            assert_eq!(Color::from_ass(&color.ass()).unwrap(), color);
            assert_eq!(Color::from_ass(&color.ass_long()).unwrap(), color);
        }
    }

    #[test]
    fn ass_alpha_prefix_is_ignored_on_read() {
        let opaque = Color::from_ass("&H00C2BE93&").unwrap();
        let transparent = Color::from_ass("&HFFC2BE93&").unwrap();
        assert_eq!(opaque, transparent);
        assert_eq!(opaque, Color::new(0x93, 0xBE, 0xC2));
        // Style lines omit the trailing ampersand.
        assert_eq!(Color::from_ass("&H00C2BE93").unwrap(), opaque);
    }

    #[test]
    fn hsv_round_trip_on_primaries() {
        for color in [
            Color::new(255, 0, 0),
            Color::new(0, 255, 0),
            Color::new(0, 0, 255),
            Color::new(128, 128, 128),
        ] {
            let (h, s, v) = color.hsv();
            assert_eq!(Color::from_hsv(h, s, v).unwrap(), color);
        }
    }

    #[test]
    fn hsv_input_validation() {
        assert!(Color::from_hsv(400.0, 50.0, 50.0).is_err());
        assert!(Color::from_hsv(100.0, 101.0, 50.0).is_err());
        assert!(Color::from_hsv(100.0, 50.0, -1.0).is_err());
        assert!(Color::from_hls(-10.0, 50.0, 50.0).is_err());
    }

    #[test]
    fn complementary_flips_hue() {
        let red = Color::new(255, 0, 0);
        assert_eq!(red.complementary(), Color::new(0, 255, 255));
    }

    #[test]
    fn analog_count_and_hues() {
        let base = Color::from_hsv(100.0, 100.0, 100.0).unwrap();
        let colors = base.analog(3, 10.0);
        assert_eq!(colors.len(), 3);
        let hues: Vec<i64> = colors.iter().map(|c| c.hsv().0.round() as i64).collect();
        // -10, then +20 widened, then -20 from there: 90, 110, 90.
        assert!(hues.contains(&90));
        assert!(hues.contains(&110));
    }

    #[test]
    fn lighter_darker_clamp() {
        let white = Color::new(255, 255, 255);
        assert_eq!(white.lighter(20.0), white);
        let black = Color::new(0, 0, 0);
        assert_eq!(black.darker(20.0), black);
        assert!(Color::new(100, 100, 100).lighter(20.0).r > 100);
    }

    #[test]
    fn grayscale_uses_luma_weights() {
        let gray = Color::new(255, 0, 0).grayscale();
        assert_eq!(gray.r, gray.g);
        assert_eq!(gray.g, gray.b);
        assert_eq!(gray.r, 76); // 0.3 * 255 truncated
    }

    #[test]
    fn tinted_midpoint() {
        let mixed = Color::new(0, 0, 0).tinted(Color::new(255, 255, 255), 0.5);
        assert_eq!(mixed, Color::new(127, 127, 127));
    }

    #[test]
    fn invert_is_channel_negative() {
        assert_eq!(Color::new(0x12, 0x34, 0x56).invert(), Color::new(0xED, 0xCB, 0xA9));
    }

    #[test]
    fn two_color_gradient_endpoints() {
        let from = Color::new(255, 255, 255);
        let to = Color::new(0, 0, 0);
        let stops = from.gradient(to, 3, linear);
        assert_eq!(stops.len(), 3);
        assert_eq!(stops[0], from);
        assert_eq!(stops[1], Color::new(127, 127, 127));
        assert_eq!(stops[2], to);
    }

    #[test]
    fn gradient_fails_with_fewer_steps_than_colors() {
        let colors = [Color::new(0, 0, 0), Color::new(255, 0, 0), Color::new(0, 0, 255)];
        assert!(gradient(&colors, 2, linear).is_err());
        assert!(gradient_bezier(&colors, 2).is_err());
    }

    #[test]
    fn gradient_produces_exact_step_count() {
        let colors = [
            Color::new(0, 0, 0),
            Color::new(255, 0, 0),
            Color::new(0, 0, 255),
            Color::new(255, 255, 255),
        ];
        for steps in [4, 7, 8, 9, 20] {
            let stops = gradient(&colors, steps, linear).unwrap();
            assert_eq!(stops.len(), steps, "steps = {steps}");
            assert_eq!(stops[0], colors[0]);
            assert_eq!(*stops.last().unwrap(), *colors.last().unwrap());
        }
    }

    #[test]
    fn gradient_equal_steps_returns_colors_verbatim() {
        let colors = [Color::new(1, 2, 3), Color::new(4, 5, 6)];
        assert_eq!(gradient(&colors, 2, linear).unwrap(), colors.to_vec());
    }

    #[test]
    fn bezier_gradient_endpoints() {
        let colors = [Color::new(0, 0, 0), Color::new(255, 0, 0), Color::new(0, 0, 255)];
        let stops = gradient_bezier(&colors, 9).unwrap();
        assert_eq!(stops.len(), 9);
        assert_eq!(stops[0], colors[0]);
        assert_eq!(*stops.last().unwrap(), *colors.last().unwrap());
    }

    #[test]
    fn rainbow_spans_the_circle() {
        let colors = rainbow(6, 100.0, 100.0, linear).unwrap();
        assert_eq!(colors.len(), 6);
        assert_eq!(colors[0], Color::new(255, 0, 0)); // hue 0
    }

    #[test]
    fn from_channels_validates_range() {
        assert!(Color::from_channels(-1.0, 0.0, 0.0).is_err());
        assert!(Color::from_channels(0.0, 256.0, 0.0).is_err());
        assert_eq!(
            Color::from_channels(255.9, 0.0, 0.0).unwrap(),
            Color::new(255, 0, 0)
        );
    }
}
