//! Millisecond-precision time values with ASS timestamp conversion
//!
//! ASS scripts express time as `H:MM:SS.CC` (centisecond resolution) while
//! karaoke math wants milliseconds. [`Time`] is an immutable value wrapping
//! integer milliseconds with conversions to/from centiseconds, seconds,
//! frame counts at a given frame rate, and the ASS string form.
//!
//! Arithmetic is overloaded for both `Time` and plain numeric right-hand
//! sides; a plain number always means milliseconds.

use core::fmt;
use core::ops::{Add, Div, Mul, Sub};
use core::str::FromStr;

use crate::error::Error;

/// NTSC film rate (24000/1001), the default when no rate is given
pub const FPS_NTSC_FILM: f64 = 24000.0 / 1001.0;
/// NTSC rate (30000/1001)
pub const FPS_NTSC: f64 = 30000.0 / 1001.0;
/// Double NTSC rate (60000/1001)
pub const FPS_NTSC_DOUBLE: f64 = 60000.0 / 1001.0;
/// Quad NTSC rate (120000/1001)
pub const FPS_NTSC_QUAD: f64 = 120000.0 / 1001.0;
/// Film rate
pub const FPS_FILM: f64 = 24.0;
/// PAL rate
pub const FPS_PAL: f64 = 25.0;
/// Double PAL rate
pub const FPS_PAL_DOUBLE: f64 = 50.0;
/// Quad PAL rate
pub const FPS_PAL_QUAD: f64 = 100.0;

/// Immutable millisecond-precision duration/timestamp
///
/// Ordering and equality compare the millisecond field. All arithmetic
/// returns a new `Time`.
///
/// # Examples
///
/// ```rust
/// use kara_core::Time;
///
/// let t = Time::from_cs(130.0);
/// assert_eq!(t.ms(), 1300);
/// assert_eq!(t.to_ass_string(), "0:00:01.30");
/// assert_eq!((t + 200).ms(), 1500);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time {
    ms: i64,
}

impl Time {
    /// Create from milliseconds, rounding to the nearest integer
    #[must_use]
    pub fn new(ms: f64) -> Self {
        Self {
            ms: ms.round() as i64,
        }
    }

    /// Create from integer milliseconds
    #[must_use]
    pub const fn from_ms(ms: i64) -> Self {
        Self { ms }
    }

    /// Create from centiseconds
    #[must_use]
    pub fn from_cs(cs: f64) -> Self {
        Self::new(cs * 10.0)
    }

    /// Create from seconds
    #[must_use]
    pub fn from_seconds(seconds: f64) -> Self {
        Self::new(seconds * 1000.0)
    }

    /// Create from a frame number at the given frame rate
    #[must_use]
    pub fn from_frame(frame: i64, rate: f64) -> Self {
        Self::from_seconds(frame as f64 / rate)
    }

    /// Milliseconds
    #[must_use]
    pub const fn ms(&self) -> i64 {
        self.ms
    }

    /// Centiseconds (truncating division by 10)
    #[must_use]
    pub const fn cs(&self) -> i64 {
        self.ms / 10
    }

    /// Seconds as a real value
    #[must_use]
    pub fn seconds(&self) -> f64 {
        self.ms as f64 / 1000.0
    }

    /// Frame count at the given frame rate (floor of `rate * seconds`)
    #[must_use]
    pub fn frames(&self, rate: f64) -> i64 {
        (rate * self.seconds()).floor() as i64
    }

    /// ASS string form `H:MM:SS.CC`
    ///
    /// Centisecond resolution: the sub-centisecond remainder is truncated,
    /// not rounded, so `1234` ms renders as `0:00:01.23`.
    #[must_use]
    pub fn to_ass_string(&self) -> String {
        let (s, ms) = (self.ms.div_euclid(1000), self.ms.rem_euclid(1000));
        let (m, s) = (s.div_euclid(60), s.rem_euclid(60));
        let (h, m) = (m.div_euclid(60), m.rem_euclid(60));
        let cs = ms / 10;
        format!("{h}:{m:02}:{s:02}.{cs:02}")
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ass_string())
    }
}

impl FromStr for Time {
    type Err = Error;

    /// Parse the ASS string form `H:MM:SS.CC`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || Error::format("time", s);
        let mut parts = s.trim().splitn(3, ':');
        let h: i64 = parts.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        let m: i64 = parts.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        let rest = parts.next().ok_or_else(err)?;
        let (sec, cs) = rest.split_once('.').ok_or_else(err)?;
        let sec: i64 = sec.parse().map_err(|_| err())?;
        let cs: i64 = cs.parse().map_err(|_| err())?;
        Ok(Self::from_ms((h * 3600 + m * 60 + sec) * 1000 + cs * 10))
    }
}

impl Add for Time {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::from_ms(self.ms + rhs.ms)
    }
}

impl Sub for Time {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::from_ms(self.ms - rhs.ms)
    }
}

impl Mul for Time {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::from_ms(self.ms * rhs.ms)
    }
}

impl Div for Time {
    type Output = Self;

    /// Ratio of millisecond fields, wrapped back into a `Time`
    ///
    /// Dividing two absolute timestamps yields a unitless ratio; wrapping it
    /// as milliseconds is kept for compatibility with existing effect
    /// scripts (`dur / half_dur` style call sites). Prefer dividing by a
    /// plain number in new code.
    fn div(self, rhs: Self) -> Self {
        Self::new(self.ms as f64 / rhs.ms as f64)
    }
}

macro_rules! scalar_ops {
    ($($ty:ty),*) => {$(
        impl Add<$ty> for Time {
            type Output = Self;
            fn add(self, rhs: $ty) -> Self {
                Self::new(self.ms as f64 + rhs as f64)
            }
        }
        impl Sub<$ty> for Time {
            type Output = Self;
            fn sub(self, rhs: $ty) -> Self {
                Self::new(self.ms as f64 - rhs as f64)
            }
        }
        impl Mul<$ty> for Time {
            type Output = Self;
            fn mul(self, rhs: $ty) -> Self {
                Self::new(self.ms as f64 * rhs as f64)
            }
        }
        impl Div<$ty> for Time {
            type Output = Self;
            fn div(self, rhs: $ty) -> Self {
                Self::new(self.ms as f64 / rhs as f64)
            }
        }
    )*};
}

scalar_ops!(i64, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_rounds_to_nearest_ms() {
        assert_eq!(Time::new(10.4).ms(), 10);
        assert_eq!(Time::new(10.6).ms(), 11);
        assert_eq!(Time::from_seconds(1.5).ms(), 1500);
        assert_eq!(Time::from_cs(30.0).ms(), 300);
    }

    #[test]
    fn ass_string_truncates_sub_centisecond() {
        assert_eq!(Time::from_ms(1234).to_ass_string(), "0:00:01.23");
        assert_eq!(Time::from_ms(1239).to_ass_string(), "0:00:01.23");
        assert_eq!(
            Time::from_ms(3_600_000 + 23 * 60_000 + 45_000 + 670).to_ass_string(),
            "1:23:45.67"
        );
    }

    #[test]
    fn string_round_trip_is_centisecond_exact() {
        for ms in [0, 10, 990, 1230, 59_990, 3_599_990, 7_261_230] {
            let t = Time::from_ms(ms);
            let back: Time = t.to_ass_string().parse().unwrap();
            assert_eq!(back.ms(), ms);
        }
        // Non-multiples of 10 floor to the centisecond below.
        let back: Time = Time::from_ms(1234).to_ass_string().parse().unwrap();
        assert_eq!(back.ms(), 1230);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("not a time".parse::<Time>().is_err());
        assert!("1:23".parse::<Time>().is_err());
        assert!("1:xx:00.00".parse::<Time>().is_err());
    }

    #[test]
    fn arithmetic_with_plain_numbers_means_milliseconds() {
        let t = Time::from_ms(1000);
        assert_eq!((t + 500).ms(), 1500);
        assert_eq!((t - 300).ms(), 700);
        assert_eq!((t * 2).ms(), 2000);
        assert_eq!((t / 4).ms(), 250);
        assert_eq!((t + 0.5).ms(), 1001); // rounds
    }

    #[test]
    fn time_by_time_division_wraps_ratio() {
        let dur = Time::from_ms(1000);
        let half = Time::from_ms(500);
        assert_eq!((dur / half).ms(), 2);
    }

    #[test]
    fn frames_floor_at_rate() {
        let t = Time::from_seconds(1.0);
        assert_eq!(t.frames(FPS_NTSC_FILM), 23);
        assert_eq!(t.frames(FPS_PAL), 25);
        assert_eq!(Time::from_frame(24, FPS_FILM).ms(), 1000);
    }

    #[test]
    fn ordering_by_milliseconds() {
        assert!(Time::from_ms(100) < Time::from_ms(200));
        assert_eq!(Time::from_ms(100), Time::new(100.2));
    }
}
