//! Parametric easing and interpolation primitives
//!
//! Every curve function has the shape `f(t, start, end) -> value` with
//! `t ∈ [0, 1]`, is pure and stateless, and satisfies `f(0, a, b) == a` and
//! `f(1, a, b) == b`. The bezier-preset family ([`ease`], [`ease_in_quad`],
//! [`backstart`], ...) is derived from [`custom_curve`] with fixed control
//! points; the sequence generators ([`interpolate_range`], [`circle_range`],
//! [`bezier_curve_range`]) drive both motion easing and procedural shapes.

use core::f64::consts::PI;

/// Plain function-pointer easing signature, for storing presets in tables
pub type Ease = fn(f64, f64, f64) -> f64;

/// Linear interpolation: `a + t * (b - a)`
#[must_use]
pub fn linear(t: f64, start: f64, end: f64) -> f64 {
    t.mul_add(end - start, start)
}

/// Square-root-compensated linear blend
///
/// Interpolates on squared endpoints and takes the square root of the
/// result. Perceptually correct for color channels (light adds in the
/// squared domain).
#[must_use]
pub fn linear_sq(t: f64, start: f64, end: f64) -> f64 {
    linear(t, start * start, end * end).sqrt()
}

/// Cosine ease, a single half-wave from `start` to `end`
#[must_use]
pub fn cosine(t: f64, start: f64, end: f64) -> f64 {
    cosine_repeat(t, start, end, 1)
}

/// Cosine ease repeated `repeat` times (oscillation)
///
/// Even repeat counts return to `start` at `t = 1`; the boundary property
/// only holds for odd counts.
#[must_use]
pub fn cosine_repeat(t: f64, start: f64, end: f64, repeat: u32) -> f64 {
    let t = 0.5 - (f64::from(repeat.max(1)) * PI * t).cos() / 2.0;
    linear(t, start, end)
}

/// Sine ease (quarter wave, decelerating)
#[must_use]
pub fn sine(t: f64, start: f64, end: f64) -> f64 {
    linear((PI * t / 2.0).sin(), start, end)
}

/// Smoothstep `3t² - 2t³`
#[must_use]
pub fn smooth_step(t: f64, start: f64, end: f64) -> f64 {
    linear((t * t) * (3.0 - 2.0 * t), start, end)
}

/// Smoothstep applied twice to the parameter
#[must_use]
pub fn smooth_step_double(t: f64, start: f64, end: f64) -> f64 {
    let t = smooth_step(smooth_step(t, 0.0, 1.0), 0.0, 1.0);
    linear(t, start, end)
}

/// Quadratic acceleration (ease in)
#[must_use]
pub fn acceleration(t: f64, start: f64, end: f64) -> f64 {
    linear(t * t, start, end)
}

/// Cubic acceleration (ease in, steeper)
#[must_use]
pub fn cubic_acceleration(t: f64, start: f64, end: f64) -> f64 {
    linear(t * t * t, start, end)
}

/// Quadratic deceleration (ease out)
#[must_use]
pub fn deceleration(t: f64, start: f64, end: f64) -> f64 {
    linear(1.0 - (1.0 - t) * (1.0 - t), start, end)
}

/// Cubic deceleration (ease out, steeper)
#[must_use]
pub fn cubic_deceleration(t: f64, start: f64, end: f64) -> f64 {
    linear(1.0 - (1.0 - t).powi(3), start, end)
}

/// Logistic S-curve, normalized so the boundaries are exact
#[must_use]
pub fn sigmoid(t: f64, start: f64, end: f64) -> f64 {
    const K: f64 = 12.0;
    let raw = |u: f64| 1.0 / (1.0 + (-K * (u - 0.5)).exp());
    let (lo, hi) = (raw(0.0), raw(1.0));
    linear((raw(t) - lo) / (hi - lo), start, end)
}

/// Bernstein-polynomial bezier evaluation over an arbitrary-degree control
/// sequence
#[must_use]
pub fn bezier_curve(t: f64, points: &[f64]) -> f64 {
    let n = points.len().saturating_sub(1);
    points
        .iter()
        .enumerate()
        .map(|(i, p)| p * bernstein(t, i, n))
        .sum()
}

/// Bernstein basis polynomial `B(i, n)` at `t`
fn bernstein(t: f64, i: usize, n: usize) -> f64 {
    binomial(i, n) * t.powi(i as i32) * (1.0 - t).powi((n - i) as i32)
}

/// Binomial coefficient `C(n, i)` computed multiplicatively in f64
fn binomial(i: usize, n: usize) -> f64 {
    let i = i.min(n - i);
    let mut result = 1.0;
    for k in 0..i {
        result = result * (n - k) as f64 / (k + 1) as f64;
    }
    result
}

/// Bezier-curve easing over CSS-style control pairs
///
/// `ctrl` is a flat `(x, y)` pair list. Two pairs are interior control
/// points with implicit `(0,0)` and `(1,1)` endpoints (the cubic-bezier
/// preset form); longer lists must carry their own endpoints. The time
/// remapping evaluates the Bernstein polynomial of the y components, so
/// `f(0) == start` and `f(1) == end` whenever the endpoints are `(0,0)` and
/// `(1,1)`.
#[must_use]
pub fn custom_curve(t: f64, ctrl: &[f64], start: f64, end: f64) -> f64 {
    debug_assert!(ctrl.len() >= 4 && ctrl.len() % 2 == 0);
    let ys: Vec<f64> = if ctrl.len() == 4 {
        vec![0.0, ctrl[1], ctrl[3], 1.0]
    } else {
        ctrl.iter().skip(1).step_by(2).copied().collect()
    };
    linear(bezier_curve(t, &ys), start, end)
}

macro_rules! curve_presets {
    ($($(#[$doc:meta])* $name:ident => [$($p:expr),*];)*) => {$(
        $(#[$doc])*
        #[must_use]
        pub fn $name(t: f64, start: f64, end: f64) -> f64 {
            custom_curve(t, &[$($p),*], start, end)
        }
    )*};
}

curve_presets! {
    /// Standard CSS ease
    ease => [0.25, 0.1, 0.25, 1.0];
    /// Standard CSS ease-in
    ease_in => [0.42, 0.0, 1.0, 1.0];
    /// Standard CSS ease-out
    ease_out => [0.0, 0.0, 0.58, 1.0];
    /// Standard CSS ease-in-out
    ease_in_out => [0.42, 0.0, 0.58, 1.0];
    /// Penner ease-in quadratic (approximated)
    ease_in_quad => [0.550, 0.085, 0.680, 0.530];
    /// Penner ease-in cubic
    ease_in_cubic => [0.550, 0.055, 0.675, 0.190];
    /// Penner ease-in quartic
    ease_in_quart => [0.895, 0.030, 0.685, 0.220];
    /// Penner ease-in quintic
    ease_in_quint => [0.755, 0.050, 0.855, 0.060];
    /// Penner ease-in sine
    ease_in_sine => [0.470, 0.000, 0.745, 0.715];
    /// Penner ease-in exponential
    ease_in_expo => [0.950, 0.050, 0.795, 0.035];
    /// Penner ease-in circular
    ease_in_circ => [0.600, 0.040, 0.980, 0.335];
    /// Penner ease-out quadratic
    ease_out_quad => [0.250, 0.460, 0.450, 0.940];
    /// Penner ease-out cubic
    ease_out_cubic => [0.215, 0.610, 0.355, 1.000];
    /// Penner ease-out quartic
    ease_out_quart => [0.165, 0.840, 0.440, 1.000];
    /// Penner ease-out quintic
    ease_out_quint => [0.230, 1.000, 0.320, 1.000];
    /// Penner ease-out sine
    ease_out_sine => [0.390, 0.575, 0.565, 1.000];
    /// Penner ease-out exponential
    ease_out_expo => [0.190, 1.000, 0.220, 1.000];
    /// Penner ease-out circular
    ease_out_circ => [0.075, 0.820, 0.165, 1.000];
    /// Penner ease-in-out quadratic
    ease_in_out_quad => [0.455, 0.030, 0.515, 0.955];
    /// Penner ease-in-out cubic
    ease_in_out_cubic => [0.645, 0.045, 0.355, 1.000];
    /// Penner ease-in-out quartic
    ease_in_out_quart => [0.770, 0.000, 0.175, 1.000];
    /// Penner ease-in-out quintic
    ease_in_out_quint => [0.860, 0.000, 0.070, 1.000];
    /// Penner ease-in-out sine
    ease_in_out_sine => [0.445, 0.050, 0.550, 0.950];
    /// Penner ease-in-out exponential
    ease_in_out_expo => [1.000, 0.000, 0.000, 1.000];
    /// Penner ease-in-out circular
    ease_in_out_circ => [0.785, 0.135, 0.150, 0.860];
    /// Overshoot below the start before settling in
    backstart => [0.0, 0.0, 0.2, -0.3, 0.6, 0.26, 1.0, 1.0];
    /// Overshoot past the end before springing back
    boing => [0.0, 0.0, 0.42, 0.0, 0.58, 1.5, 1.0, 1.0];
}

/// Finite sequence of exactly `steps` values from `start` to `end` inclusive
///
/// `t` advances over `steps - 1` even divisions; each value is produced by
/// `func(t, start, end)`.
#[must_use]
pub fn interpolate_range(
    start: f64,
    end: f64,
    steps: usize,
    func: impl Fn(f64, f64, f64) -> f64,
) -> Vec<f64> {
    let nsteps = steps.saturating_sub(1).max(1) as f64;
    (0..steps)
        .map(|i| func(i as f64 / nsteps, start, end))
        .collect()
}

/// Exactly `steps` values spanning one full revolution over `[0, 360)`
///
/// The duplicate closing point at 360 is excluded.
#[must_use]
pub fn circle_range(steps: usize, func: impl Fn(f64, f64, f64) -> f64) -> Vec<f64> {
    let mut values = interpolate_range(0.0, 360.0, steps + 1, func);
    values.truncate(steps);
    values
}

/// Vector-valued bezier at `steps` even parameter values, endpoints included
///
/// Each control point is an N-tuple (an RGB triple, a 2-D point, ...); each
/// component is evaluated as an independent Bernstein polynomial.
#[must_use]
pub fn bezier_curve_range<const N: usize>(steps: usize, points: &[[f64; N]]) -> Vec<[f64; N]> {
    let nsteps = steps.saturating_sub(1).max(1) as f64;
    (0..steps)
        .map(|step| {
            let t = step as f64 / nsteps;
            let mut value = [0.0; N];
            for (axis, slot) in value.iter_mut().enumerate() {
                let component: Vec<f64> = points.iter().map(|p| p[axis]).collect();
                *slot = bezier_curve(t, &component);
            }
            value
        })
        .collect()
}
