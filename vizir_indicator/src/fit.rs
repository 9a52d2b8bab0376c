// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fit-to-target text scaling.
//!
//! The headline number is drawn at its configured font size and then uniformly scaled so its
//! measured box fits the space the layout allots. A [`ScaleMemo`] keeps the applied scale from
//! bouncing back up while the target stays the same size: a value that once needed shrinking
//! keeps the text at that size until the domain is resized.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use kurbo::Rect;

/// Identifies the size of the target a scale was computed for.
#[derive(Clone, Copy, Debug)]
pub enum ScaleKey {
    /// A `width × height` box.
    Box {
        /// Target width.
        width: f64,
        /// Target height.
        height: f64,
    },
    /// A circle of the given radius.
    Circle {
        /// Target radius.
        radius: f64,
    },
}

impl PartialEq for ScaleKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Box { width, height },
                Self::Box {
                    width: w2,
                    height: h2,
                },
            ) => width.to_bits() == w2.to_bits() && height.to_bits() == h2.to_bits(),
            (Self::Circle { radius }, Self::Circle { radius: r2 }) => {
                radius.to_bits() == r2.to_bits()
            }
            _ => false,
        }
    }
}

/// Result of a fit computation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fit {
    /// Largest uniform scale that fits the target.
    pub scale: f64,
    /// Key of the target.
    pub key: ScaleKey,
}

/// Largest uniform scale at which `measured` fits inside a `width × height` box.
///
/// An empty measured extent on an axis does not constrain that axis.
pub fn fit_box(measured: Rect, width: f64, height: f64) -> Fit {
    let sx = ratio(width, measured.width());
    let sy = ratio(height, measured.height());
    Fit {
        scale: sx.min(sy),
        key: ScaleKey::Box { width, height },
    }
}

/// Largest uniform scale at which `measured` fits inside a circle of `radius`.
///
/// The box is treated as hanging from the circle center at its bottom middle, so its far corner
/// lies at `sqrt((w/2)² + h²)`.
pub fn fit_circle(measured: Rect, radius: f64) -> Fit {
    let half_w = 0.5 * measured.width();
    let h = measured.height();
    let extent = (half_w * half_w + h * h).sqrt();
    Fit {
        scale: ratio(radius, extent),
        key: ScaleKey::Circle { radius },
    }
}

fn ratio(target: f64, measured: f64) -> f64 {
    if measured > 0.0 {
        (target / measured).max(0.0)
    } else {
        f64::INFINITY
    }
}

/// Per-instance memory of the last applied fit scale.
///
/// While the key is unchanged the applied scale only shrinks. A new key resets the memo to `1.0`
/// before applying, so text is never drawn larger than its font size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScaleMemo {
    state: Option<(ScaleKey, f64)>,
}

impl ScaleMemo {
    /// Scale a memo starts from when it sees a new key.
    pub const INITIAL: f64 = 1.0;

    /// Creates an empty memo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `fit`, returning the scale to draw with.
    pub fn apply(&mut self, fit: Fit) -> f64 {
        let previous = match self.state {
            Some((key, value)) if key == fit.key => value,
            Some(_) => {
                tracing::debug!(key = ?fit.key, "fit target resized; resetting scale memo");
                Self::INITIAL
            }
            None => Self::INITIAL,
        };
        let applied = if fit.scale.is_nan() {
            previous
        } else {
            previous.min(fit.scale)
        };
        self.state = Some((fit.key, applied));
        applied
    }

    /// The last applied scale, if any.
    pub fn value(&self) -> Option<f64> {
        self.state.map(|(_, v)| v)
    }

    /// The key of the last applied fit, if any.
    pub fn key(&self) -> Option<ScaleKey> {
        self.state.map(|(k, _)| k)
    }

    /// Forgets the memo.
    pub fn reset(&mut self) {
        self.state = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn box_fit_is_the_tightest_axis() {
        let measured = Rect::new(0.0, -80.0, 200.0, 20.0);
        let fit = fit_box(measured, 100.0, 300.0);
        assert!((fit.scale - 0.5).abs() < EPS);
        assert!(fit.scale * measured.width() <= 100.0 + EPS);
        assert!(fit.scale * measured.height() <= 300.0 + EPS);

        let fit = fit_box(measured, 1000.0, 50.0);
        assert!((fit.scale - 0.5).abs() < EPS);
    }

    #[test]
    fn box_fit_is_maximal() {
        let measured = Rect::new(0.0, 0.0, 37.0, 11.0);
        let fit = fit_box(measured, 90.0, 20.0);
        let grown = fit.scale * (1.0 + 1e-6);
        assert!(
            grown * measured.width() > 90.0 || grown * measured.height() > 20.0,
            "a larger scale should overflow"
        );
    }

    #[test]
    fn circle_fit_uses_half_width_and_full_height() {
        let measured = Rect::new(-30.0, -40.0, 30.0, 0.0);
        let fit = fit_circle(measured, 25.0);
        assert!((fit.scale - 0.5).abs() < EPS);
        assert_eq!(fit.key, ScaleKey::Circle { radius: 25.0 });
    }

    #[test]
    fn empty_measurement_is_unconstrained() {
        let fit = fit_box(Rect::ZERO, 10.0, 10.0);
        assert_eq!(fit.scale, f64::INFINITY);
        let mut memo = ScaleMemo::new();
        assert_eq!(memo.apply(fit), 1.0);
    }

    #[test]
    fn memo_only_shrinks_under_a_fixed_key() {
        let key = ScaleKey::Box {
            width: 100.0,
            height: 50.0,
        };
        let mut memo = ScaleMemo::new();
        let applied: alloc::vec::Vec<f64> = [0.9, 0.6, 0.8, 0.4, 0.95]
            .into_iter()
            .map(|scale| memo.apply(Fit { scale, key }))
            .collect();
        assert_eq!(applied, [0.9, 0.6, 0.6, 0.4, 0.4]);
    }

    #[test]
    fn memo_resets_when_the_key_changes() {
        let small = ScaleKey::Box {
            width: 36.0,
            height: 18.0,
        };
        let large = ScaleKey::Box {
            width: 216.0,
            height: 198.0,
        };
        let mut memo = ScaleMemo::new();
        assert_eq!(memo.apply(Fit { scale: 0.7, key: large }), 0.7);
        assert_eq!(memo.apply(Fit { scale: 0.2, key: small }), 0.2);
        assert_eq!(memo.apply(Fit { scale: 0.9, key: large }), 0.9);
        assert_eq!(memo.key(), Some(large));
    }

    #[test]
    fn memo_never_exceeds_the_initial_scale() {
        let mut memo = ScaleMemo::new();
        let key = ScaleKey::Circle { radius: 10.0 };
        assert_eq!(memo.apply(Fit { scale: 3.0, key }), ScaleMemo::INITIAL);
        memo.reset();
        assert_eq!(memo.value(), None);
    }
}
