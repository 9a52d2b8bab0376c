// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value-to-angle mapping for the angular gauge.

use core::f64::consts::{FRAC_PI_2, PI};

/// Scalar bounds of a gauge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    /// Lower bound (`vmin`).
    pub min: f64,
    /// Upper bound (`vmax`).
    pub max: f64,
}

impl ValueRange {
    /// Creates a range.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `max - min` is a usable, finite, positive span.
    pub fn is_degenerate(&self) -> bool {
        let span = self.max - self.min;
        !(span.is_finite() && span > 0.0)
    }

    /// Clamps `v` into `[min, max]`.
    ///
    /// Degenerate ranges and NaN values clamp to `min`.
    pub fn clamp(&self, v: f64) -> f64 {
        if self.is_degenerate() || v.is_nan() {
            return self.min;
        }
        v.clamp(self.min, self.max)
    }

    /// Maps `v` to an arc angle in `[-π/2, π/2]` (clockwise from 12 o'clock).
    ///
    /// Values at or below `min` map to `-π/2`, values at or above `max` map to `π/2`. A
    /// degenerate range maps every value to the start angle `-π/2`.
    pub fn value_to_angle(&self, v: f64) -> f64 {
        if self.is_degenerate() || v.is_nan() {
            return -FRAC_PI_2;
        }
        let angle = (v - self.min) / (self.max - self.min) * PI - FRAC_PI_2;
        angle.clamp(-FRAC_PI_2, FRAC_PI_2)
    }

    /// Maps `v` to the geometric (counter-clockwise from +x) angle used for axis ticks.
    ///
    /// `min` sits at `π` (left), `max` at `0` (right).
    pub fn tick_angle(&self, v: f64) -> f64 {
        FRAC_PI_2 - self.value_to_angle(v)
    }
}

/// Free-function form of [`ValueRange::value_to_angle`].
pub fn value_to_angle(v: f64, vmin: f64, vmax: f64) -> f64 {
    ValueRange::new(vmin, vmax).value_to_angle(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn clamps_outside_the_range() {
        let r = ValueRange::new(0.0, 100.0);
        for v in [-1e9, -5.0, 0.0] {
            assert_eq!(r.value_to_angle(v), -FRAC_PI_2, "v = {v}");
        }
        for v in [100.0, 101.0, 1e9, f64::INFINITY] {
            assert_eq!(r.value_to_angle(v), FRAC_PI_2, "v = {v}");
        }
    }

    #[test]
    fn is_monotonic_inside_the_range() {
        let r = ValueRange::new(-20.0, 30.0);
        let mut prev = r.value_to_angle(-20.0);
        for i in 0..=500 {
            let v = -20.0 + 0.1 * f64::from(i);
            let a = r.value_to_angle(v);
            assert!(a >= prev - EPS, "angle decreased at v = {v}");
            prev = a;
        }
        assert!((r.value_to_angle(5.0)).abs() < EPS, "midpoint maps to 12 o'clock");
    }

    #[test]
    fn degenerate_range_maps_to_start_angle() {
        let r = ValueRange::new(5.0, 5.0);
        assert!(r.is_degenerate());
        assert_eq!(r.value_to_angle(5.0), -FRAC_PI_2);
        assert_eq!(r.value_to_angle(1e6), -FRAC_PI_2);
        assert_eq!(value_to_angle(3.0, 10.0, 2.0), -FRAC_PI_2);
        assert_eq!(r.clamp(9.0), 5.0);
    }

    #[test]
    fn nan_value_maps_to_start_angle() {
        assert_eq!(value_to_angle(f64::NAN, 0.0, 1.0), -FRAC_PI_2);
    }

    #[test]
    fn tick_angle_runs_from_left_to_right() {
        let r = ValueRange::new(0.0, 10.0);
        assert!((r.tick_angle(0.0) - PI).abs() < EPS);
        assert!(r.tick_angle(10.0).abs() < EPS);
        assert!((r.tick_angle(5.0) - FRAC_PI_2).abs() < EPS);
    }
}
