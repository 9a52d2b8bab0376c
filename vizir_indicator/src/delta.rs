// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delta computation and text.

extern crate alloc;

use alloc::string::String;

use peniko::Color;

use crate::spec::DeltaSpec;

/// Change of a value against a reference.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Delta {
    /// `value - reference`.
    pub absolute: f64,
    /// `absolute / reference`, or `0` when the reference is `0`.
    pub relative: f64,
}

impl Delta {
    /// Computes the change of `value` against `reference`.
    pub fn new(value: f64, reference: f64) -> Self {
        let absolute = value - reference;
        let relative = if reference == 0.0 {
            0.0
        } else {
            absolute / reference
        };
        Self { absolute, relative }
    }
}

impl DeltaSpec {
    /// Computes the delta of `value` against the configured reference.
    pub fn delta(&self, value: f64) -> Delta {
        Delta::new(value, self.reference)
    }

    /// The number shown for `delta`: relative or absolute depending on `show_percentage`.
    pub fn shown_value(&self, delta: Delta) -> f64 {
        if self.show_percentage {
            delta.relative
        } else {
            delta.absolute
        }
    }

    /// Text for a shown value: `"-"` for zero, otherwise the direction symbol followed by the
    /// formatted magnitude.
    pub fn text(&self, shown: f64) -> String {
        if shown == 0.0 {
            return String::from("-");
        }
        let style = if shown > 0.0 {
            &self.increasing
        } else {
            &self.decreasing
        };
        let mut text = style.symbol.clone();
        text.push_str(&self.format.format(shown.abs()));
        text
    }

    /// Text color for `delta`.
    pub fn color(&self, delta: Delta) -> Color {
        if delta.absolute >= 0.0 || delta.absolute.is_nan() {
            self.increasing.color
        } else {
            self.decreasing.color
        }
    }
}
