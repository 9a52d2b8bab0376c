// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for indicator layout.
//!
//! Fitting the headline number into its box, and placing titles above or beside the gauge, both
//! need measured text extents. Shaping stays downstream: callers plug in a real measurer (Parley,
//! web canvas, ...) or use [`HeuristicTextMeasurer`].

extern crate alloc;

use alloc::sync::Arc;

use kurbo::{Point, Rect};
use peniko::Color;
use peniko::color::palette::css;

use crate::mark::{TextAnchor, TextBaseline};

/// A minimal text measurement interface used by the layout pass.
pub trait TextMeasurer {
    /// Measure a single line of text set in `font`.
    fn measure(&self, text: &str, font: &Font) -> TextMetrics;
}

/// Font family selection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family (e.g. `"Open Sans"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the font family string for CSS-style font declarations.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// A resolved font: what to measure with and what to paint with.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    /// Font family.
    pub family: FontFamily,
    /// Font size in scene coordinates (pixels).
    pub size: f64,
    /// Font weight.
    pub weight: FontWeight,
    /// Text color.
    pub color: Color,
}

impl Font {
    /// Creates a sans-serif font of the given size.
    #[must_use]
    pub fn new(size: f64) -> Self {
        Self {
            family: FontFamily::SansSerif,
            size,
            weight: FontWeight::NORMAL,
            color: css::BLACK,
        }
    }

    /// Sets the font size.
    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Sets the family.
    #[must_use]
    pub fn with_family(mut self, family: FontFamily) -> Self {
        self.family = family;
        self
    }

    /// Sets the weight.
    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// The advance width.
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
}

impl TextMetrics {
    /// Returns `ascent + descent`.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.ascent + self.descent
    }

    /// Bounding box of the line when its baseline origin sits at `(x, baseline)` and it starts
    /// at `x` (start-anchored).
    #[must_use]
    pub fn bounds_at(&self, x: f64, baseline: f64) -> Rect {
        Rect::new(
            x,
            baseline - self.ascent,
            x + self.advance_width,
            baseline + self.descent,
        )
    }

    /// Bounding box of the line placed at `pos` with the given anchor and baseline.
    #[must_use]
    pub fn anchored_bounds(&self, pos: Point, anchor: TextAnchor, baseline: TextBaseline) -> Rect {
        let x = match anchor {
            TextAnchor::Start => pos.x,
            TextAnchor::Middle => pos.x - 0.5 * self.advance_width,
            TextAnchor::End => pos.x - self.advance_width,
        };
        let alphabetic = match baseline {
            TextBaseline::Alphabetic => pos.y,
            TextBaseline::Middle => pos.y + 0.5 * (self.ascent - self.descent),
            TextBaseline::Hanging => pos.y + self.ascent,
        };
        self.bounds_at(x, alphabetic)
    }
}

/// A tiny heuristic text measurer suitable for demos and tests.
///
/// It assumes an average glyph width of ~0.6em and a baseline at ~0.8em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font: &Font) -> TextMetrics {
        TextMetrics {
            advance_width: 0.6 * font.size * text.chars().count() as f64,
            ascent: 0.8 * font.size,
            descent: 0.2 * font.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_width_scales_with_glyph_count_and_size() {
        let m = HeuristicTextMeasurer;
        let a = m.measure("500", &Font::new(80.0));
        assert_eq!(a.advance_width, 144.0);
        assert_eq!(a.height(), 80.0);

        let b = m.measure("", &Font::new(80.0));
        assert_eq!(b.advance_width, 0.0);
    }

    #[test]
    fn bounds_hang_above_and_below_the_baseline() {
        let metrics = HeuristicTextMeasurer.measure("ab", &Font::new(10.0));
        let r = metrics.bounds_at(5.0, 20.0);
        assert_eq!(r, Rect::new(5.0, 12.0, 17.0, 22.0));
    }

    #[test]
    fn anchored_bounds_follow_anchor_and_baseline() {
        let metrics = HeuristicTextMeasurer.measure("abcd", &Font::new(10.0));
        let p = Point::new(100.0, 50.0);
        let r = metrics.anchored_bounds(p, TextAnchor::End, TextBaseline::Hanging);
        assert_eq!(r, Rect::new(76.0, 50.0, 100.0, 60.0));
        let r = metrics.anchored_bounds(p, TextAnchor::Middle, TextBaseline::Middle);
        assert_eq!(r, Rect::new(88.0, 45.0, 112.0, 55.0));
    }
}
