// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw instructions produced by indicator layout.
//!
//! A [`Mark`] is a single primitive (arc, rectangle, rule or text) in scene coordinates, tagged
//! with a stable [`MarkId`], a z-index and the [`MarkGroup`] it belongs to. Marks are plain data:
//! a renderer consumes them directly or through the diffs produced by [`crate::Scene`].

extern crate alloc;

use alloc::string::String;

use kurbo::{Affine, BezPath, Circle, Point, Rect, Shape};
use peniko::{Brush, Color};
use smallvec::SmallVec;

use crate::measure::Font;

/// Stable identity of a mark across frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Wraps a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// The visual group a mark belongs to.
///
/// Groups mirror the layers of an indicator: the number/delta text block, the title, and the
/// gauge body plus its axis for each gauge shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkGroup {
    /// The number and delta text block.
    Numbers,
    /// The indicator title.
    Title,
    /// Arcs of an angular gauge.
    AngularGauge,
    /// Ticks and labels of an angular gauge.
    AngularAxis,
    /// Rectangles and threshold rule of a bullet gauge.
    BulletGauge,
    /// Ticks and labels of a bullet gauge.
    BulletAxis,
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor point.
    Start,
    /// Text is centered on the anchor point.
    Middle,
    /// Text ends at the anchor point.
    End,
}

/// Vertical placement of text relative to its anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The anchor is on the alphabetic baseline.
    Alphabetic,
    /// The anchor is on the vertical middle.
    Middle,
    /// The anchor is at the top of the text.
    Hanging,
}

/// A paint + width pair for stroked outlines.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }

    /// A stroke that paints nothing.
    pub fn none() -> Self {
        Self::solid(Color::TRANSPARENT, 0.0)
    }
}

/// An annular sector.
///
/// Angles are in radians, measured clockwise from 12 o'clock as in Vega/d3 arc marks, so
/// `-π/2` points left and `π/2` points right.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcMark {
    /// Center in scene coordinates.
    pub center: Point,
    /// Inner radius.
    pub inner_radius: f64,
    /// Outer radius.
    pub outer_radius: f64,
    /// Start angle.
    pub start_angle: f64,
    /// End angle.
    pub end_angle: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Outline stroke.
    pub stroke: StrokeStyle,
}

impl ArcMark {
    /// Converts the sector into a closed path, flattening curves to `tolerance`.
    pub fn to_path(&self, tolerance: f64) -> BezPath {
        // kurbo measures angles from +x; arc marks measure from 12 o'clock.
        let start = self.start_angle - core::f64::consts::FRAC_PI_2;
        let sweep = self.end_angle - self.start_angle;
        Circle::new(self.center, self.outer_radius)
            .segment(self.inner_radius, start, sweep)
            .path_elements(tolerance)
            .collect()
    }
}

/// An axis-aligned rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RectMark {
    /// Geometry in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Outline stroke.
    pub stroke: StrokeStyle,
}

/// A stroked line segment.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleMark {
    /// Start point.
    pub p0: Point,
    /// End point.
    pub p1: Point,
    /// Stroke.
    pub stroke: StrokeStyle,
}

/// One run of text inside a [`TextMark`].
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    /// Text content (unshaped).
    pub text: String,
    /// Font used to set the run.
    pub font: Font,
    /// Fill paint.
    pub fill: Brush,
    /// Anchor position in the mark's local coordinates.
    pub pos: Point,
    /// Horizontal anchor of the run at `pos`.
    pub anchor: TextAnchor,
}

/// A block of text runs sharing one transform.
///
/// The number and delta are laid out as two runs of a single block so the fit scale applies to
/// both uniformly.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    /// Runs in paint order.
    pub runs: SmallVec<[TextRun; 2]>,
    /// Local-to-scene transform (translation plus uniform fit scale).
    pub transform: Affine,
    /// Vertical placement of every run relative to its `pos`.
    pub baseline: TextBaseline,
}

impl TextMark {
    /// Creates a single-run text mark anchored at `pos` in scene coordinates.
    pub fn single(
        pos: Point,
        text: impl Into<String>,
        font: Font,
        anchor: TextAnchor,
        baseline: TextBaseline,
    ) -> Self {
        let fill = Brush::Solid(font.color);
        let mut runs = SmallVec::new();
        runs.push(TextRun {
            text: text.into(),
            font,
            fill,
            pos: Point::ORIGIN,
            anchor,
        });
        Self {
            runs,
            transform: Affine::translate(pos.to_vec2()),
            baseline,
        }
    }

    /// Returns the uniform scale factor of `transform`.
    pub fn scale(&self) -> f64 {
        self.transform.as_coeffs()[0]
    }
}

/// The geometry and paint of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// An annular sector.
    Arc(ArcMark),
    /// A rectangle.
    Rect(RectMark),
    /// A line segment.
    Rule(RuleMark),
    /// A text block.
    Text(TextMark),
}

/// Discriminant of [`MarkPayload`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// [`MarkPayload::Arc`].
    Arc,
    /// [`MarkPayload::Rect`].
    Rect,
    /// [`MarkPayload::Rule`].
    Rule,
    /// [`MarkPayload::Text`].
    Text,
}

impl MarkPayload {
    /// Returns the payload kind.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Arc(_) => MarkKind::Arc,
            Self::Rect(_) => MarkKind::Rect,
            Self::Rule(_) => MarkKind::Rule,
            Self::Text(_) => MarkKind::Text,
        }
    }

    /// Geometric bounds, if known without text measurement.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Arc(a) => Some(a.to_path(0.1).bounding_box()),
            Self::Rect(r) => Some(r.rect),
            Self::Rule(r) => Some(Rect::from_points(r.p0, r.p1)),
            Self::Text(_) => None,
        }
    }
}

/// A single draw instruction.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable id.
    pub id: MarkId,
    /// Owning group.
    pub group: MarkGroup,
    /// Paint order; renderers sort by `(z_index, id)`.
    pub z_index: i32,
    /// Geometry and paint.
    pub payload: MarkPayload,
}

impl Mark {
    /// Creates a mark.
    pub fn new(id: MarkId, group: MarkGroup, z_index: i32, payload: MarkPayload) -> Self {
        Self {
            id,
            group,
            z_index,
            payload,
        }
    }

    /// Returns the payload kind.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_2;

    use peniko::color::palette::css;

    use super::*;

    fn arc(start: f64, end: f64) -> ArcMark {
        ArcMark {
            center: Point::new(100.0, 100.0),
            inner_radius: 30.0,
            outer_radius: 40.0,
            start_angle: start,
            end_angle: end,
            fill: css::TOMATO.into(),
            stroke: StrokeStyle::none(),
        }
    }

    #[test]
    fn upper_half_arc_stays_above_its_center() {
        let b = arc(-FRAC_PI_2, FRAC_PI_2).to_path(0.01).bounding_box();
        assert!(b.y1 <= 100.0 + 0.05, "arc should not dip below center: {b:?}");
        assert!((b.y0 - 60.0).abs() < 0.05, "top should reach the outer radius: {b:?}");
        assert!((b.x0 - 60.0).abs() < 0.05, "left edge: {b:?}");
        assert!((b.x1 - 140.0).abs() < 0.05, "right edge: {b:?}");
    }

    #[test]
    fn quarter_arc_from_the_left_covers_the_upper_left_quadrant() {
        let b = arc(-FRAC_PI_2, 0.0).to_path(0.01).bounding_box();
        assert!(b.x1 <= 100.0 + 0.05, "{b:?}");
        assert!(b.y1 <= 100.0 + 0.05, "{b:?}");
    }

    #[test]
    fn single_text_mark_translates_to_its_anchor() {
        let t = TextMark::single(
            Point::new(3.0, 4.0),
            "hi",
            Font::new(10.0),
            TextAnchor::Middle,
            TextBaseline::Alphabetic,
        );
        assert_eq!(t.runs.len(), 1);
        assert_eq!(t.transform * Point::ORIGIN, Point::new(3.0, 4.0));
        assert_eq!(t.scale(), 1.0);
    }

    #[test]
    fn rule_bounds_are_the_segment_box() {
        let p = MarkPayload::Rule(RuleMark {
            p0: Point::new(5.0, 1.0),
            p1: Point::new(2.0, 9.0),
            stroke: StrokeStyle::solid(css::BLACK, 1.0),
        });
        assert_eq!(p.kind(), MarkKind::Rule);
        assert_eq!(p.bounds(), Some(Rect::new(2.0, 1.0, 5.0, 9.0)));
    }
}
