// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Angular (semicircular dial) gauge geometry.
//!
//! The dial is the upper half of an annulus whose outer radius fills the domain
//! (`min(width / 2, height)`) and whose inner radius is a fixed fraction of it. Every layer
//! (background, steps, threshold, value, outline) is an arc of that annulus thinned around its
//! middle radius by the layer's relative height.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use smallvec::SmallVec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::angle::ValueRange;
use crate::axis::{AxisTick, place_label, tick_values, ticks_bounds};
use crate::layout::DomainRect;
use crate::mark::{ArcMark, RuleMark, StrokeStyle, TextAnchor, TextBaseline};
use crate::measure::TextMeasurer;
use crate::spec::{GaugeSpec, LineSpec};

/// Inner radius as a fraction of the outer radius.
pub const INNER_RADIUS_FRACTION: f64 = 0.75;

/// Vertical shift, in ems, that centers a label on its anchor.
pub const MID_SHIFT: f64 = 0.35;

/// Center and radii of the dial.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngularGeometry {
    /// Center of the dial (the middle of its flat bottom edge).
    pub center: Point,
    /// Outer radius.
    pub radius: f64,
    /// Inner radius.
    pub inner_radius: f64,
}

impl AngularGeometry {
    /// Fits the dial into `domain`.
    pub fn new(domain: &DomainRect) -> Self {
        let radius = (0.5 * domain.width).min(domain.height).max(0.0);
        Self {
            center: Point::new(
                domain.center_x(),
                domain.top + 0.5 * domain.height + 0.5 * radius,
            ),
            radius,
            inner_radius: INNER_RADIUS_FRACTION * radius,
        }
    }

    /// Inner and outer radius of a layer with relative `height`.
    pub fn layer_radii(&self, height: f64) -> (f64, f64) {
        let mid = 0.5 * (self.inner_radius + self.radius);
        let half = 0.5 * height * (self.radius - self.inner_radius);
        (mid - half, mid + half)
    }

    /// An arc layer between two angles.
    pub fn arc(
        &self,
        start_angle: f64,
        end_angle: f64,
        height: f64,
        fill: Color,
        line: LineSpec,
    ) -> ArcMark {
        let (inner_radius, outer_radius) = self.layer_radii(height);
        ArcMark {
            center: self.center,
            inner_radius,
            outer_radius,
            start_angle,
            end_angle,
            fill: fill.into(),
            stroke: StrokeStyle::solid(line.color, line.width),
        }
    }

    /// An arc layer covering `[from, to]` of `range`.
    pub fn range_arc(
        &self,
        range: &ValueRange,
        from: f64,
        to: f64,
        height: f64,
        fill: Color,
        line: LineSpec,
    ) -> ArcMark {
        self.arc(
            range.value_to_angle(from),
            range.value_to_angle(to),
            height,
            fill,
            line,
        )
    }

    /// Point on the outer rim at geometric angle `rad` (counter-clockwise from +x).
    pub fn rim_point(&self, rad: f64) -> Point {
        self.center + self.radius * Vec2::new(rad.cos(), -rad.sin())
    }
}

/// Geometry of an angular gauge.
#[derive(Clone, Debug, PartialEq)]
pub struct AngularGaugeLayout {
    /// Dial placement.
    pub geometry: AngularGeometry,
    /// Full-range background.
    pub background: ArcMark,
    /// Step bands, in order.
    pub steps: SmallVec<[ArcMark; 4]>,
    /// Threshold marker.
    pub threshold: Option<ArcMark>,
    /// Current value arc.
    pub value: ArcMark,
    /// Border outline (transparent fill).
    pub outline: ArcMark,
    /// Axis ticks and labels.
    pub ticks: Vec<AxisTick>,
    /// Union of tick segments and labels.
    pub axis_bounds: Option<Rect>,
}

impl AngularGaugeLayout {
    /// Topmost extent of the gauge and its axis.
    pub fn top(&self) -> f64 {
        self.axis_bounds
            .map(|b| b.y0)
            .unwrap_or(self.geometry.center.y - self.geometry.radius)
    }
}

/// Lays out an angular gauge in `domain`.
///
/// `value_angle` is the end angle of the value arc; callers pass the mapped current value, or an
/// interpolated angle while a transition runs.
pub fn layout_angular(
    gauge: &GaugeSpec,
    range: ValueRange,
    domain: &DomainRect,
    value_angle: f64,
    measurer: &dyn TextMeasurer,
) -> AngularGaugeLayout {
    let geometry = AngularGeometry::new(domain);
    let border = LineSpec {
        color: gauge.bordercolor,
        width: 0.0,
    };

    let background = geometry.range_arc(&range, range.min, range.max, 1.0, gauge.bgcolor, border);
    let steps = gauge
        .steps
        .iter()
        .map(|s| geometry.range_arc(&range, s.range.min, s.range.max, s.height, s.color, s.line))
        .collect();
    let threshold = gauge.drawn_threshold().map(|t| {
        let line = LineSpec {
            color: t.color,
            width: t.width,
        };
        geometry.range_arc(&range, t.value, t.value, t.height, t.color, line)
    });
    let value = geometry.arc(
        range.value_to_angle(range.min),
        value_angle,
        gauge.value.height,
        gauge.value.color,
        gauge.value.line,
    );
    let outline = geometry.range_arc(
        &range,
        range.min,
        range.max,
        1.0,
        Color::TRANSPARENT,
        LineSpec {
            color: gauge.bordercolor,
            width: gauge.borderwidth,
        },
    );

    let ticks = if gauge.axis.visible {
        angular_ticks(gauge, &range, &geometry, measurer)
    } else {
        Vec::new()
    };
    let axis_bounds = ticks_bounds(&ticks);

    AngularGaugeLayout {
        geometry,
        background,
        steps,
        threshold,
        value,
        outline,
        ticks,
        axis_bounds,
    }
}

fn angular_ticks(
    gauge: &GaugeSpec,
    range: &ValueRange,
    geometry: &AngularGeometry,
    measurer: &dyn TextMeasurer,
) -> Vec<AxisTick> {
    let axis = &gauge.axis;
    let sign = if axis.ticks_inside { -1.0 } else { 1.0 };
    let pad = 0.5 * axis.tick_width;
    let standoff = axis.label_standoff();
    let font_size = axis.tick_font.size;

    tick_values(axis, *range)
        .into_iter()
        .map(|(value, text)| {
            let rad = range.tick_angle(value);
            let (sin, cos) = (rad.sin(), rad.cos());
            let anchor = geometry.rim_point(rad);
            let normal = Vec2::new(cos, -sin);

            let rule = (axis.tick_len > 0.0).then(|| RuleMark {
                p0: anchor + sign * pad * normal,
                p1: anchor + sign * (pad + axis.tick_len) * normal,
                stroke: StrokeStyle::solid(axis.tick_color, axis.tick_width),
            });

            let label = axis.show_labels.then(|| {
                let f = if sin > 0.0 { 0.2 } else { 1.0 };
                let offset = Vec2::new(
                    cos * standoff,
                    -sin * (standoff + font_size * f) + cos.abs() * font_size * MID_SHIFT,
                );
                let text_anchor = if cos.abs() < 0.1 {
                    TextAnchor::Middle
                } else if cos > 0.0 {
                    TextAnchor::Start
                } else {
                    TextAnchor::End
                };
                place_label(
                    measurer,
                    axis,
                    text,
                    anchor + offset,
                    text_anchor,
                    TextBaseline::Alphabetic,
                )
            });

            AxisTick { value, rule, label }
        })
        .collect()
}
