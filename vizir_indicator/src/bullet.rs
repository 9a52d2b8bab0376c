// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bullet (horizontal bar) gauge geometry.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Color;
use smallvec::SmallVec;

use crate::angle::ValueRange;
use crate::axis::{AxisTick, place_label, tick_values, ticks_bounds};
use crate::layout::DomainRect;
use crate::mark::{RectMark, RuleMark, StrokeStyle, TextAnchor, TextBaseline};
use crate::measure::TextMeasurer;
use crate::scale::ScaleLinear;
use crate::spec::{GaugeSpec, LineSpec};

/// Fraction of the domain width kept for the number block beside a bullet gauge.
pub const NUMBER_DOMAIN_FRACTION: f64 = 0.25;

/// Gap between the bullet strip and the number block (and the title), as a fraction of the
/// domain width.
pub const BULLET_PADDING: f64 = 0.025;

/// Placement of the bullet strip and its value axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletGeometry {
    /// The strip.
    pub strip: Rect,
    /// Value to x mapping across the strip, clamped.
    pub scale: ScaleLinear,
}

impl BulletGeometry {
    /// Places the strip in `domain`, leaving room for the number block when `with_numbers`.
    pub fn new(domain: &DomainRect, range: &ValueRange, with_numbers: bool) -> Self {
        let width = if with_numbers {
            (1.0 - NUMBER_DOMAIN_FRACTION) * domain.width
        } else {
            domain.width
        };
        let strip = Rect::new(
            domain.left,
            domain.top,
            domain.left + width,
            domain.top + domain.height,
        );
        Self {
            strip,
            scale: ScaleLinear::new((range.min, range.max), (strip.x0, strip.x1)),
        }
    }

    /// Maps a value to x.
    pub fn x(&self, v: f64) -> f64 {
        self.scale.map(v)
    }

    /// Width of the value bar for `value`; the bar never passes the end of the range.
    pub fn bar_width(&self, value: f64) -> f64 {
        if value.is_nan() {
            return 0.0;
        }
        let (vmin, vmax) = self.scale.domain();
        (self.x(value.min(vmax)) - self.x(vmin)).max(0.0)
    }

    /// A full-height band between two values.
    fn band(&self, from: f64, to: f64, fill: Color, line: LineSpec) -> RectMark {
        let (x0, x1) = (self.x(from), self.x(to));
        RectMark {
            rect: Rect::new(x0.min(x1), self.strip.y0, x0.max(x1), self.strip.y1),
            fill: fill.into(),
            stroke: StrokeStyle::solid(line.color, line.width),
        }
    }
}

/// Geometry of a bullet gauge.
#[derive(Clone, Debug, PartialEq)]
pub struct BulletGaugeLayout {
    /// Strip placement.
    pub geometry: BulletGeometry,
    /// Full-range background.
    pub background: RectMark,
    /// Step bands, in order.
    pub steps: SmallVec<[RectMark; 4]>,
    /// Current value bar, vertically centered.
    pub value: RectMark,
    /// Threshold marker.
    pub threshold: Option<RuleMark>,
    /// Border outline (transparent fill).
    pub outline: RectMark,
    /// Axis ticks and labels below the strip.
    pub ticks: Vec<AxisTick>,
    /// Union of tick segments and labels.
    pub axis_bounds: Option<Rect>,
}

/// Lays out a bullet gauge in `domain`.
///
/// `bar_width` is the width of the value bar; callers pass
/// [`BulletGeometry::bar_width`] of the current value, or an interpolated width while a
/// transition runs.
pub fn layout_bullet(
    gauge: &GaugeSpec,
    range: ValueRange,
    domain: &DomainRect,
    with_numbers: bool,
    bar_width: f64,
    measurer: &dyn TextMeasurer,
) -> BulletGaugeLayout {
    let geometry = BulletGeometry::new(domain, &range, with_numbers);
    let strip = geometry.strip;
    let h = strip.height();

    let background = geometry.band(
        range.min,
        range.max,
        gauge.bgcolor,
        LineSpec {
            color: gauge.bordercolor,
            width: 0.0,
        },
    );
    let steps = gauge
        .steps
        .iter()
        .map(|s| geometry.band(s.range.min, s.range.max, s.color, s.line))
        .collect();

    let bar_height = gauge.value.height * h;
    let bar_x = geometry.x(range.min);
    let bar_y = strip.y0 + 0.5 * (h - bar_height);
    let value = RectMark {
        rect: Rect::new(bar_x, bar_y, bar_x + bar_width.max(0.0), bar_y + bar_height),
        fill: gauge.value.color.into(),
        stroke: StrokeStyle::solid(gauge.value.line.color, gauge.value.line.width),
    };

    let threshold = gauge.drawn_threshold().map(|t| {
        let x = geometry.x(t.value);
        let inset = 0.5 * (1.0 - t.height);
        RuleMark {
            p0: Point::new(x, strip.y0 + inset * h),
            p1: Point::new(x, strip.y0 + (1.0 - inset) * h),
            stroke: StrokeStyle::solid(t.color, t.width),
        }
    });

    let outline = geometry.band(
        range.min,
        range.max,
        Color::TRANSPARENT,
        LineSpec {
            color: gauge.bordercolor,
            width: gauge.borderwidth,
        },
    );

    let ticks = if gauge.axis.visible {
        bullet_ticks(gauge, &range, &geometry, measurer)
    } else {
        Vec::new()
    };
    let axis_bounds = ticks_bounds(&ticks);

    BulletGaugeLayout {
        geometry,
        background,
        steps,
        value,
        threshold,
        outline,
        ticks,
        axis_bounds,
    }
}

fn bullet_ticks(
    gauge: &GaugeSpec,
    range: &ValueRange,
    geometry: &BulletGeometry,
    measurer: &dyn TextMeasurer,
) -> Vec<AxisTick> {
    let axis = &gauge.axis;
    let y = geometry.strip.y1;
    let standoff = axis.label_standoff();
    let (lo, hi) = (range.min.min(range.max), range.min.max(range.max));

    tick_values(axis, *range)
        .into_iter()
        .map(|(value, text)| {
            let x = geometry.x(value);
            // Inside ticks at the ends would sit on the outline.
            let on_edge = value == lo || value == hi;
            let rule = (axis.tick_len > 0.0 && !(axis.ticks_inside && on_edge)).then(|| {
                let dy = if axis.ticks_inside {
                    -axis.tick_len
                } else {
                    axis.tick_len
                };
                RuleMark {
                    p0: Point::new(x, y),
                    p1: Point::new(x, y + dy),
                    stroke: StrokeStyle::solid(axis.tick_color, axis.tick_width),
                }
            });
            let label = axis.show_labels.then(|| {
                place_label(
                    measurer,
                    axis,
                    text,
                    Point::new(x, y + standoff),
                    TextAnchor::Middle,
                    TextBaseline::Hanging,
                )
            });
            AxisTick { value, rule, label }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use peniko::color::palette::css;

    use super::*;
    use crate::layout::{Domain, Margin, PlotSize};
    use crate::measure::HeuristicTextMeasurer;
    use crate::spec::{GaugeShape, StepSpec, ThresholdSpec};
    use crate::test_util::gauge_spec;

    const EPS: f64 = 1e-9;

    fn domain() -> DomainRect {
        DomainRect::new(
            Domain::new((0.0, 1.0), (0.4, 0.6)),
            PlotSize::from_figure(400.0, 400.0, Margin::default()),
        )
    }

    #[test]
    fn strip_leaves_room_for_numbers() {
        let d = domain();
        let range = ValueRange::new(0.0, 100.0);
        let with = BulletGeometry::new(&d, &range, true);
        assert_eq!(with.strip.width(), 180.0);
        assert!((with.strip.height() - d.height).abs() < EPS);
        let without = BulletGeometry::new(&d, &range, false);
        assert_eq!(without.strip.width(), 240.0);
        assert_eq!(without.x(50.0), 200.0);
    }

    #[test]
    fn value_bar_never_overshoots_vmax() {
        let d = domain();
        let range = ValueRange::new(0.0, 100.0);
        let g = BulletGeometry::new(&d, &range, true);
        let full = g.x(100.0) - g.x(0.0);
        for v in [-20.0, 0.0, 40.0, 100.0, 150.0, 1e12, f64::INFINITY, f64::NAN] {
            let w = g.bar_width(v);
            assert!(w >= 0.0 && w <= full + EPS, "v = {v}, width = {w}");
        }
        assert_eq!(g.bar_width(150.0), full);
        assert_eq!(g.bar_width(-20.0), 0.0);
        assert_eq!(g.bar_width(f64::NAN), 0.0);
    }

    #[test]
    fn layers_fill_the_strip() {
        let mut gauge = gauge_spec(GaugeShape::Bullet);
        gauge.steps.push(StepSpec {
            range: ValueRange::new(25.0, 50.0),
            color: css::LIGHT_GRAY,
            line: LineSpec::NONE,
            height: 1.0,
        });
        gauge.threshold = Some(ThresholdSpec {
            value: 80.0,
            color: css::RED,
            width: 2.0,
            height: 0.5,
        });
        let d = domain();
        let range = ValueRange::new(0.0, 100.0);
        let g = BulletGeometry::new(&d, &range, true);
        let layout = layout_bullet(
            &gauge,
            range,
            &d,
            true,
            g.bar_width(40.0),
            &HeuristicTextMeasurer,
        );
        let strip = layout.geometry.strip;

        assert_eq!(layout.background.rect, strip);
        assert_eq!(layout.outline.rect, strip);
        assert_eq!(layout.outline.stroke.stroke_width, 1.0);
        assert_eq!(layout.steps[0].rect.x0, g.x(25.0));
        assert_eq!(layout.steps[0].rect.x1, g.x(50.0));

        let bar = layout.value.rect;
        assert!((bar.height() - 0.5 * strip.height()).abs() < EPS);
        assert!((bar.center().y - strip.center().y).abs() < EPS);
        assert!((bar.width() - 0.4 * strip.width()).abs() < EPS);

        let rule = layout.threshold.as_ref().expect("threshold rule");
        assert_eq!(rule.p0.x, g.x(80.0));
        assert!((rule.p0.y - (strip.y0 + 0.25 * strip.height())).abs() < EPS);
        assert!((rule.p1.y - (strip.y0 + 0.75 * strip.height())).abs() < EPS);
    }

    #[test]
    fn axis_hangs_below_the_strip() {
        let gauge = gauge_spec(GaugeShape::Bullet);
        let d = domain();
        let range = ValueRange::new(0.0, 100.0);
        let layout = layout_bullet(&gauge, range, &d, false, 0.0, &HeuristicTextMeasurer);
        let strip = layout.geometry.strip;
        assert_eq!(layout.ticks.len(), 6);
        for tick in &layout.ticks {
            let rule = tick.rule.as_ref().expect("tick segment");
            assert_eq!(rule.p0.y, strip.y1);
            assert_eq!(rule.p1.y, strip.y1 + 5.0);
            let label = tick.label.as_ref().expect("label");
            assert_eq!(label.baseline, TextBaseline::Hanging);
            assert_eq!(label.pos.y, strip.y1 + 8.0);
            assert_eq!(label.anchor, TextAnchor::Middle);
        }
        let bounds = layout.axis_bounds.expect("axis bounds");
        assert_eq!(bounds.y0, strip.y1);
    }

    #[test]
    fn inside_ticks_skip_the_range_ends() {
        let mut gauge = gauge_spec(GaugeShape::Bullet);
        gauge.axis.ticks_inside = true;
        let d = domain();
        let range = ValueRange::new(0.0, 100.0);
        let layout = layout_bullet(&gauge, range, &d, false, 0.0, &HeuristicTextMeasurer);
        let with_rules: Vec<f64> = layout
            .ticks
            .iter()
            .filter(|t| t.rule.is_some())
            .map(|t| t.value)
            .collect();
        assert_eq!(with_rules, [20.0, 40.0, 60.0, 80.0]);
        let rule = layout.ticks[1].rule.as_ref().expect("tick segment");
        assert!(rule.p1.y < rule.p0.y, "inside ticks point up");
        let label_y = layout.ticks[0].label.as_ref().map(|l| l.pos.y);
        assert_eq!(label_y, Some(layout.geometry.strip.y1 + 3.0));
    }
}
