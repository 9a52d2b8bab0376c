// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick values and labels shared by both gauge axes.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::angle::ValueRange;
use crate::format::format_tick;
use crate::mark::{RuleMark, TextAnchor, TextBaseline};
use crate::measure::{Font, TextMeasurer};
use crate::scale::{ScaleLinear, tick_step};
use crate::spec::GaugeAxisSpec;

/// A placed tick label.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisLabel {
    /// Label text.
    pub text: String,
    /// Anchor point in scene coordinates.
    pub pos: Point,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical placement.
    pub baseline: TextBaseline,
    /// Font.
    pub font: Font,
    /// Measured bounds in scene coordinates.
    pub bounds: Rect,
}

/// One axis tick: segment and label.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    /// Tick value.
    pub value: f64,
    /// Tick segment, absent when ticks have no length.
    pub rule: Option<RuleMark>,
    /// Label, absent when labels are hidden.
    pub label: Option<AxisLabel>,
}

/// Returns the tick values inside `range` with their label text.
pub(crate) fn tick_values(axis: &GaugeAxisSpec, range: ValueRange) -> Vec<(f64, String)> {
    let (lo, hi) = (range.min.min(range.max), range.min.max(range.max));
    let eps = (hi - lo).abs() * 1e-9;
    let inside = |v: f64| v >= lo - eps && v <= hi + eps;

    if let Some(values) = &axis.tick_values {
        let step = {
            let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
            sorted.sort_by(f64::total_cmp);
            tick_step(&sorted)
        };
        return values
            .iter()
            .enumerate()
            .filter(|(_, v)| inside(**v))
            .map(|(i, &v)| {
                let text = axis
                    .tick_text
                    .as_ref()
                    .and_then(|t| t.get(i).cloned())
                    .unwrap_or_else(|| label_text(axis, v, step));
                (v, text)
            })
            .collect();
    }

    let ticks = ScaleLinear::new((lo, hi), (0.0, 1.0)).ticks(axis.tick_count);
    let step = tick_step(&ticks);
    ticks
        .into_iter()
        .map(|v| (v, label_text(axis, v, step)))
        .collect()
}

fn label_text(axis: &GaugeAxisSpec, v: f64, step: f64) -> String {
    match &axis.tick_format {
        Some(format) => format.format(v),
        None => format_tick(v, step),
    }
}

/// Measures and places a label.
pub(crate) fn place_label(
    measurer: &dyn TextMeasurer,
    axis: &GaugeAxisSpec,
    text: String,
    pos: Point,
    anchor: TextAnchor,
    baseline: TextBaseline,
) -> AxisLabel {
    let bounds = measurer
        .measure(&text, &axis.tick_font)
        .anchored_bounds(pos, anchor, baseline);
    AxisLabel {
        text,
        pos,
        anchor,
        baseline,
        font: axis.tick_font.clone(),
        bounds,
    }
}

/// Union of every tick segment and label.
pub(crate) fn ticks_bounds(ticks: &[AxisTick]) -> Option<Rect> {
    ticks
        .iter()
        .flat_map(|t| {
            let rule = t.rule.as_ref().map(|r| Rect::from_points(r.p0, r.p1));
            let label = t.label.as_ref().map(|l| l.bounds);
            rule.into_iter().chain(label)
        })
        .reduce(|a, b| a.union(b))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::ToString;
    use std::vec;

    use peniko::color::palette::css;

    use super::*;
    use crate::format::ValueFormat;

    fn axis() -> GaugeAxisSpec {
        GaugeAxisSpec {
            visible: true,
            tick_count: 6,
            tick_values: None,
            tick_text: None,
            tick_len: 5.0,
            tick_width: 1.0,
            tick_color: css::BLACK,
            ticks_inside: false,
            show_labels: true,
            tick_font: Font::new(12.0),
            tick_format: None,
        }
    }

    #[test]
    fn generated_ticks_use_step_aware_labels() {
        let ticks = tick_values(&axis(), ValueRange::new(0.0, 1.0));
        let labels: Vec<&str> = ticks.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(labels, ["0.0", "0.2", "0.4", "0.6", "0.8", "1.0"]);
    }

    #[test]
    fn explicit_ticks_are_filtered_and_labelled_by_index() {
        let spec = GaugeAxisSpec {
            tick_values: Some(vec![-10.0, 0.0, 50.0, 100.0, 150.0]),
            tick_text: Some(vec!["lo".to_string(), "zero".to_string(), "half".to_string()]),
            ..axis()
        };
        let ticks = tick_values(&spec, ValueRange::new(0.0, 100.0));
        assert_eq!(
            ticks,
            vec![
                (0.0, "zero".to_string()),
                (50.0, "half".to_string()),
                (100.0, "100".to_string()),
            ]
        );
    }

    #[test]
    fn tick_format_overrides_step_labels() {
        let spec = GaugeAxisSpec {
            tick_format: Some(ValueFormat::si(2)),
            ..axis()
        };
        let ticks = tick_values(&spec, ValueRange::new(0.0, 3000.0));
        assert_eq!(ticks[1], (500.0, "500".to_string()));
        assert_eq!(ticks[2], (1000.0, "1.0k".to_string()));
    }

    #[test]
    fn degenerate_range_yields_a_single_tick() {
        let ticks = tick_values(&axis(), ValueRange::new(4.0, 4.0));
        assert_eq!(ticks, vec![(4.0, "4".to_string())]);
    }
}
