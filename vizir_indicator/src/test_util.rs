// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for unit tests.

use peniko::color::palette::css;
use smallvec::SmallVec;

use crate::measure::Font;
use crate::spec::{GaugeAxisSpec, GaugeShape, GaugeSpec, GaugeValueSpec, LineSpec};

pub(crate) fn gauge_spec(shape: GaugeShape) -> GaugeSpec {
    GaugeSpec {
        shape,
        bgcolor: css::WHITE,
        bordercolor: css::DIM_GRAY,
        borderwidth: 1.0,
        value: GaugeValueSpec {
            color: css::GREEN,
            line: LineSpec::NONE,
            height: match shape {
                GaugeShape::Angular => 1.0,
                GaugeShape::Bullet => 0.5,
            },
        },
        steps: SmallVec::new(),
        threshold: None,
        axis: GaugeAxisSpec {
            visible: true,
            tick_count: 6,
            tick_values: None,
            tick_text: None,
            tick_len: 5.0,
            tick_width: 1.0,
            tick_color: css::DIM_GRAY,
            ticks_inside: false,
            show_labels: true,
            tick_font: Font::new(12.0),
            tick_format: None,
        },
    }
}
