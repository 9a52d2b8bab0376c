// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolved indicator configuration.
//!
//! These types carry no defaults of their own: every field is concrete. Build them directly, or
//! fill an [`crate::IndicatorConfig`] and let [`crate::resolve`] apply the default pass.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use peniko::Color;
use smallvec::SmallVec;

use crate::angle::ValueRange;
use crate::format::ValueFormat;
use crate::mark::TextAnchor;
use crate::measure::Font;

/// Errors from parsing a mode flag list.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ModeError {
    /// The flag list has no flags.
    #[error("mode must name at least one of `number`, `delta` or `gauge`")]
    Empty,
    /// A flag is not one of `number`, `delta` or `gauge`.
    #[error("unknown mode flag {0:?}")]
    UnknownFlag(String),
}

/// Which parts of the indicator are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Mode {
    /// Draw the headline number.
    pub number: bool,
    /// Draw the delta against the reference value.
    pub delta: bool,
    /// Draw a gauge.
    pub gauge: bool,
}

impl Mode {
    /// Number only.
    pub const NUMBER: Self = Self {
        number: true,
        delta: false,
        gauge: false,
    };
    /// Everything.
    pub const ALL: Self = Self {
        number: true,
        delta: true,
        gauge: true,
    };

    /// Whether the number or the delta is drawn.
    pub fn has_text(&self) -> bool {
        self.number || self.delta
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::NUMBER
    }
}

impl FromStr for Mode {
    type Err = ModeError;

    /// Parses a `+`-joined flag list such as `"number+delta+gauge"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mode = Self {
            number: false,
            delta: false,
            gauge: false,
        };
        for flag in s.split('+').map(str::trim) {
            match flag {
                "number" | "bignumber" => mode.number = true,
                "delta" => mode.delta = true,
                "gauge" => mode.gauge = true,
                "" => return Err(ModeError::Empty),
                other => return Err(ModeError::UnknownFlag(String::from(other))),
            }
        }
        Ok(mode)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = [
            (self.number, "number"),
            (self.delta, "delta"),
            (self.gauge, "gauge"),
        ];
        let mut first = true;
        for (_, name) in flags.iter().filter(|(on, _)| *on) {
            if !first {
                f.write_str("+")?;
            }
            f.write_str(name)?;
            first = false;
        }
        Ok(())
    }
}

/// Horizontal alignment of the number block or title.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    /// Left edge.
    Left,
    /// Center.
    #[default]
    Center,
    /// Right edge.
    Right,
}

impl Align {
    /// Fractional position across the domain width.
    pub fn position(self) -> f64 {
        match self {
            Self::Left => 0.0,
            Self::Center => 0.5,
            Self::Right => 1.0,
        }
    }

    /// Text anchor matching the alignment.
    pub fn anchor(self) -> TextAnchor {
        match self {
            Self::Left => TextAnchor::Start,
            Self::Center => TextAnchor::Middle,
            Self::Right => TextAnchor::End,
        }
    }
}

/// Where the delta sits relative to the number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeltaPosition {
    /// Above the number.
    Top,
    /// Below the number.
    #[default]
    Bottom,
    /// Inline, before the number.
    Left,
    /// Inline, after the number.
    Right,
}

impl DeltaPosition {
    /// Whether the delta shares the number's line.
    pub fn is_inline(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// The headline number.
#[derive(Clone, Debug, PartialEq)]
pub struct NumberSpec {
    /// Value format.
    pub format: ValueFormat,
    /// Font.
    pub font: Font,
    /// Text appended after a space.
    pub suffix: Option<String>,
}

impl NumberSpec {
    /// Formats `value` with the suffix.
    pub fn text(&self, value: f64) -> String {
        let mut text = self.format.format(value);
        if let Some(suffix) = self.suffix.as_deref().filter(|s| !s.is_empty()) {
            text.push(' ');
            text.push_str(suffix);
        }
        text
    }
}

/// Symbol and color for one delta direction.
#[derive(Clone, Debug, PartialEq)]
pub struct DeltaStyle {
    /// Prefix symbol.
    pub symbol: String,
    /// Text color.
    pub color: Color,
}

/// The delta against a reference value.
#[derive(Clone, Debug, PartialEq)]
pub struct DeltaSpec {
    /// Value the current value is compared against.
    pub reference: f64,
    /// Show `delta / reference` instead of `delta`.
    pub show_percentage: bool,
    /// Style for non-negative deltas.
    pub increasing: DeltaStyle,
    /// Style for negative deltas.
    pub decreasing: DeltaStyle,
    /// Value format.
    pub format: ValueFormat,
    /// Font; the color comes from the direction style.
    pub font: Font,
    /// Placement relative to the number.
    pub position: DeltaPosition,
}

/// The indicator title.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleSpec {
    /// Title text; nothing is drawn when empty.
    pub text: String,
    /// Font.
    pub font: Font,
    /// Alignment across the domain (ignored for bullet gauges).
    pub align: Align,
}

/// Gauge shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GaugeShape {
    /// Semicircular dial.
    #[default]
    Angular,
    /// Horizontal bar.
    Bullet,
}

/// Stroke color and width of a gauge layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSpec {
    /// Stroke color.
    pub color: Color,
    /// Stroke width; `0` draws no outline.
    pub width: f64,
}

impl LineSpec {
    /// A line that draws nothing.
    pub const NONE: Self = Self {
        color: Color::TRANSPARENT,
        width: 0.0,
    };
}

/// The bar or arc showing the current value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaugeValueSpec {
    /// Fill color.
    pub color: Color,
    /// Outline.
    pub line: LineSpec,
    /// Thickness relative to the gauge, in `[0, 1]`.
    pub height: f64,
}

/// A colored band of the gauge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepSpec {
    /// Value range covered.
    pub range: ValueRange,
    /// Fill color.
    pub color: Color,
    /// Outline.
    pub line: LineSpec,
    /// Thickness relative to the gauge, in `[0, 1]`.
    pub height: f64,
}

/// A marker at a fixed value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdSpec {
    /// Marked value; `0` and NaN draw nothing.
    pub value: f64,
    /// Marker color.
    pub color: Color,
    /// Marker stroke width.
    pub width: f64,
    /// Thickness relative to the gauge, in `[0, 1]`.
    pub height: f64,
}

impl ThresholdSpec {
    /// Whether the threshold produces a marker.
    pub fn is_drawn(&self) -> bool {
        self.value != 0.0 && !self.value.is_nan()
    }
}

/// Tick and label settings for the gauge axis.
#[derive(Clone, Debug, PartialEq)]
pub struct GaugeAxisSpec {
    /// Draw ticks and labels at all.
    pub visible: bool,
    /// Target number of generated ticks.
    pub tick_count: usize,
    /// Explicit tick values; replaces generated ticks when present.
    pub tick_values: Option<Vec<f64>>,
    /// Labels for `tick_values`, by index.
    pub tick_text: Option<Vec<String>>,
    /// Tick length; `0` hides tick segments.
    pub tick_len: f64,
    /// Tick stroke width.
    pub tick_width: f64,
    /// Tick stroke color.
    pub tick_color: Color,
    /// Ticks point into the gauge instead of away from it.
    pub ticks_inside: bool,
    /// Draw tick labels.
    pub show_labels: bool,
    /// Label font.
    pub tick_font: Font,
    /// Label format; step-aware decimals when absent.
    pub tick_format: Option<ValueFormat>,
}

impl GaugeAxisSpec {
    /// Distance from the axis line to the label anchor.
    pub fn label_standoff(&self) -> f64 {
        let ticks = if self.ticks_inside { 0.0 } else { self.tick_len };
        ticks + 3.0
    }
}

/// The gauge.
#[derive(Clone, Debug, PartialEq)]
pub struct GaugeSpec {
    /// Shape.
    pub shape: GaugeShape,
    /// Background fill.
    pub bgcolor: Color,
    /// Outline color.
    pub bordercolor: Color,
    /// Outline width.
    pub borderwidth: f64,
    /// Current value bar/arc.
    pub value: GaugeValueSpec,
    /// Colored bands, drawn in order.
    pub steps: SmallVec<[StepSpec; 4]>,
    /// Optional value marker.
    pub threshold: Option<ThresholdSpec>,
    /// Axis.
    pub axis: GaugeAxisSpec,
}

impl GaugeSpec {
    /// The threshold, if it produces a marker.
    pub fn drawn_threshold(&self) -> Option<&ThresholdSpec> {
        self.threshold.as_ref().filter(|t| t.is_drawn())
    }
}

/// A fully resolved indicator.
#[derive(Clone, Debug, PartialEq)]
pub struct IndicatorSpec {
    /// Drawn parts.
    pub mode: Mode,
    /// Current value.
    pub value: f64,
    /// Gauge bounds.
    pub range: ValueRange,
    /// Alignment of the number block.
    pub align: Align,
    /// Number.
    pub number: NumberSpec,
    /// Delta.
    pub delta: DeltaSpec,
    /// Title.
    pub title: TitleSpec,
    /// Gauge; used only when `mode.gauge` is set.
    pub gauge: GaugeSpec,
}

impl IndicatorSpec {
    /// The gauge shape, if a gauge is drawn.
    pub fn gauge_shape(&self) -> Option<GaugeShape> {
        self.mode.gauge.then_some(self.gauge.shape)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::ToString;

    use super::*;

    #[test]
    fn mode_parses_flag_lists() {
        assert_eq!("number+delta+gauge".parse::<Mode>(), Ok(Mode::ALL));
        let m: Mode = "gauge+delta".parse().unwrap();
        assert!(!m.number && m.delta && m.gauge);
        assert_eq!("bignumber".parse::<Mode>(), Ok(Mode::NUMBER));
    }

    #[test]
    fn mode_rejects_unknown_and_empty_flags() {
        assert_eq!("".parse::<Mode>(), Err(ModeError::Empty));
        assert_eq!("number+".parse::<Mode>(), Err(ModeError::Empty));
        assert_eq!(
            "number+dial".parse::<Mode>(),
            Err(ModeError::UnknownFlag("dial".to_string()))
        );
    }

    #[test]
    fn mode_displays_in_canonical_order() {
        let m: Mode = "gauge+number".parse().unwrap();
        assert_eq!(m.to_string(), "number+gauge");
    }

    #[test]
    fn align_positions_and_anchors() {
        assert_eq!(Align::Left.position(), 0.0);
        assert_eq!(Align::Right.anchor(), TextAnchor::End);
        assert_eq!(Align::default().anchor(), TextAnchor::Middle);
    }

    #[test]
    fn number_suffix_is_space_separated() {
        let spec = NumberSpec {
            format: ValueFormat::fixed(0),
            font: Font::new(80.0),
            suffix: Some("km".to_string()),
        };
        assert_eq!(spec.text(42.0), "42 km");
        let bare = NumberSpec {
            suffix: Some(std::string::String::new()),
            ..spec
        };
        assert_eq!(bare.text(42.0), "42");
    }

    #[test]
    fn zero_and_nan_thresholds_are_not_drawn() {
        let t = ThresholdSpec {
            value: 0.0,
            color: Color::BLACK,
            width: 1.0,
            height: 0.85,
        };
        assert!(!t.is_drawn());
        assert!(!ThresholdSpec { value: f64::NAN, ..t }.is_drawn());
        assert!(ThresholdSpec { value: -3.0, ..t }.is_drawn());
    }
}
