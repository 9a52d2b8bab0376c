// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute defaults.
//!
//! [`IndicatorConfig`] mirrors [`IndicatorSpec`] with every attribute optional. [`resolve`] fills
//! the gaps: fonts inherit the layout font, sizes derive from the number font, the gauge range
//! and the delta reference derive from the value, and format strings are parsed. Parsing is the
//! only thing that can fail; layout itself never does.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Color;

use crate::angle::ValueRange;
use crate::format::{FormatError, ValueFormat};
use crate::measure::{Font, FontFamily, FontWeight};
use crate::spec::{
    Align, DeltaPosition, DeltaSpec, DeltaStyle, GaugeAxisSpec, GaugeShape, GaugeSpec,
    GaugeValueSpec, IndicatorSpec, LineSpec, Mode, ModeError, NumberSpec, StepSpec,
    ThresholdSpec, TitleSpec,
};
use crate::transition::{Easing, EasingError, Transition};

/// Number font size when none is configured.
pub const DEFAULT_NUMBER_FONT_SIZE: f64 = 80.0;

/// Default value format: three significant digits with an SI prefix.
pub const DEFAULT_VALUE_FORMAT: &str = ".3s";

/// Default delta format when the delta is shown as a percentage.
pub const DEFAULT_PERCENT_FORMAT: &str = "2%";

/// Default text color of the layout font.
pub const DEFAULT_FONT_COLOR: Color = Color::from_rgb8(0x44, 0x44, 0x44);

/// Default color of increasing deltas.
pub const INCREASING_COLOR: Color = Color::from_rgb8(0x3D, 0x99, 0x70);

/// Default color of decreasing deltas.
pub const DECREASING_COLOR: Color = Color::from_rgb8(0xFF, 0x41, 0x36);

/// Errors from resolving an [`IndicatorConfig`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The mode flag list is invalid.
    #[error("invalid mode")]
    Mode(#[from] ModeError),
    /// A format string is invalid.
    #[error("invalid `{field}`")]
    Format {
        /// Attribute holding the format.
        field: &'static str,
        /// Parse error.
        #[source]
        source: FormatError,
    },
    /// The transition easing name is invalid.
    #[error("invalid transition easing")]
    Easing(#[from] EasingError),
}

/// The layout font indicators inherit from: 12 px sans-serif in dark gray.
pub fn layout_font() -> Font {
    Font::new(12.0).with_color(DEFAULT_FONT_COLOR)
}

/// Optional font attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontConfig {
    /// Family.
    pub family: Option<FontFamily>,
    /// Size.
    pub size: Option<f64>,
    /// Weight.
    pub weight: Option<FontWeight>,
    /// Color.
    pub color: Option<Color>,
}

impl FontConfig {
    /// A config that only sets the size.
    pub fn sized(size: f64) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    fn resolve(&self, inherit: &Font, default_size: f64) -> Font {
        Font {
            family: self.family.clone().unwrap_or_else(|| inherit.family.clone()),
            size: self.size.unwrap_or(default_size),
            weight: self.weight.unwrap_or(inherit.weight),
            color: self.color.unwrap_or(inherit.color),
        }
    }
}

/// Optional number attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NumberConfig {
    /// Font.
    pub font: FontConfig,
    /// Suffix.
    pub suffix: Option<String>,
}

/// Optional symbol and color for one delta direction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeltaStyleConfig {
    /// Symbol.
    pub symbol: Option<String>,
    /// Color.
    pub color: Option<Color>,
}

/// Optional delta attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeltaConfig {
    /// Reference value; defaults to the value itself.
    pub reference: Option<f64>,
    /// Show the relative change.
    pub show_percentage: bool,
    /// Format string.
    pub valueformat: Option<String>,
    /// Increasing style.
    pub increasing: DeltaStyleConfig,
    /// Decreasing style.
    pub decreasing: DeltaStyleConfig,
    /// Font.
    pub font: FontConfig,
    /// Placement.
    pub position: Option<DeltaPosition>,
}

/// Optional title attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TitleConfig {
    /// Text.
    pub text: Option<String>,
    /// Font.
    pub font: FontConfig,
    /// Alignment.
    pub align: Option<Align>,
}

/// Optional stroke attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineConfig {
    /// Color.
    pub color: Option<Color>,
    /// Width.
    pub width: Option<f64>,
}

impl LineConfig {
    fn resolve(&self, color: Color, width: f64) -> LineSpec {
        LineSpec {
            color: self.color.unwrap_or(color),
            width: self.width.unwrap_or(width).max(0.0),
        }
    }
}

/// Optional value bar attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GaugeValueConfig {
    /// Fill color.
    pub color: Option<Color>,
    /// Outline.
    pub line: LineConfig,
    /// Relative thickness.
    pub height: Option<f64>,
}

/// A step band; the range is required.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepConfig {
    /// Covered values.
    pub range: (f64, f64),
    /// Fill color.
    pub color: Option<Color>,
    /// Outline.
    pub line: LineConfig,
    /// Relative thickness.
    pub height: Option<f64>,
}

impl StepConfig {
    /// A step covering `range` in `color`.
    pub fn new(range: (f64, f64), color: Color) -> Self {
        Self {
            range,
            color: Some(color),
            line: LineConfig::default(),
            height: None,
        }
    }
}

/// Optional threshold attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ThresholdConfig {
    /// Marked value.
    pub value: f64,
    /// Color.
    pub color: Option<Color>,
    /// Stroke width.
    pub width: Option<f64>,
    /// Relative thickness.
    pub height: Option<f64>,
}

/// Optional gauge axis attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisConfig {
    /// Visibility.
    pub visible: Option<bool>,
    /// Generated tick count.
    pub tick_count: Option<usize>,
    /// Explicit tick values.
    pub tick_values: Option<Vec<f64>>,
    /// Explicit tick labels.
    pub tick_text: Option<Vec<String>>,
    /// Tick length.
    pub tick_len: Option<f64>,
    /// Tick width.
    pub tick_width: Option<f64>,
    /// Tick color.
    pub tick_color: Option<Color>,
    /// Inside ticks.
    pub ticks_inside: Option<bool>,
    /// Label visibility.
    pub show_labels: Option<bool>,
    /// Label font.
    pub tick_font: FontConfig,
    /// Label format string.
    pub tick_format: Option<String>,
}

/// Optional gauge attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GaugeConfig {
    /// Shape.
    pub shape: Option<GaugeShape>,
    /// Background fill.
    pub bgcolor: Option<Color>,
    /// Outline color.
    pub bordercolor: Option<Color>,
    /// Outline width.
    pub borderwidth: Option<f64>,
    /// Value bar.
    pub value: GaugeValueConfig,
    /// Step bands.
    pub steps: Vec<StepConfig>,
    /// Threshold.
    pub threshold: Option<ThresholdConfig>,
    /// Axis.
    pub axis: AxisConfig,
}

/// Optional indicator attributes, as a user would write them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndicatorConfig {
    /// `+`-joined mode flags; defaults to `"number"`.
    pub mode: Option<String>,
    /// Current value.
    pub value: f64,
    /// Gauge minimum; defaults to `0`.
    pub vmin: Option<f64>,
    /// Gauge maximum; defaults to `1.5 × value`.
    pub vmax: Option<f64>,
    /// Number block alignment.
    pub align: Option<Align>,
    /// Number format string.
    pub valueformat: Option<String>,
    /// Number.
    pub number: NumberConfig,
    /// Delta.
    pub delta: DeltaConfig,
    /// Title.
    pub title: TitleConfig,
    /// Gauge.
    pub gauge: GaugeConfig,
}

impl IndicatorConfig {
    /// A number-only indicator showing `value`.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    /// Sets the mode flags.
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Sets the value.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Sets the gauge range.
    pub fn with_range(mut self, vmin: f64, vmax: f64) -> Self {
        self.vmin = Some(vmin);
        self.vmax = Some(vmax);
        self
    }

    /// Sets the number format string.
    pub fn with_valueformat(mut self, format: impl Into<String>) -> Self {
        self.valueformat = Some(format.into());
        self
    }

    /// Sets the number block alignment.
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    /// Sets the delta reference.
    pub fn with_reference(mut self, reference: f64) -> Self {
        self.delta.reference = Some(reference);
        self
    }

    /// Shows the delta as a percentage.
    pub fn with_percentage(mut self, show_percentage: bool) -> Self {
        self.delta.show_percentage = show_percentage;
        self
    }

    /// Sets the delta placement.
    pub fn with_delta_position(mut self, position: DeltaPosition) -> Self {
        self.delta.position = Some(position);
        self
    }

    /// Sets the title text.
    pub fn with_title(mut self, text: impl Into<String>) -> Self {
        self.title.text = Some(text.into());
        self
    }

    /// Sets the gauge shape.
    pub fn with_gauge_shape(mut self, shape: GaugeShape) -> Self {
        self.gauge.shape = Some(shape);
        self
    }

    /// Appends a gauge step.
    pub fn with_step(mut self, step: StepConfig) -> Self {
        self.gauge.steps.push(step);
        self
    }

    /// Sets the gauge threshold.
    pub fn with_threshold(mut self, threshold: ThresholdConfig) -> Self {
        self.gauge.threshold = Some(threshold);
        self
    }
}

/// Optional transition attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionConfig {
    /// Duration in milliseconds.
    pub duration: f64,
    /// d3 easing name; defaults to `"cubic-in-out"`.
    pub easing: Option<String>,
}

impl TransitionConfig {
    /// Resolves the easing name.
    pub fn resolve(&self) -> Result<Transition, ConfigError> {
        let easing = match &self.easing {
            Some(name) => name.parse::<Easing>()?,
            None => Easing::default(),
        };
        Ok(Transition::new(self.duration).with_easing(easing))
    }
}

fn parse_format(field: &'static str, spec: &str) -> Result<ValueFormat, ConfigError> {
    ValueFormat::parse(spec).map_err(|source| ConfigError::Format { field, source })
}

/// Applies attribute defaults to `config`, inheriting fonts from `layout_font`.
pub fn resolve(config: &IndicatorConfig, layout_font: &Font) -> Result<IndicatorSpec, ConfigError> {
    let mode: Mode = match &config.mode {
        Some(mode) => mode.parse()?,
        None => Mode::default(),
    };
    let value = config.value;

    let valueformat = config.valueformat.as_deref().unwrap_or(DEFAULT_VALUE_FORMAT);
    let number_font = config
        .number
        .font
        .resolve(layout_font, DEFAULT_NUMBER_FONT_SIZE);
    let number_size = number_font.size;
    let number = NumberSpec {
        format: parse_format("valueformat", valueformat)?,
        font: number_font,
        suffix: config.number.suffix.clone(),
    };

    let range = ValueRange::new(
        config.vmin.unwrap_or(0.0),
        config.vmax.unwrap_or(1.5 * value),
    );

    let title = TitleSpec {
        text: config.title.text.clone().unwrap_or_default(),
        font: config.title.font.resolve(layout_font, 0.25 * number_size),
        align: config.title.align.unwrap_or_default(),
    };

    let shape = config.gauge.shape.unwrap_or_default();
    let align = if mode.gauge && shape == GaugeShape::Angular {
        Align::Center
    } else {
        config.align.unwrap_or_default()
    };

    let delta_scale = if mode.number { 0.5 } else { 1.0 };
    let show_percentage = config.delta.show_percentage;
    let delta_format = match &config.delta.valueformat {
        Some(f) => f.as_str(),
        None if show_percentage => DEFAULT_PERCENT_FORMAT,
        None => valueformat,
    };
    let delta = DeltaSpec {
        reference: config.delta.reference.unwrap_or(value),
        show_percentage,
        increasing: DeltaStyle {
            symbol: config
                .delta
                .increasing
                .symbol
                .clone()
                .unwrap_or_else(|| String::from("▲")),
            color: config.delta.increasing.color.unwrap_or(INCREASING_COLOR),
        },
        decreasing: DeltaStyle {
            symbol: config
                .delta
                .decreasing
                .symbol
                .clone()
                .unwrap_or_else(|| String::from("▼")),
            color: config.delta.decreasing.color.unwrap_or(DECREASING_COLOR),
        },
        format: parse_format("delta.valueformat", delta_format)?,
        font: config
            .delta
            .font
            .resolve(layout_font, delta_scale * number_size),
        position: config.delta.position.unwrap_or_default(),
    };

    let gauge = resolve_gauge(&config.gauge, shape, layout_font)?;

    tracing::debug!(%mode, ?shape, vmin = range.min, vmax = range.max, "resolved indicator");

    Ok(IndicatorSpec {
        mode,
        value,
        range,
        align,
        number,
        delta,
        title,
        gauge,
    })
}

fn resolve_gauge(
    config: &GaugeConfig,
    shape: GaugeShape,
    layout_font: &Font,
) -> Result<GaugeSpec, ConfigError> {
    let bordercolor = config.bordercolor.unwrap_or(DEFAULT_FONT_COLOR);
    let value_height = match shape {
        GaugeShape::Angular => 1.0,
        GaugeShape::Bullet => 0.5,
    };
    let value = GaugeValueSpec {
        color: config.value.color.unwrap_or(Color::from_rgb8(0x00, 0x80, 0x00)),
        line: config.value.line.resolve(DEFAULT_FONT_COLOR, 0.0),
        height: unit(config.value.height.unwrap_or(value_height)),
    };
    let steps = config
        .steps
        .iter()
        .map(|s| StepSpec {
            range: ValueRange::new(s.range.0, s.range.1),
            color: s.color.unwrap_or(Color::TRANSPARENT),
            line: s.line.resolve(DEFAULT_FONT_COLOR, 0.0),
            height: unit(s.height.unwrap_or(1.0)),
        })
        .collect();
    let threshold = config.threshold.map(|t| ThresholdSpec {
        value: t.value,
        color: t.color.unwrap_or(DEFAULT_FONT_COLOR),
        width: t.width.unwrap_or(1.0).max(0.0),
        height: unit(t.height.unwrap_or(0.85)),
    });

    let a = &config.axis;
    let tick_format = a
        .tick_format
        .as_deref()
        .map(|f| parse_format("gauge.axis.tickformat", f))
        .transpose()?;
    let axis = GaugeAxisSpec {
        visible: a.visible.unwrap_or(true),
        tick_count: a.tick_count.unwrap_or(6),
        tick_values: a.tick_values.clone(),
        tick_text: a.tick_text.clone(),
        tick_len: a.tick_len.unwrap_or(5.0).max(0.0),
        tick_width: a.tick_width.unwrap_or(1.0).max(0.0),
        tick_color: a.tick_color.unwrap_or(DEFAULT_FONT_COLOR),
        ticks_inside: a.ticks_inside.unwrap_or(false),
        show_labels: a.show_labels.unwrap_or(true),
        tick_font: a.tick_font.resolve(layout_font, layout_font.size),
        tick_format,
    };

    Ok(GaugeSpec {
        shape,
        bgcolor: config.bgcolor.unwrap_or(Color::TRANSPARENT),
        bordercolor,
        borderwidth: config.borderwidth.unwrap_or(1.0).max(0.0),
        value,
        steps,
        threshold,
        axis,
    })
}

fn unit(v: f64) -> f64 {
    if v.is_nan() { 1.0 } else { v.clamp(0.0, 1.0) }
}
