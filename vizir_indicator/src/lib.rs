// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Indicator layout for VizIR: a headline number, its delta against a reference, and an
//! optional angular or bullet gauge.
//!
//! The pipeline:
//! - [`IndicatorConfig`] holds optional attributes; [`resolve`] applies defaults and parses
//!   format strings into an [`IndicatorSpec`].
//! - An [`Indicator`] owns a spec plus per-instance state (the fit-scale memo, the previous
//!   value and delta, a running [`Transition`]) and lays it out into a [`RenderPlan`] for a
//!   [`Domain`] of the plot area.
//! - [`RenderPlan::marks`] turns the plan into stable-identity [`Mark`]s, and a [`Scene`]
//!   reconciles successive mark lists into enter/update/exit diffs.
//!
//! Text shaping is out of scope: layout measures through a [`TextMeasurer`] and text marks store
//! unshaped strings. Layout never fails; only configuration parsing reports errors.

#![no_std]

extern crate alloc;

mod angle;
mod angular;
mod axis;
mod bullet;
mod defaults;
mod delta;
mod fit;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod indicator;
mod layout;
mod mark;
mod measure;
mod plan;
mod scale;
mod scene;
mod spec;
#[cfg(test)]
mod test_util;
mod transition;
mod z_order;

pub use angle::{ValueRange, value_to_angle};
pub use angular::{
    AngularGaugeLayout, AngularGeometry, INNER_RADIUS_FRACTION, MID_SHIFT, layout_angular,
};
pub use axis::{AxisLabel, AxisTick};
pub use bullet::{
    BULLET_PADDING, BulletGaugeLayout, BulletGeometry, NUMBER_DOMAIN_FRACTION, layout_bullet,
};
pub use defaults::{
    AxisConfig, ConfigError, DECREASING_COLOR, DEFAULT_FONT_COLOR, DEFAULT_NUMBER_FONT_SIZE,
    DEFAULT_PERCENT_FORMAT, DEFAULT_VALUE_FORMAT, DeltaConfig, DeltaStyleConfig, FontConfig,
    GaugeConfig, GaugeValueConfig, INCREASING_COLOR, IndicatorConfig, LineConfig, NumberConfig,
    StepConfig, ThresholdConfig, TitleConfig, TransitionConfig, layout_font, resolve,
};
pub use delta::Delta;
pub use fit::{Fit, ScaleKey, ScaleMemo, fit_box, fit_circle};
pub use format::{FormatError, FormatType, ValueFormat, format_tick};
pub use indicator::{INLINE_GAP, Indicator, TITLE_PADDING};
pub use layout::{Domain, DomainRect, Margin, PlotSize};
pub use mark::{
    ArcMark, Mark, MarkGroup, MarkId, MarkKind, MarkPayload, RectMark, RuleMark, StrokeStyle,
    TextAnchor, TextBaseline, TextMark, TextRun,
};
pub use measure::{
    Font, FontFamily, FontWeight, HeuristicTextMeasurer, TextMeasurer, TextMetrics,
};
pub use plan::{
    GaugeLayout, INDICATOR_ID_SPAN, NumbersLayout, PlanSummary, RenderPlan, TitleLayout,
};
pub use scale::ScaleLinear;
pub use scene::{MarkDiff, Scene};
pub use spec::{
    Align, DeltaPosition, DeltaSpec, DeltaStyle, GaugeAxisSpec, GaugeShape, GaugeSpec,
    GaugeValueSpec, IndicatorSpec, LineSpec, Mode, ModeError, NumberSpec, StepSpec,
    ThresholdSpec, TitleSpec,
};
pub use transition::{
    Completion, CompletionReason, EaseCurve, EaseMode, Easing, EasingError, IndicatorTransition,
    Transition, lerp,
};
pub use z_order::*;
