// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for indicator marks.
//!
//! Marks carry an explicit `z_index` for render ordering. Renderers sort by `(z_index, MarkId)`,
//! so layers sharing a z-index (the background and its steps) keep their id order.

/// Gauge background fill.
pub const GAUGE_BACKGROUND: i32 = 0;
/// Gauge step bands.
pub const GAUGE_STEPS: i32 = 5;
/// Angular threshold arc, below the value arc.
pub const GAUGE_THRESHOLD_ARC: i32 = 10;
/// Current value arc or bar.
pub const GAUGE_VALUE: i32 = 20;
/// Bullet threshold rule, above the value bar.
pub const GAUGE_THRESHOLD_RULE: i32 = 25;
/// Gauge border outline.
pub const GAUGE_OUTLINE: i32 = 30;

/// Axis tick segments.
pub const AXIS_RULES: i32 = 40;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 50;

/// Number and delta text.
pub const NUMBERS: i32 = 60;
/// Indicator title.
pub const TITLES: i32 = 80;
