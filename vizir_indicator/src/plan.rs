// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-draw layout result and its conversion into marks.
//!
//! A [`RenderPlan`] is rebuilt on every draw. [`RenderPlan::marks`] assigns each piece a stable
//! id relative to a caller-chosen base, so successive plans for one indicator diff cleanly in a
//! [`crate::Scene`] and several indicators can share a scene with disjoint id ranges.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Affine, Point, Rect};
use smallvec::SmallVec;

use crate::angular::AngularGaugeLayout;
use crate::axis::AxisTick;
use crate::bullet::BulletGaugeLayout;
use crate::layout::DomainRect;
use crate::mark::{
    ArcMark, Mark, MarkGroup, MarkId, MarkPayload, RectMark, TextAnchor, TextBaseline,
    TextMark, TextRun,
};
use crate::measure::Font;
use crate::spec::Align;
use crate::z_order;

/// Width of the id range one indicator's marks occupy.
///
/// [`RenderPlan::marks`] only emits ids in `id_base..id_base + INDICATOR_ID_SPAN`, so indicators
/// sharing a [`crate::Scene`] need `id_base` values at least this far apart.
pub const INDICATOR_ID_SPAN: u64 = ids::KIND_COUNT << ids::INDEX_BITS;

/// Mark ids are `id_base + (kind << INDEX_BITS) + index`; every kind, fixed or per-item, owns
/// its own index range.
mod ids {
    pub(super) const INDEX_BITS: u32 = 32;
    pub(super) const KIND_COUNT: u64 = 16;

    pub(super) const NUMBERS: u64 = 0;
    pub(super) const TITLE: u64 = 1;

    pub(super) const ANGULAR_BACKGROUND: u64 = 2;
    pub(super) const ANGULAR_THRESHOLD: u64 = 3;
    pub(super) const ANGULAR_VALUE: u64 = 4;
    pub(super) const ANGULAR_OUTLINE: u64 = 5;
    pub(super) const ANGULAR_STEPS: u64 = 6;
    pub(super) const ANGULAR_TICKS: u64 = 7;
    pub(super) const ANGULAR_LABELS: u64 = 8;

    pub(super) const BULLET_BACKGROUND: u64 = 9;
    pub(super) const BULLET_THRESHOLD: u64 = 10;
    pub(super) const BULLET_VALUE: u64 = 11;
    pub(super) const BULLET_OUTLINE: u64 = 12;
    pub(super) const BULLET_STEPS: u64 = 13;
    pub(super) const BULLET_TICKS: u64 = 14;
    pub(super) const BULLET_LABELS: u64 = 15;

    /// Offset of item `index` of `kind` from the indicator's base.
    pub(super) const fn offset(kind: u64, index: u64) -> u64 {
        (kind << INDEX_BITS) | (index & ((1_u64 << INDEX_BITS) - 1))
    }
}

/// Placement of the number and delta block.
///
/// Runs are positioned in local coordinates around the block's anchor at the origin; `transform`
/// maps them into the scene, applying the fit scale.
#[derive(Clone, Debug, PartialEq)]
pub struct NumbersLayout {
    /// The number run.
    pub number: Option<TextRun>,
    /// The delta run.
    pub delta: Option<TextRun>,
    /// Scene point the block is aligned to.
    pub anchor: Point,
    /// Horizontal alignment of the block on `anchor`.
    pub align: Align,
    /// Unscaled bounds of the runs, in local coordinates.
    pub bbox: Rect,
    /// Applied fit scale.
    pub scale: f64,
    /// Local-to-scene transform.
    pub transform: Affine,
}

impl NumbersLayout {
    /// Bounds of the block in scene coordinates.
    pub fn bounds(&self) -> Rect {
        self.transform.transform_rect_bbox(self.bbox)
    }

    /// Number of runs (one for the number, one for the delta).
    pub fn run_count(&self) -> usize {
        usize::from(self.number.is_some()) + usize::from(self.delta.is_some())
    }

    /// The block as a single text mark.
    pub fn to_text_mark(&self) -> TextMark {
        let mut runs: SmallVec<[TextRun; 2]> = SmallVec::new();
        // Left-positioned deltas read first.
        let delta_first = matches!((&self.number, &self.delta), (Some(n), Some(d)) if d.pos.x < n.pos.x);
        if delta_first {
            runs.extend(self.delta.iter().cloned());
            runs.extend(self.number.iter().cloned());
        } else {
            runs.extend(self.number.iter().cloned());
            runs.extend(self.delta.iter().cloned());
        }
        TextMark {
            runs,
            transform: self.transform,
            baseline: TextBaseline::Alphabetic,
        }
    }
}

/// Placement of the title.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleLayout {
    /// Text.
    pub text: String,
    /// Font.
    pub font: Font,
    /// Anchor point on the alphabetic baseline.
    pub pos: Point,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Measured bounds.
    pub bounds: Rect,
}

/// The gauge, when the mode shows one.
#[derive(Clone, Debug, PartialEq)]
pub enum GaugeLayout {
    /// A semicircular dial.
    Angular(AngularGaugeLayout),
    /// A horizontal bar.
    Bullet(BulletGaugeLayout),
}

/// Everything one draw of an indicator produces.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPlan {
    /// The domain rectangle.
    pub domain: DomainRect,
    /// Number and delta block.
    pub numbers: Option<NumbersLayout>,
    /// Title.
    pub title: Option<TitleLayout>,
    /// Gauge.
    pub gauge: Option<GaugeLayout>,
}

impl RenderPlan {
    /// Converts the plan into marks with ids in `id_base..id_base + INDICATOR_ID_SPAN`.
    ///
    /// Ids depend only on the kind of piece and its position in its list, so steps and ticks can
    /// grow without colliding with each other or with the fixed pieces.
    pub fn marks(&self, id_base: u64) -> Vec<Mark> {
        let id = |kind: u64| MarkId::from_raw(id_base + ids::offset(kind, 0));
        let item = |kind: u64, index: u64| MarkId::from_raw(id_base + ids::offset(kind, index));
        let mut out = Vec::new();

        match &self.gauge {
            Some(GaugeLayout::Angular(g)) => {
                let group = MarkGroup::AngularGauge;
                let arc = |mark: &ArcMark| MarkPayload::Arc(mark.clone());
                out.push(Mark::new(
                    id(ids::ANGULAR_BACKGROUND),
                    group,
                    z_order::GAUGE_BACKGROUND,
                    arc(&g.background),
                ));
                for (i, step) in (0_u64..).zip(&g.steps) {
                    out.push(Mark::new(
                        item(ids::ANGULAR_STEPS, i),
                        group,
                        z_order::GAUGE_STEPS,
                        arc(step),
                    ));
                }
                if let Some(t) = &g.threshold {
                    out.push(Mark::new(
                        id(ids::ANGULAR_THRESHOLD),
                        group,
                        z_order::GAUGE_THRESHOLD_ARC,
                        arc(t),
                    ));
                }
                out.push(Mark::new(
                    id(ids::ANGULAR_VALUE),
                    group,
                    z_order::GAUGE_VALUE,
                    arc(&g.value),
                ));
                out.push(Mark::new(
                    id(ids::ANGULAR_OUTLINE),
                    group,
                    z_order::GAUGE_OUTLINE,
                    arc(&g.outline),
                ));
                push_ticks(
                    &mut out,
                    &g.ticks,
                    MarkGroup::AngularAxis,
                    id_base,
                    ids::ANGULAR_TICKS,
                    ids::ANGULAR_LABELS,
                );
            }
            Some(GaugeLayout::Bullet(g)) => {
                let group = MarkGroup::BulletGauge;
                let rect = |mark: &RectMark| MarkPayload::Rect(mark.clone());
                out.push(Mark::new(
                    id(ids::BULLET_BACKGROUND),
                    group,
                    z_order::GAUGE_BACKGROUND,
                    rect(&g.background),
                ));
                for (i, step) in (0_u64..).zip(&g.steps) {
                    out.push(Mark::new(
                        item(ids::BULLET_STEPS, i),
                        group,
                        z_order::GAUGE_STEPS,
                        rect(step),
                    ));
                }
                out.push(Mark::new(
                    id(ids::BULLET_VALUE),
                    group,
                    z_order::GAUGE_VALUE,
                    rect(&g.value),
                ));
                if let Some(t) = &g.threshold {
                    out.push(Mark::new(
                        id(ids::BULLET_THRESHOLD),
                        group,
                        z_order::GAUGE_THRESHOLD_RULE,
                        MarkPayload::Rule(t.clone()),
                    ));
                }
                out.push(Mark::new(
                    id(ids::BULLET_OUTLINE),
                    group,
                    z_order::GAUGE_OUTLINE,
                    rect(&g.outline),
                ));
                push_ticks(
                    &mut out,
                    &g.ticks,
                    MarkGroup::BulletAxis,
                    id_base,
                    ids::BULLET_TICKS,
                    ids::BULLET_LABELS,
                );
            }
            None => {}
        }

        if let Some(numbers) = &self.numbers {
            out.push(Mark::new(
                id(ids::NUMBERS),
                MarkGroup::Numbers,
                z_order::NUMBERS,
                MarkPayload::Text(numbers.to_text_mark()),
            ));
        }
        if let Some(title) = &self.title {
            out.push(Mark::new(
                id(ids::TITLE),
                MarkGroup::Title,
                z_order::TITLES,
                MarkPayload::Text(TextMark::single(
                    title.pos,
                    title.text.clone(),
                    title.font.clone(),
                    title.anchor,
                    TextBaseline::Alphabetic,
                )),
            ));
        }

        out
    }
}

/// Counts of the pieces a plan draws, by kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlanSummary {
    /// Number text runs.
    pub number_texts: usize,
    /// Delta text runs.
    pub delta_texts: usize,
    /// Angular gauge groups.
    pub angular_gauges: usize,
    /// Bullet gauge groups.
    pub bullet_gauges: usize,
}

impl RenderPlan {
    /// Counts what this plan draws.
    pub fn summary(&self) -> PlanSummary {
        let (number_texts, delta_texts) = self.numbers.as_ref().map_or((0, 0), |n| {
            (
                usize::from(n.number.is_some()),
                usize::from(n.delta.is_some()),
            )
        });
        PlanSummary {
            number_texts,
            delta_texts,
            angular_gauges: usize::from(matches!(self.gauge, Some(GaugeLayout::Angular(_)))),
            bullet_gauges: usize::from(matches!(self.gauge, Some(GaugeLayout::Bullet(_)))),
        }
    }
}

fn push_ticks(
    out: &mut Vec<Mark>,
    ticks: &[AxisTick],
    group: MarkGroup,
    id_base: u64,
    rules: u64,
    labels: u64,
) {
    for (i, tick) in (0_u64..).zip(ticks) {
        if let Some(rule) = &tick.rule {
            out.push(Mark::new(
                MarkId::from_raw(id_base + ids::offset(rules, i)),
                group,
                z_order::AXIS_RULES,
                MarkPayload::Rule(rule.clone()),
            ));
        }
        if let Some(label) = &tick.label {
            out.push(Mark::new(
                MarkId::from_raw(id_base + ids::offset(labels, i)),
                group,
                z_order::AXIS_LABELS,
                MarkPayload::Text(TextMark::single(
                    label.pos,
                    label.text.clone(),
                    label.font.clone(),
                    label.anchor,
                    label.baseline,
                )),
            ));
        }
    }
}
