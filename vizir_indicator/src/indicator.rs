// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The indicator layout orchestrator.
//!
//! An [`Indicator`] owns a resolved [`IndicatorSpec`] plus the state that outlives a single draw:
//! the fit-scale memo, the previously shown value and delta, and the running transition. Each
//! draw composes the domain rectangle, the gauge, the number/delta block and the title into a
//! [`RenderPlan`].

extern crate alloc;

use alloc::string::String;

use kurbo::{Affine, Point, Rect, Vec2};
use peniko::Brush;

use crate::angular::{AngularGeometry, MID_SHIFT, layout_angular};
use crate::bullet::{BULLET_PADDING, BulletGeometry, NUMBER_DOMAIN_FRACTION, layout_bullet};
use crate::fit::{ScaleMemo, fit_box, fit_circle};
use crate::layout::{Domain, DomainRect, PlotSize};
use crate::mark::{TextAnchor, TextBaseline, TextRun};
use crate::measure::{Font, TextMeasurer};
use crate::plan::{GaugeLayout, NumbersLayout, RenderPlan, TitleLayout};
use crate::spec::{DeltaPosition, GaugeShape, IndicatorSpec};
use crate::transition::{Completion, CompletionReason, IndicatorTransition, Transition, lerp};

/// Gap between the title and what it sits above.
pub const TITLE_PADDING: f64 = 5.0;

/// Horizontal gap between inline number and delta runs.
pub const INLINE_GAP: f64 = 10.0;

/// Fraction of the available space the number block may fill.
const NUMBER_FILL: f64 = 0.9;

/// Horizontal spread of number alignment inside the dial, as a fraction of the inner radius.
const ANGULAR_NUMBER_SPREAD: f64 = 0.85;

/// Values a single draw lays out.
#[derive(Clone, Copy, Debug)]
struct FrameState {
    value: f64,
    shown_delta: f64,
    gauge_from: f64,
    gauge_to: f64,
    gauge_t: f64,
}

impl FrameState {
    fn at_rest(value: f64, shown_delta: f64) -> Self {
        Self {
            value,
            shown_delta,
            gauge_from: value,
            gauge_to: value,
            gauge_t: 1.0,
        }
    }
}

/// A single indicator and its per-instance layout state.
#[derive(Debug)]
pub struct Indicator {
    spec: IndicatorSpec,
    scale_memo: ScaleMemo,
    last_value: Option<f64>,
    last_delta: f64,
    transition: Option<IndicatorTransition>,
}

impl Indicator {
    /// Creates an indicator with fresh state.
    pub fn new(spec: IndicatorSpec) -> Self {
        Self {
            spec,
            scale_memo: ScaleMemo::new(),
            last_value: None,
            last_delta: 0.0,
            transition: None,
        }
    }

    /// The current spec.
    pub fn spec(&self) -> &IndicatorSpec {
        &self.spec
    }

    /// Replaces the spec, remembering the previous value as the next transition's start.
    ///
    /// The fit-scale memo is kept: a restyle at the same domain size never grows the number.
    pub fn update(&mut self, spec: IndicatorSpec) {
        self.last_value = Some(self.spec.value);
        self.spec = spec;
    }

    /// The fit-scale memo.
    pub fn scale_memo(&self) -> &ScaleMemo {
        &self.scale_memo
    }

    /// The last committed shown delta.
    pub fn last_delta(&self) -> f64 {
        self.last_delta
    }

    /// Whether a transition is running.
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    fn target_delta(&self) -> f64 {
        let delta = &self.spec.delta;
        delta.shown_value(delta.delta(self.spec.value))
    }

    /// Lays out the indicator at its current value.
    ///
    /// Outside a transition this commits the shown delta as the start of the next one.
    pub fn plot(
        &mut self,
        domain: Domain,
        plot: PlotSize,
        measurer: &dyn TextMeasurer,
    ) -> RenderPlan {
        let shown_delta = self.target_delta();
        if self.transition.is_none() {
            self.last_delta = shown_delta;
        }
        let state = FrameState::at_rest(self.spec.value, shown_delta);
        self.layout(domain, plot, measurer, state)
    }

    /// Starts animating from the previously shown value and delta to the current ones.
    ///
    /// A running transition is interrupted first. The first transition of an indicator starts
    /// from the range minimum.
    pub fn begin_transition(&mut self, transition: Transition, completion: Completion) {
        self.cancel_transition();
        let from_value = self.last_value.unwrap_or(self.spec.range.min);
        let to_value = self.spec.value;
        tracing::debug!(
            from_value,
            to_value,
            duration = transition.duration,
            "indicator transition started"
        );
        self.transition = Some(IndicatorTransition {
            transition,
            from_value,
            to_value,
            from_delta: self.last_delta,
            to_delta: self.target_delta(),
            completion,
        });
    }

    /// Lays out the frame `elapsed` milliseconds into the running transition.
    ///
    /// The frame that reaches the end finishes the transition. Without a transition this is
    /// [`Indicator::plot`].
    pub fn frame(
        &mut self,
        domain: Domain,
        plot: PlotSize,
        measurer: &dyn TextMeasurer,
        elapsed: f64,
    ) -> RenderPlan {
        let Some(running) = &self.transition else {
            return self.plot(domain, plot, measurer);
        };
        let (value, shown_delta) = running.sample(elapsed);
        let state = FrameState {
            value,
            shown_delta,
            gauge_from: running.from_value,
            gauge_to: running.to_value,
            gauge_t: running.progress(elapsed),
        };
        let done = running.transition.is_done(elapsed);

        let plan = self.layout(domain, plot, measurer, state);
        if done {
            self.finish_transition();
        }
        plan
    }

    /// Ends the running transition normally, committing its final delta.
    ///
    /// Returns whether a transition was running.
    pub fn finish_transition(&mut self) -> bool {
        let Some(mut running) = self.transition.take() else {
            return false;
        };
        self.last_delta = running.to_delta;
        tracing::debug!(to_value = running.to_value, "indicator transition finished");
        running.completion.fire(CompletionReason::Finished);
        true
    }

    /// Interrupts the running transition. The committed delta is left unchanged.
    ///
    /// Returns whether a transition was running.
    pub fn cancel_transition(&mut self) -> bool {
        let Some(mut running) = self.transition.take() else {
            return false;
        };
        tracing::debug!(to_value = running.to_value, "indicator transition interrupted");
        running.completion.fire(CompletionReason::Interrupted);
        true
    }

    fn layout(
        &mut self,
        domain: Domain,
        plot: PlotSize,
        measurer: &dyn TextMeasurer,
        state: FrameState,
    ) -> RenderPlan {
        let rect = DomainRect::new(domain, plot);
        let spec = &self.spec;
        let with_numbers = spec.mode.has_text();

        let gauge = spec.gauge_shape().map(|shape| {
            let range = spec.range;
            match shape {
                GaugeShape::Angular => {
                    let angle = lerp(
                        range.value_to_angle(state.gauge_from),
                        range.value_to_angle(state.gauge_to),
                        state.gauge_t,
                    );
                    GaugeLayout::Angular(layout_angular(
                        &spec.gauge,
                        range,
                        &rect,
                        angle,
                        measurer,
                    ))
                }
                GaugeShape::Bullet => {
                    let geometry = BulletGeometry::new(&rect, &range, with_numbers);
                    let width = lerp(
                        geometry.bar_width(state.gauge_from),
                        geometry.bar_width(state.gauge_to),
                        state.gauge_t,
                    );
                    GaugeLayout::Bullet(layout_bullet(
                        &spec.gauge,
                        range,
                        &rect,
                        with_numbers,
                        width,
                        measurer,
                    ))
                }
            }
        });

        let numbers = with_numbers.then(|| {
            layout_numbers(
                spec,
                &mut self.scale_memo,
                &rect,
                spec.gauge_shape(),
                state,
                measurer,
            )
        });
        let title = layout_title(spec, &rect, gauge.as_ref(), numbers.as_ref(), measurer);

        RenderPlan {
            domain: rect,
            numbers,
            title,
            gauge,
        }
    }
}

struct PendingRun {
    text: String,
    font: Font,
    fill: Brush,
    y: f64,
}

impl PendingRun {
    fn width(&self, measurer: &dyn TextMeasurer) -> f64 {
        measurer.measure(&self.text, &self.font).advance_width
    }

    fn place(self, x: f64, anchor: TextAnchor) -> TextRun {
        TextRun {
            text: self.text,
            font: self.font,
            fill: self.fill,
            pos: Point::new(x, self.y),
            anchor,
        }
    }
}

/// Composes the number and delta runs around the origin, unscaled.
fn compose_runs(
    spec: &IndicatorSpec,
    state: FrameState,
    measurer: &dyn TextMeasurer,
) -> (Option<TextRun>, Option<TextRun>) {
    let mode = spec.mode;
    let anchor = spec.align.anchor();
    let nfs = spec.number.font.size;
    let dfs = spec.delta.font.size;

    let mut number = mode.number.then(|| PendingRun {
        text: spec.number.text(state.value),
        font: spec.number.font.clone(),
        fill: Brush::Solid(spec.number.font.color),
        y: 0.0,
    });
    let mut delta = mode.delta.then(|| {
        let target = spec.delta.delta(spec.value);
        PendingRun {
            text: spec.delta.text(state.shown_delta),
            font: spec.delta.font.clone(),
            fill: Brush::Solid(spec.delta.color(target)),
            y: -MID_SHIFT * dfs,
        }
    });

    let position = spec.delta.position;
    if let (Some(n), Some(d)) = (&mut number, &mut delta) {
        match position {
            DeltaPosition::Bottom => d.y += 1.5 * dfs,
            DeltaPosition::Top => d.y += -nfs + MID_SHIFT * dfs,
            DeltaPosition::Left => n.y = d.y + 0.5 * MID_SHIFT * nfs,
            DeltaPosition::Right => {}
        }
    }

    match (number, delta) {
        (Some(n), Some(d)) if position.is_inline() => {
            let (first, second) = if position == DeltaPosition::Left {
                (d, n)
            } else {
                (n, d)
            };
            let w1 = first.width(measurer);
            let total = w1 + INLINE_GAP + second.width(measurer);
            let start = -spec.align.position() * total;
            let first = first.place(start, TextAnchor::Start);
            let second = second.place(start + w1 + INLINE_GAP, TextAnchor::Start);
            if position == DeltaPosition::Left {
                (Some(second), Some(first))
            } else {
                (Some(first), Some(second))
            }
        }
        (n, d) => (n.map(|r| r.place(0.0, anchor)), d.map(|r| r.place(0.0, anchor))),
    }
}

fn layout_numbers(
    spec: &IndicatorSpec,
    memo: &mut ScaleMemo,
    rect: &DomainRect,
    shape: Option<GaugeShape>,
    state: FrameState,
    measurer: &dyn TextMeasurer,
) -> NumbersLayout {
    let (number, delta) = compose_runs(spec, state, measurer);

    let bbox = number
        .iter()
        .chain(delta.iter())
        .map(|run| {
            measurer
                .measure(&run.text, &run.font)
                .anchored_bounds(run.pos, run.anchor, TextBaseline::Alphabetic)
        })
        .reduce(|a, b| a.union(b))
        .unwrap_or(Rect::ZERO);

    let pos = spec.align.position();
    let (anchor, fit, bottom_aligned) = match shape {
        None => (
            Point::new(rect.left + pos * rect.width, rect.center_y()),
            fit_box(bbox, NUMBER_FILL * rect.width, NUMBER_FILL * rect.height),
            false,
        ),
        Some(GaugeShape::Angular) => {
            let geometry = AngularGeometry::new(rect);
            let inner = geometry.inner_radius;
            let spread = ANGULAR_NUMBER_SPREAD * inner;
            (
                Point::new(
                    rect.center_x() - spread + 2.0 * spread * pos,
                    geometry.center.y,
                ),
                fit_circle(bbox, NUMBER_FILL * inner),
                true,
            )
        }
        Some(GaugeShape::Bullet) => {
            let p = 1.0 - NUMBER_DOMAIN_FRACTION + BULLET_PADDING;
            (
                Point::new(
                    rect.left + (p + (1.0 - p) * pos) * rect.width,
                    rect.center_y(),
                ),
                fit_box(
                    bbox,
                    (NUMBER_DOMAIN_FRACTION - BULLET_PADDING) * rect.width,
                    rect.height,
                ),
                false,
            )
        }
    };

    let scale = memo.apply(fit);
    tracing::trace!(scale, computed = fit.scale, key = ?fit.key, "fit numbers");
    let translate_y = if bottom_aligned {
        anchor.y - scale * bbox.y1
    } else {
        anchor.y - scale * 0.5 * (bbox.y0 + bbox.y1)
    };
    let transform = Affine::translate(Vec2::new(anchor.x, translate_y)) * Affine::scale(scale);

    NumbersLayout {
        number,
        delta,
        anchor,
        align: spec.align,
        bbox,
        scale,
        transform,
    }
}

fn layout_title(
    spec: &IndicatorSpec,
    rect: &DomainRect,
    gauge: Option<&GaugeLayout>,
    numbers: Option<&NumbersLayout>,
    measurer: &dyn TextMeasurer,
) -> Option<TitleLayout> {
    let title = &spec.title;
    if title.text.is_empty() {
        return None;
    }
    let metrics = measurer.measure(&title.text, &title.font);
    let aligned_x = rect.left + title.align.position() * rect.width;

    let (pos, anchor) = match gauge {
        Some(GaugeLayout::Angular(g)) => (
            Point::new(aligned_x, g.top() - TITLE_PADDING),
            title.align.anchor(),
        ),
        Some(GaugeLayout::Bullet(_)) => {
            let y = numbers.map_or(rect.center_y(), |n| n.anchor.y);
            (
                Point::new(
                    rect.left - BULLET_PADDING * rect.width,
                    y + 0.5 * (metrics.ascent - metrics.descent),
                ),
                TextAnchor::End,
            )
        }
        None => {
            let top = numbers.map_or(rect.top, |n| n.bounds().y0);
            (
                Point::new(aligned_x, top - TITLE_PADDING),
                title.align.anchor(),
            )
        }
    };

    Some(TitleLayout {
        text: title.text.clone(),
        font: title.font.clone(),
        pos,
        anchor,
        bounds: metrics.anchored_bounds(pos, anchor, TextBaseline::Alphabetic),
    })
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use core::f64::consts::{FRAC_PI_2, FRAC_PI_6};

    use super::*;
    use crate::defaults::{IndicatorConfig, layout_font, resolve};
    use crate::layout::Margin;
    use crate::measure::HeuristicTextMeasurer;
    use crate::plan::PlanSummary;
    use crate::spec::Align;
    use crate::transition::Easing;

    const EPS: f64 = 1e-9;

    fn spec(config: IndicatorConfig) -> IndicatorSpec {
        resolve(&config, &layout_font()).expect("valid config")
    }

    fn plot_size() -> PlotSize {
        PlotSize::from_figure(400.0, 400.0, Margin::default())
    }

    fn draw(indicator: &mut Indicator) -> RenderPlan {
        indicator.plot(Domain::FULL, plot_size(), &HeuristicTextMeasurer)
    }

    fn numbers(plan: &RenderPlan) -> &NumbersLayout {
        plan.numbers.as_ref().expect("numbers")
    }

    fn delta_config(position: DeltaPosition) -> IndicatorConfig {
        IndicatorConfig::new(110.0)
            .with_mode("number+delta")
            .with_reference(100.0)
            .with_delta_position(position)
    }

    #[test]
    fn bottom_delta_stacks_below_the_number() {
        let mut indicator = Indicator::new(spec(delta_config(DeltaPosition::Bottom)));
        let plan = draw(&mut indicator);
        let n = numbers(&plan);
        let (number, delta) = (n.number.as_ref().unwrap(), n.delta.as_ref().unwrap());
        assert_eq!(number.text, "110");
        assert_eq!(delta.text, "▲10.0");
        assert_eq!(number.pos, Point::ORIGIN);
        assert!((delta.pos.y - 46.0).abs() < EPS);
        assert_eq!(delta.anchor, TextAnchor::Middle);
    }

    #[test]
    fn top_delta_sits_one_number_line_up() {
        let mut indicator = Indicator::new(spec(delta_config(DeltaPosition::Top)));
        let plan = draw(&mut indicator);
        let delta = numbers(&plan).delta.as_ref().unwrap();
        assert!((delta.pos.y + 80.0).abs() < EPS);
    }

    #[test]
    fn inline_deltas_form_one_centered_chunk() {
        let mut indicator = Indicator::new(spec(delta_config(DeltaPosition::Right)));
        let plan = draw(&mut indicator);
        let n = numbers(&plan);
        let (number, delta) = (n.number.as_ref().unwrap(), n.delta.as_ref().unwrap());
        // "110" is 144 wide, "▲10.0" 120, plus the gap.
        assert!((number.pos.x + 137.0).abs() < EPS);
        assert!((delta.pos.x - 17.0).abs() < EPS);
        assert!((delta.pos.y + 14.0).abs() < EPS);
        assert_eq!(number.anchor, TextAnchor::Start);

        let mut indicator = Indicator::new(spec(delta_config(DeltaPosition::Left)));
        let plan = draw(&mut indicator);
        let n = numbers(&plan);
        let (number, delta) = (n.number.as_ref().unwrap(), n.delta.as_ref().unwrap());
        assert!((delta.pos.x + 137.0).abs() < EPS);
        assert!((number.pos.x + 7.0).abs() < EPS);
        assert!(number.pos.y.abs() < EPS);
        assert_eq!(n.to_text_mark().runs[0].text, "▲10.0");
    }

    #[test]
    fn delta_only_is_shifted_to_its_middle() {
        let config = IndicatorConfig::new(90.0)
            .with_mode("delta")
            .with_reference(100.0);
        let mut indicator = Indicator::new(spec(config));
        let plan = draw(&mut indicator);
        let n = numbers(&plan);
        assert!(n.number.is_none());
        let delta = n.delta.as_ref().unwrap();
        assert_eq!(delta.text, "▼10.0");
        assert!((delta.pos.y + 0.35 * 80.0).abs() < EPS);
    }

    #[test]
    fn angular_numbers_sit_on_the_dial_center() {
        let config = IndicatorConfig::new(50.0).with_mode("number+gauge");
        let mut indicator = Indicator::new(spec(config));
        let plan = draw(&mut indicator);
        let n = numbers(&plan);
        // Plot area 240 × 220 at (80, 100): radius 120, center (200, 270).
        assert_eq!(n.anchor, Point::new(200.0, 270.0));
        assert!((n.bounds().y1 - 270.0).abs() < 1e-6);
        let inner = 90.0;
        let half_w = 0.5 * n.bbox.width();
        let h = n.bbox.height();
        let extent = n.scale * (half_w * half_w + h * h).sqrt();
        assert!(extent <= 0.9 * inner + 1e-6);
    }

    #[test]
    fn bullet_numbers_sit_right_of_the_strip() {
        let config = IndicatorConfig::new(50.0)
            .with_mode("number+gauge")
            .with_gauge_shape(GaugeShape::Bullet);
        let mut indicator = Indicator::new(spec(config));
        let plan = draw(&mut indicator);
        let n = numbers(&plan);
        assert!((n.anchor.x - 293.0).abs() < 1e-9);
        assert!((n.anchor.y - 210.0).abs() < 1e-9);
        let b = n.bounds();
        assert!(b.width() <= 0.225 * 240.0 + 1e-6);
        assert!(((b.y0 + b.y1) * 0.5 - 210.0).abs() < 1e-6);

        let Some(GaugeLayout::Bullet(g)) = &plan.gauge else {
            panic!("expected a bullet gauge");
        };
        assert!((g.geometry.strip.x1 - 260.0).abs() < 1e-9);
    }

    #[test]
    fn titles_follow_the_gauge_shape() {
        let base = IndicatorConfig::new(50.0).with_title("Speed");

        let mut indicator = Indicator::new(spec(base.clone()));
        let plan = draw(&mut indicator);
        let title = plan.title.as_ref().expect("title");
        let top = numbers(&plan).bounds().y0;
        assert!((title.pos.y - (top - TITLE_PADDING)).abs() < 1e-9);
        assert_eq!(title.anchor, TextAnchor::Middle);
        assert_eq!(title.font.size, 20.0);

        let mut indicator = Indicator::new(spec(base.clone().with_mode("number+gauge")));
        let plan = draw(&mut indicator);
        let Some(GaugeLayout::Angular(g)) = &plan.gauge else {
            panic!("expected an angular gauge");
        };
        let title = plan.title.as_ref().expect("title");
        assert!((title.pos.y - (g.top() - TITLE_PADDING)).abs() < 1e-9);
        assert!(title.bounds.y1 < g.top());

        let mut bullet = base.with_mode("number+gauge");
        bullet.title.align = Some(Align::Left);
        let mut indicator = Indicator::new(spec(bullet.with_gauge_shape(GaugeShape::Bullet)));
        let plan = draw(&mut indicator);
        let title = plan.title.as_ref().expect("title");
        assert_eq!(title.anchor, TextAnchor::End);
        assert!((title.pos.x - 74.0).abs() < 1e-9);
        assert!((title.pos.y - 216.0).abs() < 1e-9);
    }

    #[test]
    fn empty_title_is_not_laid_out() {
        let mut indicator = Indicator::new(spec(IndicatorConfig::new(5.0)));
        assert!(draw(&mut indicator).title.is_none());
    }

    #[test]
    fn gauge_only_has_no_numbers_and_full_width_strip() {
        let config = IndicatorConfig::new(50.0)
            .with_mode("gauge")
            .with_gauge_shape(GaugeShape::Bullet);
        let mut indicator = Indicator::new(spec(config));
        let plan = draw(&mut indicator);
        assert!(plan.numbers.is_none());
        let Some(GaugeLayout::Bullet(g)) = &plan.gauge else {
            panic!("expected a bullet gauge");
        };
        assert!((g.geometry.strip.x1 - 320.0).abs() < 1e-9);
        assert!(g.steps.is_empty());
    }

    fn recorder() -> (Rc<RefCell<Vec<CompletionReason>>>, Completion) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, Completion::new(move |r| sink.borrow_mut().push(r)))
    }

    fn value_angle(plan: &RenderPlan) -> f64 {
        match &plan.gauge {
            Some(GaugeLayout::Angular(g)) => g.value.end_angle,
            _ => panic!("expected an angular gauge"),
        }
    }

    #[test]
    fn first_transition_starts_from_the_range_minimum() {
        let config = IndicatorConfig::new(100.0).with_mode("number+gauge");
        let mut indicator = Indicator::new(spec(config));
        let (log, completion) = recorder();
        indicator.begin_transition(
            Transition::new(1000.0).with_easing(Easing::LINEAR),
            completion,
        );

        let m = &HeuristicTextMeasurer;
        let start = indicator.frame(Domain::FULL, plot_size(), m, 0.0);
        assert!((value_angle(&start) + FRAC_PI_2).abs() < EPS);

        let mid = indicator.frame(Domain::FULL, plot_size(), m, 500.0);
        // Range 0..150; the end angle for 100 is π/6.
        assert!((value_angle(&mid) + FRAC_PI_6).abs() < EPS);
        assert_eq!(numbers(&mid).number.as_ref().unwrap().text, "50.0");
        assert!(indicator.is_transitioning());

        let end = indicator.frame(Domain::FULL, plot_size(), m, 1000.0);
        assert!((value_angle(&end) - FRAC_PI_6).abs() < EPS);
        assert!(!indicator.is_transitioning());
        assert_eq!(*log.borrow(), [CompletionReason::Finished]);
    }

    #[test]
    fn bullet_transition_interpolates_bar_width() {
        let config = IndicatorConfig::new(100.0)
            .with_mode("gauge")
            .with_range(0.0, 200.0)
            .with_gauge_shape(GaugeShape::Bullet);
        let mut indicator = Indicator::new(spec(config));
        indicator.begin_transition(
            Transition::new(100.0).with_easing(Easing::LINEAR),
            Completion::noop(),
        );
        let plan = indicator.frame(Domain::FULL, plot_size(), &HeuristicTextMeasurer, 50.0);
        let Some(GaugeLayout::Bullet(g)) = &plan.gauge else {
            panic!("expected a bullet gauge");
        };
        // Full strip is 240 wide; halfway to 100 of 200 is a quarter of it.
        assert!((g.value.rect.width() - 60.0).abs() < EPS);
    }

    #[test]
    fn delta_transition_runs_from_the_committed_delta() {
        let mut indicator = Indicator::new(spec(delta_config(DeltaPosition::Bottom)));
        let (log, completion) = recorder();
        indicator.begin_transition(
            Transition::new(1000.0).with_easing(Easing::LINEAR),
            completion,
        );
        let m = &HeuristicTextMeasurer;
        let mid = indicator.frame(Domain::FULL, plot_size(), m, 500.0);
        assert_eq!(numbers(&mid).delta.as_ref().unwrap().text, "▲5.00");
        assert_eq!(indicator.last_delta(), 0.0);

        assert!(indicator.finish_transition());
        assert_eq!(indicator.last_delta(), 10.0);
        assert_eq!(*log.borrow(), [CompletionReason::Finished]);
        assert!(!indicator.finish_transition());

        indicator.update(spec(
            IndicatorConfig::new(120.0)
                .with_mode("number+delta")
                .with_reference(100.0),
        ));
        indicator.begin_transition(
            Transition::new(1000.0).with_easing(Easing::LINEAR),
            Completion::noop(),
        );
        let start = indicator.frame(Domain::FULL, plot_size(), m, 0.0);
        let n = numbers(&start);
        assert_eq!(n.number.as_ref().unwrap().text, "110");
        assert_eq!(n.delta.as_ref().unwrap().text, "▲10.0");
    }

    #[test]
    fn cancel_and_supersede_interrupt_exactly_once() {
        let mut indicator = Indicator::new(spec(delta_config(DeltaPosition::Bottom)));
        let (first, completion) = recorder();
        indicator.begin_transition(Transition::new(500.0), completion);
        let (second, completion) = recorder();
        indicator.begin_transition(Transition::new(500.0), completion);
        assert_eq!(*first.borrow(), [CompletionReason::Interrupted]);
        assert!(second.borrow().is_empty());

        assert!(indicator.cancel_transition());
        assert_eq!(*second.borrow(), [CompletionReason::Interrupted]);
        assert_eq!(indicator.last_delta(), 0.0);
        assert!(!indicator.cancel_transition());

        let (third, completion) = recorder();
        indicator.begin_transition(Transition::new(500.0), completion);
        drop(indicator);
        assert_eq!(*third.borrow(), [CompletionReason::Interrupted]);
    }

    #[test]
    fn static_plot_commits_the_delta() {
        let mut indicator = Indicator::new(spec(delta_config(DeltaPosition::Bottom)));
        draw(&mut indicator);
        assert_eq!(indicator.last_delta(), 10.0);
    }

    #[test]
    fn summary_counts_pieces() {
        let mut indicator = Indicator::new(spec(
            IndicatorConfig::new(3.0)
                .with_mode("number+delta+gauge")
                .with_reference(2.0),
        ));
        let summary = draw(&mut indicator).summary();
        assert_eq!(
            summary,
            PlanSummary {
                number_texts: 1,
                delta_texts: 1,
                angular_gauges: 1,
                bullet_gauges: 0,
            }
        );
    }
}
