// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value transitions.
//!
//! The caller owns the clock. A [`Transition`] turns elapsed milliseconds into eased progress,
//! and a [`Completion`] delivers the end-of-transition signal exactly once, whether the
//! transition finishes, is interrupted, or is simply dropped.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
use core::f64::consts::FRAC_PI_2;
use core::fmt;
use core::str::FromStr;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Errors from parsing an easing name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EasingError {
    /// The curve name is not known.
    #[error("unknown easing curve {0:?}")]
    UnknownCurve(String),
    /// The mode suffix is not `in`, `out`, `in-out` or `out-in`.
    #[error("unknown easing mode {0:?}")]
    UnknownMode(String),
}

/// Base easing curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EaseCurve {
    /// `t`.
    Linear,
    /// `t²`.
    Quad,
    /// `t³`.
    Cubic,
    /// Quarter sine.
    Sin,
    /// Exponential.
    Exp,
    /// Quarter circle.
    Circle,
    /// Overshooting cubic.
    Back,
    /// Bouncing ball.
    Bounce,
}

/// How the base curve is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EaseMode {
    /// The curve as is.
    In,
    /// The curve reversed.
    Out,
    /// `In` for the first half, `Out` for the second.
    InOut,
    /// `Out` for the first half, `In` for the second.
    OutIn,
}

/// An easing function, named the d3 way (`"cubic-in-out"`, `"bounce"`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Easing {
    /// Base curve.
    pub curve: EaseCurve,
    /// Application mode.
    pub mode: EaseMode,
}

impl Default for Easing {
    fn default() -> Self {
        Self {
            curve: EaseCurve::Cubic,
            mode: EaseMode::InOut,
        }
    }
}

impl Easing {
    /// Linear easing.
    pub const LINEAR: Self = Self {
        curve: EaseCurve::Linear,
        mode: EaseMode::In,
    };

    /// Eases `t`, clamped to `[0, 1]`; the ends map exactly to `0` and `1`.
    pub fn apply(&self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let f = |t: f64| self.curve.eval(t);
        match self.mode {
            EaseMode::In => f(t),
            EaseMode::Out => 1.0 - f(1.0 - t),
            EaseMode::InOut => in_out(f, t),
            EaseMode::OutIn => in_out(|t| 1.0 - f(1.0 - t), t),
        }
    }
}

fn in_out(f: impl Fn(f64) -> f64, t: f64) -> f64 {
    if t <= 0.5 {
        0.5 * f(2.0 * t)
    } else {
        1.0 - 0.5 * f(2.0 - 2.0 * t)
    }
}

impl EaseCurve {
    fn eval(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::Quad => t * t,
            Self::Cubic => t * t * t,
            Self::Sin => 1.0 - (t * FRAC_PI_2).cos(),
            Self::Exp => 2_f64.powf(10.0 * (t - 1.0)),
            Self::Circle => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            Self::Back => {
                const S: f64 = 1.70158;
                t * t * ((S + 1.0) * t - S)
            }
            Self::Bounce => bounce(t),
        }
    }
}

fn bounce(t: f64) -> f64 {
    const K: f64 = 7.5625;
    if t < 1.0 / 2.75 {
        K * t * t
    } else if t < 2.0 / 2.75 {
        let t = t - 1.5 / 2.75;
        K * t * t + 0.75
    } else if t < 2.5 / 2.75 {
        let t = t - 2.25 / 2.75;
        K * t * t + 0.9375
    } else {
        let t = t - 2.625 / 2.75;
        K * t * t + 0.984375
    }
}

impl FromStr for Easing {
    type Err = EasingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, mode) = match s.split_once('-') {
            Some((name, mode)) => (name, Some(mode)),
            None => (s, None),
        };
        let curve = match name {
            "linear" => EaseCurve::Linear,
            "quad" => EaseCurve::Quad,
            "cubic" => EaseCurve::Cubic,
            "sin" => EaseCurve::Sin,
            "exp" => EaseCurve::Exp,
            "circle" => EaseCurve::Circle,
            "back" => EaseCurve::Back,
            "bounce" => EaseCurve::Bounce,
            _ => return Err(EasingError::UnknownCurve(String::from(name))),
        };
        let mode = match mode {
            None | Some("in") => EaseMode::In,
            Some("out") => EaseMode::Out,
            Some("in-out") => EaseMode::InOut,
            Some("out-in") => EaseMode::OutIn,
            Some(other) => return Err(EasingError::UnknownMode(String::from(other))),
        };
        Ok(Self { curve, mode })
    }
}

/// Duration and easing of a value transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Duration in milliseconds.
    pub duration: f64,
    /// Easing.
    pub easing: Easing,
}

impl Transition {
    /// A transition of `duration` milliseconds with the default easing.
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            easing: Easing::default(),
        }
    }

    /// Sets the easing.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Eased progress after `elapsed` milliseconds.
    pub fn progress(&self, elapsed: f64) -> f64 {
        if self.duration <= 0.0 || self.duration.is_nan() {
            return 1.0;
        }
        self.easing.apply(elapsed / self.duration)
    }

    /// Whether `elapsed` milliseconds reach the end of the transition.
    pub fn is_done(&self, elapsed: f64) -> bool {
        elapsed >= self.duration || self.duration.is_nan()
    }
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// How a transition ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompletionReason {
    /// It ran to completion.
    Finished,
    /// It was cancelled, superseded or dropped.
    Interrupted,
}

/// A one-shot completion signal.
///
/// The callback runs exactly once: on [`Completion::fire`], or with
/// [`CompletionReason::Interrupted`] when the signal is dropped unfired.
pub struct Completion {
    callback: Option<Box<dyn FnOnce(CompletionReason)>>,
}

impl Completion {
    /// Wraps a callback.
    pub fn new(callback: impl FnOnce(CompletionReason) + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// A signal nobody listens to.
    pub fn noop() -> Self {
        Self { callback: None }
    }

    /// Fires the signal; later calls do nothing. Returns whether this call fired it.
    pub fn fire(&mut self, reason: CompletionReason) -> bool {
        match self.callback.take() {
            Some(callback) => {
                callback(reason);
                true
            }
            None => false,
        }
    }

    /// Whether the signal is still pending.
    pub fn is_pending(&self) -> bool {
        self.callback.is_some()
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        self.fire(CompletionReason::Interrupted);
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("pending", &self.is_pending())
            .finish()
    }
}

/// Start and end state of a running indicator transition.
#[derive(Debug)]
pub struct IndicatorTransition {
    /// Timing.
    pub transition: Transition,
    /// Value at the start.
    pub from_value: f64,
    /// Value at the end.
    pub to_value: f64,
    /// Shown delta at the start.
    pub from_delta: f64,
    /// Shown delta at the end.
    pub to_delta: f64,
    /// Completion signal.
    pub completion: Completion,
}

impl IndicatorTransition {
    /// Interpolated value and shown delta after `elapsed` milliseconds.
    pub fn sample(&self, elapsed: f64) -> (f64, f64) {
        let t = self.transition.progress(elapsed);
        (
            lerp(self.from_value, self.to_value, t),
            lerp(self.from_delta, self.to_delta, t),
        )
    }

    /// Eased progress after `elapsed` milliseconds.
    pub fn progress(&self, elapsed: f64) -> f64 {
        self.transition.progress(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn parses_d3_easing_names() {
        assert_eq!("cubic-in-out".parse::<Easing>(), Ok(Easing::default()));
        assert_eq!("linear".parse::<Easing>(), Ok(Easing::LINEAR));
        let e: Easing = "bounce-out".parse().unwrap();
        assert_eq!(e.curve, EaseCurve::Bounce);
        assert_eq!(e.mode, EaseMode::Out);
        assert!(matches!(
            "wobble-in".parse::<Easing>(),
            Err(EasingError::UnknownCurve(_))
        ));
        assert!(matches!(
            "quad-sideways".parse::<Easing>(),
            Err(EasingError::UnknownMode(_))
        ));
    }

    #[test]
    fn every_easing_hits_its_endpoints() {
        let curves = [
            EaseCurve::Linear,
            EaseCurve::Quad,
            EaseCurve::Cubic,
            EaseCurve::Sin,
            EaseCurve::Exp,
            EaseCurve::Circle,
            EaseCurve::Back,
            EaseCurve::Bounce,
        ];
        let modes = [EaseMode::In, EaseMode::Out, EaseMode::InOut, EaseMode::OutIn];
        for curve in curves {
            for mode in modes {
                let e = Easing { curve, mode };
                assert_eq!(e.apply(0.0), 0.0, "{e:?}");
                assert_eq!(e.apply(1.0), 1.0, "{e:?}");
                assert_eq!(e.apply(-3.0), 0.0, "{e:?}");
                assert_eq!(e.apply(7.0), 1.0, "{e:?}");
            }
        }
    }

    #[test]
    fn cubic_in_out_is_symmetric() {
        let e = Easing::default();
        assert!((e.apply(0.5) - 0.5).abs() < EPS);
        assert!((e.apply(0.25) - 0.0625).abs() < EPS);
        assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < EPS);
    }

    #[test]
    fn progress_scales_elapsed_time() {
        let t = Transition::new(200.0).with_easing(Easing::LINEAR);
        assert_eq!(t.progress(50.0), 0.25);
        assert_eq!(t.progress(400.0), 1.0);
        assert!(!t.is_done(199.0));
        assert!(t.is_done(200.0));
        assert_eq!(Transition::new(0.0).progress(0.0), 1.0);
    }

    #[test]
    fn completion_fires_exactly_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let mut c = Completion::new(move |r| sink.borrow_mut().push(r));
        assert!(c.is_pending());
        assert!(c.fire(CompletionReason::Finished));
        assert!(!c.fire(CompletionReason::Interrupted));
        drop(c);
        assert_eq!(*log.borrow(), [CompletionReason::Finished]);
    }

    #[test]
    fn dropped_completion_reports_an_interruption() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        drop(Completion::new(move |r| sink.borrow_mut().push(r)));
        assert_eq!(*log.borrow(), [CompletionReason::Interrupted]);
    }

    #[test]
    fn sample_interpolates_value_and_delta() {
        let tr = IndicatorTransition {
            transition: Transition::new(100.0).with_easing(Easing::LINEAR),
            from_value: 0.0,
            to_value: 200.0,
            from_delta: 0.0,
            to_delta: 0.1,
            completion: Completion::noop(),
        };
        let (v, d) = tr.sample(25.0);
        assert_eq!(v, 50.0);
        assert!((d - 0.025).abs() < EPS);
    }
}
