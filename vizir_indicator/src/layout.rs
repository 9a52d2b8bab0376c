// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Figure, plot area and domain rectangles.

use kurbo::Rect;

/// Figure margins around the plot area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
    /// Left margin.
    pub l: f64,
    /// Right margin.
    pub r: f64,
    /// Top margin.
    pub t: f64,
    /// Bottom margin.
    pub b: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            l: 80.0,
            r: 80.0,
            t: 100.0,
            b: 80.0,
        }
    }
}

/// The plot area of a figure: margins plus the inner size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotSize {
    /// Left margin.
    pub l: f64,
    /// Right margin.
    pub r: f64,
    /// Top margin.
    pub t: f64,
    /// Bottom margin.
    pub b: f64,
    /// Inner width.
    pub w: f64,
    /// Inner height.
    pub h: f64,
}

impl PlotSize {
    /// Computes the plot area of a `width × height` figure.
    ///
    /// Margins wider than the figure leave an empty plot area.
    pub fn from_figure(width: f64, height: f64, margin: Margin) -> Self {
        Self {
            l: margin.l,
            r: margin.r,
            t: margin.t,
            b: margin.b,
            w: (width - margin.l - margin.r).max(0.0),
            h: (height - margin.t - margin.b).max(0.0),
        }
    }
}

/// A fractional region of the plot area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    /// Horizontal extent, `0` at the left edge.
    pub x: (f64, f64),
    /// Vertical extent, `0` at the bottom edge.
    pub y: (f64, f64),
}

impl Domain {
    /// The whole plot area.
    pub const FULL: Self = Self {
        x: (0.0, 1.0),
        y: (0.0, 1.0),
    };

    /// Creates a domain.
    pub fn new(x: (f64, f64), y: (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::FULL
    }
}

/// Pixel rectangle allotted to one indicator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DomainRect {
    /// Left edge.
    pub left: f64,
    /// Right edge.
    pub right: f64,
    /// Top edge.
    pub top: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Width, never negative.
    pub width: f64,
    /// Height, never negative.
    pub height: f64,
}

impl DomainRect {
    /// Resolves `domain` against `plot`.
    pub fn new(domain: Domain, plot: PlotSize) -> Self {
        let width = (plot.w * (domain.x.1 - domain.x.0)).max(0.0);
        let height = (plot.h * (domain.y.1 - domain.y.0)).max(0.0);
        let left = plot.l + plot.w * domain.x.0;
        let top = plot.t + plot.h * (1.0 - domain.y.1);
        Self {
            left,
            right: left + width,
            top,
            bottom: top + height,
            width,
            height,
        }
    }

    /// Horizontal center.
    pub fn center_x(&self) -> f64 {
        self.left + 0.5 * self.width
    }

    /// Vertical center.
    pub fn center_y(&self) -> f64 {
        self.top + 0.5 * self.height
    }

    /// The rectangle as a [`Rect`].
    pub fn rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.right, self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_margins_leave_a_240_by_220_plot() {
        let p = PlotSize::from_figure(400.0, 400.0, Margin::default());
        assert_eq!((p.w, p.h), (240.0, 220.0));
        let p = PlotSize::from_figure(100.0, 100.0, Margin::default());
        assert_eq!((p.w, p.h), (0.0, 0.0));
    }

    #[test]
    fn domain_maps_with_y_up() {
        let plot = PlotSize::from_figure(400.0, 400.0, Margin::default());
        let d = DomainRect::new(Domain::new((0.5, 1.0), (0.5, 1.0)), plot);
        assert_eq!(d.left, 200.0);
        assert_eq!(d.top, 100.0);
        assert_eq!(d.width, 120.0);
        assert_eq!(d.height, 110.0);
        assert_eq!(d.right, 320.0);
        assert_eq!(d.bottom, 210.0);
        assert_eq!(d.rect(), Rect::new(200.0, 100.0, 320.0, 210.0));
    }

    #[test]
    fn inverted_domain_has_no_extent() {
        let plot = PlotSize::from_figure(400.0, 400.0, Margin::default());
        let d = DomainRect::new(Domain::new((0.8, 0.2), (0.0, 1.0)), plot);
        assert_eq!(d.width, 0.0);
        assert_eq!(d.right, d.left);
    }
}
