// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart frame layout: an outer size, margins, and the plot rectangle.

use kurbo::Rect;

/// A width/height pair in chart coordinate units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    /// Width in chart coordinate units.
    pub width: f64,
    /// Height in chart coordinate units.
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: 720.0,
            height: 440.0,
        }
    }
}

/// Per-side margins reserved around the plot rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    /// Space above the plot.
    pub top: f64,
    /// Space right of the plot.
    pub right: f64,
    /// Space below the plot (axis labels).
    pub bottom: f64,
    /// Space left of the plot (tick labels).
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 40.0,
            left: 60.0,
        }
    }
}

impl Margins {
    /// Widens the right margin to hold a legend column.
    pub fn with_legend(mut self, legend_width: f64) -> Self {
        self.right += legend_width.max(0.0);
        self
    }
}

/// The outer chart bounds plus margins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Outer chart size.
    pub size: Size,
    /// Margins around the plot rectangle.
    pub margins: Margins,
}

impl Frame {
    /// Creates a frame with default margins.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            margins: Margins::default(),
        }
    }

    /// Creates a frame reserving a legend column on the right.
    pub fn with_legend(size: Size, legend_width: f64) -> Self {
        Self {
            size,
            margins: Margins::default().with_legend(legend_width),
        }
    }

    /// The plot rectangle: the outer size inset by the margins.
    ///
    /// Margins larger than the size collapse the plot to a point rather
    /// than producing a negative rectangle.
    pub fn plot(&self) -> Rect {
        let x0 = self.margins.left.min(self.size.width);
        let y0 = self.margins.top.min(self.size.height);
        let x1 = (self.size.width - self.margins.right).max(x0);
        let y1 = (self.size.height - self.margins.bottom).max(y0);
        Rect::new(x0, y0, x1, y1)
    }

    /// The legend rectangle on the right, `width` wide, aligned with the
    /// plot top.
    pub fn legend_area(&self, width: f64) -> Rect {
        let plot = self.plot();
        Rect::new(plot.x1 + 10.0, plot.y0, plot.x1 + 10.0 + width, plot.y1)
    }
}
