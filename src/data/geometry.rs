use serde::{Deserialize, Serialize};

/// A position on the drawing surface, in pixels, relative to its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A position in the signal domain: fractional sample index and amplitude.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SignalPoint {
    pub index: f64,
    pub amplitude: f64,
}

impl SignalPoint {
    pub const fn new(index: f64, amplitude: f64) -> Self {
        Self { index, amplitude }
    }
}

/// Space kept free around the draw box, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 10.0,
            right: 10.0,
            top: 10.0,
            // room for the time tick labels
            bottom: 24.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl PlotRect {
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.h / 2.0
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    pub fn clamp(&self, p: Point) -> Point {
        Point::new(p.x.clamp(self.x, self.right()), p.y.clamp(self.y, self.bottom()))
    }
}

/// Pixel size of the drawing surface plus the margins that delimit the draw box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
}

impl Default for SurfaceGeometry {
    fn default() -> Self {
        Self::new(0.0, 0.0, Margins::default())
    }
}

impl SurfaceGeometry {
    pub fn new(width: f64, height: f64, margins: Margins) -> Self {
        Self { width, height, margins }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// The draw box. Width or height may come out non-positive on a tiny surface.
    pub fn plot_rect(&self) -> PlotRect {
        PlotRect {
            x: self.margins.left,
            y: self.margins.top,
            w: self.width - self.margins.left - self.margins.right,
            h: self.height - self.margins.top - self.margins.bottom,
        }
    }

    pub fn has_area(&self) -> bool {
        let r = self.plot_rect();
        r.w > 0.0 && r.h > 0.0
    }

    /// Whole pixel columns available to the signal polyline.
    pub fn plot_width_px(&self) -> usize {
        self.plot_rect().w.floor().max(0.0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_rect_from_margins() {
        let geo = SurfaceGeometry::new(
            800.0,
            400.0,
            Margins { left: 40.0, right: 10.0, top: 5.0, bottom: 15.0 },
        );
        let r = geo.plot_rect();
        assert_eq!(r.x, 40.0);
        assert_eq!(r.w, 750.0);
        assert_eq!(r.h, 380.0);
        assert_eq!(r.center_y(), 195.0);
        assert_eq!(geo.plot_width_px(), 750);
        assert!(r.contains(Point::new(40.0, 5.0)));
        assert!(!r.contains(Point::new(39.0, 100.0)));
    }

    #[test]
    fn test_tiny_surface_has_no_area() {
        let mut geo = SurfaceGeometry::default();
        assert!(!geo.has_area());
        assert_eq!(geo.plot_width_px(), 0);
        geo.resize(-5.0, 100.0);
        assert_eq!(geo.width, 0.0);
        assert!(!geo.has_area());
    }
}
