use crate::data::{PlotRect, Point, SignalPoint, SurfaceGeometry, ViewWindow, WindowBounds};

/// Affine transform between signal space (sample index, amplitude) and the
/// pixels of the draw box.
///
/// Horizontally the window `[left, right)` is stretched over the box width.
/// Vertically amplitude `[-1, 1]` fills the box height around its center,
/// multiplied by `amplitude_scale`. The mapper copies what it needs out of
/// the window and geometry and holds nothing else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    bounds: WindowBounds,
    plot: PlotRect,
    amplitude_scale: f64,
}

impl CoordinateMapper {
    /// `None` when nothing is loaded, the window has no width, the draw box
    /// has no area, or the amplitude scale is not a positive number.
    pub fn new(window: &ViewWindow, geometry: &SurfaceGeometry, amplitude_scale: f64) -> Option<Self> {
        if window.is_empty() || window.width() <= 0.0 || !geometry.has_area() {
            return None;
        }
        if !amplitude_scale.is_finite() || amplitude_scale <= 0.0 {
            return None;
        }
        Some(Self {
            bounds: window.bounds(),
            plot: geometry.plot_rect(),
            amplitude_scale,
        })
    }

    pub fn plot_rect(&self) -> PlotRect {
        self.plot
    }

    pub fn bounds(&self) -> WindowBounds {
        self.bounds
    }

    #[inline]
    fn half_height(&self) -> f64 {
        self.plot.h / 2.0 * self.amplitude_scale
    }

    #[inline]
    pub fn index_to_x(&self, index: f64) -> f64 {
        self.plot.x + (index - self.bounds.left) / self.bounds.width() * self.plot.w
    }

    #[inline]
    pub fn x_to_index(&self, x: f64) -> f64 {
        self.bounds.left + (x - self.plot.x) / self.plot.w * self.bounds.width()
    }

    #[inline]
    pub fn amplitude_to_y(&self, amplitude: f64) -> f64 {
        self.plot.center_y() - amplitude * self.half_height()
    }

    #[inline]
    pub fn y_to_amplitude(&self, y: f64) -> f64 {
        (self.plot.center_y() - y) / self.half_height()
    }

    pub fn signal_to_screen(&self, p: SignalPoint) -> Point {
        Point::new(self.index_to_x(p.index), self.amplitude_to_y(p.amplitude))
    }

    pub fn screen_to_signal(&self, q: Point) -> SignalPoint {
        SignalPoint::new(self.x_to_index(q.x), self.y_to_amplitude(q.y))
    }

    /// How many samples a horizontal pointer movement of `dx` pixels covers.
    pub fn sample_delta_for_pixels(&self, dx: f64) -> f64 {
        dx / self.plot.w * self.bounds.width()
    }

    pub fn contains(&self, q: Point) -> bool {
        self.plot.contains(q)
    }
}
