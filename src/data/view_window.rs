/// Width of the interval shown right after a file is loaded, in samples.
pub const DEFAULT_SPAN: f64 = 1200.0;

/// Resolution of the scrollbar track that the window is projected onto.
pub const SCROLL_TRACK: f64 = 1000.0;

/// Narrowest window, so there is always at least one line segment to draw.
const MIN_SPAN: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowBounds {
    pub left: f64,
    pub right: f64,
}

impl WindowBounds {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }
}

/// Position and thumb size of the window on a `[0, SCROLL_TRACK]` track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRange {
    pub start: f64,
    pub size: f64,
}

impl ScrollRange {
    pub const fn new(start: f64, size: f64) -> Self {
        Self { start, size }
    }
}

/// The visible sample interval `[left, right)` over a buffer of
/// `sample_count` samples.
///
/// Every mutation clamps: the window never leaves `[0, sample_count]` and
/// never gets narrower than two samples (or the whole buffer, if shorter).
/// With no samples loaded the window is empty and all mutations are no-ops.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewWindow {
    left: f64,
    right: f64,
    num_samples_displayed: f64,
    magnify_factor: f64,
    hard_left: bool,
    sample_count: usize,
    default_span: f64,
}

impl Default for ViewWindow {
    fn default() -> Self {
        Self::new(0, DEFAULT_SPAN)
    }
}

impl ViewWindow {
    pub fn new(sample_count: usize, default_span: f64) -> Self {
        let mut window = Self {
            left: 0.0,
            right: 0.0,
            num_samples_displayed: 0.0,
            magnify_factor: 1.0,
            hard_left: true,
            sample_count,
            default_span: if default_span.is_finite() { default_span } else { DEFAULT_SPAN },
        };
        window.reset();
        window
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.left
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn bounds(&self) -> WindowBounds {
        WindowBounds { left: self.left, right: self.right }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn num_samples_displayed(&self) -> f64 {
        self.num_samples_displayed
    }

    pub fn magnify_factor(&self) -> f64 {
        self.magnify_factor
    }

    pub fn is_hard_left(&self) -> bool {
        self.hard_left
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn is_empty(&self) -> bool {
        self.sample_count == 0
    }

    pub fn contains(&self, index: f64) -> bool {
        index >= self.left && index <= self.right
    }

    fn total(&self) -> f64 {
        self.sample_count as f64
    }

    fn min_span(&self) -> f64 {
        MIN_SPAN.min(self.total())
    }

    /// Back to `[0, default_span)`, cut to the buffer length.
    pub fn reset(&mut self) {
        let width = self.default_span.max(self.min_span());
        self.place(0.0, width);
        self.num_samples_displayed = self.width();
        self.magnify_factor = 1.0;
    }

    /// Put the window at `left` with `width`, clamping both into range.
    fn place(&mut self, left: f64, width: f64) {
        let total = self.total();
        let width = width.clamp(self.min_span(), total);
        let left = left.clamp(0.0, total - width);
        self.left = left;
        self.right = (left + width).min(total);
        self.hard_left = self.left == 0.0;
    }

    /// Apply a width change and fold the effective ratio into the magnify factor.
    fn rescale(&mut self, old_width: f64) {
        let new_width = self.width();
        if new_width > 0.0 && old_width > 0.0 {
            self.magnify_factor *= old_width / new_width;
        }
        self.num_samples_displayed = new_width;
    }

    /// Shift the window by `delta` samples. Returns true if the bounds moved.
    pub fn pan(&mut self, delta: f64) -> bool {
        if self.is_empty() || !delta.is_finite() {
            return false;
        }
        let before = self.bounds();
        self.place(self.left + delta, self.width());
        self.bounds() != before
    }

    /// Divide the width by `scale` keeping `anchor` at the same relative
    /// position. `scale > 1` shows fewer samples.
    pub fn zoom(&mut self, scale: f64, anchor: f64) -> bool {
        if self.is_empty() || !scale.is_finite() || scale <= 0.0 {
            return false;
        }
        let before = self.bounds();
        let old_width = self.width();
        let anchor = if anchor.is_finite() {
            anchor.clamp(self.left, self.right)
        } else {
            self.left + old_width / 2.0
        };
        let ratio = (anchor - self.left) / old_width;
        let new_width = (old_width / scale).clamp(self.min_span(), self.total());
        self.place(anchor - ratio * new_width, new_width);
        self.rescale(old_width);
        self.bounds() != before
    }

    pub fn zoom_centered(&mut self, scale: f64) -> bool {
        let center = self.left + self.width() / 2.0;
        self.zoom(scale, center)
    }

    /// Move the window to a scrollbar position. The thumb size in `range` is
    /// not used: the window keeps its own width (`num_samples_displayed`).
    pub fn set_from_scroll_position(&mut self, range: ScrollRange) -> bool {
        if self.is_empty() || !range.start.is_finite() {
            return false;
        }
        let before = self.bounds();
        let total = self.total();
        let width = self.num_samples_displayed.clamp(self.min_span(), total);
        let mut left = range.start.clamp(0.0, SCROLL_TRACK) / SCROLL_TRACK * total;
        let mut right = left + width;
        if right > total {
            right = total;
            left = right - width;
        }
        self.place(left, right - left);
        self.bounds() != before
    }

    pub fn to_scroll_position(&self) -> ScrollRange {
        if self.is_empty() {
            return ScrollRange::new(0.0, SCROLL_TRACK);
        }
        let total = self.total();
        ScrollRange {
            start: self.left / total * SCROLL_TRACK,
            size: self.width() / total * SCROLL_TRACK,
        }
    }

    /// Move only the left edge, keeping at least the minimum span.
    pub fn set_left_bound(&mut self, index: f64) -> bool {
        if self.is_empty() || !index.is_finite() {
            return false;
        }
        let before = self.bounds();
        let old_width = self.width();
        let left = index.clamp(0.0, self.right - self.min_span());
        self.place(left, self.right - left);
        self.rescale(old_width);
        self.bounds() != before
    }

    /// Move only the right edge, keeping at least the minimum span.
    pub fn set_right_bound(&mut self, index: f64) -> bool {
        if self.is_empty() || !index.is_finite() {
            return false;
        }
        let before = self.bounds();
        let old_width = self.width();
        let right = index.max(self.left + self.min_span()).min(self.total());
        self.place(self.left, right - self.left);
        self.rescale(old_width);
        self.bounds() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn assert_valid(w: &ViewWindow) {
        assert!(w.left() >= 0.0, "left {} < 0", w.left());
        assert!(w.right() <= w.sample_count() as f64, "right {} > count", w.right());
        assert!(w.left() < w.right(), "degenerate window {:?}", w.bounds());
        assert_eq!(w.is_hard_left(), w.left() == 0.0);
    }

    #[test]
    fn test_initial_window() {
        let w = ViewWindow::new(44100, DEFAULT_SPAN);
        assert_eq!(w.bounds(), WindowBounds { left: 0.0, right: 1200.0 });
        assert_eq!(w.num_samples_displayed(), 1200.0);
        assert_eq!(w.magnify_factor(), 1.0);
        assert!(w.is_hard_left());
    }

    #[test]
    fn test_short_buffer_caps_default_span() {
        let w = ViewWindow::new(500, DEFAULT_SPAN);
        assert_eq!(w.bounds(), WindowBounds { left: 0.0, right: 500.0 });
    }

    #[test]
    fn test_zoom_centered_scenario() {
        let mut w = ViewWindow::new(44100, DEFAULT_SPAN);
        assert!(w.zoom_centered(2.0));
        assert!((w.left() - 300.0).abs() < 1e-9);
        assert!((w.right() - 900.0).abs() < 1e-9);
        assert!((w.magnify_factor() - 2.0).abs() < 1e-12);
        assert!((w.num_samples_displayed() - 600.0).abs() < 1e-9);
        assert!(!w.is_hard_left());
    }

    #[test]
    fn test_pan_scenario_hits_hard_left() {
        let mut w = ViewWindow::new(44100, DEFAULT_SPAN);
        w.pan(1000.0);
        assert_eq!(w.bounds(), WindowBounds { left: 1000.0, right: 2200.0 });
        assert!(!w.is_hard_left());

        assert!(w.pan(-500.0));
        assert_eq!(w.bounds(), WindowBounds { left: 500.0, right: 1700.0 });
        assert!(!w.is_hard_left());

        assert!(w.pan(-500.0));
        assert_eq!(w.bounds(), WindowBounds { left: 0.0, right: 1200.0 });
        assert!(w.is_hard_left());

        // already pinned
        assert!(!w.pan(-10.0));
    }

    #[test]
    fn test_pan_clamps_at_right_end() {
        let mut w = ViewWindow::new(10000, DEFAULT_SPAN);
        w.pan(1e9);
        assert_eq!(w.bounds(), WindowBounds { left: 8800.0, right: 10000.0 });
    }

    #[test]
    fn test_scroll_position_scenario() {
        let mut w = ViewWindow::new(10000, DEFAULT_SPAN);
        assert!(w.set_from_scroll_position(ScrollRange::new(500.0, 200.0)));
        assert_eq!(w.left(), 5000.0);
        assert_eq!(w.right(), 6200.0);
    }

    #[test]
    fn test_scroll_position_clamps_right_end() {
        let mut w = ViewWindow::new(10000, DEFAULT_SPAN);
        w.set_from_scroll_position(ScrollRange::new(950.0, 120.0));
        assert_eq!(w.bounds(), WindowBounds { left: 8800.0, right: 10000.0 });

        w.set_from_scroll_position(ScrollRange::new(0.0, 120.0));
        assert!(w.is_hard_left());
    }

    #[test]
    fn test_scroll_round_trip() {
        let mut rng = rand::rng();
        for _ in 0..500 {
            let count = rng.random_range(2_000..200_000usize);
            let mut w = ViewWindow::new(count, DEFAULT_SPAN);
            w.zoom_centered(rng.random_range(0.05..8.0));
            let size = w.to_scroll_position().size;
            let start = rng.random_range(0.0..=(SCROLL_TRACK - size));

            w.set_from_scroll_position(ScrollRange::new(start, size));
            let back = w.to_scroll_position();
            assert!((back.start - start).abs() < 1e-6, "{} vs {}", back.start, start);
            assert!((back.size - size).abs() < 1e-6);
        }
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut w = ViewWindow::new(44100, DEFAULT_SPAN);
        w.pan(5000.0);
        let anchor = 5300.0;
        let before = (anchor - w.left()) / w.width();
        w.zoom(3.0, anchor);
        let after = (anchor - w.left()) / w.width();
        assert!((before - after).abs() < 1e-9);
        assert!((w.width() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_out_stops_at_full_buffer() {
        let mut w = ViewWindow::new(3000, DEFAULT_SPAN);
        w.zoom_centered(0.01);
        assert_eq!(w.bounds(), WindowBounds { left: 0.0, right: 3000.0 });
        assert!((w.magnify_factor() - 0.4).abs() < 1e-12);
        assert!(!w.zoom_centered(0.5));
    }

    #[test]
    fn test_zoom_in_stops_at_min_span() {
        let mut w = ViewWindow::new(3000, DEFAULT_SPAN);
        w.zoom_centered(1e6);
        assert!((w.width() - 2.0).abs() < 1e-9);
        assert_valid(&w);
    }

    #[test]
    fn test_bad_zoom_factors_are_ignored() {
        let mut w = ViewWindow::new(3000, DEFAULT_SPAN);
        let before = w.clone();
        assert!(!w.zoom_centered(0.0));
        assert!(!w.zoom_centered(-2.0));
        assert!(!w.zoom_centered(f64::NAN));
        assert!(!w.pan(f64::INFINITY));
        assert_eq!(w, before);
    }

    #[test]
    fn test_empty_window_is_inert() {
        let mut w = ViewWindow::default();
        assert!(w.is_empty());
        assert!(!w.pan(10.0));
        assert!(!w.zoom_centered(2.0));
        assert!(!w.set_from_scroll_position(ScrollRange::new(10.0, 10.0)));
        assert!(!w.set_left_bound(3.0));
        assert_eq!(w.to_scroll_position(), ScrollRange::new(0.0, SCROLL_TRACK));
    }

    #[test]
    fn test_set_bounds() {
        let mut w = ViewWindow::new(44100, DEFAULT_SPAN);
        assert!(w.set_left_bound(400.0));
        assert_eq!(w.bounds(), WindowBounds { left: 400.0, right: 1200.0 });
        assert_eq!(w.num_samples_displayed(), 800.0);
        assert!((w.magnify_factor() - 1.5).abs() < 1e-12);

        w.set_right_bound(100.0);
        assert_eq!(w.bounds(), WindowBounds { left: 400.0, right: 402.0 });

        w.set_left_bound(1e9);
        assert_eq!(w.bounds(), WindowBounds { left: 400.0, right: 402.0 });
    }

    #[test]
    fn test_random_mutations_stay_valid() {
        let mut rng = rand::rng();
        let mut w = ViewWindow::new(20_000, DEFAULT_SPAN);
        for _ in 0..5000 {
            match rng.random_range(0..5) {
                0 => {
                    w.pan(rng.random_range(-30_000.0..30_000.0));
                }
                1 => {
                    w.zoom(rng.random_range(0.01..50.0), rng.random_range(-100.0..25_000.0));
                }
                2 => {
                    w.set_from_scroll_position(ScrollRange::new(
                        rng.random_range(-100.0..1100.0),
                        rng.random_range(0.0..1000.0),
                    ));
                }
                3 => {
                    w.set_left_bound(rng.random_range(-100.0..25_000.0));
                }
                _ => {
                    w.set_right_bound(rng.random_range(-100.0..25_000.0));
                }
            }
            assert_valid(&w);
        }
    }
}
