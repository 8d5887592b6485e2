use super::geometry::{Point, SignalPoint};

/// A curve sketched by hand in draw mode, in screen coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FreehandCurve {
    points: Vec<Point>,
}

impl FreehandCurve {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the previous stroke and start a new one at `p`.
    pub fn begin(&mut self, p: Point) {
        self.points.clear();
        self.points.push(p);
    }

    pub fn extend_to(&mut self, p: Point) {
        // pointer jitter can report the same position twice
        if self.points.last() != Some(&p) {
            self.points.push(p);
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Which edge of the view window a marker moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerBound {
    Left,
    Right,
}

/// A point picked by double-click, stored in signal coordinates so it stays
/// attached to the waveform while the view moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub at: SignalPoint,
    pub bound: MarkerBound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stroke_replaces_old_one() {
        let mut curve = FreehandCurve::new();
        curve.begin(Point::new(1.0, 1.0));
        curve.extend_to(Point::new(2.0, 3.0));
        curve.extend_to(Point::new(2.0, 3.0));
        assert_eq!(curve.len(), 2);

        curve.begin(Point::new(9.0, 9.0));
        assert_eq!(curve.points(), &[Point::new(9.0, 9.0)]);
    }
}
