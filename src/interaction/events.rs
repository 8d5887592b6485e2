use crate::data::{Point, ScrollRange, WindowBounds};

/// Pointer input, in graph-widget pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Drag(Point),
    Up(Point),
    DoubleClick(Point),
    /// Vertical wheel; positive `notches` zoom in.
    Wheel { at: Point, notches: f64 },
    /// Horizontal scroll (or shift+wheel); positive `notches` move right.
    Scroll { notches: f64 },
    /// Trackpad pinch; `scale > 1` zooms in.
    Magnify { at: Point, scale: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    ZoomIn,
    ZoomOut,
    PanLeft,
    PanRight,
    AmplitudeUp,
    AmplitudeDown,
    ResetView,
    ToggleMode,
}

/// What caused a change to the view window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateSource {
    Load,
    Pointer,
    Keyboard,
    Scrollbar,
}

/// Sent to every subscriber after the window bounds change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewUpdate {
    pub bounds: WindowBounds,
    /// New scrollbar placement, or `None` when the scrollbar itself made the
    /// change and must not be pushed back.
    pub scroll: Option<ScrollRange>,
    pub hard_left: bool,
    pub source: UpdateSource,
}
