pub mod freehand;
pub mod geometry;
pub mod sample_store;
pub mod view_window;

pub use freehand::{FreehandCurve, Marker, MarkerBound};
pub use geometry::{Margins, PlotRect, Point, SignalPoint, SurfaceGeometry};
pub use sample_store::SampleStore;
pub use view_window::{DEFAULT_SPAN, SCROLL_TRACK, ScrollRange, ViewWindow, WindowBounds};
