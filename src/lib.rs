//! Waveform view core: sample storage, the visible-interval model, the
//! signal/screen coordinate transform, input handling and scene building.
//!
//! Nothing in the library touches a window system or an audio device; the
//! `gui` feature builds the desktop program on top of it.

pub mod data;
pub mod error;
pub mod interaction;
pub mod processing;
pub mod rendering;
pub mod settings;

pub use data::{
    FreehandCurve, Margins, Marker, MarkerBound, Point, PlotRect, SampleStore, ScrollRange,
    SignalPoint, SurfaceGeometry, ViewWindow, WindowBounds,
};
pub use error::AudioLoadError;
pub use interaction::{
    GestureState, InteractionController, KeyCommand, Mode, PointerEvent, UpdateSource, ViewUpdate,
};
pub use processing::{CoordinateMapper, DecimationMode, decimate};
pub use rendering::{Primitive, Role, Scene, SceneOptions, build_scene};
pub use settings::Settings;
