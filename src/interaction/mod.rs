pub mod controller;
pub mod events;

pub use controller::{GestureState, InteractionController, Mode, ViewListener};
pub use events::{KeyCommand, PointerEvent, UpdateSource, ViewUpdate};
