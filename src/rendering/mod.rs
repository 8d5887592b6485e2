pub mod scene;
pub mod ticks;

pub use scene::{Primitive, Role, Scene, SceneOptions, build_scene};
pub use ticks::{TimeTick, time_ticks};
