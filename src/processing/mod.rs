pub mod coordinate_mapper;
pub mod decimation;

pub use coordinate_mapper::CoordinateMapper;
pub use decimation::{DecimationMode, decimate, stride_for, visible_indices};
