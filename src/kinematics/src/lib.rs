pub mod chain;
pub mod config;
pub mod frame_driver;
pub mod segment;
pub mod time_manager;

pub type V2 = nalgebra::Vector2<f32>;
