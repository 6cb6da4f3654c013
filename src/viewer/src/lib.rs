pub mod config;
pub mod viewer;

pub use config::ViewerConfig;
pub use viewer::Viewer;
