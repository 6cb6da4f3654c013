pub mod line_sink;
pub mod pr_model;

pub use line_sink::LineSink;
pub use pr_model::{PrModel, PrSegment};
