pub mod error;
pub mod shader;
pub mod vertex;
pub mod vkrender;
pub mod vkstatic;
pub mod vkwrapper;

pub use error::InitError;
pub use vkrender::VkRender;
