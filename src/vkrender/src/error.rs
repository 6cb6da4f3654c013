use vulkano::device::DeviceCreationError;
use vulkano::image::view::ImageViewCreationError;
use vulkano::instance::InstanceCreationError;
use vulkano::pipeline::graphics::GraphicsPipelineCreationError;
use vulkano::render_pass::{FramebufferCreationError, RenderPassCreationError};
use vulkano::shader::ShaderCreationError;
use vulkano::swapchain::SwapchainCreationError;

/// Setup failures. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
	#[error("failed to create vulkan instance: {0}")]
	Instance(#[from] InstanceCreationError),
	#[error("failed to create window surface: {0}")]
	Window(#[from] vulkano_win::CreationError),
	#[error("no physical device can draw to this window")]
	NoDevice,
	#[error("failed to create logical device: {0}")]
	Device(#[from] DeviceCreationError),
	#[error("device returned no queue")]
	NoQueue,
	#[error("failed to query surface: {0}")]
	Surface(String),
	#[error("surface reports no {0}")]
	Unsupported(&'static str),
	#[error("failed to create swapchain: {0}")]
	Swapchain(#[from] SwapchainCreationError),
	#[error("failed to create render pass: {0}")]
	RenderPass(#[from] RenderPassCreationError),
	#[error("failed to load shader: {0}")]
	Shader(#[from] ShaderCreationError),
	#[error("shader has no entry point `{0}`")]
	EntryPoint(&'static str),
	#[error("render pass has no subpass {0}")]
	Subpass(u32),
	#[error("failed to create pipeline: {0}")]
	Pipeline(#[from] GraphicsPipelineCreationError),
	#[error("failed to create image view: {0}")]
	ImageView(#[from] ImageViewCreationError),
	#[error("failed to create framebuffer: {0}")]
	Framebuffer(#[from] FramebufferCreationError),
	#[error("failed to allocate vertex buffer: {0}")]
	Buffer(#[from] vulkano::memory::DeviceMemoryAllocationError),
}
