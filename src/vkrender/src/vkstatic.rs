use vulkano::instance::{Instance, InstanceCreateInfo};
use vulkano::sync::{self, GpuFuture};
use vulkano_win::VkSurfaceBuild;
use winit::dpi::{LogicalSize, Size};
use winit::event_loop::EventLoopWindowTarget;
use winit::window::{Window, WindowBuilder};

use crate::error::InitError;
use crate::vkwrapper::*;

// vertices per buffer before the first grow, 32 segments
pub const INITIAL_CAPACITY: usize = 64;

/// GPU handles that live as long as the window.
pub struct VkStatic {
	pub device: VkwDevice,
	pub queue: VkwQueue,
	pub surface: VkwSurface<Window>,
	pub swapchain: VkwSwapchain<Window>,
	pub framebuffers: Vec<VkwFramebuffer>,
	pub pipeline: VkwPipeline,
	pub render_pass: VkwRenderPass,
	// one per swapchain image
	pub vertex_buffers: Vec<VkwVertexBuffer>,
	pub previous_frame_end: Option<VkwFuture>,
}

fn winit_size(size: [u32; 2]) -> Size {
	Size::new(LogicalSize::new(size[0], size[1]))
}

impl VkStatic {
	pub fn new<E>(
		el: &EventLoopWindowTarget<E>,
		window_size: [u32; 2],
		title: &str,
	) -> Result<Self, InitError> {
		let instance = Instance::new(InstanceCreateInfo {
			enabled_extensions: vulkano_win::required_extensions(),
			..Default::default()
		})?;
		let surface = WindowBuilder::new()
			.with_inner_size(winit_size(window_size))
			.with_title(title)
			.build_vk_surface(el, instance.clone())?;

		let (physical_device, device, queue) =
			get_device_and_queue(&instance, surface.clone())?;

		let (swapchain, images) = get_swapchain_and_images(
			physical_device,
			device.clone(),
			surface.clone(),
		)?;

		let render_pass = get_render_pass(device.clone(), swapchain.clone())?;
		let pipeline = get_pipeline(render_pass.clone(), device.clone())?;
		let framebuffers =
			window_size_dependent_setup(render_pass.clone(), &images)?;
		let vertex_buffers = images
			.iter()
			.map(|_| get_vertex_buffer(device.clone(), INITIAL_CAPACITY))
			.collect::<Result<Vec<_>, _>>()?;
		log::debug!(
			"{} swapchain images, {:?}",
			images.len(),
			swapchain.image_format(),
		);

		let previous_frame_end = Some(sync::now(device.clone()).boxed());
		Ok(Self {
			device,
			queue,
			surface,
			swapchain,
			framebuffers,
			pipeline,
			render_pass,
			vertex_buffers,
			previous_frame_end,
		})
	}
}
