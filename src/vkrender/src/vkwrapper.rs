use std::sync::Arc;
use vulkano::buffer::{BufferUsage, CpuAccessibleBuffer};
use vulkano::device::physical::{PhysicalDevice, PhysicalDeviceType};
use vulkano::device::{
	Device, DeviceCreateInfo, DeviceExtensions, Queue, QueueCreateInfo,
};
use vulkano::image::view::ImageView;
use vulkano::image::{ImageUsage, SwapchainImage};
use vulkano::instance::Instance;
use vulkano::memory::DeviceMemoryAllocationError;
use vulkano::pipeline::graphics::input_assembly::{
	InputAssemblyState, PrimitiveTopology,
};
use vulkano::pipeline::graphics::vertex_input::BuffersDefinition;
use vulkano::pipeline::graphics::viewport::ViewportState;
use vulkano::pipeline::GraphicsPipeline;
use vulkano::render_pass::{
	Framebuffer, FramebufferCreateInfo, RenderPass, Subpass,
};
use vulkano::swapchain::{Surface, Swapchain, SwapchainCreateInfo};
use vulkano::sync::GpuFuture;
use winit::window::Window;

use crate::error::InitError;
use crate::shader;
use crate::vertex::LineVertex;

pub type VkwDevice = Arc<Device>;
pub type VkwFramebuffer = Arc<Framebuffer>;
pub type VkwFuture = Box<dyn GpuFuture>;
pub type VkwImages = Vec<Arc<SwapchainImage<Window>>>;
pub type VkwInstance = Arc<Instance>;
pub type VkwPipeline = Arc<GraphicsPipeline>;
pub type VkwQueue = Arc<Queue>;
pub type VkwRenderPass = Arc<RenderPass>;
pub type VkwSurface<W> = Arc<Surface<W>>;
pub type VkwSwapchain<W> = Arc<Swapchain<W>>;
pub type VkwVertexBuffer = Arc<CpuAccessibleBuffer<[LineVertex]>>;

pub fn get_device_and_queue<W>(
	instance: &VkwInstance,
	surface: VkwSurface<W>,
) -> Result<(PhysicalDevice, VkwDevice, VkwQueue), InitError> {
	let device_extensions = DeviceExtensions {
		khr_swapchain: true,
		..DeviceExtensions::none()
	};
	let (physical_device, queue_family) = PhysicalDevice::enumerate(instance)
		.filter(|&p| {
			p.supported_extensions().is_superset_of(&device_extensions)
		})
		.filter_map(|p| {
			p.queue_families()
				.find(|&q| {
					q.supports_graphics()
						&& q.supports_surface(&surface).unwrap_or(false)
				})
				.map(|q| (p, q))
		})
		.min_by_key(|(p, _)| match p.properties().device_type {
			PhysicalDeviceType::DiscreteGpu => 0,
			PhysicalDeviceType::IntegratedGpu => 1,
			PhysicalDeviceType::VirtualGpu => 2,
			PhysicalDeviceType::Cpu => 3,
			PhysicalDeviceType::Other => 4,
		})
		.ok_or(InitError::NoDevice)?;

	log::info!(
		"using device: {} (type: {:?})",
		physical_device.properties().device_name,
		physical_device.properties().device_type,
	);

	let (device, mut queues) = Device::new(
		physical_device,
		DeviceCreateInfo {
			enabled_extensions: physical_device
				.required_extensions()
				.union(&device_extensions),
			queue_create_infos: vec![QueueCreateInfo::family(queue_family)],
			..Default::default()
		},
	)?;

	let queue = queues.next().ok_or(InitError::NoQueue)?;

	Ok((physical_device, device, queue))
}

pub fn get_swapchain_and_images(
	physical_device: PhysicalDevice,
	device: VkwDevice,
	surface: VkwSurface<Window>,
) -> Result<(VkwSwapchain<Window>, VkwImages), InitError> {
	let caps = physical_device
		.surface_capabilities(&surface, Default::default())
		.map_err(|e| InitError::Surface(format!("{:?}", e)))?;
	let composite_alpha = caps
		.supported_composite_alpha
		.iter()
		.next()
		.ok_or(InitError::Unsupported("composite alpha mode"))?;
	let format = physical_device
		.surface_formats(&surface, Default::default())
		.map_err(|e| InitError::Surface(format!("{:?}", e)))?
		.first()
		.map(|(format, _)| *format)
		.ok_or(InitError::Unsupported("image format"))?;
	let dimensions: [u32; 2] = surface.window().inner_size().into();

	let result = Swapchain::new(
		device,
		surface,
		SwapchainCreateInfo {
			min_image_count: caps.min_image_count,
			image_format: Some(format),
			image_extent: dimensions,
			image_usage: ImageUsage::color_attachment(),
			composite_alpha,
			..Default::default()
		},
	)?;
	Ok(result)
}

pub fn get_render_pass<W>(
	device: VkwDevice,
	swapchain: VkwSwapchain<W>,
) -> Result<VkwRenderPass, InitError> {
	let render_pass = vulkano::single_pass_renderpass!(
		device,
		attachments: {
			color: {
				load: Clear,
				store: Store,
				format: swapchain.image_format(),
				samples: 1,
			}
		},
		pass: {
			color: [color],
			depth_stencil: {}
		}
	)?;
	Ok(render_pass)
}

pub fn get_pipeline(
	render_pass: VkwRenderPass,
	device: VkwDevice,
) -> Result<VkwPipeline, InitError> {
	let vs = shader::vs::load(device.clone())?;
	let fs = shader::fs::load(device.clone())?;
	let pipeline = GraphicsPipeline::start()
		.vertex_input_state(BuffersDefinition::new().vertex::<LineVertex>())
		.vertex_shader(
			vs.entry_point("main").ok_or(InitError::EntryPoint("main"))?,
			(),
		)
		.input_assembly_state(
			InputAssemblyState::new().topology(PrimitiveTopology::LineList),
		)
		.viewport_state(ViewportState::viewport_dynamic_scissor_irrelevant())
		.fragment_shader(
			fs.entry_point("main").ok_or(InitError::EntryPoint("main"))?,
			(),
		)
		.render_pass(
			Subpass::from(render_pass, 0).ok_or(InitError::Subpass(0))?,
		)
		.build(device)?;
	Ok(pipeline)
}

/// Host-visible vertex buffer holding `capacity` vertices.
pub fn get_vertex_buffer(
	device: VkwDevice,
	capacity: usize,
) -> Result<VkwVertexBuffer, DeviceMemoryAllocationError> {
	CpuAccessibleBuffer::from_iter(
		device,
		BufferUsage::vertex_buffer(),
		false,
		(0..capacity).map(|_| LineVertex::default()),
	)
}

pub fn window_size_dependent_setup(
	render_pass: VkwRenderPass,
	images: &VkwImages,
) -> Result<Vec<VkwFramebuffer>, InitError> {
	images
		.iter()
		.map(|image| -> Result<VkwFramebuffer, InitError> {
			let view = ImageView::new_default(image.clone())?;
			let framebuffer = Framebuffer::new(
				render_pass.clone(),
				FramebufferCreateInfo {
					attachments: vec![view],
					..Default::default()
				},
			)?;
			Ok(framebuffer)
		})
		.collect()
}
