use std::error::Error;

use vulkano::buffer::TypedBufferAccess;
use vulkano::command_buffer::{
	AutoCommandBufferBuilder, CommandBufferUsage, PrimaryAutoCommandBuffer,
	SubpassContents,
};
use vulkano::image::ImageAccess;
use vulkano::pipeline::graphics::viewport::Viewport;
use vulkano::swapchain::{
	self, AcquireError, SwapchainCreateInfo, SwapchainCreationError,
};
use vulkano::sync::{self, FlushError, GpuFuture};
use winit::event_loop::EventLoopWindowTarget;

use crate::error::InitError;
use crate::vertex::LineVertex;
use crate::vkstatic::{VkStatic, INITIAL_CAPACITY};
use crate::vkwrapper::{
	get_vertex_buffer, window_size_dependent_setup, VkwVertexBuffer,
};
use protocol::line_sink::LineSink;
use protocol::pr_model::PrSegment;

pub struct VkRender {
	recreate_swapchain: bool,
	viewport: Viewport,
	// None once shut down
	v: Option<VkStatic>,
	vertices: Vec<LineVertex>,
	frame_len: usize,
}

impl VkRender {
	pub fn new<E>(
		el: &EventLoopWindowTarget<E>,
		window_size: [u32; 2],
		title: &str,
	) -> Result<Self, InitError> {
		let v = VkStatic::new(el, window_size, title)?;
		let dimensions: [u32; 2] = v.surface.window().inner_size().into();
		let viewport = Viewport {
			origin: [0.0, 0.0],
			dimensions: [dimensions[0] as f32, dimensions[1] as f32],
			depth_range: 0.0..1.0,
		};
		Ok(Self {
			recreate_swapchain: false,
			viewport,
			v: Some(v),
			vertices: Vec::new(),
			frame_len: 0,
		})
	}

	fn create_swapchain(&mut self) {
		let v = match self.v.as_mut() {
			Some(v) => v,
			None => return,
		};
		let dimensions: [u32; 2] = v.surface.window().inner_size().into();
		if dimensions[0] == 0 || dimensions[1] == 0 {
			// minimized, try again next frame
			return;
		}
		log::warn!("recreate swapchain {:?}", dimensions);
		let (new_swapchain, new_images) =
			match v.swapchain.recreate(SwapchainCreateInfo {
				image_extent: dimensions,
				..v.swapchain.create_info()
			}) {
				Ok(r) => r,
				Err(SwapchainCreationError::ImageExtentNotSupported { .. }) => {
					return;
				}
				Err(e) => {
					log::error!("failed to recreate swapchain: {}", e);
					return;
				}
			};
		let framebuffers =
			match window_size_dependent_setup(v.render_pass.clone(), &new_images) {
				Ok(framebuffers) => framebuffers,
				Err(e) => {
					log::error!("{}", e);
					return;
				}
			};
		let capacity = v
			.vertex_buffers
			.first()
			.map_or(INITIAL_CAPACITY, |buffer| buffer.len() as usize);
		let device = v.device.clone();
		let vertex_buffers = match resize_slots(
			&v.vertex_buffers,
			new_images.len(),
			|| get_vertex_buffer(device.clone(), capacity),
		) {
			Ok(vertex_buffers) => vertex_buffers,
			Err(e) => {
				log::error!("{}", e);
				return;
			}
		};
		// commit only once every per-image resource exists
		v.swapchain = new_swapchain;
		v.framebuffers = framebuffers;
		v.vertex_buffers = vertex_buffers;

		let dimensions = new_images[0].dimensions().width_height();
		self.viewport.dimensions = [dimensions[0] as f32, dimensions[1] as f32];
		self.recreate_swapchain = false;
	}

	fn render(&mut self, vertex_count: usize) {
		if let Some(v) = self.v.as_mut() {
			if let Some(future) = v.previous_frame_end.as_mut() {
				future.cleanup_finished();
			}
		}
		if self.recreate_swapchain {
			self.create_swapchain();
		}
		let v = match self.v.as_mut() {
			Some(v) => v,
			None => return,
		};

		let (image_num, suboptimal, acquire_future) =
			match swapchain::acquire_next_image(v.swapchain.clone(), None) {
				Ok(r) => r,
				Err(AcquireError::OutOfDate) => {
					self.recreate_swapchain = true;
					return;
				}
				Err(e) => {
					log::error!("failed to acquire next image: {}", e);
					return;
				}
			};
		if suboptimal {
			self.recreate_swapchain = true;
		}

		let vertices = &self.vertices[..vertex_count];
		let vertex_buffer =
			match fill_vertex_buffer(v, image_num, vertices) {
				Ok(buffer) => buffer,
				Err(e) => {
					log::error!("skip frame: {}", e);
					return;
				}
			};
		let command_buffer = match build_command(
			v,
			image_num,
			&self.viewport,
			vertex_buffer,
			vertex_count as u32,
		) {
			Ok(command_buffer) => command_buffer,
			Err(e) => {
				log::error!("skip frame: {}", e);
				return;
			}
		};

		let previous = v
			.previous_frame_end
			.take()
			.unwrap_or_else(|| sync::now(v.device.clone()).boxed());
		let future = match previous
			.join(acquire_future)
			.then_execute(v.queue.clone(), command_buffer)
		{
			Ok(future) => future,
			Err(e) => {
				log::error!("failed to execute command buffer: {}", e);
				v.previous_frame_end = Some(sync::now(v.device.clone()).boxed());
				return;
			}
		};
		let future = future
			.then_swapchain_present(v.queue.clone(), v.swapchain.clone(), image_num)
			.then_signal_fence_and_flush();

		match future {
			Ok(future) => {
				v.previous_frame_end = Some(future.boxed());
			}
			Err(FlushError::OutOfDate) => {
				self.recreate_swapchain = true;
				v.previous_frame_end = Some(sync::now(v.device.clone()).boxed());
			}
			Err(e) => {
				log::error!("failed to flush future: {}", e);
				v.previous_frame_end = Some(sync::now(v.device.clone()).boxed());
			}
		}
	}
}

/// Returns `slots` resized to `count`, allocating the missing tail with
/// `alloc`. `slots` is left untouched when an allocation fails.
fn resize_slots<T: Clone, E>(
	slots: &[T],
	count: usize,
	mut alloc: impl FnMut() -> Result<T, E>,
) -> Result<Vec<T>, E> {
	let mut resized: Vec<T> = slots.iter().take(count).cloned().collect();
	while resized.len() < count {
		resized.push(alloc()?);
	}
	Ok(resized)
}

/// Writes `vertices` into the buffer of swapchain image `image_num`,
/// replacing it only if it is too small or still in use by the GPU.
fn fill_vertex_buffer(
	v: &mut VkStatic,
	image_num: usize,
	vertices: &[LineVertex],
) -> Result<VkwVertexBuffer, Box<dyn Error>> {
	let slot = v
		.vertex_buffers
		.get_mut(image_num)
		.ok_or_else(|| format!("no vertex buffer for image {}", image_num))?;
	if (slot.len() as usize) < vertices.len() {
		let capacity = vertices.len().next_power_of_two();
		log::debug!("grow vertex buffer {} to {}", image_num, capacity);
		*slot = get_vertex_buffer(v.device.clone(), capacity)?;
	}
	let written = match slot.write() {
		Ok(mut content) => {
			content[..vertices.len()].copy_from_slice(vertices);
			true
		}
		Err(e) => {
			log::warn!("vertex buffer {} busy: {}", image_num, e);
			false
		}
	};
	if !written {
		let capacity = slot.len() as usize;
		*slot = get_vertex_buffer(v.device.clone(), capacity)?;
		slot.write()?[..vertices.len()].copy_from_slice(vertices);
	}
	Ok(slot.clone())
}

fn build_command(
	v: &VkStatic,
	image_num: usize,
	viewport: &Viewport,
	vertex_buffer: VkwVertexBuffer,
	vertex_count: u32,
) -> Result<PrimaryAutoCommandBuffer, Box<dyn Error>> {
	let mut builder = AutoCommandBufferBuilder::primary(
		v.device.clone(),
		v.queue.family(),
		CommandBufferUsage::OneTimeSubmit,
	)?;

	let clear_values = vec![[0.0, 0.0, 0.0, 1.0].into()];
	builder
		.begin_render_pass(
			v.framebuffers[image_num].clone(),
			SubpassContents::Inline,
			clear_values,
		)?
		.set_viewport(0, [viewport.clone()])
		.bind_pipeline_graphics(v.pipeline.clone())
		.bind_vertex_buffers(0, vertex_buffer)
		.draw(vertex_count, 1, 0, 0)?
		.end_render_pass()?;
	Ok(builder.build()?)
}

impl LineSink for VkRender {
	fn upload(&mut self, index: usize, segment: &PrSegment) {
		let base = index * 2;
		if self.vertices.len() < base + 2 {
			self.vertices.resize(base + 2, LineVertex::default());
		}
		self.vertices[base..base + 2].copy_from_slice(&LineVertex::pair(segment));
		self.frame_len = self.frame_len.max(base + 2);
	}

	fn draw_line_list(&mut self) {
		let vertex_count = std::mem::take(&mut self.frame_len);
		self.render(vertex_count);
	}

	fn resize(&mut self, size: [u32; 2]) {
		log::debug!("resize {:?}", size);
		self.recreate_swapchain = true;
	}

	fn shutdown(&mut self) {
		let mut v = match self.v.take() {
			Some(v) => v,
			None => return,
		};
		if let Some(future) = v.previous_frame_end.take() {
			let waited = future
				.then_signal_fence_and_flush()
				.and_then(|fence| fence.wait(None));
			if let Err(e) = waited {
				log::error!("failed to wait for last frame: {}", e);
			}
		}
		log::info!("renderer shut down");
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resize_slots_grows_with_fresh_allocations() {
		let mut next = 10;
		let resized = resize_slots(&[1, 2], 4, || -> Result<i32, ()> {
			next += 1;
			Ok(next)
		});
		assert_eq!(resized, Ok(vec![1, 2, 11, 12]));
	}

	#[test]
	fn resize_slots_shrinks_without_allocating() {
		let resized = resize_slots(&[1, 2, 3], 2, || -> Result<i32, ()> {
			panic!("no allocation expected")
		});
		assert_eq!(resized, Ok(vec![1, 2]));
	}

	#[test]
	fn failed_allocation_keeps_old_slots() {
		let slots = vec![1, 2];
		let mut calls = 0;
		let resized = resize_slots(&slots, 3, || {
			calls += 1;
			Err("out of device memory")
		});
		assert_eq!(resized, Err("out of device memory"));
		assert_eq!(calls, 1);
		assert_eq!(slots, vec![1, 2]);
	}
}
