use std::time::{Duration, Instant};

use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};

use crate::config::ViewerConfig;
use kinematics::chain::Chain;
use kinematics::frame_driver::FrameDriver;
use kinematics::time_manager::{SystemClock, TimeManager};
use protocol::line_sink::LineSink;
use vkrender::error::InitError;
use vkrender::vkrender::VkRender;

pub struct Viewer {
	event_loop: EventLoop<()>,
	vkr: VkRender,
	driver: FrameDriver<SystemClock>,
	stats_interval: Duration,
}

impl Viewer {
	pub fn new(config: ViewerConfig) -> Result<Self, InitError> {
		let event_loop = EventLoop::new();
		let vkr = VkRender::new(&event_loop, config.window_size, &config.title)?;
		let chain = Chain::from_templates(config.templates, config.sim);
		let time = TimeManager::new(SystemClock::default(), config.time_model);
		let driver = FrameDriver::new(chain, time);
		log::info!(
			"{} segments in a {}x{} window",
			driver.chain().len(),
			config.window_size[0],
			config.window_size[1],
		);
		Ok(Self {
			event_loop,
			vkr,
			driver,
			stats_interval: config.stats_interval,
		})
	}

	/// Runs until the window is closed. Every pass of the event loop
	/// advances one frame; presentation blocks on vsync.
	pub fn run(self) -> ! {
		let Self {
			event_loop,
			mut vkr,
			mut driver,
			stats_interval,
		} = self;
		let mut last_report = Instant::now();
		let mut last_frames = 0;
		event_loop.run(move |event, _, control_flow| match event {
			Event::WindowEvent { event: e, .. } => match e {
				WindowEvent::CloseRequested => {
					*control_flow = ControlFlow::Exit;
				}
				WindowEvent::Resized(new_size) => {
					vkr.resize([new_size.width, new_size.height]);
				}
				_ => {}
			},
			Event::RedrawEventsCleared => {
				if *control_flow == ControlFlow::Exit {
					return;
				}
				driver.advance(&mut vkr);
				let elapsed = last_report.elapsed();
				if elapsed >= stats_interval {
					let frames = driver.stats().frames;
					log::info!(
						"{:.1} fps, simulated {:.2}s",
						(frames - last_frames) as f64 / elapsed.as_secs_f64(),
						driver.stats().sim_time,
					);
					last_frames = frames;
					last_report = Instant::now();
				}
			}
			Event::LoopDestroyed => {
				vkr.shutdown();
			}
			_ => {}
		});
	}
}
