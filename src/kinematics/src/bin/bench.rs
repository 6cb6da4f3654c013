use std::time::Instant;

use kinematics::chain::Chain;
use kinematics::config::SimConfig;
use kinematics::frame_driver::FrameDriver;
use kinematics::segment::SegmentTemplate;
use kinematics::time_manager::{SystemClock, TimeManager, TimeModel};
use protocol::line_sink::LineSink;
use protocol::pr_model::PrSegment;

#[derive(Default)]
struct CountingSink {
	vertices: usize,
}

impl LineSink for CountingSink {
	fn upload(&mut self, _index: usize, _segment: &PrSegment) {
		self.vertices += 2;
	}

	fn draw_line_list(&mut self) {}

	fn resize(&mut self, _size: [u32; 2]) {}

	fn shutdown(&mut self) {}
}

fn main() {
	let segments = 1000;
	let frames = 10_000;
	let pft = 1.0 / 60.0;

	let templates = (0..segments).map(|i| {
		SegmentTemplate::new(1.0 / segments as f32)
			.with_angular_accel(1.0 + (i % 7) as f32)
	});
	let chain = Chain::from_templates(templates, SimConfig::default());
	let time = TimeManager::new(SystemClock::default(), TimeModel::Fixed(pft));
	let mut driver = FrameDriver::new(chain, time);
	let mut sink = CountingSink::default();

	let start = Instant::now();
	for _ in 0..frames {
		driver.advance(&mut sink);
	}
	let duration = start.elapsed().as_secs_f64();
	let sim_time = driver.stats().sim_time;
	eprintln!(
		"{} segments, {} frames, {} vertices: {:.3}% of realtime",
		segments,
		frames,
		sink.vertices,
		duration / sim_time * 100.0,
	);
}
