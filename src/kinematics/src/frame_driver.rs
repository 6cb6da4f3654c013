//! One simulation+render step per host tick.

use crate::chain::Chain;
use crate::config::TimeSampling;
use crate::time_manager::{Clock, TimeManager, TimeModel};
use protocol::line_sink::LineSink;
use protocol::pr_model::PrModel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameState {
	Idle,
	Advancing,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
	pub frames: u64,
	// sum of the root segment's steps
	pub sim_time: f64,
	pub last_dt: f32,
}

pub struct FrameDriver<C: Clock> {
	chain: Chain,
	time: TimeManager<C>,
	state: FrameState,
	stats: FrameStats,
	pr_model: PrModel,
}

impl<C: Clock> FrameDriver<C> {
	pub fn new(mut chain: Chain, mut time: TimeManager<C>) -> Self {
		chain.stamp(time.start());
		chain.resolve();
		let pr_model = chain.pr_model();
		log::debug!(
			"frame driver: {} segments, {:?}, {:?}",
			chain.len(),
			time.model(),
			chain.config().sampling,
		);
		Self {
			chain,
			time,
			state: FrameState::Idle,
			stats: FrameStats::default(),
			pr_model,
		}
	}

	pub fn chain(&self) -> &Chain {
		&self.chain
	}

	pub fn state(&self) -> FrameState {
		self.state
	}

	pub fn stats(&self) -> FrameStats {
		self.stats
	}

	/// Geometry handed to the renderer by the last frame.
	pub fn pr_model(&self) -> &PrModel {
		&self.pr_model
	}

	fn integrate(&mut self) -> f32 {
		let sampling = match self.time.model() {
			TimeModel::Fixed(_) => TimeSampling::FrameWide,
			TimeModel::Realtime => self.chain.config().sampling,
		};
		match sampling {
			TimeSampling::FrameWide => {
				let now = self.time.next_frame_time();
				self.chain.advance_to(now)
			}
			TimeSampling::PerSegment => {
				self.chain.advance_with_clock(self.time.clock())
			}
		}
	}

	/// Integrate, resolve and hand the frame to `sink`. An empty chain
	/// makes no sink calls.
	pub fn advance<S: LineSink + ?Sized>(&mut self, sink: &mut S) -> &PrModel {
		self.state = FrameState::Advancing;

		let dt = self.integrate();
		self.chain.resolve();
		self.pr_model = self.chain.pr_model();

		if !self.pr_model.is_empty() {
			for (index, segment) in self.pr_model.segments.iter().enumerate() {
				sink.upload(index, segment);
			}
			sink.draw_line_list();
		}

		self.stats.frames += 1;
		self.stats.sim_time += dt as f64;
		self.stats.last_dt = dt;
		log::trace!("frame {} dt {:.5}", self.stats.frames, dt);

		self.state = FrameState::Idle;
		&self.pr_model
	}
}
