use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic time source in seconds.
pub trait Clock {
	fn now(&self) -> f64;
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
	fn now(&self) -> f64 {
		(**self).now()
	}
}

pub struct SystemClock {
	start: Instant,
}

impl Default for SystemClock {
	fn default() -> Self {
		Self {
			start: Instant::now(),
		}
	}
}

impl Clock for SystemClock {
	fn now(&self) -> f64 {
		self.start.elapsed().as_secs_f64()
	}
}

/// Clock that only moves when told to.
#[derive(Default)]
pub struct ManualClock {
	now: Cell<f64>,
}

impl ManualClock {
	pub fn new(now: f64) -> Self {
		Self {
			now: Cell::new(now),
		}
	}

	pub fn set(&self, now: f64) {
		self.now.set(now);
	}

	pub fn advance(&self, dt: f64) {
		self.now.set(self.now.get() + dt);
	}
}

impl Clock for ManualClock {
	fn now(&self) -> f64 {
		self.now.get()
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimeModel {
	/// Steps follow the clock.
	Realtime,
	/// Every frame advances by the same amount regardless of the clock.
	Fixed(f32),
}

pub struct TimeManager<C: Clock> {
	clock: C,
	model: TimeModel,
	virtual_now: f64,
}

impl<C: Clock> TimeManager<C> {
	pub fn new(clock: C, model: TimeModel) -> Self {
		Self {
			clock,
			model,
			virtual_now: 0.0,
		}
	}

	pub fn realtime(clock: C) -> Self {
		Self::new(clock, TimeModel::Realtime)
	}

	pub fn model(&self) -> TimeModel {
		self.model
	}

	pub fn clock(&self) -> &C {
		&self.clock
	}

	/// Timestamp the chain is stamped with before the first frame.
	pub fn start(&mut self) -> f64 {
		match self.model {
			TimeModel::Realtime => self.clock.now(),
			TimeModel::Fixed(_) => self.virtual_now,
		}
	}

	/// The single authoritative timestamp of the next frame.
	pub fn next_frame_time(&mut self) -> f64 {
		match self.model {
			TimeModel::Realtime => self.clock.now(),
			TimeModel::Fixed(pft) => {
				self.virtual_now += pft as f64;
				self.virtual_now
			}
		}
	}
}
