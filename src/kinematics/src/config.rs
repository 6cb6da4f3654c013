//! Knobs for the per-frame update.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionIntegration {
	/// `pos += v * dt + a * dt^2 / 2`
	Kinematic,
	/// `pos += (v * dt) * (a * dt^2 / 2)`, the displacement terms are
	/// multiplied. Only for matching old recordings.
	Legacy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeSampling {
	/// One timestamp per frame shared by every segment.
	FrameWide,
	/// Every segment reads the clock itself, segments drift apart slightly.
	PerSegment,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
	pub position: PositionIntegration,
	pub sampling: TimeSampling,
	/// Upper bound for a single step, `None` integrates stalls as-is.
	pub max_dt: Option<f32>,
	/// Keep `angle` in `[-pi, pi)` instead of letting it grow.
	pub wrap_angle: bool,
}

impl Default for SimConfig {
	fn default() -> Self {
		Self {
			position: PositionIntegration::Kinematic,
			sampling: TimeSampling::FrameWide,
			max_dt: None,
			wrap_angle: false,
		}
	}
}

impl SimConfig {
	pub fn with_position(mut self, position: PositionIntegration) -> Self {
		self.position = position;
		self
	}

	pub fn with_sampling(mut self, sampling: TimeSampling) -> Self {
		self.sampling = sampling;
		self
	}

	pub fn with_max_dt(mut self, max_dt: f32) -> Self {
		self.max_dt = Some(max_dt);
		self
	}

	pub fn with_wrapped_angle(mut self) -> Self {
		self.wrap_angle = true;
		self
	}

	pub fn clamp_dt(&self, dt: f32) -> f32 {
		match self.max_dt {
			Some(max_dt) if dt > max_dt => {
				log::warn!("clamp step {:.4}s to {:.4}s", dt, max_dt);
				max_dt
			}
			_ => dt,
		}
	}
}
