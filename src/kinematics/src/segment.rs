use std::f32::consts::{PI, TAU};

use crate::config::{PositionIntegration, SimConfig};
use crate::V2;
use protocol::pr_model::{PrSegment, Rgb};

/// Initial state of one segment, see `Chain::push`.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentTemplate {
	pub length: f32,
	pub angle: f32,
	pub pos: V2,
	pub vel: V2,
	pub accel: V2,
	pub angular_vel: f32,
	pub angular_accel: f32,
	pub color: [Rgb; 2],
}

impl SegmentTemplate {
	pub fn new(length: f32) -> Self {
		Self {
			length,
			angle: 0.0,
			pos: V2::zeros(),
			vel: V2::zeros(),
			accel: V2::zeros(),
			angular_vel: 0.0,
			angular_accel: 0.0,
			color: [[1.0; 3]; 2],
		}
	}

	pub fn with_angle(mut self, angle: f32) -> Self {
		self.angle = angle;
		self
	}

	pub fn with_pos(mut self, pos: V2) -> Self {
		self.pos = pos;
		self
	}

	pub fn with_vel(mut self, vel: V2) -> Self {
		self.vel = vel;
		self
	}

	pub fn with_accel(mut self, accel: V2) -> Self {
		self.accel = accel;
		self
	}

	pub fn with_angular_vel(mut self, angular_vel: f32) -> Self {
		self.angular_vel = angular_vel;
		self
	}

	pub fn with_angular_accel(mut self, angular_accel: f32) -> Self {
		self.angular_accel = angular_accel;
		self
	}

	/// Same colour at both endpoints.
	pub fn with_color(mut self, color: Rgb) -> Self {
		self.color = [color, color];
		self
	}

	pub fn with_gradient(mut self, start: Rgb, end: Rgb) -> Self {
		self.color = [start, end];
		self
	}
}

#[derive(Clone, Debug)]
pub struct Segment {
	pub angle: f32,
	pub pos: V2,
	pub vel: V2,
	pub accel: V2,
	pub angular_vel: f32,
	pub angular_accel: f32,

	length: f32,
	last_timestamp: f64,
	// derived every frame, never integrated
	endpoints: [V2; 2],
	color: [Rgb; 2],
}

impl Segment {
	pub fn new(template: SegmentTemplate) -> Self {
		let mut result = Self {
			angle: template.angle,
			pos: template.pos,
			vel: template.vel,
			accel: template.accel,
			angular_vel: template.angular_vel,
			angular_accel: template.angular_accel,
			length: template.length,
			last_timestamp: 0.0,
			endpoints: [template.pos; 2],
			color: template.color,
		};
		result.resolve_from(template.pos);
		result
	}

	pub fn length(&self) -> f32 {
		self.length
	}

	pub fn start(&self) -> V2 {
		self.endpoints[0]
	}

	pub fn end(&self) -> V2 {
		self.endpoints[1]
	}

	pub fn last_timestamp(&self) -> f64 {
		self.last_timestamp
	}

	pub fn stamp(&mut self, now: f64) {
		self.last_timestamp = now;
	}

	pub fn direction(&self) -> V2 {
		V2::new(self.angle.cos(), self.angle.sin())
	}

	/// Advance by `dt` seconds under constant acceleration.
	pub fn integrate(&mut self, dt: f32, config: &SimConfig) {
		let dt2 = dt * dt;
		match config.position {
			PositionIntegration::Kinematic => {
				self.pos += self.vel * dt + self.accel * (0.5 * dt2);
			}
			PositionIntegration::Legacy => {
				let dp = (self.vel * dt).component_mul(&(self.accel * (0.5 * dt2)));
				self.pos += dp;
			}
		}
		self.vel += self.accel * dt;

		self.angle += self.angular_vel * dt + 0.5 * self.angular_accel * dt2;
		self.angular_vel += self.angular_accel * dt;
		if config.wrap_angle {
			self.angle = wrap_angle(self.angle);
		}
	}

	/// Integrate up to the absolute time `now` and remember it.
	/// Returns the step that was applied.
	pub fn advance_to(&mut self, now: f64, config: &SimConfig) -> f32 {
		let dt = config.clamp_dt((now - self.last_timestamp) as f32);
		self.last_timestamp = now;
		self.integrate(dt, config);
		dt
	}

	/// Recompute both endpoints with `start` as the root point.
	pub fn resolve_from(&mut self, start: V2) {
		self.endpoints = [start, start + self.direction() * self.length];
	}

	pub fn render(&self) -> PrSegment {
		PrSegment {
			pos: [self.endpoints[0].into(), self.endpoints[1].into()],
			color: self.color,
		}
	}
}

fn wrap_angle(angle: f32) -> f32 {
	(angle + PI).rem_euclid(TAU) - PI
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;

	fn spinning(angular_accel: f32) -> Segment {
		Segment::new(SegmentTemplate::new(0.5).with_angular_accel(angular_accel))
	}

	#[test]
	fn new_resolves_as_root() {
		let s = Segment::new(
			SegmentTemplate::new(2.0)
				.with_pos(V2::new(1.0, 1.0))
				.with_angle(PI / 2.0),
		);
		assert_eq!(s.start(), V2::new(1.0, 1.0));
		assert_relative_eq!(s.end().x, 1.0, epsilon = 1e-6);
		assert_relative_eq!(s.end().y, 3.0, epsilon = 1e-6);
	}

	#[test]
	fn angular_step_from_rest() {
		let mut s = spinning(1.0);
		s.integrate(1.0, &SimConfig::default());
		assert_eq!(s.angular_vel, 1.0);
		assert_eq!(s.angle, 0.5);
	}

	#[test]
	fn kinematic_position_is_additive() {
		let mut s = Segment::new(
			SegmentTemplate::new(1.0)
				.with_vel(V2::new(1.0, 0.0))
				.with_accel(V2::new(0.0, 2.0)),
		);
		s.integrate(2.0, &SimConfig::default());
		assert_relative_eq!(s.pos.x, 2.0);
		assert_relative_eq!(s.pos.y, 4.0);
		assert_relative_eq!(s.vel.x, 1.0);
		assert_relative_eq!(s.vel.y, 4.0);
	}

	#[test]
	fn legacy_position_multiplies_terms() {
		let config = SimConfig::default().with_position(PositionIntegration::Legacy);
		let mut s = Segment::new(
			SegmentTemplate::new(1.0)
				.with_vel(V2::new(1.0, 3.0))
				.with_accel(V2::new(0.0, 2.0)),
		);
		s.integrate(2.0, &config);
		// x: (1 * 2) * (0.5 * 0 * 4) = 0, y: (3 * 2) * (0.5 * 2 * 4) = 24
		assert_relative_eq!(s.pos.x, 0.0);
		assert_relative_eq!(s.pos.y, 24.0);
		// velocity update is the same in both modes
		assert_relative_eq!(s.vel.y, 7.0);
	}

	#[test]
	fn advance_to_uses_and_stores_timestamp() {
		let mut s = spinning(2.0);
		s.stamp(10.0);
		let dt = s.advance_to(10.5, &SimConfig::default());
		assert_eq!(dt, 0.5);
		assert_eq!(s.last_timestamp(), 10.5);
		assert_relative_eq!(s.angular_vel, 1.0);
		assert_relative_eq!(s.angle, 0.25);
	}

	#[test]
	fn advance_to_honors_max_dt() {
		let mut s = spinning(1.0);
		let dt = s.advance_to(100.0, &SimConfig::default().with_max_dt(0.1));
		assert_relative_eq!(dt, 0.1);
		assert_relative_eq!(s.angular_vel, 0.1);
		assert_eq!(s.last_timestamp(), 100.0);
	}

	#[test]
	fn wrapped_angle_stays_in_range() {
		let mut s = spinning(1.0);
		let config = SimConfig::default().with_wrapped_angle();
		for _ in 0..100 {
			s.integrate(0.25, &config);
			assert!(s.angle >= -PI && s.angle <= PI, "angle {}", s.angle);
		}
	}

	#[test]
	fn render_carries_endpoints_and_color() {
		let s = Segment::new(
			SegmentTemplate::new(1.0).with_gradient([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
		);
		let pr = s.render();
		assert_eq!(pr.pos, [[0.0, 0.0], [1.0, 0.0]]);
		assert_eq!(pr.color, [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
	}
}
