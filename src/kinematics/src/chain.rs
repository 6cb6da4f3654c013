//! Ordered chain of segments, each non-root segment pinned to its
//! predecessor's tip.

use crate::config::SimConfig;
use crate::segment::{Segment, SegmentTemplate};
use crate::time_manager::Clock;
use crate::V2;
use protocol::pr_model::{PrModel, BLUE, RED};

#[derive(Clone, Debug, Default)]
pub struct Chain {
	config: SimConfig,
	segments: Vec<Segment>,
}

impl Chain {
	pub fn new(config: SimConfig) -> Self {
		Self {
			config,
			segments: Vec::new(),
		}
	}

	pub fn from_templates<I>(templates: I, config: SimConfig) -> Self
	where
		I: IntoIterator<Item = SegmentTemplate>,
	{
		let mut chain = Self::new(config);
		for template in templates {
			chain.push(template);
		}
		chain
	}

	/// Two half-unit segments: a blue root spinning up at 1 rad/s^2 and a red
	/// tip spinning up at 2 rad/s^2.
	pub fn two_link(config: SimConfig) -> Self {
		Self::from_templates(two_link_templates(), config)
	}

	/// Appends a segment and returns its index. A non-root segment starts
	/// at the current tip of the chain.
	pub fn push(&mut self, template: SegmentTemplate) -> usize {
		let mut segment = Segment::new(template);
		if let Some(last) = self.segments.last() {
			segment.stamp(last.last_timestamp());
			segment.resolve_from(last.end());
		}
		log::debug!(
			"push segment {}: length {} angular accel {}",
			self.segments.len(),
			segment.length(),
			segment.angular_accel,
		);
		self.segments.push(segment);
		self.segments.len() - 1
	}

	pub fn config(&self) -> &SimConfig {
		&self.config
	}

	pub fn len(&self) -> usize {
		self.segments.len()
	}

	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}

	pub fn segment(&self, index: usize) -> Option<&Segment> {
		self.segments.get(index)
	}

	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	pub fn stamp(&mut self, now: f64) {
		for segment in self.segments.iter_mut() {
			segment.stamp(now);
		}
	}

	/// Integrates every segment by the same `dt`.
	pub fn integrate(&mut self, dt: f32) {
		let dt = self.config.clamp_dt(dt);
		for segment in self.segments.iter_mut() {
			segment.integrate(dt, &self.config);
		}
	}

	/// Integrates every segment up to the shared timestamp `now`.
	/// Returns the root's step.
	pub fn advance_to(&mut self, now: f64) -> f32 {
		let mut root_dt = None;
		for segment in self.segments.iter_mut() {
			let dt = segment.advance_to(now, &self.config);
			root_dt.get_or_insert(dt);
		}
		root_dt.unwrap_or(0.0)
	}

	/// Like `advance_to`, but every segment reads `clock` on its own.
	pub fn advance_with_clock<C: Clock + ?Sized>(&mut self, clock: &C) -> f32 {
		let mut root_dt = None;
		for segment in self.segments.iter_mut() {
			let dt = segment.advance_to(clock.now(), &self.config);
			root_dt.get_or_insert(dt);
		}
		root_dt.unwrap_or(0.0)
	}

	/// Recomputes endpoints in chain order. Must run after the whole chain
	/// has been integrated for the frame.
	pub fn resolve(&mut self) {
		let mut joint: Option<V2> = None;
		for segment in self.segments.iter_mut() {
			let start = joint.unwrap_or(segment.pos);
			segment.resolve_from(start);
			joint = Some(segment.end());
		}
	}

	pub fn step(&mut self, dt: f32) {
		self.integrate(dt);
		self.resolve();
	}

	pub fn pr_model(&self) -> PrModel {
		PrModel {
			segments: self.segments.iter().map(|s| s.render()).collect(),
		}
	}
}

pub fn two_link_templates() -> Vec<SegmentTemplate> {
	vec![
		SegmentTemplate::new(0.5)
			.with_angular_accel(1.0)
			.with_color(BLUE),
		SegmentTemplate::new(0.5)
			.with_pos(V2::new(0.5, 0.0))
			.with_angular_accel(2.0)
			.with_color(RED),
	]
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;

	#[test]
	fn two_link_starts_connected() {
		let chain = Chain::two_link(SimConfig::default());
		assert_eq!(chain.len(), 2);
		let root = chain.segment(0).unwrap();
		let tip = chain.segment(1).unwrap();
		assert_eq!(root.start(), V2::zeros());
		assert_eq!(tip.start(), root.end());
		assert_relative_eq!(tip.end().x, 1.0);
	}

	#[test]
	fn push_returns_index() {
		let mut chain = Chain::default();
		assert_eq!(chain.push(SegmentTemplate::new(1.0)), 0);
		assert_eq!(chain.push(SegmentTemplate::new(1.0)), 1);
		assert_eq!(chain.push(SegmentTemplate::new(1.0)), 2);
	}

	#[test]
	fn empty_chain_is_noop() {
		let mut chain = Chain::default();
		chain.step(1.0);
		assert_eq!(chain.advance_to(5.0), 0.0);
		assert!(chain.pr_model().is_empty());
	}

	#[test]
	fn single_segment_is_root_only() {
		let mut chain = Chain::default();
		chain.push(
			SegmentTemplate::new(1.0)
				.with_pos(V2::new(2.0, -1.0))
				.with_angular_vel(1.0),
		);
		chain.step(0.3);
		let s = chain.segment(0).unwrap();
		assert_eq!(s.start(), s.pos);
		assert_relative_eq!((s.end() - s.start()).norm(), 1.0, epsilon = 1e-5);
	}

	#[test]
	fn non_root_ignores_own_position() {
		let mut chain = Chain::default();
		chain.push(SegmentTemplate::new(1.0));
		chain.push(
			SegmentTemplate::new(1.0)
				.with_pos(V2::new(-7.0, 3.0))
				.with_vel(V2::new(1.0, 1.0)),
		);
		chain.step(1.0);
		let tip = chain.segment(1).unwrap();
		assert_eq!(tip.start(), chain.segment(0).unwrap().end());
		// position is still integrated, just not used for geometry
		assert_relative_eq!(tip.pos.x, -6.0);
	}

	#[test]
	fn advance_with_clock_reads_per_segment() {
		struct Ticker(std::cell::Cell<f64>);
		impl Clock for Ticker {
			fn now(&self) -> f64 {
				let t = self.0.get() + 1.0;
				self.0.set(t);
				t
			}
		}
		let mut chain = Chain::two_link(SimConfig::default());
		let dt = chain.advance_with_clock(&Ticker(std::cell::Cell::new(0.0)));
		assert_eq!(dt, 1.0);
		assert_eq!(chain.segment(0).unwrap().last_timestamp(), 1.0);
		assert_eq!(chain.segment(1).unwrap().last_timestamp(), 2.0);
		assert_relative_eq!(chain.segment(1).unwrap().angular_vel, 4.0);
	}
}
