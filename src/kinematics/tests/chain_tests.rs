use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use kinematics::chain::Chain;
use kinematics::config::{PositionIntegration, SimConfig};
use kinematics::segment::SegmentTemplate;
use kinematics::V2;

fn random_chain(rng: &mut StdRng, len: usize, config: SimConfig) -> Chain {
	let templates = (0..len).map(|_| {
		SegmentTemplate::new(rng.gen_range(0.1..2.0))
			.with_angle(rng.gen_range(-3.0..3.0))
			.with_pos(V2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
			.with_vel(V2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
			.with_accel(V2::new(rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5)))
			.with_angular_vel(rng.gen_range(-1.0..1.0))
			.with_angular_accel(rng.gen_range(-2.0..2.0))
	});
	Chain::from_templates(templates, config)
}

fn assert_invariants(chain: &Chain) {
	let segments = chain.segments();
	for (i, s) in segments.iter().enumerate() {
		if i == 0 {
			assert_eq!(s.start(), s.pos, "root not anchored at its position");
		} else {
			assert_eq!(s.start(), segments[i - 1].end(), "joint {} broken", i);
		}
		assert_relative_eq!(
			(s.end() - s.start()).norm(),
			s.length(),
			epsilon = 1e-5,
			max_relative = 1e-5
		);
	}
}

#[test]
fn invariants_hold_over_random_steps() {
	let mut rng = StdRng::seed_from_u64(0);
	for config in [
		SimConfig::default(),
		SimConfig::default().with_position(PositionIntegration::Legacy),
	] {
		let mut chain = random_chain(&mut rng, 8, config);
		assert_invariants(&chain);
		for _ in 0..200 {
			chain.step(rng.gen_range(0.0..0.02));
			assert_invariants(&chain);
		}
	}
}

#[test]
fn length_never_changes() {
	let mut rng = StdRng::seed_from_u64(1);
	let mut chain = random_chain(&mut rng, 5, SimConfig::default());
	let lengths: Vec<f32> = chain.segments().iter().map(|s| s.length()).collect();
	for _ in 0..100 {
		chain.step(0.1);
	}
	let after: Vec<f32> = chain.segments().iter().map(|s| s.length()).collect();
	assert_eq!(lengths, after);
}

#[test]
fn angle_is_monotonic_under_positive_accel() {
	let mut rng = StdRng::seed_from_u64(2);
	let mut chain = Chain::two_link(SimConfig::default());
	let mut last: Vec<f32> = chain.segments().iter().map(|s| s.angle).collect();
	for _ in 0..500 {
		chain.step(rng.gen_range(0.0001..0.1));
		for (s, prev) in chain.segments().iter().zip(last.iter_mut()) {
			assert!(s.angle >= *prev, "angle went from {} to {}", prev, s.angle);
			*prev = s.angle;
		}
	}
}

#[test]
fn resolve_is_idempotent() {
	let mut rng = StdRng::seed_from_u64(3);
	let mut chain = random_chain(&mut rng, 6, SimConfig::default());
	chain.step(0.37);
	let first = chain.pr_model();
	chain.resolve();
	assert_eq!(first, chain.pr_model());
	chain.resolve();
	assert_eq!(first, chain.pr_model());
}

#[test]
fn two_link_after_one_second() {
	let mut chain = Chain::two_link(SimConfig::default());
	chain.step(1.0);

	let root = chain.segment(0).unwrap();
	assert_eq!(root.angular_vel, 1.0);
	assert_eq!(root.angle, 0.5);
	assert_relative_eq!(root.end().x, 0.5 * 0.5f32.cos(), epsilon = 1e-6);
	assert_relative_eq!(root.end().y, 0.5 * 0.5f32.sin(), epsilon = 1e-6);

	let tip = chain.segment(1).unwrap();
	assert_eq!(tip.angular_vel, 2.0);
	assert_eq!(tip.angle, 1.0);
	assert_eq!(tip.start(), root.end());
}

#[test]
fn zero_step_changes_nothing() {
	let mut rng = StdRng::seed_from_u64(4);
	let mut chain = random_chain(&mut rng, 4, SimConfig::default());
	chain.step(0.2);
	let before = chain.clone();
	chain.step(0.0);
	for (a, b) in before.segments().iter().zip(chain.segments()) {
		assert_eq!(a.pos, b.pos);
		assert_eq!(a.vel, b.vel);
		assert_eq!(a.angle, b.angle);
		assert_eq!(a.angular_vel, b.angular_vel);
		assert_eq!(a.start(), b.start());
		assert_eq!(a.end(), b.end());
	}
}

#[test]
fn clamped_stall_matches_small_step() {
	let mut stalled = Chain::two_link(SimConfig::default().with_max_dt(0.05));
	let mut smooth = Chain::two_link(SimConfig::default());
	stalled.step(30.0);
	smooth.step(0.05);
	assert_eq!(stalled.pr_model(), smooth.pr_model());
}
