use bytemuck::{Pod, Zeroable};
use protocol::pr_model::PrSegment;

#[repr(C)]
#[derive(Zeroable, Pod, Default, Debug, Clone, Copy, PartialEq)]
pub struct LineVertex {
	pub pos: [f32; 2],
	pub color: [f32; 3],
}
vulkano::impl_vertex!(LineVertex, pos, color);

impl LineVertex {
	pub fn pair(segment: &PrSegment) -> [Self; 2] {
		[0, 1].map(|i| Self {
			pos: segment.pos[i],
			color: segment.color[i],
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pair_keeps_endpoint_order() {
		let segment = PrSegment {
			pos: [[0.0, 0.0], [0.5, 0.25]],
			color: [[0.0, 0.0, 1.0], [1.0, 0.0, 0.0]],
		};
		let [a, b] = LineVertex::pair(&segment);
		assert_eq!(a.pos, [0.0, 0.0]);
		assert_eq!(a.color, [0.0, 0.0, 1.0]);
		assert_eq!(b.pos, [0.5, 0.25]);
		assert_eq!(b.color, [1.0, 0.0, 0.0]);
	}

	#[test]
	fn layout_is_tightly_packed() {
		assert_eq!(std::mem::size_of::<LineVertex>(), 5 * 4);
	}
}
