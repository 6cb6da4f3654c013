// pr_model: Physical model for rendering

pub type Rgb = [f32; 3];

pub const BLUE: Rgb = [0.0, 0.0, 1.0];
pub const RED: Rgb = [1.0, 0.0, 0.0];

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PrSegment {
	// start, end
	pub pos: [[f32; 2]; 2],
	pub color: [Rgb; 2],
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrModel {
	pub segments: Vec<PrSegment>,
}

impl PrModel {
	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}
}
