use crate::pr_model::PrSegment;

/// Consumer of per-frame segment geometry.
///
/// `upload` is called once per segment in chain order, then `draw_line_list`
/// once for the whole frame. Implementors own all GPU state.
pub trait LineSink {
	fn upload(&mut self, index: usize, segment: &PrSegment);

	fn draw_line_list(&mut self);

	fn resize(&mut self, size: [u32; 2]);

	fn shutdown(&mut self);
}
