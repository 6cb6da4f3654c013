use anyhow::Context;

use viewer::{Viewer, ViewerConfig};

fn main() -> anyhow::Result<()> {
	env_logger::init();
	let viewer = Viewer::new(ViewerConfig::default())
		.context("graphics initialization failed")?;
	viewer.run()
}
