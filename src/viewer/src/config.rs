use std::time::Duration;

use kinematics::chain::two_link_templates;
use kinematics::config::SimConfig;
use kinematics::segment::SegmentTemplate;
use kinematics::time_manager::TimeModel;

pub struct ViewerConfig {
	pub window_size: [u32; 2],
	pub title: String,
	pub sim: SimConfig,
	pub time_model: TimeModel,
	pub templates: Vec<SegmentTemplate>,
	// how often frame rate is logged
	pub stats_interval: Duration,
}

impl Default for ViewerConfig {
	fn default() -> Self {
		Self {
			window_size: [3840, 2160],
			title: "Dynamic Window".to_string(),
			sim: SimConfig::default(),
			time_model: TimeModel::Realtime,
			templates: two_link_templates(),
			stats_interval: Duration::from_secs(5),
		}
	}
}

impl ViewerConfig {
	pub fn with_window_size(mut self, window_size: [u32; 2]) -> Self {
		self.window_size = window_size;
		self
	}

	pub fn with_title(mut self, title: &str) -> Self {
		self.title = title.to_string();
		self
	}

	pub fn with_sim(mut self, sim: SimConfig) -> Self {
		self.sim = sim;
		self
	}

	pub fn with_time_model(mut self, time_model: TimeModel) -> Self {
		self.time_model = time_model;
		self
	}

	pub fn with_templates(mut self, templates: Vec<SegmentTemplate>) -> Self {
		self.templates = templates;
		self
	}

	pub fn with_stats_interval(mut self, stats_interval: Duration) -> Self {
		self.stats_interval = stats_interval;
		self
	}
}
