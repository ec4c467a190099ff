use bon::bon;
use glam::{vec4, Vec4};
use std::time::Duration;

pub const DEFAULT_MAX_LINE_WIDTH: f32 = 0.01;
pub const DEFAULT_MIN_LINE_WIDTH: f32 = 0.0005;
pub const DEFAULT_MIN_POINT_DISTANCE: f32 = 0.0005;
pub const DEFAULT_HIGHLIGHT_THRESHOLD: f32 = 0.01;
pub const DEFAULT_LONG_PRESS_DURATION: Duration = Duration::from_secs(1);
pub const DEFAULT_STROKE_COLOR: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);
pub const DEFAULT_HIGHLIGHT_COLOR: Vec4 = Vec4::new(1.0, 0.8, 0.0, 1.0);

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
	#[error("line widths must satisfy 0 < min <= max, got min {min} and max {max}")]
	InvalidWidthRange { min: f32, max: f32 },

	#[error("`{name}` must be finite and non-negative, got {value}")]
	InvalidDistance { name: &'static str, value: f32 },

	#[error("cannot parse color {input:?}: {message}")]
	InvalidColor { input: String, message: String },
}

static_assertions::assert_impl_all!(ConfigError: std::error::Error, Send, Sync);

/// Parses any CSS color string (`"#ff8800"`, `"rgb(10 20 30)"`, `"gold"`, ...) into RGBA
/// components in `[0, 1]`.
pub fn parse_color(input: &str) -> Result<Vec4, ConfigError> {
	let color = csscolorparser::parse(input).map_err(|err| ConfigError::InvalidColor {
		input: input.to_owned(),
		message: err.to_string(),
	})?;
	let [r, g, b, a] = color.to_array();
	Ok(vec4(r as f32, g as f32, b as f32, a as f32))
}

/// Session settings for the editor. Lengths are in world units (meters).
#[derive(Clone, Debug, PartialEq)]
pub struct EditorConfig {
	max_line_width: f32,
	min_line_width: f32,
	min_point_distance: f32,
	highlight_threshold: f32,
	long_press_duration: Duration,
	fixed_width_mode: bool,
	stroke_color: Vec4,
	highlight_color: Vec4,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			max_line_width: DEFAULT_MAX_LINE_WIDTH,
			min_line_width: DEFAULT_MIN_LINE_WIDTH,
			min_point_distance: DEFAULT_MIN_POINT_DISTANCE,
			highlight_threshold: DEFAULT_HIGHLIGHT_THRESHOLD,
			long_press_duration: DEFAULT_LONG_PRESS_DURATION,
			fixed_width_mode: false,
			stroke_color: DEFAULT_STROKE_COLOR,
			highlight_color: DEFAULT_HIGHLIGHT_COLOR,
		}
	}
}

fn check_distance(name: &'static str, value: f32) -> Result<(), ConfigError> {
	if value.is_finite() && value >= 0.0 {
		Ok(())
	} else {
		Err(ConfigError::InvalidDistance { name, value })
	}
}

fn check_width_range(min: f32, max: f32) -> Result<(), ConfigError> {
	// Written so that NaN fails.
	if min > 0.0 && min <= max && max.is_finite() {
		Ok(())
	} else {
		Err(ConfigError::InvalidWidthRange { min, max })
	}
}

#[bon]
impl EditorConfig {
	/// Colors are CSS strings; see [`parse_color`].
	#[builder(finish_fn = build)]
	pub fn new(
		#[builder(default = DEFAULT_MAX_LINE_WIDTH)] max_line_width: f32,
		#[builder(default = DEFAULT_MIN_LINE_WIDTH)] min_line_width: f32,
		#[builder(default = DEFAULT_MIN_POINT_DISTANCE)] min_point_distance: f32,
		#[builder(default = DEFAULT_HIGHLIGHT_THRESHOLD)] highlight_threshold: f32,
		#[builder(default = DEFAULT_LONG_PRESS_DURATION)] long_press_duration: Duration,
		#[builder(default)] fixed_width_mode: bool,
		stroke_color: Option<&str>,
		highlight_color: Option<&str>,
	) -> Result<Self, ConfigError> {
		let config = Self {
			max_line_width,
			min_line_width,
			min_point_distance,
			highlight_threshold,
			long_press_duration,
			fixed_width_mode,
			stroke_color: stroke_color
				.map(parse_color)
				.transpose()?
				.unwrap_or(DEFAULT_STROKE_COLOR),
			highlight_color: highlight_color
				.map(parse_color)
				.transpose()?
				.unwrap_or(DEFAULT_HIGHLIGHT_COLOR),
		};
		config.validate()?;
		Ok(config)
	}
}

impl EditorConfig {
	#[tracing::instrument(err, skip(self))]
	pub fn validate(&self) -> Result<(), ConfigError> {
		check_width_range(self.min_line_width, self.max_line_width)?;
		check_distance("min_point_distance", self.min_point_distance)?;
		check_distance("highlight_threshold", self.highlight_threshold)?;
		Ok(())
	}

	pub fn max_line_width(&self) -> f32 {
		self.max_line_width
	}

	pub fn min_line_width(&self) -> f32 {
		self.min_line_width
	}

	pub fn min_point_distance(&self) -> f32 {
		self.min_point_distance
	}

	pub fn highlight_threshold(&self) -> f32 {
		self.highlight_threshold
	}

	pub fn long_press_duration(&self) -> Duration {
		self.long_press_duration
	}

	pub fn fixed_width_mode(&self) -> bool {
		self.fixed_width_mode
	}

	pub fn stroke_color(&self) -> Vec4 {
		self.stroke_color
	}

	pub fn highlight_color(&self) -> Vec4 {
		self.highlight_color
	}

	pub fn set_max_line_width(&mut self, max_line_width: f32) -> Result<(), ConfigError> {
		check_width_range(self.min_line_width, max_line_width)?;
		self.max_line_width = max_line_width;
		Ok(())
	}

	pub fn set_fixed_width_mode(&mut self, fixed_width_mode: bool) {
		self.fixed_width_mode = fixed_width_mode;
	}

	pub fn set_stroke_color(&mut self, stroke_color: Vec4) {
		self.stroke_color = stroke_color;
	}

	/// Maps a raw pressure to a line width: `max(raw * max_width, min_width)`, forced to the full
	/// width in fixed-width mode. The result never leaves `[min_width, max_width]`, even for
	/// pressures outside `[0, 1]` or NaN.
	pub fn resolve_width(&self, raw: f32) -> f32 {
		let raw = if self.fixed_width_mode { 1.0 } else { raw };
		(raw * self.max_line_width)
			.max(self.min_line_width)
			.min(self.max_line_width)
	}
}
