use glam::{Quat, Vec3};

/// World-space pose of the pointer's inking tip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
	pub position: Vec3,
	pub orientation: Quat,
}

impl Default for Pose {
	fn default() -> Self {
		Self::new(Vec3::ZERO, Quat::IDENTITY)
	}
}

impl Pose {
	pub fn new(position: Vec3, orientation: Quat) -> Self {
		Self {
			position,
			orientation,
		}
	}
}

/// One tick's reading of the pointer. Built fresh by the input layer every frame.
///
/// Pressures are nominally in `[0, 1]`, but nothing here relies on it: any value above zero counts
/// as pressed and widths are clamped downstream.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
	pub pose: Pose,
	pub tip_pressure: f32,
	pub middle_pressure: f32,
	pub grab_pressed: bool,
	pub back_pressed: bool,
	pub back_double_tap: bool,
	pub can_draw: bool,
}

impl PointerSample {
	/// An idle sample at `position` from a connected pointer.
	pub fn at(position: Vec3) -> Self {
		Self {
			pose: Pose::new(position, Quat::IDENTITY),
			can_draw: true,
			..Default::default()
		}
	}

	pub fn position(&self) -> Vec3 {
		self.pose.position
	}

	pub fn orientation(&self) -> Quat {
		self.pose.orientation
	}

	/// The drawing intensity, whichever analog input is pressed harder.
	pub fn analog(&self) -> f32 {
		self.tip_pressure.max(self.middle_pressure)
	}

	pub fn wants_erase(&self) -> bool {
		self.back_pressed || self.back_double_tap
	}

	/// Whether any input on the pointer is engaged.
	pub fn any(&self) -> bool {
		self.tip_pressure > 0.0
			|| self.middle_pressure > 0.0
			|| self.grab_pressed
			|| self.back_pressed
			|| self.back_double_tap
	}

	pub fn with_orientation(self, orientation: Quat) -> Self {
		Self {
			pose: Pose::new(self.pose.position, orientation),
			..self
		}
	}

	pub fn with_tip(self, tip_pressure: f32) -> Self {
		Self {
			tip_pressure,
			..self
		}
	}

	pub fn with_middle(self, middle_pressure: f32) -> Self {
		Self {
			middle_pressure,
			..self
		}
	}

	pub fn with_grab(self, grab_pressed: bool) -> Self {
		Self {
			grab_pressed,
			..self
		}
	}

	pub fn with_back(self, back_pressed: bool) -> Self {
		Self {
			back_pressed,
			..self
		}
	}

	pub fn with_back_double_tap(self, back_double_tap: bool) -> Self {
		Self {
			back_double_tap,
			..self
		}
	}

	pub fn with_can_draw(self, can_draw: bool) -> Self {
		Self { can_draw, ..self }
	}
}
