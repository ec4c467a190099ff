use glam::Vec3;

/// Axis-aligned bounding box. The empty box has `min > max` on every axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AABox {
	min: Vec3,
	max: Vec3,
}

impl Default for AABox {
	fn default() -> Self {
		Self::empty()
	}
}

impl AABox {
	pub fn new(min: Vec3, max: Vec3) -> Self {
		Self { min, max }
	}

	pub fn empty() -> Self {
		Self::new(Vec3::MAX, Vec3::MIN)
	}

	pub fn min(&self) -> Vec3 {
		self.min
	}

	pub fn max(&self) -> Vec3 {
		self.max
	}

	pub fn is_empty(&self) -> bool {
		self.min.cmpgt(self.max).any()
	}

	pub fn expanded_to_contain(self, point: Vec3) -> Self {
		Self::new(self.min.min(point), self.max.max(point))
	}

	pub fn containing(points: impl IntoIterator<Item = Vec3>) -> Self {
		points
			.into_iter()
			.fold(Self::empty(), |b, p| b.expanded_to_contain(p))
	}

	/// Grows every face outward by `margin`. Empty boxes stay empty.
	pub fn inflated(self, margin: f32) -> Self {
		if self.is_empty() {
			return self;
		}
		Self::new(self.min - Vec3::splat(margin), self.max + Vec3::splat(margin))
	}

	/// Closed containment test, so points on a face are inside.
	pub fn contains(&self, point: Vec3) -> bool {
		point.cmpge(self.min).all() && point.cmple(self.max).all()
	}
}

/// Projects `point` onto the segment from `start` to `end`, clamped to the segment. A degenerate
/// segment projects everything onto `start`.
pub fn nearest_point_on_segment(start: Vec3, end: Vec3, point: Vec3) -> Vec3 {
	let segment = end - start;
	let length = segment.length();
	let direction = segment.normalize_or_zero();
	let projected = (point - start).dot(direction).clamp(0.0, length);
	start + direction * projected
}

pub fn distance_to_segment(start: Vec3, end: Vec3, point: Vec3) -> f32 {
	nearest_point_on_segment(start, end, point).distance(point)
}
