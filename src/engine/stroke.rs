use crate::geom::AABox;
use crate::util::PiecewiseLinear;
use glam::{Vec3, Vec4};
use itertools::Itertools;

#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
	Admitted,
	/// Too close to the previous point.
	Rejected,
}

impl Admission {
	pub fn is_admitted(self) -> bool {
		self == Admission::Admitted
	}
}

/// A freehand polyline with one resolved width per point.
#[derive(Debug, Clone)]
pub struct Stroke {
	points: Vec<Vec3>,
	widths: Vec<f32>,
	color: Vec4,
	min_point_distance: f32,
	bounds: AABox,
}

impl Stroke {
	pub fn new(color: Vec4, min_point_distance: f32) -> Self {
		Self {
			points: Vec::new(),
			widths: Vec::new(),
			color,
			min_point_distance,
			bounds: AABox::empty(),
		}
	}

	pub fn points(&self) -> &[Vec3] {
		&self.points
	}

	pub fn widths(&self) -> &[f32] {
		&self.widths
	}

	pub fn len(&self) -> usize {
		self.points.len()
	}

	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	pub fn last_point(&self) -> Option<Vec3> {
		self.points.last().copied()
	}

	pub fn color(&self) -> Vec4 {
		self.color
	}

	pub fn set_color(&mut self, color: Vec4) {
		self.color = color;
	}

	pub fn bounds(&self) -> AABox {
		self.bounds
	}

	pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
		self.points.iter().copied().tuple_windows()
	}

	/// Appends a point unless it lies within the minimum distance of the last one. The first point
	/// is always admitted.
	pub fn try_append(&mut self, position: Vec3, width: f32) -> Admission {
		if let Some(last) = self.last_point() {
			if !(position.distance(last) > self.min_point_distance) {
				return Admission::Rejected;
			}
		}
		self.points.push(position);
		self.widths.push(width);
		self.bounds = self.bounds.expanded_to_contain(position);
		Admission::Admitted
	}

	/// Overwrites point positions in order, leaving the count and widths untouched. Extra positions
	/// are ignored.
	pub fn reposition(&mut self, positions: impl IntoIterator<Item = Vec3>) {
		for (point, position) in self.points.iter_mut().zip(positions) {
			*point = position;
		}
		self.bounds = AABox::containing(self.points.iter().copied());
	}

	/// The width profile over the normalized stroke parameter: point `i` of `n` sits at
	/// `i / (n - 1)`. Every key moves when a point is added, so this is rebuilt on request.
	pub fn width_curve(&self) -> Option<PiecewiseLinear> {
		PiecewiseLinear::uniform(self.widths.iter().copied())
	}

	/// Samples the width profile at `t` in `[0, 1]` without building the curve. Agrees with
	/// [`Stroke::width_curve`].
	pub fn width_at(&self, t: f32) -> Option<f32> {
		let last = self.widths.len().checked_sub(1)?;
		if last == 0 {
			return Some(self.widths[0]);
		}
		let x = t.clamp(0.0, 1.0) * last as f32;
		let i = (x.floor() as usize).min(last - 1);
		let s = x - i as f32;
		Some(self.widths[i] + s * (self.widths[i + 1] - self.widths[i]))
	}
}
