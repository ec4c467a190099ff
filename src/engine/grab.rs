use super::{Stroke, StrokeId};
use crate::Pose;
use glam::{Quat, Vec3};

/// A rigid move of one stroke that follows the pointer from the pose where the grab began.
///
/// Each update is computed from the points captured at the start, never from the previous update,
/// so repeated moves don't accumulate error.
#[derive(Debug, Clone)]
pub struct GrabSession {
	target: StrokeId,
	origin: Vec3,
	rotation: Quat,
	snapshot: Vec<Vec3>,
}

impl GrabSession {
	pub fn begin(target: StrokeId, stroke: &Stroke, pose: Pose) -> Self {
		Self {
			target,
			origin: pose.position,
			rotation: pose.orientation,
			snapshot: stroke.points().to_vec(),
		}
	}

	pub fn target(&self) -> StrokeId {
		self.target
	}

	pub fn snapshot(&self) -> &[Vec3] {
		&self.snapshot
	}

	/// The captured points rotated about the grab origin by the pointer's rotation since the grab
	/// began, then carried to the pointer's current position.
	pub fn transformed(&self, pose: Pose) -> impl Iterator<Item = Vec3> + '_ {
		let delta = pose.orientation * self.rotation.inverse();
		let origin = self.origin;
		self
			.snapshot
			.iter()
			.map(move |&p| delta * (p - origin) + pose.position)
	}

	pub fn apply(&self, stroke: &mut Stroke, pose: Pose) {
		stroke.reposition(self.transformed(pose));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::StrokeStore;
	use glam::{vec3, Vec4};
	use std::f32::consts::FRAC_PI_2;

	fn setup() -> (StrokeStore, StrokeId) {
		let mut store = StrokeStore::new();
		let mut stroke = Stroke::new(Vec4::ONE, 0.0);
		for p in [vec3(1.0, 0.0, 0.0), vec3(2.0, 0.0, 0.0), vec3(2.0, 1.0, 0.0)] {
			let _ = stroke.try_append(p, 0.01);
		}
		let id = store.push(stroke);
		(store, id)
	}

	#[test]
	fn translation() {
		let (mut store, id) = setup();
		let original = store.get(id).unwrap().points().to_vec();
		let start = Pose::new(vec3(0.5, 0.5, 0.5), Quat::IDENTITY);
		let session = GrabSession::begin(id, store.get(id).unwrap(), start);

		let delta = vec3(0.1, -0.2, 0.3);
		let stroke = store.get_mut(id).unwrap();
		session.apply(stroke, Pose::new(start.position + delta, Quat::IDENTITY));
		for (moved, old) in stroke.points().iter().zip(&original) {
			assert!(moved.abs_diff_eq(*old + delta, 1e-5), "{moved} != {}", *old + delta);
		}
	}

	#[test]
	fn rotation_about_grab_origin() {
		let (mut store, id) = setup();
		let start = Pose::new(Vec3::ZERO, Quat::from_rotation_x(0.3));
		let session = GrabSession::begin(id, store.get(id).unwrap(), start);

		// A quarter turn about Z relative to the starting orientation.
		let turned = Quat::from_rotation_z(FRAC_PI_2) * start.orientation;
		let stroke = store.get_mut(id).unwrap();
		session.apply(stroke, Pose::new(Vec3::ZERO, turned));
		let expected = [vec3(0.0, 1.0, 0.0), vec3(0.0, 2.0, 0.0), vec3(-1.0, 2.0, 0.0)];
		for (moved, expected) in stroke.points().iter().zip(expected) {
			assert!(moved.abs_diff_eq(expected, 1e-5), "{moved} != {expected}");
		}
	}

	#[test]
	fn updates_do_not_accumulate() {
		let (mut store, id) = setup();
		let original = store.get(id).unwrap().points().to_vec();
		let start = Pose::default();
		let session = GrabSession::begin(id, store.get(id).unwrap(), start);
		let stroke = store.get_mut(id).unwrap();
		for i in 0..100 {
			let angle = i as f32 * 0.1;
			session.apply(stroke, Pose::new(vec3(angle, 0.0, 0.0), Quat::from_rotation_y(angle)));
		}
		session.apply(stroke, start);
		for (p, o) in stroke.points().iter().zip(&original) {
			assert!(p.abs_diff_eq(*o, 1e-5), "{p} != {o}");
		}
		assert_eq!(session.snapshot(), original.as_slice());
	}
}
