use super::{StrokeId, StrokeStore};
use crate::geom::distance_to_segment;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
	pub id: StrokeId,
	pub distance: f32,
}

/// The stroke with the segment nearest to `position`, if that segment is closer than `threshold`.
///
/// Strokes are visited in drawing order and segments in point order; on a tie the first one wins.
/// Strokes with fewer than two points have no segments and can't be hit.
pub fn find_closest_hit(store: &StrokeStore, position: Vec3, threshold: f32) -> Option<Hit> {
	let mut closest: Option<Hit> = None;
	for (id, stroke) in store.iter() {
		// Anything outside the inflated bounds is at least `threshold` away.
		if !stroke.bounds().inflated(threshold).contains(position) {
			continue;
		}
		for (start, end) in stroke.segments() {
			let distance = distance_to_segment(start, end, position);
			if distance < threshold && closest.map_or(true, |hit| distance < hit.distance) {
				closest = Some(Hit { id, distance });
			}
		}
	}
	closest
}

pub fn find_closest(store: &StrokeStore, position: Vec3, threshold: f32) -> Option<StrokeId> {
	find_closest_hit(store, position, threshold).map(|hit| hit.id)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::Stroke;
	use approx::assert_abs_diff_eq;
	use glam::{vec3, Vec4};

	fn line(store: &mut StrokeStore, points: &[Vec3]) -> StrokeId {
		let mut stroke = Stroke::new(Vec4::ONE, 0.0);
		for &p in points {
			let _ = stroke.try_append(p, 0.01);
		}
		store.push(stroke)
	}

	#[test]
	fn empty_store() {
		assert_eq!(find_closest(&StrokeStore::new(), Vec3::ZERO, 1.0), None);
	}

	#[test]
	fn nearer_of_two() {
		let mut store = StrokeStore::new();
		let far = line(&mut store, &[vec3(-1.0, 0.05, 0.0), vec3(1.0, 0.05, 0.0)]);
		let near = line(&mut store, &[vec3(-1.0, 0.0, 0.02), vec3(1.0, 0.0, 0.02)]);
		let hit = find_closest_hit(&store, Vec3::ZERO, 0.03).unwrap();
		assert_eq!(hit.id, near);
		assert_abs_diff_eq!(hit.distance, 0.02, epsilon = 1e-6);

		// Only the far one qualifies with a larger threshold if the near one is gone.
		let mut store = store.clone();
		store.remove(near);
		assert_eq!(find_closest(&store, Vec3::ZERO, 0.03), None);
		assert_eq!(find_closest(&store, Vec3::ZERO, 0.06), Some(far));
	}

	#[test]
	fn threshold_is_strict() {
		let mut store = StrokeStore::new();
		line(&mut store, &[vec3(0.0, 0.5, 0.0), vec3(1.0, 0.5, 0.0)]);
		assert_eq!(find_closest(&store, Vec3::ZERO, 0.5), None);
	}

	#[test]
	fn projection_is_clamped_to_segment() {
		let mut store = StrokeStore::new();
		// Collinear with the query but ending before it.
		line(&mut store, &[vec3(1.0, 0.0, 0.0), vec3(2.0, 0.0, 0.0)]);
		let hit = find_closest_hit(&store, Vec3::ZERO, 2.0).unwrap();
		assert_abs_diff_eq!(hit.distance, 1.0);
	}

	#[test]
	fn tie_goes_to_earliest() {
		let mut store = StrokeStore::new();
		let first = line(&mut store, &[vec3(-1.0, 0.01, 0.0), vec3(1.0, 0.01, 0.0)]);
		let _second = line(&mut store, &[vec3(-1.0, -0.01, 0.0), vec3(1.0, -0.01, 0.0)]);
		assert_eq!(find_closest(&store, Vec3::ZERO, 0.1), Some(first));
	}

	#[test]
	fn single_point_strokes_are_ignored() {
		let mut store = StrokeStore::new();
		line(&mut store, &[Vec3::ZERO]);
		assert_eq!(find_closest(&store, Vec3::ZERO, 1.0), None);
	}

	#[test]
	fn matches_brute_force() {
		fastrand::seed(0x13371337);
		let mut store = StrokeStore::new();
		for _ in 0..20 {
			let mut p = vec3(fastrand::f32(), fastrand::f32(), fastrand::f32());
			let mut points = vec![p];
			for _ in 0..10 {
				p += (vec3(fastrand::f32(), fastrand::f32(), fastrand::f32()) - 0.5) * 0.1;
				points.push(p);
			}
			line(&mut store, &points);
		}
		for _ in 0..200 {
			let query = vec3(fastrand::f32(), fastrand::f32(), fastrand::f32());
			let threshold = 0.1;
			let expected = store
				.iter()
				.flat_map(|(id, s)| s.segments().map(move |(a, b)| (id, distance_to_segment(a, b, query))))
				.fold(None, |best: Option<(StrokeId, f32)>, (id, d)| match best {
					Some((_, best_d)) if !(d < best_d) => best,
					_ => Some((id, d)),
				})
				.filter(|(_, d)| *d < threshold)
				.map(|(id, _)| id);
			assert_eq!(find_closest(&store, query, threshold), expected);
		}
	}
}
