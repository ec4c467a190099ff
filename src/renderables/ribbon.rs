use crate::{Stroke, StrokeId, StrokeStore};
use glam::Vec3;

/// One corner of a stroke ribbon, laid out for direct upload to a vertex buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RibbonVertex {
	pub position: [f32; 3],
	pub width: f32,
	pub color: [f32; 4],
}
static_assertions::assert_eq_size!(RibbonVertex, [f32; 8]);

/// A triangle strip covering `stroke`, turned to face `eye`.
///
/// Each point contributes two vertices offset by half its width on either side of the stroke.
/// Strokes with fewer than two points have no area and produce nothing.
pub fn ribbon_vertices(stroke: &Stroke, eye: Vec3) -> Vec<RibbonVertex> {
	let points = stroke.points();
	if points.len() < 2 {
		return Vec::new();
	}
	let color = stroke.color().to_array();
	let mut vertices = Vec::with_capacity(2 * points.len());
	for (i, (&point, &width)) in points.iter().zip(stroke.widths()).enumerate() {
		let prev = points[i.saturating_sub(1)];
		let next = points[(i + 1).min(points.len() - 1)];
		let tangent = (next - prev).try_normalize().unwrap_or(Vec3::X);
		let side = tangent
			.cross(eye - point)
			.try_normalize()
			.unwrap_or_else(|| tangent.any_orthonormal_vector());
		let offset = side * (0.5 * width);
		for corner in [point - offset, point + offset] {
			vertices.push(RibbonVertex {
				position: corner.to_array(),
				width,
				color,
			});
		}
	}
	vertices
}

/// Ribbons for every stroke in drawing order, skipping those with nothing to draw.
pub fn ribbons(store: &StrokeStore, eye: Vec3) -> Vec<(StrokeId, Vec<RibbonVertex>)> {
	store
		.iter()
		.map(|(id, stroke)| (id, ribbon_vertices(stroke, eye)))
		.filter(|(_, vertices)| !vertices.is_empty())
		.collect()
}

/// Raw bytes for a vertex buffer upload.
pub fn as_bytes(vertices: &[RibbonVertex]) -> &[u8] {
	bytemuck::cast_slice(vertices)
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_abs_diff_eq;
	use glam::{vec3, Vec4};

	fn stroke(points: &[Vec3], width: f32) -> Stroke {
		let mut stroke = Stroke::new(Vec4::new(0.1, 0.2, 0.3, 1.0), 0.0);
		for &p in points {
			let _ = stroke.try_append(p, width);
		}
		stroke
	}

	#[test]
	fn too_short() {
		assert!(ribbon_vertices(&stroke(&[], 0.01), Vec3::Z).is_empty());
		assert!(ribbon_vertices(&stroke(&[Vec3::ZERO], 0.01), Vec3::Z).is_empty());
	}

	#[test]
	fn faces_the_eye() {
		let s = stroke(&[Vec3::ZERO, vec3(1.0, 0.0, 0.0), vec3(2.0, 0.0, 0.0)], 0.02);
		let vertices = ribbon_vertices(&s, vec3(1.0, 0.0, 10.0));
		assert_eq!(vertices.len(), 6);
		for pair in vertices.chunks(2) {
			let a = Vec3::from(pair[0].position);
			let b = Vec3::from(pair[1].position);
			// Spread across the stroke and perpendicular to the view.
			assert_abs_diff_eq!(a.distance(b), 0.02, epsilon = 1e-6);
			assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-6);
			assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-4);
			assert_eq!(pair[0].color, [0.1, 0.2, 0.3, 1.0]);
		}
	}

	#[test]
	fn looking_along_the_stroke() {
		let s = stroke(&[Vec3::ZERO, Vec3::X], 0.02);
		let vertices = ribbon_vertices(&s, vec3(5.0, 0.0, 0.0));
		for v in &vertices {
			assert!(Vec3::from(v.position).is_finite());
		}
		assert_abs_diff_eq!(
			Vec3::from(vertices[0].position).distance(Vec3::from(vertices[1].position)),
			0.02,
			epsilon = 1e-6
		);
	}

	#[test]
	fn store_skips_empty() {
		let mut store = StrokeStore::new();
		let _dot = store.push(stroke(&[Vec3::ZERO], 0.01));
		let line = store.push(stroke(&[Vec3::ZERO, Vec3::Y], 0.01));
		let all = ribbons(&store, Vec3::Z);
		assert_eq!(all.len(), 1);
		assert_eq!(all[0].0, line);
		assert_eq!(as_bytes(&all[0].1).len(), 4 * 32);
	}
}
