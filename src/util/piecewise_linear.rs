use ordered_float::OrderedFloat;

/// A curve through a sorted set of `(x, y)` keys, interpolating linearly between them and holding
/// the boundary values outside.
#[derive(Clone, Debug)]
pub struct PiecewiseLinear {
	keys: Vec<(OrderedFloat<f32>, f32)>,
}

impl PiecewiseLinear {
	pub fn new(keys: impl IntoIterator<Item = (f32, f32)>) -> Option<Self> {
		let mut keys: Vec<_> = keys
			.into_iter()
			.map(|(x, y)| (OrderedFloat(x), y))
			.collect();
		if keys.is_empty() {
			return None;
		}
		keys.sort_by_key(|(x, _)| *x);
		Some(Self { keys })
	}

	/// Places `values` at evenly spaced keys over `[0, 1]`, the first at 0 and the last at 1. A
	/// single value becomes a flat curve.
	pub fn uniform(values: impl IntoIterator<Item = f32>) -> Option<Self> {
		let values: Vec<f32> = values.into_iter().collect();
		let scale = match values.len() {
			0 => return None,
			1 => 0.0,
			n => 1.0 / (n - 1) as f32,
		};
		Self::new(
			values
				.into_iter()
				.enumerate()
				.map(|(i, y)| (scale * i as f32, y)),
		)
	}

	pub fn keys(&self) -> impl ExactSizeIterator<Item = (f32, f32)> + '_ {
		self.keys.iter().map(|(x, y)| (x.0, *y))
	}

	pub fn evaluate(&self, x: f32) -> f32 {
		let next_index = self.keys.partition_point(|(k, _)| !(x < k.0));
		match (
			next_index.checked_sub(1).map(|i| self.keys[i]),
			self.keys.get(next_index),
		) {
			(Some((x0, y0)), Some(&(x1, y1))) => {
				let span = x1.0 - x0.0;
				if span > 0.0 {
					y0 + (y1 - y0) * ((x - x0.0) / span)
				} else {
					y0
				}
			}
			(Some((_, y)), None) | (None, Some(&(_, y))) => y,
			// `keys` is never empty.
			(None, None) => unreachable!("piecewise linear curve has no keys"),
		}
	}
}
