use super::Stroke;

/// Identity of a stroke within its [`StrokeStore`]. Never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("stroke#{_0}")]
pub struct StrokeId(u64);

/// Strokes in drawing order; the last entry is the most recent.
#[derive(Debug, Default, Clone)]
pub struct StrokeStore {
	entries: Vec<(StrokeId, Stroke)>,
	next_id: u64,
}

impl StrokeStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn push(&mut self, stroke: Stroke) -> StrokeId {
		let id = StrokeId(self.next_id);
		self.next_id += 1;
		self.entries.push((id, stroke));
		id
	}

	fn index_of(&self, id: StrokeId) -> Option<usize> {
		// Ids are handed out in increasing order and never reordered.
		self.entries.binary_search_by_key(&id, |(id, _)| *id).ok()
	}

	pub fn contains(&self, id: StrokeId) -> bool {
		self.index_of(id).is_some()
	}

	pub fn get(&self, id: StrokeId) -> Option<&Stroke> {
		self.index_of(id).map(|i| &self.entries[i].1)
	}

	pub fn get_mut(&mut self, id: StrokeId) -> Option<&mut Stroke> {
		self.index_of(id).map(|i| &mut self.entries[i].1)
	}

	pub fn last_id(&self) -> Option<StrokeId> {
		self.entries.last().map(|(id, _)| *id)
	}

	pub fn remove(&mut self, id: StrokeId) -> Option<Stroke> {
		self.index_of(id).map(|i| self.entries.remove(i).1)
	}

	pub fn remove_last(&mut self) -> Option<(StrokeId, Stroke)> {
		self.entries.pop()
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}

	pub fn iter(&self) -> impl ExactSizeIterator<Item = (StrokeId, &Stroke)> + '_ {
		self.entries.iter().map(|(id, stroke)| (*id, stroke))
	}

	pub fn ids(&self) -> impl ExactSizeIterator<Item = StrokeId> + '_ {
		self.entries.iter().map(|(id, _)| *id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use glam::{Vec3, Vec4};

	fn stroke_at(x: f32) -> Stroke {
		let mut stroke = Stroke::new(Vec4::ONE, 0.0);
		let _ = stroke.try_append(Vec3::new(x, 0.0, 0.0), 0.01);
		stroke
	}

	#[test]
	fn ids_are_unique_and_ordered() {
		let mut store = StrokeStore::new();
		let a = store.push(stroke_at(0.0));
		let b = store.push(stroke_at(1.0));
		assert!(a < b);
		store.clear();
		let c = store.push(stroke_at(2.0));
		assert!(b < c);
		assert_eq!(store.ids().collect::<Vec<_>>(), vec![c]);
	}

	#[test]
	fn remove_by_identity() {
		let mut store = StrokeStore::new();
		let a = store.push(stroke_at(0.0));
		// Same geometry, different identity.
		let b = store.push(stroke_at(0.0));
		let c = store.push(stroke_at(1.0));

		assert!(store.remove(b).is_some());
		assert!(store.remove(b).is_none());
		assert_eq!(store.ids().collect::<Vec<_>>(), vec![a, c]);
		assert!(store.contains(a));
		assert!(!store.contains(b));
		assert_eq!(store.get(c).unwrap().points(), &[Vec3::X]);
	}

	#[test]
	fn remove_last() {
		let mut store = StrokeStore::new();
		assert!(store.remove_last().is_none());
		let _a = store.push(stroke_at(0.0));
		let b = store.push(stroke_at(1.0));
		assert_eq!(store.last_id(), Some(b));
		assert_eq!(store.remove_last().map(|(id, _)| id), Some(b));
		assert_eq!(store.len(), 1);
	}

	#[test]
	fn display() {
		let mut store = StrokeStore::new();
		let id = store.push(stroke_at(0.0));
		assert_eq!(id.to_string(), "stroke#0");
	}
}
