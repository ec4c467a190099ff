use super::{find_closest, Admission, GrabSession, Stroke, StrokeId, StrokeStore};
use crate::util::ResultExt;
use crate::{ConfigError, EditorConfig, HapticsSink, NullHaptics, PointerSample};
use glam::Vec4;
use std::time::Duration;

/// Scales the middle-button pressure into the pulse played for each accepted point.
const DRAW_PULSE_DAMPING: f32 = 0.6;
const DRAW_PULSE_DURATION: Duration = Duration::from_millis(10);
const GRAB_PULSE_AMPLITUDE: f32 = 1.0;
const GRAB_PULSE_DURATION: Duration = Duration::from_millis(30);
const CLEAR_PULSE_AMPLITUDE: f32 = 1.0;
const CLEAR_PULSE_DURATION: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorMode {
	Idle,
	Drawing,
	Grabbing,
}

/// What a tick did. At most one action happens per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
	Drew {
		stroke: StrokeId,
		admission: Admission,
	},
	Erased(StrokeId),
	ClearedAll,
	Highlighted(StrokeId),
	Unhighlighted,
	/// Holds the grabbed stroke, or `None` if nothing was highlighted.
	GrabStarted(Option<StrokeId>),
	Moved,
	GrabEnded,
	Idle,
}

#[derive(Clone, Copy, Debug)]
struct Highlight {
	id: StrokeId,
	restore_color: Vec4,
}

#[derive(Debug, Default)]
enum Grab {
	#[default]
	Released,
	Holding(Option<GrabSession>),
}

/// Turns a stream of pointer samples into stroke edits.
///
/// Each tick is handled by the first of these that applies:
/// 1. Drawing, while either analog input is pressed and the pointer can draw.
/// 2. Erasing, on the back button: the highlighted stroke or else the newest one; holding the
///    button for the long-press duration clears everything.
/// 3. Highlighting the stroke nearest the pointer, unless a grab is in progress.
/// 4. Grabbing and moving the highlighted stroke with the grab button.
pub struct Editor<H> {
	config: EditorConfig,
	haptics: H,
	strokes: StrokeStore,
	current_stroke: Option<StrokeId>,
	highlight: Option<Highlight>,
	grab: Grab,
	erase_latched: bool,
	erase_pressed_at: Duration,
}

static_assertions::assert_impl_all!(Editor<NullHaptics>: Send);

impl<H: HapticsSink> Editor<H> {
	pub fn new(config: EditorConfig, haptics: H) -> Self {
		Self {
			config,
			haptics,
			strokes: StrokeStore::new(),
			current_stroke: None,
			highlight: None,
			grab: Grab::Released,
			erase_latched: false,
			erase_pressed_at: Duration::ZERO,
		}
	}

	pub fn config(&self) -> &EditorConfig {
		&self.config
	}

	pub fn strokes(&self) -> &StrokeStore {
		&self.strokes
	}

	pub fn haptics(&self) -> &H {
		&self.haptics
	}

	pub fn haptics_mut(&mut self) -> &mut H {
		&mut self.haptics
	}

	pub fn highlighted(&self) -> Option<StrokeId> {
		self.highlight.map(|h| h.id)
	}

	pub fn current_stroke(&self) -> Option<StrokeId> {
		self.current_stroke
	}

	pub fn is_drawing(&self) -> bool {
		self.current_stroke.is_some()
	}

	pub fn is_grabbing(&self) -> bool {
		matches!(self.grab, Grab::Holding(_))
	}

	pub fn mode(&self) -> EditorMode {
		if self.is_drawing() {
			EditorMode::Drawing
		} else if self.is_grabbing() {
			EditorMode::Grabbing
		} else {
			EditorMode::Idle
		}
	}

	/// Color for strokes started from now on.
	pub fn set_stroke_color(&mut self, color: Vec4) {
		tracing::debug!(%color, "stroke color changed");
		self.config.set_stroke_color(color);
	}

	pub fn set_max_line_width(&mut self, max_line_width: f32) -> Result<(), ConfigError> {
		self.config.set_max_line_width(max_line_width)
	}

	pub fn set_fixed_width_mode(&mut self, fixed_width_mode: bool) {
		self.config.set_fixed_width_mode(fixed_width_mode);
	}

	/// Advances by one frame. `now` is the time since any fixed epoch and only needs to be
	/// non-decreasing.
	pub fn tick(&mut self, sample: &PointerSample, now: Duration) -> TickOutcome {
		if let Some(outcome) = self.draw(sample) {
			return outcome;
		}
		if let Some(outcome) = self.erase(sample, now) {
			return outcome;
		}
		if let Some(outcome) = self.select(sample) {
			return outcome;
		}
		self.grab(sample)
	}

	/// Removes every stroke and drops any highlight or grab.
	pub fn clear_all(&mut self) {
		tracing::info!(count = self.strokes.len(), "clearing all strokes");
		self.strokes.clear();
		self.current_stroke = None;
		self.highlight = None;
		self.grab = Grab::Released;
	}

	fn draw(&mut self, sample: &PointerSample) -> Option<TickOutcome> {
		let analog = sample.analog();
		if !(analog > 0.0 && sample.can_draw) {
			if let Some(id) = self.current_stroke.take() {
				let points = self.strokes.get(id).map_or(0, Stroke::len);
				tracing::debug!(%id, points, "finished stroke");
			}
			return None;
		}

		if self.highlight.is_some() {
			self.unhighlight();
			self.grab = Grab::Released;
		}

		let id = match self.current_stroke.filter(|id| self.strokes.contains(*id)) {
			Some(id) => id,
			None => self.start_stroke(),
		};
		let width = self.config.resolve_width(analog);
		let admission = self.strokes.get_mut(id)?.try_append(sample.position(), width);
		if admission.is_admitted() {
			// Only the middle button buzzes; tip-only drawing sends a zero-amplitude pulse.
			let amplitude = (sample.middle_pressure * DRAW_PULSE_DAMPING).clamp(0.0, 1.0);
			self.pulse(amplitude, DRAW_PULSE_DURATION);
		}
		Some(TickOutcome::Drew {
			stroke: id,
			admission,
		})
	}

	fn start_stroke(&mut self) -> StrokeId {
		let stroke = Stroke::new(self.config.stroke_color(), self.config.min_point_distance());
		let id = self.strokes.push(stroke);
		self.current_stroke = Some(id);
		tracing::debug!(%id, "started stroke");
		id
	}

	fn erase(&mut self, sample: &PointerSample, now: Duration) -> Option<TickOutcome> {
		if !sample.wants_erase() {
			self.erase_latched = false;
			return None;
		}
		if self.strokes.is_empty() {
			return None;
		}

		if !self.erase_latched {
			self.erase_latched = true;
			self.erase_pressed_at = now;
			let target = self
				.highlight
				.take()
				.map(|h| h.id)
				.filter(|id| self.strokes.contains(*id))
				.or_else(|| self.strokes.last_id())?;
			self.strokes.remove(target);
			self.click();
			tracing::debug!(id = %target, "erased stroke");
			return Some(TickOutcome::Erased(target));
		}

		// Clears unconditionally, even if a different stroke became highlighted meanwhile.
		if now.saturating_sub(self.erase_pressed_at) >= self.config.long_press_duration() {
			self.pulse(CLEAR_PULSE_AMPLITUDE, CLEAR_PULSE_DURATION);
			self.clear_all();
			return Some(TickOutcome::ClearedAll);
		}
		None
	}

	fn select(&mut self, sample: &PointerSample) -> Option<TickOutcome> {
		if self.is_grabbing() {
			return None;
		}
		let closest = find_closest(
			&self.strokes,
			sample.position(),
			self.config.highlight_threshold(),
		);
		let current = self.highlighted();
		match closest {
			Some(id) if current != Some(id) => {
				self.unhighlight();
				self.highlight(id);
				Some(TickOutcome::Highlighted(id))
			}
			None if current.is_some() => {
				self.unhighlight();
				Some(TickOutcome::Unhighlighted)
			}
			_ => None,
		}
	}

	fn highlight(&mut self, id: StrokeId) {
		let highlight_color = self.config.highlight_color();
		let Some(stroke) = self.strokes.get_mut(id) else {
			return;
		};
		let restore_color = stroke.color();
		stroke.set_color(highlight_color);
		self.highlight = Some(Highlight { id, restore_color });
		self.click();
		tracing::debug!(%id, "highlighted stroke");
	}

	fn unhighlight(&mut self) {
		let Some(highlight) = self.highlight.take() else {
			return;
		};
		if let Some(stroke) = self.strokes.get_mut(highlight.id) {
			stroke.set_color(highlight.restore_color);
		}
		self.click();
		tracing::debug!(id = %highlight.id, "unhighlighted stroke");
	}

	fn grab(&mut self, sample: &PointerSample) -> TickOutcome {
		match (sample.grab_pressed, self.is_grabbing()) {
			(true, false) => {
				let session = self.highlight.and_then(|h| {
					let stroke = self.strokes.get(h.id)?;
					Some(GrabSession::begin(h.id, stroke, sample.pose))
				});
				let target = session.as_ref().map(GrabSession::target);
				if let Some(id) = target {
					self.pulse(GRAB_PULSE_AMPLITUDE, GRAB_PULSE_DURATION);
					tracing::debug!(%id, "grabbed stroke");
				}
				self.grab = Grab::Holding(session);
				TickOutcome::GrabStarted(target)
			}
			(true, true) => {
				self.move_grabbed(sample);
				TickOutcome::Moved
			}
			(false, true) => {
				self.unhighlight();
				self.grab = Grab::Released;
				tracing::debug!("released grab");
				TickOutcome::GrabEnded
			}
			(false, false) => TickOutcome::Idle,
		}
	}

	fn move_grabbed(&mut self, sample: &PointerSample) {
		let Grab::Holding(Some(session)) = &self.grab else {
			return;
		};
		// The target may have been erased mid-grab.
		if self.highlight.map(|h| h.id) != Some(session.target()) {
			return;
		}
		if let Some(stroke) = self.strokes.get_mut(session.target()) {
			session.apply(stroke, sample.pose);
		}
	}

	fn pulse(&mut self, amplitude: f32, duration: Duration) {
		self.haptics.pulse(amplitude, duration).ok_or_log();
	}

	fn click(&mut self) {
		self.haptics.click().ok_or_log();
	}
}
