use glam::{vec3, Quat, Vec3};
use inkspace::renderables::ribbons;
use inkspace::{Editor, EditorConfig, HapticsError, HapticsSink, PointerSample, TickOutcome};
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
#[error("no global tracing subscriber set")]
struct NoTracingSubscriber;

fn configure_tracing() -> anyhow::Result<()> {
	let result = Err(NoTracingSubscriber);

	let result = result.or_else(|_| {
		let max_level = if cfg!(debug_assertions) {
			tracing::Level::TRACE
		} else {
			tracing::Level::INFO
		};
		tracing::subscriber::set_global_default(
			tracing_subscriber::FmtSubscriber::builder()
				.with_max_level(max_level)
				.finish(),
		)
	});

	Ok(result?)
}

/// Stands in for a controller by logging each impulse.
#[derive(Default)]
struct LoggingHaptics {
	pulses: usize,
}

impl HapticsSink for LoggingHaptics {
	fn pulse(&mut self, amplitude: f32, duration: Duration) -> Result<(), HapticsError> {
		self.pulses += 1;
		tracing::trace!(amplitude, ?duration, "haptic pulse");
		Ok(())
	}
}

/// Feeds samples to the editor at a fixed frame rate.
struct Session {
	editor: Editor<LoggingHaptics>,
	now: Duration,
}

impl Session {
	const FRAME: Duration = Duration::from_micros(11_111);

	fn tick(&mut self, sample: PointerSample) -> TickOutcome {
		self.now += Self::FRAME;
		let outcome = self.editor.tick(&sample, self.now);
		if !matches!(outcome, TickOutcome::Idle | TickOutcome::Moved | TickOutcome::Drew { .. }) {
			tracing::info!(?outcome, now = ?self.now);
		}
		outcome
	}

	/// A wobbly stroke from `start` to `end` with the tip pressure ramping up and back down.
	fn scribble(&mut self, start: Vec3, end: Vec3) {
		const STEPS: usize = 60;
		for i in 0..=STEPS {
			let t = i as f32 / STEPS as f32;
			let jitter = (vec3(fastrand::f32(), fastrand::f32(), fastrand::f32()) - 0.5) * 0.001;
			let pressure = (t * std::f32::consts::PI).sin().max(0.05);
			self.tick(PointerSample::at(start.lerp(end, t) + jitter).with_tip(pressure));
		}
		self.tick(PointerSample::at(end + Vec3::Z));
	}

	fn hold(&mut self, sample: PointerSample, duration: Duration) {
		let end = self.now + duration;
		while self.now < end {
			self.tick(sample);
		}
	}
}

fn main() -> anyhow::Result<()> {
	if let Err(error) = configure_tracing() {
		// We can technically continue without logging.
		eprintln!("{error}");
	}

	fastrand::seed(7);
	let config = EditorConfig::builder()
		.stroke_color("rebeccapurple")
		.highlight_color("gold")
		.build()?;
	let mut session = Session {
		editor: Editor::new(config, LoggingHaptics::default()),
		now: Duration::ZERO,
	};

	session.scribble(vec3(0.0, 0.0, 0.0), vec3(0.3, 0.0, 0.0));
	session.scribble(vec3(0.0, 0.1, 0.0), vec3(0.3, 0.15, 0.05));
	session.editor.set_stroke_color(inkspace::parse_color("#2a9d8f")?);
	session.scribble(vec3(0.0, 0.2, 0.0), vec3(0.0, 0.4, 0.0));

	// Hover over the second stroke, grab it and twist it about the pointer.
	let hover = PointerSample::at(vec3(0.15, 0.125, 0.025));
	session.tick(hover);
	session.tick(hover.with_grab(true));
	for i in 1..=30 {
		let i = i as f32;
		let sample = PointerSample::at(hover.position() + vec3(0.0, 0.0, 0.005 * i))
			.with_orientation(Quat::from_rotation_y(0.02 * i))
			.with_grab(true);
		session.tick(sample);
	}
	session.tick(PointerSample::at(vec3(1.0, 1.0, 1.0)));

	for (id, vertices) in ribbons(session.editor.strokes(), vec3(0.0, 0.0, 2.0)) {
		tracing::info!(%id, vertices = vertices.len(), "ribbon");
	}

	// Erase the newest stroke, then hold to clear the rest.
	let erase = PointerSample::at(vec3(1.0, 1.0, 1.0)).with_back(true);
	session.tick(erase);
	session.tick(PointerSample::at(vec3(1.0, 1.0, 1.0)));
	let long_press = session.editor.config().long_press_duration();
	session.hold(erase, long_press + Session::FRAME);

	tracing::info!(
		strokes = session.editor.strokes().len(),
		pulses = session.editor.haptics().pulses,
		"session finished"
	);
	Ok(())
}
