use std::time::Duration;

pub const CLICK_AMPLITUDE: f32 = 1.0;
pub const CLICK_DURATION: Duration = Duration::from_millis(11);

#[derive(Clone, Debug, thiserror::Error)]
pub enum HapticsError {
	#[error("no haptic device connected")]
	Disconnected,

	#[error("haptic impulse rejected: {0}")]
	Rejected(String),
}

static_assertions::assert_impl_all!(HapticsError: std::error::Error, Send, Sync);

/// Something that can deliver tactile feedback to the pointer.
///
/// Delivery is best effort. The editor logs and drops any error these return.
pub trait HapticsSink {
	/// A single impulse. `amplitude` is in `[0, 1]`.
	fn pulse(&mut self, amplitude: f32, duration: Duration) -> Result<(), HapticsError>;

	/// A short, strong tick used to acknowledge discrete actions.
	fn click(&mut self) -> Result<(), HapticsError> {
		self.pulse(CLICK_AMPLITUDE, CLICK_DURATION)
	}
}

impl<H: HapticsSink + ?Sized> HapticsSink for &mut H {
	fn pulse(&mut self, amplitude: f32, duration: Duration) -> Result<(), HapticsError> {
		(**self).pulse(amplitude, duration)
	}

	fn click(&mut self) -> Result<(), HapticsError> {
		(**self).click()
	}
}

impl<H: HapticsSink + ?Sized> HapticsSink for Box<H> {
	fn pulse(&mut self, amplitude: f32, duration: Duration) -> Result<(), HapticsError> {
		(**self).pulse(amplitude, duration)
	}

	fn click(&mut self) -> Result<(), HapticsError> {
		(**self).click()
	}
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullHaptics;

impl HapticsSink for NullHaptics {
	fn pulse(&mut self, _amplitude: f32, _duration: Duration) -> Result<(), HapticsError> {
		Ok(())
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HapticIntent {
	Pulse { amplitude: f32, duration: Duration },
	Click,
}

/// Keeps every request in order, for tests and replay.
#[derive(Clone, Debug, Default)]
pub struct RecordingHaptics {
	intents: Vec<HapticIntent>,
}

impl RecordingHaptics {
	pub fn intents(&self) -> &[HapticIntent] {
		&self.intents
	}

	pub fn take(&mut self) -> Vec<HapticIntent> {
		std::mem::take(&mut self.intents)
	}

	pub fn clicks(&self) -> usize {
		self
			.intents
			.iter()
			.filter(|i| matches!(i, HapticIntent::Click))
			.count()
	}
}

impl HapticsSink for RecordingHaptics {
	fn pulse(&mut self, amplitude: f32, duration: Duration) -> Result<(), HapticsError> {
		self.intents.push(HapticIntent::Pulse {
			amplitude,
			duration,
		});
		Ok(())
	}

	fn click(&mut self) -> Result<(), HapticsError> {
		self.intents.push(HapticIntent::Click);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Counter(u32);

	impl HapticsSink for Counter {
		fn pulse(&mut self, amplitude: f32, duration: Duration) -> Result<(), HapticsError> {
			assert_eq!(amplitude, CLICK_AMPLITUDE);
			assert_eq!(duration, CLICK_DURATION);
			self.0 += 1;
			Ok(())
		}
	}

	#[test]
	fn default_click_is_a_pulse() {
		let mut counter = Counter(0);
		counter.click().unwrap();
		(&mut counter).click().unwrap();
		assert_eq!(counter.0, 2);
	}

	#[test]
	fn recording() {
		let mut haptics = RecordingHaptics::default();
		haptics.click().unwrap();
		haptics.pulse(0.5, Duration::from_millis(10)).unwrap();
		assert_eq!(haptics.clicks(), 1);
		assert_eq!(
			haptics.take(),
			vec![
				HapticIntent::Click,
				HapticIntent::Pulse {
					amplitude: 0.5,
					duration: Duration::from_millis(10)
				}
			]
		);
		assert!(haptics.intents().is_empty());
	}
}
