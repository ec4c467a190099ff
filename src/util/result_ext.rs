pub trait ResultExt<T, E> {
	/// Discards the error after logging it. Used where failure must not interrupt the caller, e.g.
	/// best-effort feedback channels.
	fn ok_or_log(self) -> Option<T>
	where
		E: std::fmt::Display;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
	fn ok_or_log(self) -> Option<T>
	where
		E: std::fmt::Display,
	{
		self.inspect_err(|err| tracing::warn!(%err, "ignoring failure")).ok()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ok_or_log() {
		assert_eq!(Ok::<_, String>(3).ok_or_log(), Some(3));
		assert_eq!(Err::<u8, _>("nope".to_owned()).ok_or_log(), None);
	}
}
