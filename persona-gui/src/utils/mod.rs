use std::time::{Duration, SystemTime, SystemTimeError, UNIX_EPOCH};

#[cfg(test)]
pub mod mock;

#[cfg(test)]
pub mod sandbox;

/// Returns the current time as a [`Duration`] since the UNIX epoch.
pub fn now() -> Duration {
    now_fallible().expect("cannot fail")
}

/// Fallible version of [`now`].
pub fn now_fallible() -> Result<Duration, SystemTimeError> {
    SystemTime::now().duration_since(UNIX_EPOCH)
}
