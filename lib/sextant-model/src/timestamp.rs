use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// A point in time, as whole seconds and nanoseconds since the Unix epoch.
///
/// Both fields are signed and unchecked: a registry may hand over anything, and it is up to consumers to reject values
/// that fall outside of `seconds >= 0` and `0 <= nanos <= 999_999_999`.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Timestamp {
    seconds: i64,
    #[serde(default)]
    nanos: i64,
}

impl Timestamp {
    /// Creates a new `Timestamp`.
    pub const fn new(seconds: i64, nanos: i64) -> Self {
        Self { seconds, nanos }
    }

    /// Returns the current time.
    ///
    /// Times before the Unix epoch are clamped to the epoch.
    pub fn now() -> Self {
        SystemTime::now().into()
    }

    /// Returns the whole seconds component.
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Returns the nanoseconds component.
    pub const fn nanos(&self) -> i64 {
        self.nanos
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        let since_epoch = time.duration_since(UNIX_EPOCH).unwrap_or_default();
        Self {
            seconds: i64::try_from(since_epoch.as_secs()).unwrap_or(i64::MAX),
            nanos: i64::from(since_epoch.subsec_nanos()),
        }
    }
}
