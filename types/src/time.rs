//! Chain timestamp type.
//!
//! The chain keeps time as unsigned 32-bit Unix seconds (UTC).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A point in chain time, seconds since the Unix epoch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimePointSec(u32);

impl TimePointSec {
    /// The epoch (time zero), the lowest key in time-ordered ranges.
    pub const MIN: Self = Self(0);
    /// The highest representable time, the upper key in time-ordered ranges.
    pub const MAX: Self = Self(u32::MAX);

    pub fn new(secs: u32) -> Self {
        Self(secs)
    }

    /// Current wall-clock time, saturating at the type bounds.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self(u32::try_from(secs).unwrap_or(u32::MAX))
    }

    pub fn utc_seconds(&self) -> u32 {
        self.0
    }

    /// This time shifted forward by `secs`, saturating at [`TimePointSec::MAX`].
    pub fn saturating_add(self, secs: u32) -> Self {
        Self(self.0.saturating_add(secs))
    }
}

impl fmt::Display for TimePointSec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

impl From<u32> for TimePointSec {
    fn from(secs: u32) -> Self {
        Self(secs)
    }
}
