//! Live clock using the system clock.

use chrono::{DateTime, SubsecRound, Utc};

use crate::ports::clock::Clock;

/// System clock. Timestamps are truncated to whole milliseconds so that
/// creation tokens serialize to a stable, compact RFC 3339 form.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}
