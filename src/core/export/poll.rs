//! Completion detection state
//!
//! OneNote writes exports in bursts with no completion signal. A file is only
//! considered finished once its size has been nonzero and unchanged for
//! `required_stable_ticks` consecutive polls.

use crate::domain::{LocationHint, OnexportError, Result};
use std::time::Duration;

/// Interval between two polls of the output file
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Consecutive unchanged nonzero observations needed to declare completion
pub const REQUIRED_STABLE_TICKS: u32 = 5;

/// Tick ceiling for notebooks on local disk (20 minutes)
pub const LOCAL_MAX_TICKS: u32 = 600;

/// Tick ceiling for network-hosted notebooks (30 minutes)
pub const NETWORK_MAX_TICKS: u32 = 900;

/// Timing parameters of the completion detector
///
/// Built through [`PollPolicy::new`], which rejects a zero interval and tick
/// counts below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    poll_interval: Duration,
    required_stable_ticks: u32,
    local_max_ticks: u32,
    network_max_ticks: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            poll_interval: POLL_INTERVAL,
            required_stable_ticks: REQUIRED_STABLE_TICKS,
            local_max_ticks: LOCAL_MAX_TICKS,
            network_max_ticks: NETWORK_MAX_TICKS,
        }
    }
}

impl PollPolicy {
    pub fn new(
        poll_interval: Duration,
        required_stable_ticks: u32,
        local_max_ticks: u32,
        network_max_ticks: u32,
    ) -> Result<Self> {
        if poll_interval.is_zero() {
            return Err(OnexportError::Validation(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        for (field, value) in [
            ("required_stable_ticks", required_stable_ticks),
            ("local_max_ticks", local_max_ticks),
            ("network_max_ticks", network_max_ticks),
        ] {
            if value < 1 {
                return Err(OnexportError::Validation(format!(
                    "{field} must be at least 1"
                )));
            }
        }

        Ok(Self {
            poll_interval,
            required_stable_ticks,
            local_max_ticks,
            network_max_ticks,
        })
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Consecutive unchanged nonzero polls that make a file complete
    pub fn required_stable_ticks(&self) -> u32 {
        self.required_stable_ticks
    }

    /// Tick ceiling for a notebook location
    pub fn max_ticks(&self, hint: LocationHint) -> u32 {
        match hint {
            LocationHint::Local => self.local_max_ticks,
            LocationHint::Network => self.network_max_ticks,
        }
    }

    /// Total time budget for a notebook location
    pub fn budget(&self, hint: LocationHint) -> Duration {
        self.poll_interval * self.max_ticks(hint)
    }
}

/// What a single poll saw, after updating the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Observation {
    /// The file does not exist (or is not visible yet)
    Missing,
    /// The file exists with zero bytes
    Empty,
    /// The file is nonzero and changed since the last poll
    Growing { size: u64 },
    /// The file is nonzero and unchanged, but not for long enough
    Stable { size: u64, ticks: u32 },
    /// The file has been stable for the required number of ticks
    Complete { size: u64 },
}

/// Polling state, owned by one run of the detector
#[derive(Debug)]
pub(crate) struct PollState {
    previous_size: i64,
    stable_ticks: u32,
    file_ever_seen: bool,
    required_stable_ticks: u32,
}

impl PollState {
    pub(crate) fn new(required_stable_ticks: u32) -> Self {
        Self {
            previous_size: -1,
            stable_ticks: 0,
            file_ever_seen: false,
            required_stable_ticks,
        }
    }

    /// Feed one observed size (`None` if the file is not visible)
    pub(crate) fn observe(&mut self, size: Option<u64>) -> Observation {
        let Some(size) = size else {
            return Observation::Missing;
        };

        self.file_ever_seen = true;
        let current = i64::try_from(size).unwrap_or(i64::MAX);

        let observation = if size > 0 && current == self.previous_size {
            self.stable_ticks += 1;
            if self.stable_ticks >= self.required_stable_ticks {
                Observation::Complete { size }
            } else {
                Observation::Stable {
                    size,
                    ticks: self.stable_ticks,
                }
            }
        } else if size > 0 {
            self.stable_ticks = 0;
            Observation::Growing { size }
        } else {
            self.stable_ticks = 0;
            Observation::Empty
        };

        self.previous_size = current;
        observation
    }

    pub(crate) fn file_ever_seen(&self) -> bool {
        self.file_ever_seen
    }

    /// Last observed size, zero if nothing was ever observed
    pub(crate) fn last_size(&self) -> u64 {
        u64::try_from(self.previous_size).unwrap_or(0)
    }

    /// Whether the loop ended on a file that exists but stayed empty
    pub(crate) fn ended_empty(&self) -> bool {
        self.file_ever_seen && self.previous_size == 0
    }
}
