// src/engine/fetches.rs

//! Sequence numbers for overlapping fetches.
//!
//! Every fetch gets a number when it is issued. Fetches may complete in any
//! order; only a completion newer than the last one applied is accepted, so
//! the displayed graph always comes from the most recently issued fetch that
//! has finished.

use tracing::debug;

#[derive(Debug, Default)]
pub struct FetchTracker {
    next_seq: u64,
    applied: Option<u64>,
}

impl FetchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the sequence number for a new fetch.
    pub fn issue(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Decide whether the completion of fetch `seq` should be applied, and
    /// record it if so.
    pub fn accept(&mut self, seq: u64) -> bool {
        match self.applied {
            Some(last) if seq <= last => {
                debug!(seq, last_applied = last, "dropping stale fetch result");
                false
            }
            _ => {
                self.applied = Some(seq);
                true
            }
        }
    }

    /// Sequence number of the last applied completion.
    pub fn last_applied(&self) -> Option<u64> {
        self.applied
    }

    /// Number of fetches issued so far.
    pub fn issued(&self) -> u64 {
        self.next_seq
    }
}
