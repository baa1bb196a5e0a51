//! Best completion time per board size, and the persistence seam for it.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Best completion times in seconds, keyed by board size
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestTimes {
    by_size: BTreeMap<usize, f64>,
}

impl BestTimes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, board_size: usize) -> Option<f64> {
        self.by_size.get(&board_size).copied()
    }

    /// Record a finished game. Returns true if it is the new best for this
    /// board size.
    pub fn record(&mut self, board_size: usize, elapsed_secs: f64) -> bool {
        match self.by_size.get(&board_size) {
            Some(&best) if elapsed_secs >= best => false,
            _ => {
                self.by_size.insert(board_size, elapsed_secs);
                true
            }
        }
    }

    /// Entries ordered by board size
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.by_size.iter().map(|(&size, &secs)| (size, secs))
    }

    pub fn len(&self) -> usize {
        self.by_size.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_size.is_empty()
    }
}

/// Where best times live between runs
pub trait BestTimesStore: Send + Sync {
    fn load(&self) -> Result<BestTimes, StoreError>;

    fn save(&self, times: &BestTimes) -> Result<(), StoreError>;
}

/// In-memory store, for tests and hosts that persist elsewhere
#[derive(Default)]
pub struct MemoryStore {
    times: Mutex<BestTimes>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_times(times: BestTimes) -> Self {
        Self {
            times: Mutex::new(times),
        }
    }

    /// Current stored contents
    pub fn snapshot(&self) -> BestTimes {
        self.times.lock().map(|t| t.clone()).unwrap_or_default()
    }
}

impl BestTimesStore for MemoryStore {
    fn load(&self) -> Result<BestTimes, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, times: &BestTimes) -> Result<(), StoreError> {
        let mut stored = self
            .times
            .lock()
            .map_err(|e| StoreError::Format(e.to_string()))?;
        *stored = times.clone();
        Ok(())
    }
}

/// Format seconds as MM:SS, or H:MM:SS from one hour on
pub fn format_time(secs: f64) -> String {
    let total = secs.max(0.0).round() as u64;
    if total >= 3600 {
        let hours = total / 3600;
        let mins = (total % 3600) / 60;
        let secs = total % 60;
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        let mins = total / 60;
        let secs = total % 60;
        format!("{:02}:{:02}", mins, secs)
    }
}
