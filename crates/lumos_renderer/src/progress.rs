//! Row progress reporting for parallel renders.

use std::sync::atomic::{AtomicU32, Ordering};

/// Rows between progress log lines.
const REPORT_EVERY: u32 = 5;

/// Counts finished rows across render threads and logs them.
#[derive(Debug)]
pub struct Progress {
    done: AtomicU32,
    total: u32,
}

impl Progress {
    pub fn new(total: u32) -> Self {
        Self {
            done: AtomicU32::new(0),
            total,
        }
    }

    /// Mark one row finished. Returns the number of finished rows.
    pub fn inc(&self) -> u32 {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        if done % REPORT_EVERY == 0 || done == self.total {
            log::debug!(
                "Rows done: {}/{} ({:.1}%)",
                done,
                self.total,
                100.0 * self.fraction_of(done)
            );
        }
        done
    }

    pub fn get_raw(&self) -> u32 {
        self.done.load(Ordering::Relaxed)
    }

    /// Finished fraction in [0, 1].
    pub fn get(&self) -> f32 {
        self.fraction_of(self.get_raw())
    }

    fn fraction_of(&self, done: u32) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            done as f32 / self.total as f32
        }
    }
}
