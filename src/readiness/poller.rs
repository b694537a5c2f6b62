// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Fixed-interval polling loop with a deadline and cancellation.

use crate::config::PollSettings;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, sleep_until, Instant};
use tokio_util::sync::CancellationToken;

/// Terminal result of a poll.
///
/// `M` is whatever a failed tick reports; the last one is kept for diagnostics.
/// `attempts` counts ticks started, including one cut short by the deadline or
/// by cancellation.
#[derive(Debug)]
pub enum PollOutcome<M> {
    Ready {
        attempts: u32,
    },
    TimedOut {
        attempts: u32,
        elapsed: Duration,
        /// `None` when no tick finished before the deadline
        last_mismatch: Option<M>,
    },
    Cancelled {
        attempts: u32,
    },
}

impl<M> PollOutcome<M> {
    pub fn attempts(&self) -> u32 {
        match self {
            PollOutcome::Ready { attempts }
            | PollOutcome::TimedOut { attempts, .. }
            | PollOutcome::Cancelled { attempts } => *attempts,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, PollOutcome::Ready { .. })
    }
}

/// Run `tick` until it returns `Ok(())`, the deadline passes, or `cancel` fires.
///
/// The first tick runs immediately and later ticks are spaced by
/// `settings.interval`. A tick is never started at or past the deadline, so a
/// poll that never succeeds makes `max(1, ceil(timeout / interval))` attempts.
/// A tick still running at the deadline is abandoned, so the poll never outlives
/// `settings.timeout` by more than the time to drop it. Cancellation interrupts
/// both the sleep and an in-flight tick.
pub async fn poll_until<F, Fut, M>(
    settings: PollSettings,
    cancel: &CancellationToken,
    mut tick: F,
) -> PollOutcome<M>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), M>>,
{
    let start = Instant::now();
    let deadline = start + settings.timeout;
    let mut attempts = 0u32;
    let mut last_mismatch = None;

    loop {
        if cancel.is_cancelled() {
            return PollOutcome::Cancelled { attempts };
        }
        attempts += 1;

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return PollOutcome::Cancelled { attempts },
            result = tick() => result,
            _ = sleep_until(deadline) => {
                return PollOutcome::TimedOut {
                    attempts,
                    elapsed: start.elapsed(),
                    last_mismatch,
                };
            }
        };

        match result {
            Ok(()) => return PollOutcome::Ready { attempts },
            Err(mismatch) => last_mismatch = Some(mismatch),
        }

        let elapsed = start.elapsed();
        if elapsed + settings.interval >= settings.timeout {
            return PollOutcome::TimedOut {
                attempts,
                elapsed,
                last_mismatch,
            };
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return PollOutcome::Cancelled { attempts },
            _ = sleep(settings.interval) => {}
        }
    }
}

/// Diagnostic context for a poll that ran out of time
#[derive(Debug, Clone)]
pub struct WaitTimeout {
    /// Object being waited on, e.g. "deployment kueue-system/kueue-controller-manager"
    pub target: String,
    pub expected: String,
    /// Description of the last failed tick
    pub last_observed: String,
    pub attempts: u32,
    pub elapsed: Duration,
    pub timeout: Duration,
}

impl fmt::Display for WaitTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Timed out waiting for {}", self.target)?;
        writeln!(f, "├─ Expected: {}", self.expected)?;
        writeln!(f, "├─ Last observed: {}", self.last_observed)?;
        writeln!(f, "├─ Attempts: {}", self.attempts)?;
        writeln!(f, "├─ Elapsed: {:?}", self.elapsed)?;
        write!(f, "└─ Timeout: {:?}", self.timeout)
    }
}

impl std::error::Error for WaitTimeout {}
