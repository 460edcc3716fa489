//! Lockout countdown
//!
//! One scheduled task per arm. Re-arming restarts the countdown, and a
//! generation counter keeps a superseded or canceled task from ever
//! firing: the expiry callback receives the generation it was armed with
//! and must check `is_current` before mutating anything.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Single-shot countdown driving the LOCKED → READY transition
#[derive(Debug, Default)]
pub struct LockoutTimer {
    generation: u64,
    deadline: Option<Instant>,
    task: Option<JoinHandle<()>>,
}

impl LockoutTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the countdown. `on_expire` runs once, no earlier than
    /// `duration` after arming, unless `cancel` or a re-arm supersedes it
    /// first. The callback is handed the generation it belongs to.
    pub fn arm<F, Fut>(&mut self, duration: Duration, on_expire: F)
    where
        F: FnOnce(u64) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        self.cancel();
        let generation = self.generation;
        self.deadline = Some(Instant::now() + duration);
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            on_expire(generation).await;
        }));
    }

    /// Cancel any armed countdown. Idempotent; safe after the task has
    /// already fired.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.deadline = None;
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Whether `generation` still identifies the live countdown. An
    /// expiry callback that fails this check lost a race with `cancel` or
    /// a re-arm and must return without acting.
    pub fn is_current(&self, generation: u64) -> bool {
        self.deadline.is_some() && self.generation == generation
    }

    /// Drop the countdown state once expiry has been acted on
    pub fn finish(&mut self) {
        self.deadline = None;
        self.task = None;
    }

    /// Seconds until expiry, rounded up, floored at zero
    pub fn remaining_secs(&self) -> u64 {
        match self.deadline {
            Some(deadline) => {
                let left = deadline.saturating_duration_since(Instant::now());
                left.as_secs() + u64::from(left.subsec_nanos() > 0)
            }
            None => 0,
        }
    }

    /// Whether a countdown is currently armed
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}
