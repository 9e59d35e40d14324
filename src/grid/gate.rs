//! Single-permit exclusive access
//!
//! The gate wraps the whole shared grid state in one async mutex. A
//! [`GateGuard`] is the only way in; dropping it releases the permit, so
//! the permit is returned on every exit path, including a task being
//! cancelled while it holds the guard.
//!
//! The gate also counts how many holders are inside at once, which lets
//! tests assert the count never exceeds one.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use tokio::sync::{Mutex, MutexGuard};

#[derive(Debug)]
pub struct Gate<T> {
    inner: Mutex<T>,
    occupancy: AtomicUsize,
    peak: AtomicUsize,
    entries: AtomicU64,
}

impl<T> Gate<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(value),
            occupancy: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            entries: AtomicU64::new(0),
        }
    }

    /// Wait for the permit
    pub async fn enter(&self) -> GateGuard<'_, T> {
        let guard = self.inner.lock().await;
        let inside = self.occupancy.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(inside, Ordering::SeqCst);
        self.entries.fetch_add(1, Ordering::Relaxed);
        GateGuard {
            guard,
            occupancy: &self.occupancy,
        }
    }

    /// Direct access while nothing else can hold the gate
    pub fn get_mut(&mut self) -> &mut T {
        self.inner.get_mut()
    }

    /// Holders inside right now
    pub fn occupancy(&self) -> usize {
        self.occupancy.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneous holders ever observed
    pub fn peak_occupancy(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Total number of times the permit was granted
    pub fn entries(&self) -> u64 {
        self.entries.load(Ordering::Relaxed)
    }
}

/// Scoped permit. Releases on drop.
pub struct GateGuard<'a, T> {
    guard: MutexGuard<'a, T>,
    occupancy: &'a AtomicUsize,
}

impl<T> Deref for GateGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> DerefMut for GateGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}

impl<T> Drop for GateGuard<'_, T> {
    fn drop(&mut self) {
        // runs before the mutex guard field is dropped
        self.occupancy.fetch_sub(1, Ordering::SeqCst);
    }
}
