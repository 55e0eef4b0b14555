// Counting signal used for the free-slot / filled-slot bookkeeping of the queue.

use crossbeam_utils::CachePadded;
use std::fmt;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering::{AcqRel, Acquire, Relaxed, Release};

use super::futex::{futex_wait, futex_wake, futex_wake_all};

/// High bit of the state word. Set once the semaphore is closed.
const CLOSED: u32 = 1 << 31;

/// Largest number of permits a [`Semaphore`] can hold.
pub const MAX_PERMITS: u32 = CLOSED - 1;

/// Returned by [`Semaphore::acquire`] once the semaphore is closed and drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("semaphore closed")]
pub struct SemaphoreClosed;

/// A blocking counting semaphore with a close flag.
///
/// The permit count and the closed bit share one `AtomicU32`, so a waiter that
/// goes to sleep on the futex is guaranteed to be woken by any later
/// `release()` or `close()`: both change the word it compared against.
///
/// Closing does not revoke permits. Waiters keep taking whatever permits are
/// left and only fail once the count reaches zero.
pub struct Semaphore {
    state: CachePadded<AtomicU32>,
}

impl Semaphore {
    pub fn new(permits: u32) -> Self {
        debug_assert!(permits <= MAX_PERMITS, "too many permits: {permits}");
        Self {
            state: CachePadded::new(AtomicU32::new(permits & MAX_PERMITS)),
        }
    }

    /// Take one permit, blocking the calling thread while none are available.
    pub fn acquire(&self) -> Result<(), SemaphoreClosed> {
        loop {
            let state = self.state.load(Acquire);
            if state & MAX_PERMITS > 0 {
                if self
                    .state
                    .compare_exchange_weak(state, state - 1, AcqRel, Relaxed)
                    .is_ok()
                {
                    return Ok(());
                }
                std::hint::spin_loop();
                continue;
            }
            if state & CLOSED != 0 {
                return Err(SemaphoreClosed);
            }
            futex_wait(&self.state, state);
        }
    }

    /// Return one permit and wake a single waiter.
    pub fn release(&self) {
        let prev = self.state.fetch_add(1, Release);
        debug_assert!(prev & MAX_PERMITS < MAX_PERMITS, "permit overflow");
        futex_wake(&self.state);
    }

    /// Close the semaphore and wake every waiter. Returns `true` on the first call.
    pub fn close(&self) -> bool {
        let prev = self.state.fetch_or(CLOSED, AcqRel);
        futex_wake_all(&self.state);
        prev & CLOSED == 0
    }

    /// Permits currently available.
    pub fn available(&self) -> u32 {
        self.state.load(Relaxed) & MAX_PERMITS
    }

    pub fn is_closed(&self) -> bool {
        self.state.load(Relaxed) & CLOSED != 0
    }
}

impl fmt::Debug for Semaphore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Semaphore")
            .field("available", &self.available())
            .field("closed", &self.is_closed())
            .finish()
    }
}
