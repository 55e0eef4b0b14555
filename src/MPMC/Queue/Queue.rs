// The fixed-capacity queue shared by every producer and consumer thread.

use crate::Core::Semaphore;
use crate::MPMC::Structs::Payload;

use parking_lot::Mutex;
use std::collections::VecDeque;

/// A bounded, blocking, multi-producer multi-consumer FIFO of [`Payload`]s.
///
/// ### Concurrency Design:
/// - **free_slots** starts at `capacity` and counts the entries that may still be
///   pushed. **filled_slots** starts at zero and counts the entries ready to pop.
/// - **Push**: take a free-slot permit, lock, append, unlock, release a
///   filled-slot permit.
/// - **Pop**: take a filled-slot permit, lock, remove the head, unlock, release
///   a free-slot permit.
///
/// A thread always owns its capacity permit before it touches the structural
/// lock, so no thread ever sleeps on a semaphore while holding the lock. The two
/// permit counts therefore track `len` and `capacity - len` outside of the short
/// critical sections.
pub struct BoundedQueue {
    /// The ordered entries plus the closed flag, guarded by the structural lock.
    pub(crate) state: Mutex<QueueState>,

    /// Remaining capacity.
    pub(crate) free_slots: Semaphore,

    /// Entries available to consumers.
    pub(crate) filled_slots: Semaphore,

    /// Maximum number of queued payloads, fixed at construction.
    pub(crate) capacity: usize,
}

pub(crate) struct QueueState {
    pub(crate) items: VecDeque<Payload>,
    pub(crate) closed: bool,
    /// Makes the next entry reservation fail.
    #[cfg(test)]
    pub(crate) fail_next_reserve: bool,
}
