use std::collections::{TryReserveError, VecDeque};

use log::{error, info, trace};
use parking_lot::Mutex;

use super::Queue::{BoundedQueue, QueueState};
use crate::Core::{Semaphore, MAX_PERMITS};
use crate::MPMC::error::{QueueError, QueueResult};
use crate::MPMC::Structs::Payload;

impl BoundedQueue {
    /// Create an empty queue holding at most `capacity` payloads.
    ///
    /// Storage for every entry is reserved up front, so a running queue does not
    /// normally allocate on `push`.
    pub fn new(capacity: usize) -> QueueResult<Self> {
        if capacity == 0 || capacity > MAX_PERMITS as usize {
            return Err(QueueError::InvalidCapacity {
                capacity,
                max: MAX_PERMITS as usize,
            });
        }

        let mut items = VecDeque::new();
        items.try_reserve_exact(capacity).map_err(|e| {
            error!("Memory allocation failed for queue of capacity {capacity}: {e}");
            QueueError::AllocationFailed {
                requested: capacity,
            }
        })?;

        let queue = Self {
            state: Mutex::new(QueueState {
                items,
                closed: false,
                #[cfg(test)]
                fail_next_reserve: false,
            }),
            free_slots: Semaphore::new(capacity as u32),
            filled_slots: Semaphore::new(0),
            capacity,
        };
        info!("Queue initialized (capacity {capacity})");
        Ok(queue)
    }

    /// Append `payload` at the tail, blocking while the queue is full.
    ///
    /// # Returns
    /// * `Ok(())` once the payload is queued
    /// * `Err(QueueError::Closed)` if the queue was closed before a slot freed up
    /// * `Err(QueueError::AllocationFailed)` if the entry could not be stored
    ///
    /// On every error path the payload is dropped and the slot it would have
    /// used is handed back.
    pub fn push(&self, payload: Payload) -> QueueResult<()> {
        if self.free_slots.acquire().is_err() {
            return Err(QueueError::Closed);
        }

        let mut state = self.state.lock();
        if state.closed {
            drop(state);
            self.free_slots.release();
            return Err(QueueError::Closed);
        }
        if let Err(e) = state.reserve_entry() {
            drop(state);
            self.free_slots.release();
            error!(
                "Memory allocation failed for new queue entry ({} bytes dropped): {e}",
                payload.size()
            );
            return Err(QueueError::AllocationFailed { requested: 1 });
        }
        state.items.push_back(payload);
        let len = state.items.len();
        drop(state);

        self.filled_slots.release();
        trace!("Data enqueued ({len}/{})", self.capacity);
        Ok(())
    }

    /// Remove and return the head payload, blocking while the queue is empty.
    ///
    /// # Returns
    /// * `Ok(payload)` with the oldest queued payload
    /// * `Ok(Payload::empty())` if the queue was found empty after being
    ///   signalled (an internal consistency error, logged)
    /// * `Err(QueueError::Closed)` once the queue is closed and fully drained
    pub fn pop(&self) -> QueueResult<Payload> {
        if self.filled_slots.acquire().is_err() {
            return Err(QueueError::Closed);
        }

        let mut state = self.state.lock();
        let head = state.items.pop_front();
        let len = state.items.len();
        drop(state);

        // The slot goes back even on the inconsistent path so the free-slot
        // count cannot drift downwards.
        self.free_slots.release();

        match head {
            Some(payload) => {
                trace!("Data dequeued ({len}/{})", self.capacity);
                Ok(payload)
            }
            None => {
                error!("Tried to dequeue from an empty queue");
                Ok(Payload::empty())
            }
        }
    }

    /// Close the queue and wake every blocked thread.
    ///
    /// Pending and later pushes fail with [`QueueError::Closed`]. Pops keep
    /// returning what is already queued and fail once it is drained.
    /// Returns `true` for the call that actually closed the queue.
    pub fn close(&self) -> bool {
        let mut state = self.state.lock();
        let first = !state.closed;
        state.closed = true;
        let remaining = state.items.len();
        drop(state);

        self.free_slots.close();
        self.filled_slots.close();
        if first {
            info!("Queue closed ({remaining} payloads left to drain)");
        }
        first
    }
}

impl QueueState {
    /// Room for one more entry. Storage is reserved at construction, so this
    /// only allocates if that reservation was smaller than the capacity.
    fn reserve_entry(&mut self) -> Result<(), TryReserveError> {
        #[cfg(test)]
        {
            if std::mem::take(&mut self.fail_next_reserve) {
                // An impossible request yields a genuine `CapacityOverflow`.
                return self.items.try_reserve(usize::MAX);
            }
        }
        self.items.try_reserve(1)
    }
}
