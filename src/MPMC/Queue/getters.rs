use super::Queue::BoundedQueue;

/// Read-only observers for BoundedQueue.
///
/// None of these change the queue. The values can be stale by the time the
/// caller looks at them, so they are meant for monitoring, logs and tests.
impl BoundedQueue {
    /// Maximum number of queued payloads.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of payloads currently queued. Takes the structural lock briefly.
    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether [`close`](BoundedQueue::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Lock-free view of the closed flag, for hot loops.
    ///
    /// The semaphores are closed right after the flag, so this can lag
    /// [`is_closed`](BoundedQueue::is_closed) by a moment but never leads it.
    pub(crate) fn is_closing(&self) -> bool {
        self.free_slots.is_closed()
    }

    /// Free-slot permits currently available to producers.
    pub fn free_slots(&self) -> usize {
        self.free_slots.available() as usize
    }

    /// Filled-slot permits currently available to consumers.
    pub fn filled_slots(&self) -> usize {
        self.filled_slots.available() as usize
    }
}
