use super::Queue::BoundedQueue;
use crate::MPMC::Structs::Payload;
use std::fmt;

// Debug proxy implementations that call the standalone debug functions
impl fmt::Debug for BoundedQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_bounded_queue(self, f)
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_payload(self, f)
    }
}
