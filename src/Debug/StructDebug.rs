use crate::MPMC::BoundedQueue;
use crate::MPMC::Structs::Payload;
use std::fmt;

/// Number of leading bytes shown when printing a payload.
const PREVIEW_BYTES: usize = 16;

/// Debug function for BoundedQueue
///
/// Shows the live count next to both permit counts so a broken invariant
/// (count drifting away from the semaphores) is visible in a single line.
pub fn debug_bounded_queue(queue: &BoundedQueue, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("BoundedQueue")
        .field("capacity", &queue.capacity())
        .field("len", &queue.len())
        .field("free_slots", &queue.free_slots())
        .field("filled_slots", &queue.filled_slots())
        .field("closed", &queue.is_closed())
        .finish()
}

/// Debug function for Payload
///
/// Never dumps the whole buffer, only its size and a short lossy preview.
pub fn debug_payload(payload: &Payload, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let preview_len = payload.size().min(PREVIEW_BYTES);
    let preview = String::from_utf8_lossy(&payload.data()[..preview_len]);

    f.debug_struct("Payload")
        .field("size", &payload.size())
        .field("event_id", &payload.event_id)
        .field("event_correlation_id", &payload.event_correlation_id)
        .field(
            "preview",
            &format_args!(
                "{:?}{}",
                preview,
                if payload.size() > PREVIEW_BYTES { ".." } else { "" }
            ),
        )
        .finish()
}
