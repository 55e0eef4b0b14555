// The unit of data handed from producers to consumers.

/// An owned byte buffer plus two correlation identifiers.
///
/// A `Payload` is deliberately neither `Clone` nor `Copy`: it is moved from the
/// producer into the queue and from the queue into exactly one consumer, so its
/// buffer has a single owner at every point of the hand-off.
///
/// A zero-length payload is the "no payload" sentinel returned by
/// [`BoundedQueue::pop`](crate::MPMC::BoundedQueue::pop) on an internal
/// consistency error. Producers never enqueue one.
#[derive(Default, PartialEq, Eq)]
pub struct Payload {
    pub data: Vec<u8>,
    /// Reserved, always zero for now.
    pub event_id: u64,
    /// Reserved, always zero for now.
    pub event_correlation_id: u64,
}

impl Payload {
    pub fn new(data: Vec<u8>) -> Self {
        Self::with_ids(data, 0, 0)
    }

    pub fn with_ids(data: Vec<u8>, event_id: u64, event_correlation_id: u64) -> Self {
        Self {
            data,
            event_id,
            event_correlation_id,
        }
    }

    /// The empty sentinel.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of bytes carried.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

impl From<Vec<u8>> for Payload {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sentinel_has_no_bytes_and_zero_ids() {
        let payload = Payload::empty();
        assert_eq!(payload.size(), 0);
        assert!(payload.is_empty());
        assert_eq!(payload.event_id, 0);
        assert_eq!(payload.event_correlation_id, 0);
    }

    #[test]
    fn new_payload_keeps_buffer_and_reserves_ids() {
        let payload = Payload::new(b"0123456789".to_vec());
        assert_eq!(payload.size(), 10);
        assert_eq!(payload.data(), b"0123456789");
        assert_eq!((payload.event_id, payload.event_correlation_id), (0, 0));
        assert_eq!(payload.into_data(), b"0123456789".to_vec());
    }

    #[test]
    fn debug_shows_preview_not_whole_buffer() {
        let payload = Payload::with_ids(vec![b'a'; 1024], 3, 4);
        let rendered = format!("{:?}", payload);
        assert!(rendered.contains("size: 1024"), "{rendered}");
        assert!(rendered.contains("event_id: 3"), "{rendered}");
        assert!(rendered.len() < 200, "{rendered}");
    }
}
