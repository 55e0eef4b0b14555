// src/MPMC/producer.rs
use crate::MPMC::error::QueueError;
use crate::MPMC::{BoundedQueue, Payload};
use log::{debug, error, info, warn};
use std::io;
use std::sync::Arc;

/// Where producers get their bytes from.
///
/// `fetch` fills the front of `buf` (whose length is the maximum payload size)
/// and returns how many bytes it wrote. `Ok(0)` and `Err(_)` both mean "nothing
/// this time"; the producer drops the buffer and asks again.
pub trait PayloadSource: Send {
    fn fetch(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl<F> PayloadSource for F
where
    F: FnMut(&mut [u8]) -> io::Result<usize> + Send,
{
    fn fetch(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self(buf)
    }
}

/// Counters returned by [`ProducerTask::run`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProducerReport {
    /// Payloads successfully queued.
    pub pushed: u64,
    /// Fetches that yielded no payload (source error, zero or oversized count,
    /// buffer allocation failure).
    pub discarded: u64,
    /// Payloads dropped because the queue failed to store them.
    pub failed: u64,
}

/// A worker that moves payloads from a [`PayloadSource`] into the queue.
pub struct ProducerTask<S: PayloadSource> {
    id: usize,
    queue: Arc<BoundedQueue>,
    source: S,
    max_payload: usize,
    limit: Option<u64>,
}

impl<S: PayloadSource> ProducerTask<S> {
    pub fn new(id: usize, queue: Arc<BoundedQueue>, source: S, max_payload: usize) -> Self {
        Self {
            id,
            queue,
            source,
            max_payload,
            limit: None,
        }
    }

    /// Stop after `limit` successful pushes instead of running until the queue closes.
    pub fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Run the fetch/push loop.
    ///
    /// Returns when the queue is closed or the push limit is reached.
    pub fn run(mut self) -> ProducerReport {
        let mut report = ProducerReport::default();
        debug!("Producer {} started", self.id);

        while self.limit.map_or(true, |limit| report.pushed < limit) {
            if self.queue.is_closing() {
                break;
            }

            let mut data = Vec::new();
            if let Err(e) = data.try_reserve_exact(self.max_payload) {
                error!("Memory allocation failed for data packet: {e}");
                report.discarded += 1;
                continue;
            }
            data.resize(self.max_payload, 0);

            let count = match self.source.fetch(&mut data) {
                Ok(count) => count,
                Err(e) => {
                    debug!("Producer {}: source failed: {e}", self.id);
                    report.discarded += 1;
                    continue;
                }
            };
            if count == 0 {
                report.discarded += 1;
                continue;
            }
            if count > self.max_payload {
                warn!(
                    "Producer {}: source reported {count} bytes for a {} byte buffer",
                    self.id, self.max_payload
                );
                report.discarded += 1;
                continue;
            }
            data.truncate(count);

            match self.queue.push(Payload::new(data)) {
                Ok(()) => report.pushed += 1,
                Err(QueueError::Closed) => break,
                Err(e) => {
                    error!("Producer {}: push failed ({}): {e}", self.id, e.as_label());
                    report.failed += 1;
                }
            }
        }

        info!(
            "Producer {} stopped: {} pushed, {} discarded, {} failed",
            self.id, report.pushed, report.discarded, report.failed
        );
        report
    }
}
