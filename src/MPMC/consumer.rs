// src/MPMC/consumer.rs

use crate::MPMC::error::QueueError;
use crate::MPMC::BoundedQueue;
use log::{debug, error, info};
use std::sync::Arc;

/// Where consumers hand the received bytes.
///
/// The sink only borrows the bytes for the duration of the call; the consumer
/// drops the payload right after `consume` returns.
pub trait PayloadSink: Send {
    fn consume(&mut self, data: &[u8]);
}

impl<F> PayloadSink for F
where
    F: FnMut(&[u8]) + Send,
{
    fn consume(&mut self, data: &[u8]) {
        self(data)
    }
}

/// Counters returned by [`ConsumerTask::run`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConsumerReport {
    /// Payloads handed to the sink.
    pub consumed: u64,
    /// Empty sentinels skipped.
    pub skipped: u64,
}

/// A worker that drains the queue into a [`PayloadSink`].
pub struct ConsumerTask<K: PayloadSink> {
    id: usize,
    queue: Arc<BoundedQueue>,
    sink: K,
}

impl<K: PayloadSink> ConsumerTask<K> {
    pub fn new(id: usize, queue: Arc<BoundedQueue>, sink: K) -> Self {
        Self { id, queue, sink }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Run the pop/consume loop until the queue is closed and drained.
    pub fn run(mut self) -> ConsumerReport {
        let mut report = ConsumerReport::default();
        debug!("Consumer {} started", self.id);

        loop {
            match self.queue.pop() {
                Ok(payload) if payload.is_empty() => report.skipped += 1,
                Ok(payload) => {
                    self.sink.consume(payload.data());
                    report.consumed += 1;
                }
                Err(QueueError::Closed) => break,
                Err(e) => error!("Consumer {}: pop failed: {e}", self.id),
            }
        }

        info!(
            "Consumer {} stopped: {} consumed, {} skipped",
            self.id, report.consumed, report.skipped
        );
        report
    }
}
