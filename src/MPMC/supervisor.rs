// Startup and shutdown of the producer/consumer thread pools.

use super::consumer::{ConsumerReport, ConsumerTask, PayloadSink};
use super::producer::{PayloadSource, ProducerReport, ProducerTask};
use super::{BoundedQueue, SupervisorBuilder};
use log::{error, info, warn};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Validated configuration for one queue and its worker threads.
///
/// Built with [`SupervisorBuilder`].
#[derive(Debug, Clone)]
pub struct Supervisor {
    pub(crate) capacity: usize,
    pub(crate) producers: usize,
    pub(crate) consumers: usize,
    pub(crate) max_payload: usize,
    pub(crate) payloads_per_producer: Option<u64>,
}

/// Totals collected from every task once they have all stopped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SupervisorReport {
    pub pushed: u64,
    pub discarded: u64,
    pub failed: u64,
    pub consumed: u64,
    pub skipped: u64,
    /// Payloads still queued after every consumer stopped.
    pub abandoned: usize,
    /// Tasks that panicked instead of returning a report.
    pub panicked: usize,
}

impl SupervisorReport {
    fn add_producer(&mut self, report: ProducerReport) {
        self.pushed += report.pushed;
        self.discarded += report.discarded;
        self.failed += report.failed;
    }

    fn add_consumer(&mut self, report: ConsumerReport) {
        self.consumed += report.consumed;
        self.skipped += report.skipped;
    }
}

/// Requests a graceful shutdown from any thread, e.g. a Ctrl+C handler.
///
/// Triggering closes the queue: producers stop at their next push or fetch,
/// consumers drain what is left and stop.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    queue: Arc<BoundedQueue>,
}

impl ShutdownSignal {
    /// Returns `true` for the call that actually initiated the shutdown.
    pub fn trigger(&self) -> bool {
        let first = self.queue.close();
        if first {
            info!("Shutdown requested");
        }
        first
    }

    pub fn is_triggered(&self) -> bool {
        self.queue.is_closed()
    }
}

/// Running tasks started by [`Supervisor::spawn`].
pub struct SupervisorHandle {
    queue: Arc<BoundedQueue>,
    producers: Vec<JoinHandle<ProducerReport>>,
    consumers: Vec<JoinHandle<ConsumerReport>>,
}

/// Lives on a consumer thread and notices when it unwinds.
///
/// Once the last consumer is gone, producers would block forever on a queue
/// nobody drains, so the last one to die by panic closes it.
struct ConsumerExit {
    id: usize,
    queue: Arc<BoundedQueue>,
    live: Arc<AtomicUsize>,
}

impl ConsumerExit {
    fn new(id: usize, queue: Arc<BoundedQueue>, live: Arc<AtomicUsize>) -> Self {
        live.fetch_add(1, Ordering::AcqRel);
        Self { id, queue, live }
    }
}

impl Drop for ConsumerExit {
    fn drop(&mut self) {
        let left = self.live.fetch_sub(1, Ordering::AcqRel) - 1;
        if !thread::panicking() {
            return;
        }
        error!("Consumer {} panicked ({left} consumers left)", self.id);
        if left == 0 && self.queue.close() {
            error!("No consumer left, queue closed");
        }
    }
}

impl Supervisor {
    pub fn builder() -> SupervisorBuilder {
        SupervisorBuilder::new()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn producers(&self) -> usize {
        self.producers
    }

    pub fn consumers(&self) -> usize {
        self.consumers
    }

    pub fn max_payload(&self) -> usize {
        self.max_payload
    }

    /// Create the queue and start `producers` + `consumers` named threads.
    ///
    /// `make_source` and `make_sink` are called once per task with the task index.
    /// If a thread cannot be spawned the queue is closed, the threads already
    /// running are joined and the spawn error is returned.
    pub fn spawn<S, K, FS, FK>(
        &self,
        mut make_source: FS,
        mut make_sink: FK,
    ) -> io::Result<SupervisorHandle>
    where
        S: PayloadSource + 'static,
        K: PayloadSink + 'static,
        FS: FnMut(usize) -> S,
        FK: FnMut(usize) -> K,
    {
        let queue = BoundedQueue::new(self.capacity)
            .map(Arc::new)
            .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e))?;

        let mut handle = SupervisorHandle {
            queue: queue.clone(),
            producers: Vec::with_capacity(self.producers),
            consumers: Vec::with_capacity(self.consumers),
        };

        for id in 0..self.producers {
            let task = ProducerTask::new(id, queue.clone(), make_source(id), self.max_payload)
                .with_limit(self.payloads_per_producer);
            match thread::Builder::new()
                .name(format!("producer-{id}"))
                .spawn(move || task.run())
            {
                Ok(join) => handle.producers.push(join),
                Err(e) => return Err(handle.abort(e)),
            }
        }

        let live = Arc::new(AtomicUsize::new(0));
        for id in 0..self.consumers {
            let task = ConsumerTask::new(id, queue.clone(), make_sink(id));
            let exit = ConsumerExit::new(id, queue.clone(), live.clone());
            match thread::Builder::new()
                .name(format!("consumer-{id}"))
                .spawn(move || {
                    let _exit = exit;
                    task.run()
                })
            {
                Ok(join) => handle.consumers.push(join),
                Err(e) => return Err(handle.abort(e)),
            }
        }

        info!(
            "Supervisor started {} producers and {} consumers (capacity {}, max payload {} bytes)",
            self.producers, self.consumers, self.capacity, self.max_payload
        );
        Ok(handle)
    }

    /// [`spawn`](Self::spawn) followed by [`SupervisorHandle::join`].
    pub fn run<S, K, FS, FK>(&self, make_source: FS, make_sink: FK) -> io::Result<SupervisorReport>
    where
        S: PayloadSource + 'static,
        K: PayloadSink + 'static,
        FS: FnMut(usize) -> S,
        FK: FnMut(usize) -> K,
    {
        Ok(self.spawn(make_source, make_sink)?.join())
    }
}

impl SupervisorHandle {
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            queue: self.queue.clone(),
        }
    }

    pub fn queue(&self) -> &Arc<BoundedQueue> {
        &self.queue
    }

    /// Wait for every task to stop.
    ///
    /// Producers are joined first. Once they are all done the queue is closed,
    /// which lets the consumers drain the remaining payloads and return.
    /// If every consumer panics the queue is closed early, so blocked
    /// producers return and the panics show up in the report.
    /// Producers without a push limit only stop after a shutdown signal, so
    /// without one this blocks for the lifetime of the process.
    pub fn join(self) -> SupervisorReport {
        let mut report = SupervisorReport::default();

        for join in self.producers {
            match join.join() {
                Ok(producer) => report.add_producer(producer),
                Err(_) => {
                    error!("A producer thread panicked");
                    report.panicked += 1;
                }
            }
        }

        self.queue.close();

        for join in self.consumers {
            match join.join() {
                Ok(consumer) => report.add_consumer(consumer),
                Err(_) => {
                    error!("A consumer thread panicked");
                    report.panicked += 1;
                }
            }
        }

        report.abandoned = self.queue.len();
        if report.abandoned > 0 {
            warn!("{} payloads left in the queue at shutdown", report.abandoned);
        }
        info!(
            "Supervisor stopped: {} pushed, {} consumed, {} discarded, {} failed",
            report.pushed, report.consumed, report.discarded, report.failed
        );
        report
    }

    fn abort(self, cause: io::Error) -> io::Error {
        error!("Failed to spawn worker thread: {cause}");
        self.queue.close();
        let report = self.join();
        error!(
            "Startup aborted after {} pushed, {} consumed, {} abandoned, {} panicked",
            report.pushed, report.consumed, report.abandoned, report.panicked
        );
        cause
    }
}
