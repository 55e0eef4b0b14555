mod builder;
mod consumer;
pub mod error;
mod producer;
mod supervisor;

pub use builder::SupervisorBuilder;
pub use consumer::{ConsumerReport, ConsumerTask, PayloadSink};
pub use error::{ConfigError, QueueError, QueueResult};
pub use producer::{PayloadSource, ProducerReport, ProducerTask};
pub use supervisor::{ShutdownSignal, Supervisor, SupervisorHandle, SupervisorReport};

pub mod Queue {
    pub mod Queue;
    pub mod Queue_impl;
    mod debug;
    mod getters;
    pub use Queue::BoundedQueue; // re-export for stable path
}

pub mod Structs {
    pub mod Payload_Structs;
    pub use Payload_Structs::Payload; // re-export for stable path
}

pub use Queue::BoundedQueue;
pub use Structs::Payload;
pub use builder::{DEFAULT_CAPACITY, DEFAULT_CONSUMERS, DEFAULT_MAX_PAYLOAD, DEFAULT_PRODUCERS};
