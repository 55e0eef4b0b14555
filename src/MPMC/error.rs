//! Error types for the queue and the supervisor configuration.

use thiserror::Error;

/// Errors produced by [`BoundedQueue`](crate::MPMC::BoundedQueue) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// The queue was closed; the push was refused or there is nothing left to pop.
    #[error("queue is closed")]
    Closed,

    /// Storage for a new entry could not be allocated. The payload was dropped.
    #[error("memory allocation failed for {requested} queue entries")]
    AllocationFailed { requested: usize },

    #[error("invalid queue capacity {capacity} (must be between 1 and {max})")]
    InvalidCapacity { capacity: usize, max: usize },
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

/// Errors raised while validating a [`SupervisorBuilder`](crate::MPMC::SupervisorBuilder).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid queue capacity {capacity} (must be between 1 and {max})")]
    InvalidCapacity { capacity: usize, max: usize },

    #[error("at least one producer is required")]
    NoProducers,

    #[error("at least one consumer is required")]
    NoConsumers,

    #[error("maximum payload size must be greater than zero")]
    ZeroPayloadSize,
}

impl QueueError {
    /// Short stable label for log lines.
    pub fn as_label(&self) -> &'static str {
        match self {
            QueueError::Closed => "queue_closed",
            QueueError::AllocationFailed { .. } => "queue_allocation_failed",
            QueueError::InvalidCapacity { .. } => "queue_invalid_capacity",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_offending_values() {
        let err = QueueError::InvalidCapacity { capacity: 0, max: 10 };
        assert_eq!(
            err.to_string(),
            "invalid queue capacity 0 (must be between 1 and 10)"
        );
        assert_eq!(err.as_label(), "queue_invalid_capacity");
        assert_eq!(QueueError::Closed.to_string(), "queue is closed");
    }
}
