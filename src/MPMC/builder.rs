use super::error::ConfigError;
use super::Supervisor;
use crate::Core::MAX_PERMITS;

pub const DEFAULT_CAPACITY: usize = 100;
pub const DEFAULT_PRODUCERS: usize = 20;
pub const DEFAULT_CONSUMERS: usize = 10;
/// Size of the buffer each producer offers to its source.
pub const DEFAULT_MAX_PAYLOAD: usize = 1024;

#[derive(Debug, Clone)]
pub struct SupervisorBuilder {
    capacity: usize,
    producers: usize,
    consumers: usize,
    max_payload: usize,
    payloads_per_producer: Option<u64>,
}

impl Default for SupervisorBuilder {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            producers: DEFAULT_PRODUCERS,
            consumers: DEFAULT_CONSUMERS,
            max_payload: DEFAULT_MAX_PAYLOAD,
            payloads_per_producer: None, // run until shutdown
        }
    }
}

impl SupervisorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_producers(mut self, producers: usize) -> Self {
        self.producers = producers;
        self
    }

    pub fn with_consumers(mut self, consumers: usize) -> Self {
        self.consumers = consumers;
        self
    }

    pub fn with_max_payload(mut self, bytes: usize) -> Self {
        self.max_payload = bytes;
        self
    }

    /// Let every producer stop after this many successful pushes.
    pub fn with_payloads_per_producer(mut self, count: Option<u64>) -> Self {
        self.payloads_per_producer = count;
        self
    }

    pub fn build(self) -> Result<Supervisor, ConfigError> {
        if self.capacity == 0 || self.capacity > MAX_PERMITS as usize {
            return Err(ConfigError::InvalidCapacity {
                capacity: self.capacity,
                max: MAX_PERMITS as usize,
            });
        }
        if self.producers == 0 {
            return Err(ConfigError::NoProducers);
        }
        if self.consumers == 0 {
            return Err(ConfigError::NoConsumers);
        }
        if self.max_payload == 0 {
            return Err(ConfigError::ZeroPayloadSize);
        }

        Ok(Supervisor {
            capacity: self.capacity,
            producers: self.producers,
            consumers: self.consumers,
            max_payload: self.max_payload,
            payloads_per_producer: self.payloads_per_producer,
        })
    }
}
