// Module naming follows project convention (MPMC = Multi-Producer Multi-Consumer)
#[allow(non_snake_case)]
pub mod MPMC;

#[allow(non_snake_case)]
pub mod Core;

#[allow(non_snake_case)]
pub mod Debug {
    pub mod StructDebug;
}

#[allow(non_snake_case)]
pub mod Endpoints {
    pub mod sink;
    pub mod source;
    pub use sink::{ConsoleSink, WriterSink};
    pub use source::RandomSource;
}

pub use MPMC::{BoundedQueue, Payload, QueueError, Supervisor, SupervisorBuilder};
