pub mod futex;
pub mod logging;
pub mod semaphore;

pub use logging::{init_logging, LogConfig};
pub use semaphore::{Semaphore, SemaphoreClosed, MAX_PERMITS};
