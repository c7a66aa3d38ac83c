//! Growable heap-backed byte buffer for string building and I/O staging.

mod buffer;
mod config;
mod error;

pub use buffer::ByteBuffer;
pub use config::{BufferConfig, GrowthPolicy, OomPolicy, DEFAULT_CAPACITY, READ_CHUNK_SIZE};
pub use error::BufferError;
