pub mod buffer;
pub mod error;
pub mod sample;

pub use buffer::{BoundedBuffer, SharedBuffer, DEFAULT_CAPACITY};
pub use error::{IqError, Result};
pub use sample::{Sample, MAX_SAMPLE_JSON_BYTES};
