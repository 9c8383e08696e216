pub mod log_buffer;

pub use log_buffer::{init_tracing, LogBuffer, LogCaptureLayer};
