mod jsonl;
mod log;
mod memory;

pub use jsonl::{JsonlSink, STDOUT_TARGET};
pub use log::LogSink;
pub use memory::MemorySink;
