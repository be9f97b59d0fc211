pub mod file_source;
pub mod memory_source;

pub use file_source::FileSource;
pub use memory_source::MemorySource;
