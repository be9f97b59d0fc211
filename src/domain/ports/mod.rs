pub mod source;
pub mod store;

pub use source::{ReadingSource, SourceError};
pub use store::{AlertStore, ReadingStore, StoreError};
