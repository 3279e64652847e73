pub mod buffer;
pub mod crawl;
pub mod ffi;
pub mod logging;

pub use buffer::ResultBuffer;
pub use crawl::{crawl, encode_error, encode_items};

// Re-export the scanner types that show up in this crate's API
pub use dirxplore_scanner::{DirectoryItem, EntryType, ErrorKind, ScanError};
