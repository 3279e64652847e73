pub mod error;
pub mod fetcher;
pub mod item;
pub mod listing;

pub use error::{ErrorKind, ScanError, error_chain};
pub use fetcher::{Fetcher, Transport, resolve_transport};
pub use item::{DirectoryItem, EntryType};
pub use listing::{extract_listing, parse_listing};
