pub mod backend;
pub mod format;
pub mod router;

pub use backend::{resolve_host, Backend};
pub use format::{DataFormat, Payload};
pub use router::{connect, download, get, put, upload};
