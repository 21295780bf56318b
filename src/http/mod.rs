//! HTTP Protocol.
mod status;
mod version;
mod date;

pub use status::{StatusCode, describe};
pub use version::{Version, UnknownVersion};
pub use date::{httpdate, httpdate_now};
