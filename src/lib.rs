//! HTTP/1.x Response Writer
//!
//! [`ResponseWriter`] collects the status, headers and framing intent of a single response and
//! freezes them into one status line and header block when the first body byte is written or the
//! response is closed.
//!
//! ```rust
//! use reply::{ResponseWriter, http::Version};
//!
//! let mut res = ResponseWriter::new(Vec::new(), Version::HTTP_11);
//! res.set_status_code(404).unwrap();
//! res.set_content_type(Some("text/plain")).unwrap();
//! res.close_with_body(b"gone").unwrap();
//!
//! assert_eq!(
//!     res.get_ref().as_slice(),
//!     b"HTTP/1.1 404 Not Found\r\nContent-Type: text/plain\r\nContent-Length: 4\r\n\r\ngone"
//! );
//! ```
#![warn(missing_debug_implementations)]

mod log;
mod matches;

pub mod http;
pub mod headers;
pub mod response;

pub use response::{Config, ResponseError, ResponseWriter};
