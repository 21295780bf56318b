//! HTTP Header Multimap.
//!
//! Names compare ASCII case-insensitively but keep the case they were created with, entries keep
//! insertion order.
mod name;
mod value;
mod field;
mod map;
mod iter;

pub mod legacy;
pub mod error;

pub use name::{HeaderName, AsHeaderName, IntoHeaderName, standard};
pub use value::HeaderValue;
pub use field::{HeaderField, GetAll};
pub use map::HeaderMap;
pub use iter::Iter;
pub use error::HeaderError;

pub(crate) use name::name_str;
