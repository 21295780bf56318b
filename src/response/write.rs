use bytes::{BufMut, BytesMut};

use super::state::ResponseState;
use crate::headers::legacy;

/// The status line always carries this version, regardless of the response protocol version.
const STATUS_LINE_VERSION: &[u8] = b"HTTP/1.1 ";

/// Write the status line and header block into `buf`.
pub(crate) fn write_head(state: &ResponseState, buf: &mut BytesMut) {
    let description = state.status_description();
    buf.reserve(STATUS_LINE_VERSION.len() + 6 + legacy::encoded_len(description));

    buf.put_slice(STATUS_LINE_VERSION);
    buf.put_slice(itoa::Buffer::new().format(state.status_code()).as_bytes());
    buf.put_u8(b' ');
    legacy::encode(description, buf);
    buf.put_slice(b"\r\n");

    for (name, value) in state.headers().iter() {
        buf.put_slice(name.as_str().as_bytes());
        buf.put_slice(b": ");
        legacy::encode(value.as_str(), buf);
        buf.put_slice(b"\r\n");
    }

    buf.put_slice(b"\r\n");
}
