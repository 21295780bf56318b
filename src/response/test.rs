use std::io::Write;

use super::*;
use crate::headers::{HeaderMap, HeaderValue, standard::CONTENT_TYPE};

fn writer(peer: Version) -> ResponseWriter<Vec<u8>> {
    ResponseWriter::new(Vec::new(), peer)
}

fn output(res: &ResponseWriter<Vec<u8>>) -> &str {
    std::str::from_utf8(res.get_ref()).unwrap()
}

fn error(result: Result<(), ResponseError>) -> ResponseError {
    match result {
        Ok(()) => panic!("expected error"),
        Err(err) => err,
    }
}

// ===== Framing =====

#[test]
fn not_found_default() {
    let mut res = writer(Version::HTTP_11);
    res.set_status_code(404).unwrap();
    assert_eq!(res.status_description(), "Not Found");
    assert!(!res.headers_sent());
    assert!(!res.headers().contains_key("transfer-encoding"));
    assert!(!res.headers().contains_key("content-length"));
    assert_eq!(res.content_length(), None);

    res.write_body(b"abc").unwrap();
    assert!(res.headers_sent());
    assert!(res.send_chunked());
    assert_eq!(res.content_length(), Some(-1));
    assert_eq!(
        output(&res),
        "HTTP/1.1 404 Not Found\r\nTransfer-Encoding: chunked\r\n\r\n3\r\nabc\r\n"
    );

    res.close().unwrap();
    assert!(output(&res).ends_with("3\r\nabc\r\n0\r\n\r\n"));
}

#[test]
fn http10_close_delimited() {
    let mut res = writer(Version::HTTP_10);
    assert!(res.keep_alive());

    res.write_body(b"body").unwrap();
    assert!(!res.keep_alive());
    assert_eq!(res.content_length(), None);
    assert!(!res.send_chunked());

    res.close().unwrap();
    assert_eq!(output(&res), "HTTP/1.1 200 OK\r\nConnection: close\r\n\r\nbody");
}

#[test]
fn http10_empty_close() {
    let mut res = writer(Version::HTTP_10);
    res.close().unwrap();
    assert!(res.keep_alive());
    assert_eq!(output(&res), "HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n");
}

#[test]
fn explicit_content_length() {
    let mut res = writer(Version::HTTP_11);
    res.set_content_length(10).unwrap();
    assert_eq!(res.content_length(), Some(10));

    res.write_body(b"01234").unwrap();
    res.write_body(b"56789").unwrap();
    res.close().unwrap();

    assert_eq!(output(&res), "HTTP/1.1 200 OK\r\nContent-Length: 10\r\n\r\n0123456789");
    assert!(!res.headers().contains_key("Transfer-Encoding"));
}

#[test]
fn content_length_bounds() {
    let mut res = writer(Version::HTTP_11);
    res.set_content_length(3).unwrap();

    assert!(matches!(error(res.write_body(b"abcd")).kind(), ErrorKind::ProtocolViolation(_)));
    res.write_body(b"abc").unwrap();
    assert!(matches!(error(res.write_body(b"d")).kind(), ErrorKind::ProtocolViolation(_)));
    res.close().unwrap();
    assert_eq!(output(&res), "HTTP/1.1 200 OK\r\nContent-Length: 3\r\n\r\nabc");

    let mut res = writer(Version::HTTP_11);
    res.set_content_length(5).unwrap();
    res.write_body(b"ab").unwrap();
    assert!(matches!(error(res.close()).kind(), ErrorKind::ProtocolViolation(_)));
    assert!(res.is_disposed());
    assert!(res.close().is_ok());
}

#[test]
fn no_content() {
    let mut res = writer(Version::HTTP_11);
    res.set_status_code(204).unwrap();
    res.set_send_chunked(true).unwrap();
    res.close().unwrap();
    assert_eq!(res.content_length(), Some(0));
    assert_eq!(output(&res), "HTTP/1.1 204 No Content\r\n\r\n");

    let mut res = writer(Version::HTTP_11);
    res.set_status_code(204).unwrap();
    assert!(matches!(error(res.write_body(b"x")).kind(), ErrorKind::ProtocolViolation(_)));
    assert!(res.headers_sent());
    assert_eq!(res.content_length(), Some(0));
    res.close().unwrap();
    assert_eq!(output(&res), "HTTP/1.1 204 No Content\r\n\r\n");
}

#[test]
fn framing_exclusion() {
    let mut res = writer(Version::HTTP_11);
    res.set_content_length(5).unwrap();
    res.set_send_chunked(true).unwrap();
    assert_eq!(res.content_length(), Some(-1));
    assert!(!res.headers().contains_key("Content-Length"));

    res.set_content_length(3).unwrap();
    assert!(!res.send_chunked());
    assert_eq!(res.content_length(), Some(3));
    assert!(!res.headers().contains_key("Transfer-Encoding"));

    res.add_header("Transfer-Encoding", "chunked").unwrap();
    res.write_body(b"abcd").unwrap();
    res.close().unwrap();
    assert_eq!(
        output(&res),
        "HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n4\r\nabcd\r\n0\r\n\r\n"
    );
}

#[test]
fn chunked_on_http10() {
    let mut res = writer(Version::HTTP_10);
    let err = res.set_send_chunked(true).unwrap_err();
    assert_eq!(err.category(), Category::Protocol);
    assert!(matches!(err.kind(), ErrorKind::ProtocolViolation(_)));
    assert!(!res.send_chunked());

    assert!(res.set_send_chunked(false).is_ok());
}

#[test]
fn keep_alive_header_removed() {
    let mut res = writer(Version::HTTP_11);
    res.add_header("Keep-Alive", "timeout=5").unwrap();
    res.set_keep_alive(true).unwrap();
    res.close().unwrap();
    assert!(!output(&res).contains("Keep-Alive"));
    assert_eq!(output(&res), "HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n");
}

#[test]
fn connection_close() {
    let mut res = writer(Version::HTTP_11);
    res.set_keep_alive(false).unwrap();
    assert!(!res.keep_alive());
    res.set_keep_alive(true).unwrap();
    assert!(res.keep_alive());
    assert!(!res.headers().contains_key("Connection"));

    res.set_keep_alive(false).unwrap();
    res.write_body(b"x").unwrap();
    res.close().unwrap();
    assert_eq!(
        output(&res),
        "HTTP/1.1 200 OK\r\nConnection: close\r\nTransfer-Encoding: chunked\r\n\r\n1\r\nx\r\n0\r\n\r\n"
    );
}

#[test]
fn keep_alive_keeps_other_options() {
    let mut res = writer(Version::HTTP_11);
    res.add_header("Connection", "close, Upgrade").unwrap();
    res.append_header("Connection", "x-trace").unwrap();
    assert!(!res.keep_alive());

    res.set_keep_alive(true).unwrap();
    assert!(res.keep_alive());
    assert_eq!(res.headers().get("Connection").map(HeaderValue::as_str), Some("Upgrade, x-trace"));
    assert_eq!(res.headers().get_all("Connection").count(), 1);
}

#[test]
fn transfer_coding_kept() {
    let mut res = writer(Version::HTTP_11);
    res.add_header("Transfer-Encoding", "gzip").unwrap();
    res.write_body(b"x").unwrap();
    assert!(res.send_chunked());
    res.close().unwrap();
    assert_eq!(
        output(&res),
        "HTTP/1.1 200 OK\r\nTransfer-Encoding: gzip, chunked\r\n\r\n1\r\nx\r\n0\r\n\r\n"
    );
}

// ===== Lifecycle =====

#[test]
fn close_idempotent() {
    let mut once = writer(Version::HTTP_11);
    once.close().unwrap();

    let mut twice = writer(Version::HTTP_11);
    twice.close().unwrap();
    twice.close().unwrap();

    assert_eq!(once.get_ref(), twice.get_ref());
}

#[test]
fn setters_after_send() {
    let mut res = writer(Version::HTTP_11);
    res.set_content_type(Some("text/plain")).unwrap();
    res.write_body(b"x").unwrap();

    res.set_status_code(500).unwrap();
    res.set_status_code(5).unwrap();
    res.set_status_description(None).unwrap();
    res.set_content_type(None).unwrap();
    res.set_redirect_location(Some("/")).unwrap();
    res.set_keep_alive(false).unwrap();
    res.set_protocol_version(None).unwrap();
    res.set_headers(None).unwrap();
    res.add_header("X-Late", "1").unwrap();
    res.redirect("/late").unwrap();

    assert_eq!(res.status_code(), 200);
    assert_eq!(res.status_description(), "OK");
    assert_eq!(res.content_type(), Some("text/plain"));
    assert_eq!(res.redirect_location(), None);
    assert!(res.keep_alive());
    assert!(!res.headers().contains_key("X-Late"));

    assert!(matches!(error(res.set_content_length(5)).kind(), ErrorKind::HeadersSent));
    assert!(matches!(error(res.set_send_chunked(false)).kind(), ErrorKind::HeadersSent));
}

#[test]
fn disposed() {
    let mut res = writer(Version::HTTP_11);
    res.set_status_code(201).unwrap();
    res.close().unwrap();

    assert!(res.is_disposed());
    assert_eq!(res.status_code(), 201);
    assert_eq!(res.content_length(), Some(0));

    let err = res.set_status_code(404).unwrap_err();
    assert!(err.is_disposed());
    assert_eq!(err.category(), Category::Lifecycle);

    assert!(matches!(error(res.set_content_type(Some("a/b"))).kind(), ErrorKind::Disposed));
    assert!(matches!(error(res.set_content_length(1)).kind(), ErrorKind::Disposed));
    assert!(matches!(error(res.set_send_chunked(true)).kind(), ErrorKind::Disposed));
    assert!(matches!(error(res.set_headers(None)).kind(), ErrorKind::Disposed));
    assert!(matches!(error(res.write_body(b"x")).kind(), ErrorKind::Disposed));
    assert!(matches!(error(res.flush()).kind(), ErrorKind::Disposed));
    assert!(matches!(error(res.close_with_body(b"x")).kind(), ErrorKind::Disposed));
}

#[test]
fn drop_closes() {
    let mut sink = Vec::new();
    {
        let mut res = ResponseWriter::new(&mut sink, Version::HTTP_11);
        res.write_body(b"hi").unwrap();
    }
    assert_eq!(
        sink,
        b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n2\r\nhi\r\n0\r\n\r\n"
    );
}

#[test]
fn io_write() {
    let mut res = writer(Version::HTTP_11);
    res.set_content_length(5).unwrap();
    write!(res, "{}-{}", 12, 34).unwrap();
    Write::flush(&mut res).unwrap();
    res.close().unwrap();
    assert_eq!(output(&res), "HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\n12-34");
}

// ===== Validation =====

#[test]
fn status_code_range() {
    let mut res = writer(Version::HTTP_11);
    for code in [0, 99, 1000, u16::MAX] {
        let err = res.set_status_code(code).unwrap_err();
        assert_eq!(err.category(), Category::Protocol);
        assert_eq!(res.status_code(), 200);
    }
    res.set_status_code(100).unwrap();
    res.set_status_code(999).unwrap();
    assert_eq!(res.status_code(), 999);
}

#[test]
fn status_description() {
    let mut res = writer(Version::HTTP_11);
    assert!(matches!(error(res.set_status_description(None)).kind(), ErrorKind::MissingArgument(_)));
    for invalid in ["a\0b", "a\rb", "a\nb", "a\x7fb", "\x1b"] {
        assert!(matches!(
            error(res.set_status_description(Some(invalid))).kind(),
            ErrorKind::InvalidArgument(_)
        ));
    }
    assert_eq!(res.status_description(), "OK");

    res.set_status_description(Some("All\tGood")).unwrap();
    assert_eq!(res.status_description(), "All\tGood");
}

#[test]
fn description_cached() {
    let mut res = writer(Version::HTTP_11);
    res.set_status_code(404).unwrap();
    assert_eq!(res.status_description(), "Not Found");

    let mut res = writer(Version::HTTP_11);
    assert_eq!(res.status_description(), "OK");
    res.set_status_code(404).unwrap();
    assert_eq!(res.status_description(), "OK");
    res.close().unwrap();
    assert_eq!(output(&res), "HTTP/1.1 404 OK\r\nContent-Length: 0\r\n\r\n");
}

#[test]
fn content_type_trimmed() {
    let mut res = writer(Version::HTTP_11);
    res.set_content_type(Some("  applICATion/jSOn   ")).unwrap();
    assert_eq!(res.content_type(), Some("applICATion/jSOn"));
    res.close_with_body(b"{}").unwrap();
    assert_eq!(
        output(&res),
        "HTTP/1.1 200 OK\r\nContent-Type: applICATion/jSOn\r\nContent-Length: 2\r\n\r\n{}"
    );
}

#[test]
fn whitespace_only_values() {
    let mut res = writer(Version::HTTP_11);
    res.set_redirect_location(Some("\r \t \n")).unwrap();
    assert_eq!(res.redirect_location(), Some(""));

    res.set_redirect_location(None).unwrap();
    assert_eq!(res.redirect_location(), None);

    res.set_redirect_location(Some("/home")).unwrap();
    res.set_redirect_location(Some("")).unwrap();
    assert_eq!(res.redirect_location(), None);

    res.set_content_type(Some(" ")).unwrap();
    assert_eq!(res.content_type(), Some(""));
    res.set_content_type(None).unwrap();
    assert_eq!(res.content_type(), None);

    let err = res.set_content_type(Some("text/\u{0}plain")).unwrap_err();
    assert_eq!(err.category(), Category::Validation);
    assert_eq!(res.content_type(), None);
}

#[test]
fn long_values() {
    let location = format!("/{}", "a".repeat(9000));
    let mut res = writer(Version::HTTP_11);
    res.set_redirect_location(Some(&location)).unwrap();
    assert_eq!(res.redirect_location(), Some(location.as_str()));

    let content_type = format!("text/plain; {}", "x".repeat(16 * 1024));
    res.set_content_type(Some(&content_type)).unwrap();
    assert_eq!(res.content_type().map(str::len), Some(content_type.len()));
}

#[test]
fn negative_content_length() {
    let mut res = writer(Version::HTTP_11);
    res.set_content_length(7).unwrap();
    let err = res.set_content_length(-1).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::OutOfRange(_)));
    assert_eq!(err.category(), Category::Validation);
    assert_eq!(res.content_length(), Some(7));
}

#[test]
fn protocol_version() {
    let mut res = writer(Version::HTTP_11);
    assert_eq!(res.protocol_version(), Version::HTTP_11);

    assert!(matches!(error(res.set_protocol_version(None)).kind(), ErrorKind::MissingArgument(_)));
    assert!(matches!(
        error(res.set_protocol_version(Some(Version::HTTP_2))).kind(),
        ErrorKind::InvalidArgument(_)
    ));
    assert!(matches!(
        error(res.set_protocol_version(Some(Version::HTTP_09))).kind(),
        ErrorKind::InvalidArgument(_)
    ));
    assert_eq!(res.protocol_version(), Version::HTTP_11);

    res.set_protocol_version(Version::from_components(&[1, 0, 4, 2])).unwrap();
    assert_eq!(res.protocol_version(), Version::HTTP_10);

    // status line is unaffected
    res.close().unwrap();
    assert!(output(&res).starts_with("HTTP/1.1 200 OK\r\n"));
}

#[test]
fn replace_headers() {
    let mut res = writer(Version::HTTP_11);
    res.set_content_type(Some("text/html")).unwrap();
    res.set_content_length(3).unwrap();

    assert!(matches!(error(res.set_headers(None)).kind(), ErrorKind::MissingHeaders));
    assert!(res.headers().is_empty());
    assert_eq!(res.content_type(), None);
    assert_eq!(res.content_length(), None);

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("image/png"));
    res.set_headers(Some(headers)).unwrap();
    assert_eq!(res.content_type(), Some("image/png"));
}

#[test]
fn header_operations() {
    let mut res = writer(Version::HTTP_11);
    res.add_header("X-Tag", " a ").unwrap();
    res.append_header("x-tag", "b").unwrap();
    res.add_header(String::from("Vary"), "Accept").unwrap();
    assert_eq!(res.headers().get_all("X-TAG").count(), 2);

    res.add_header("X-Tag", "c").unwrap();
    assert_eq!(res.headers().get_all("X-TAG").count(), 1);
    res.remove_header("vary").unwrap();

    let err = res.add_header("Bad Name", "x").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidHeader(_)));

    res.close().unwrap();
    assert_eq!(output(&res), "HTTP/1.1 200 OK\r\nX-Tag: c\r\nContent-Length: 0\r\n\r\n");
}

// ===== Supplements =====

#[test]
fn redirect() {
    let mut res = writer(Version::HTTP_11);
    res.redirect(" /login ").unwrap();
    assert_eq!(res.status_code(), 302);
    assert_eq!(res.status_description(), "Found");
    assert_eq!(res.redirect_location(), Some("/login"));
    res.close().unwrap();
    assert_eq!(
        output(&res),
        "HTTP/1.1 302 Found\r\nLocation: /login\r\nContent-Length: 0\r\n\r\n"
    );
}

#[test]
fn copy_from() {
    let mut template = writer(Version::HTTP_11);
    template.set_status_code(201).unwrap();
    template.set_status_description(Some("Made")).unwrap();
    template.set_content_type(Some("text/plain")).unwrap();
    template.set_protocol_version(Some(Version::HTTP_10)).unwrap();

    let mut res = writer(Version::HTTP_11);
    res.copy_from(&template).unwrap();
    assert_eq!(res.status_code(), 201);
    assert_eq!(res.status_description(), "Made");
    assert_eq!(res.content_type(), Some("text/plain"));
    assert_eq!(res.protocol_version(), Version::HTTP_10);
    assert!(!res.headers_sent());
}

#[test]
fn config_headers() {
    let config = Config::new()
        .date(true)
        .server(HeaderValue::from_static("reply"));
    let mut res = ResponseWriter::with_config(Vec::new(), Version::HTTP_11, config);
    res.close().unwrap();

    let head = output(&res);
    assert!(head.starts_with("HTTP/1.1 200 OK\r\nContent-Length: 0\r\nDate: "));
    assert!(head.contains(" GMT\r\n"));
    assert!(head.ends_with("\r\nServer: reply\r\n\r\n"));

    let config = Config::new().server(HeaderValue::from_static("reply"));
    let mut res = ResponseWriter::with_config(Vec::new(), Version::HTTP_11, config);
    res.add_header("Server", "custom").unwrap();
    res.close().unwrap();
    assert_eq!(output(&res), "HTTP/1.1 200 OK\r\nServer: custom\r\nContent-Length: 0\r\n\r\n");
}

#[test]
fn legacy_encoding_on_wire() {
    let mut res = writer(Version::HTTP_11);
    res.set_status_description(Some("Tr\u{e8}s Bien \u{2713}")).unwrap();
    res.add_header("X-Name", "Ren\u{e9}e \u{4e2d}").unwrap();
    res.close().unwrap();
    assert_eq!(
        res.get_ref().as_slice(),
        b"HTTP/1.1 200 Tr\xE8s Bien ?\r\nX-Name: Ren\xE9e ?\r\nContent-Length: 0\r\n\r\n"
    );
}

#[test]
fn error_into_io() {
    let err: std::io::Error = ResponseError::from(ErrorKind::Disposed).into();
    assert_eq!(err.kind(), std::io::ErrorKind::Other);

    let err: std::io::Error = ResponseError::from(ErrorKind::OutOfRange("x")).into();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);

    let err: std::io::Error = ResponseError::from(ErrorKind::ProtocolViolation("x")).into();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}
