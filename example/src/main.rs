use reply::{Config, ResponseWriter, headers::HeaderValue, http::Version};
use std::io;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::init();

    let listener = TcpListener::bind("0.0.0.0:3000").await?;
    loop {
        let (io, _) = listener.accept().await?;
        tokio::spawn(async move {
            if let Err(err) = serve(io).await {
                eprintln!("connection error: {err}");
            }
        });
    }
}

async fn serve(mut io: TcpStream) -> io::Result<()> {
    let mut buf = Vec::with_capacity(1024);

    loop {
        let Some(head_len) = read_head(&mut io, &mut buf).await? else {
            return Ok(());
        };
        let (path, peer) = parse_request_line(&buf[..head_len]);
        println!("> {path} {peer}");
        buf.drain(..head_len);

        let (bytes, keep_alive) = handle(&path, peer)?;
        io.write_all(&bytes).await?;

        if !keep_alive {
            return Ok(());
        }
    }
}

fn handle(path: &str, peer: Version) -> io::Result<(Vec<u8>, bool)> {
    let config = Config::new()
        .date(true)
        .server(HeaderValue::from_static("reply-example"));
    let mut res = ResponseWriter::with_config(Vec::new(), peer, config);

    match path {
        "/" => {
            res.set_content_type(Some("text/plain; charset=utf-8"))?;
            res.close_with_body(b"Hello World!")?;
        }
        "/stream" => {
            // chunked on HTTP/1.1, close delimited on HTTP/1.0
            res.set_content_type(Some("text/plain"))?;
            for i in 0..3 {
                res.write_body(format!("line {i}\n").as_bytes())?;
            }
            res.close()?;
        }
        "/old" => {
            res.redirect("/")?;
            res.close()?;
        }
        _ => {
            res.set_status_code(404)?;
            res.close()?;
        }
    }

    let keep_alive = res.keep_alive();
    Ok((std::mem::take(res.get_mut()), keep_alive))
}

/// Read until the end of request head, returns its length.
async fn read_head(io: &mut TcpStream, buf: &mut Vec<u8>) -> io::Result<Option<usize>> {
    loop {
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            return Ok(Some(end + 4));
        }
        if io.read_buf(buf).await? == 0 {
            return Ok(None);
        }
    }
}

fn parse_request_line(head: &[u8]) -> (String, Version) {
    let line = head.split(|&b| b == b'\r').next().unwrap_or_default();
    let line = String::from_utf8_lossy(line);
    let mut parts = line.split(' ').skip(1);
    let path = parts.next().unwrap_or("/").to_owned();
    let version = parts
        .next()
        .and_then(|v| v.parse().ok())
        .unwrap_or(Version::HTTP_11);
    (path, version)
}
