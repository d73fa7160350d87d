//! Transport-specific framing of a published payload.
//!
//! The proxy appends `http-stream` content verbatim to held SSE streams and
//! uses `http-response` bodies as-is, so the framing has to happen here.

/// Frames `body` as a single Server-Sent Events message: `data: <body>\n\n`.
pub fn sse_event(body: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(body.len() + 8);
    frame.extend_from_slice(b"data: ");
    frame.extend_from_slice(body);
    frame.extend_from_slice(b"\n\n");
    frame
}

/// Frames `body` as a literal HTTP/1.1 200 response with a plain-text content
/// type and a `Content-Length` equal to the body's byte length.
pub fn http_response(body: &[u8]) -> Vec<u8> {
    let head = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\n\r\n",
        body.len()
    );
    let mut frame = Vec::with_capacity(head.len() + body.len());
    frame.extend_from_slice(head.as_bytes());
    frame.extend_from_slice(body);
    frame
}
