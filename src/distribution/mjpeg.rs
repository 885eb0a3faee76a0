//! MJPEG multipart streaming
//!
//! Turns a channel's store into a `multipart/x-mixed-replace` HTTP body.
//! Browsers render the stream as motion video by replacing the image on
//! every part — no JavaScript required, just `<img src="/">`.
//!
//! Each viewer gets an independent streaming loop over the shared store:
//! wait for a change (bounded), snapshot, and emit one part if the sequence
//! advanced since the viewer's last emission. A slow viewer's write
//! backpressure stalls only its own loop, never the producer or other
//! viewers. The stream never terminates server-side; it ends when the client
//! disconnects and the body stream is dropped.

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, PRAGMA};
use axum::http::HeaderValue;
use axum::response::Response;
use bytes::{BufMut, Bytes, BytesMut};

use crate::session::ViewerSession;
use crate::store::FrameStore;

use super::config::DistributionConfig;

/// Multipart boundary token; the wire format below quotes it literally
pub const BOUNDARY: &str = "frame";

/// Part prefix written before every frame payload
const PART_HEADER: &[u8] = b"--frame\r\nContent-Type: image/jpeg\r\n\r\n";

/// Encode one multipart part: boundary line, part headers, payload, CRLF.
pub fn encode_part(payload: &[u8]) -> Bytes {
    let mut part = BytesMut::with_capacity(PART_HEADER.len() + payload.len() + 2);
    part.put_slice(PART_HEADER);
    part.put_slice(payload);
    part.put_slice(b"\r\n");
    part.freeze()
}

/// Build the live-stream response for one viewer.
///
/// The body is an unbounded stream driven by the store's change
/// notification. The first iteration always emits: a fresh
/// [`ViewerSession`] sits below any real sequence, so an idle channel
/// yields the placeholder immediately after the first wait.
pub fn stream_response(store: Arc<FrameStore>, config: &DistributionConfig) -> Response {
    let wait_timeout = config.wait_timeout;
    let min_emit_interval = config.min_emit_interval;

    let stream = futures::stream::unfold(
        (store, ViewerSession::new()),
        move |(store, mut session)| async move {
            loop {
                store.wait_for_change(wait_timeout).await;

                let (frame, seq) = store.snapshot().await;
                if session.should_emit(seq) {
                    session.mark_emitted(seq);
                    let part = encode_part(&frame);
                    return Some((Ok::<_, Infallible>(part), (store, session)));
                }

                // Woke without a sequence change; cap the re-check rate
                tokio::time::sleep(min_emit_interval).await;
            }
        },
    );

    let mut response = Response::new(Body::from_stream(stream));
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("multipart/x-mixed-replace; boundary=frame"),
    );
    response.headers_mut().insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    response
        .headers_mut()
        .insert(PRAGMA, HeaderValue::from_static("no-cache"));

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_byte_layout() {
        let part = encode_part(b"JPEGDATA");

        let mut expected = Vec::new();
        expected.extend_from_slice(b"--frame\r\nContent-Type: image/jpeg\r\n\r\n");
        expected.extend_from_slice(b"JPEGDATA");
        expected.extend_from_slice(b"\r\n");

        assert_eq!(part, Bytes::from(expected));
    }

    #[test]
    fn test_part_preserves_binary_payload() {
        // Payloads containing CRLF or boundary-like bytes pass through intact
        let payload = b"\xFF\xD8--frame\r\n\xFF\xD9";
        let part = encode_part(payload);

        let body = &part[PART_HEADER.len()..part.len() - 2];
        assert_eq!(body, payload);
    }

    #[test]
    fn test_response_headers() {
        let store = Arc::new(FrameStore::new(&crate::media::Placeholder::from_bytes(
            &b"p"[..],
        )));
        let response = stream_response(store, &DistributionConfig::default());

        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "multipart/x-mixed-replace; boundary=frame"
        );
        assert_eq!(
            response.headers().get(CACHE_CONTROL).unwrap(),
            "no-cache, no-store, must-revalidate"
        );
    }
}
