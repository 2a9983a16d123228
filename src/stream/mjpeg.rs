//! MJPEG part framing and the per-viewer stream generator.
//!
//! The live feed is a `multipart/x-mixed-replace` response: an unbounded
//! sequence of JPEG parts separated by a fixed boundary, with no
//! end-of-stream marker. Each connected viewer drives its own copy of the
//! generator loop, so two viewers are not guaranteed to be looking at the
//! same frame at the same instant.

use crate::stream::{FrameBuffer, PlaceholderImage};
use async_stream::stream;
use bytes::{BufMut, Bytes, BytesMut};
use futures_util::Stream;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// Multipart boundary string for the live feed.
pub const MJPEG_BOUNDARY: &str = "frame";

/// `Content-Type` for the live feed response.
pub const MJPEG_CONTENT_TYPE: &str = "multipart/x-mixed-replace; boundary=frame";

/// How long to wait before re-checking the buffer when there is neither a
/// live frame nor a placeholder to emit.
const NO_FRAME_RETRY: Duration = Duration::from_millis(100);

/// Frame one JPEG as a single multipart part.
///
/// Layout is exactly:
///
/// ```text
/// --frame\r\n
/// Content-Type: image/jpeg\r\n
/// Content-Length: <n>\r\n
/// \r\n
/// <raw JPEG bytes>\r\n
/// ```
pub fn encode_part(frame: &[u8]) -> Bytes {
    let header = format!(
        "--{}\r\nContent-Type: image/jpeg\r\nContent-Length: {}\r\n\r\n",
        MJPEG_BOUNDARY,
        frame.len()
    );
    let mut part = BytesMut::with_capacity(header.len() + frame.len() + 2);
    part.put_slice(header.as_bytes());
    part.put_slice(frame);
    part.put_slice(b"\r\n");
    part.freeze()
}

/// Build the unbounded part stream for one viewer session.
///
/// Each iteration reads the current frame (falling back to the
/// placeholder), emits one part, then sleeps `interval`. The buffer lock
/// is never held across the sleep. Dropping the stream (the viewer
/// disconnected) ends the loop at the next suspension point without
/// touching shared state again.
pub fn mjpeg_stream(
    frames: Arc<FrameBuffer>,
    placeholder: Arc<PlaceholderImage>,
    interval: Duration,
) -> impl Stream<Item = std::result::Result<Bytes, Infallible>> {
    stream! {
        loop {
            let frame = match frames.read().await {
                Some(frame) => frame,
                None => {
                    if placeholder.is_empty() {
                        // Nothing to show at all; wait briefly and retry
                        // without emitting a part.
                        sleep(NO_FRAME_RETRY).await;
                        continue;
                    }
                    placeholder.bytes().clone()
                }
            };

            yield Ok(encode_part(&frame));
            sleep(interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_FRAME_INTERVAL_MS;
    use futures_util::StreamExt;

    #[test]
    fn test_part_layout() {
        let part = encode_part(b"jpegdata");
        let expected = b"--frame\r\nContent-Type: image/jpeg\r\nContent-Length: 8\r\n\r\njpegdata\r\n";
        assert_eq!(&part[..], &expected[..]);
    }

    #[test]
    fn test_part_content_length_matches_payload() {
        let payload = vec![0xAB; 10240];
        let part = encode_part(&payload);
        let text = String::from_utf8_lossy(&part[..64]);
        assert!(text.contains("Content-Length: 10240"));
        assert!(part.ends_with(b"\r\n"));
    }

    #[tokio::test]
    async fn test_stream_emits_pushed_frame_then_placeholder() {
        let frames = Arc::new(FrameBuffer::new());
        let placeholder = Arc::new(PlaceholderImage::fallback());

        frames.update(Bytes::from_static(b"live-frame")).await;

        let stream = mjpeg_stream(
            frames.clone(),
            placeholder.clone(),
            Duration::from_millis(1),
        );
        tokio::pin!(stream);

        let part = stream.next().await.unwrap().unwrap();
        assert!(part
            .windows(b"live-frame".len())
            .any(|w| w == b"live-frame"));

        // After a clear, the next parts carry the placeholder bytes.
        frames.clear().await;
        let part = stream.next().await.unwrap().unwrap();
        let ph = placeholder.bytes();
        assert!(part.windows(ph.len()).any(|w| w == &ph[..]));
        assert!(!part.windows(b"live-frame".len()).any(|w| w == b"live-frame"));
    }

    #[tokio::test]
    async fn test_stream_suspends_when_buffer_and_placeholder_are_empty() {
        let frames = Arc::new(FrameBuffer::new());
        let placeholder = Arc::new(PlaceholderImage::from_bytes(Bytes::new()));
        assert!(placeholder.is_empty());

        let stream = mjpeg_stream(frames.clone(), placeholder, Duration::from_millis(1));
        tokio::pin!(stream);

        {
            let mut next = tokio_test::task::spawn(stream.next());
            tokio_test::assert_pending!(next.poll());

            // Let the retry delay fire at least once: the loop re-checks
            // the buffer but still has nothing to emit.
            tokio::time::sleep(NO_FRAME_RETRY + Duration::from_millis(20)).await;
            tokio_test::assert_pending!(next.poll());
        }

        // As soon as a frame arrives the stream starts emitting parts.
        frames.update(Bytes::from_static(b"late-frame")).await;
        let part = stream.next().await.unwrap().unwrap();
        assert!(part
            .windows(b"late-frame".len())
            .any(|w| w == b"late-frame"));
    }

    #[tokio::test]
    async fn test_two_viewers_converge_to_latest_frame() {
        let frames = Arc::new(FrameBuffer::new());
        let placeholder = Arc::new(PlaceholderImage::fallback());

        let make = || {
            mjpeg_stream(
                frames.clone(),
                placeholder.clone(),
                Duration::from_millis(1),
            )
        };
        let mut viewer_a = Box::pin(make());
        let mut viewer_b = Box::pin(make());

        frames.update(Bytes::from_static(b"frame-a")).await;
        frames.update(Bytes::from_static(b"frame-b")).await;

        for viewer in [&mut viewer_a, &mut viewer_b] {
            let part = viewer.next().await.unwrap().unwrap();
            assert!(part.windows(b"frame-b".len()).any(|w| w == b"frame-b"));
        }
    }

    #[test]
    fn test_default_interval_targets_twenty_fps() {
        assert_eq!(DEFAULT_FRAME_INTERVAL_MS, 50);
    }
}
