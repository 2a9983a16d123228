//! The shared most-recent-frame buffer.
//!
//! Exactly one frame is "current" at any instant. The producer overwrites it
//! wholesale on every push; viewer loops read whatever is current at their
//! own cadence. A slow viewer never applies backpressure to the producer,
//! it simply misses frames.

use bytes::Bytes;
use tokio::sync::RwLock;
use tracing::debug;

/// Holds at most one JPEG-encoded frame under exclusive access.
///
/// All three operations are mutually exclusive over the whole cell: a
/// `read` never observes a half-completed `update`. The lock is only held
/// across the O(1) reference replacement, never across a sleep or a
/// network write.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    current: RwLock<Option<Bytes>>,
}

impl FrameBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current frame wholesale. Last write wins.
    ///
    /// Empty input is accepted and stored as-is; rejecting empty pushes is
    /// the HTTP layer's responsibility.
    pub async fn update(&self, frame: Bytes) {
        let mut current = self.current.write().await;
        *current = Some(frame);
    }

    /// Get the current frame, or `None` if none has been set or it was
    /// cleared since. `Bytes` makes this a refcount clone, not a copy.
    pub async fn read(&self) -> Option<Bytes> {
        self.current.read().await.clone()
    }

    /// Reset the buffer to empty, e.g. when the detector stops pushing.
    pub async fn clear(&self) {
        let mut current = self.current.write().await;
        *current = None;
        debug!("Frame buffer cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_buffer_reads_none() {
        let buffer = FrameBuffer::new();
        assert_eq!(buffer.read().await, None);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let buffer = FrameBuffer::new();
        buffer.update(Bytes::from_static(b"frame-1")).await;
        buffer.update(Bytes::from_static(b"frame-2")).await;
        buffer.update(Bytes::from_static(b"frame-3")).await;
        assert_eq!(buffer.read().await, Some(Bytes::from_static(b"frame-3")));
    }

    #[tokio::test]
    async fn test_clear_resets_regardless_of_history() {
        let buffer = FrameBuffer::new();
        buffer.update(Bytes::from_static(b"frame")).await;
        buffer.clear().await;
        assert_eq!(buffer.read().await, None);

        // Clearing an already-empty buffer is fine too
        buffer.clear().await;
        assert_eq!(buffer.read().await, None);
    }

    #[tokio::test]
    async fn test_empty_frame_stored_as_is() {
        let buffer = FrameBuffer::new();
        buffer.update(Bytes::new()).await;
        assert_eq!(buffer.read().await, Some(Bytes::new()));
    }

    #[tokio::test]
    async fn test_concurrent_updates_never_tear() {
        use std::sync::Arc;

        let buffer = Arc::new(FrameBuffer::new());
        let frame_a = Bytes::from(vec![0xAA; 4096]);
        let frame_b = Bytes::from(vec![0xBB; 4096]);

        let mut tasks = Vec::new();
        for i in 0..50 {
            let buffer = buffer.clone();
            let frame = if i % 2 == 0 {
                frame_a.clone()
            } else {
                frame_b.clone()
            };
            tasks.push(tokio::spawn(async move {
                buffer.update(frame).await;
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        // The result must be exactly one of the pushed frames, never a
        // byte-level splice of the two.
        let current = buffer.read().await.unwrap();
        assert!(current == frame_a || current == frame_b);
    }
}
