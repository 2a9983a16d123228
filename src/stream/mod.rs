//! Live video streaming: the shared frame buffer, the startup placeholder,
//! and the MJPEG multipart framing served to viewers.

pub mod buffer;
pub mod mjpeg;
pub mod placeholder;

// Re-export commonly used items
pub use buffer::FrameBuffer;
pub use mjpeg::{encode_part, mjpeg_stream, MJPEG_BOUNDARY, MJPEG_CONTENT_TYPE};
pub use placeholder::PlaceholderImage;
