//! Addressing and storage for packed 1-bit-per-pixel image data.

mod addr;
mod buffer;

pub use addr::BitAddress;
pub use buffer::PixelBuffer;
