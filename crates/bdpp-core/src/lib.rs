//! # BDPP Core API
//!
//! Hides and recovers byte messages in the pixel data of 1-bit-per-pixel
//! bitmaps using the Block-Diagonal Partition Pattern: the carrier is split
//! into 3×3 pixel blocks, every block is classified once by three
//! suitability tests (diagonal zero/one ratio, horizontal/vertical/diagonal
//! connectivity, flip-stability), and one message bit is committed to the
//! centre pixel of each embeddable block in deterministic block order. The
//! number of bits embedded — the *key* — is all a receiver needs to recover
//! the message.
//!
//! # Usage Examples
//!
//! ## Hide and recover a message in memory
//!
//! ```rust
//! use bdpp_core::codec::{self, CodecOptions};
//! use bdpp_core::pixel::PixelBuffer;
//!
//! // a carrier with enough local texture that every block is embeddable
//! const PATTERN: [[u8; 3]; 3] = [[0, 0, 1], [0, 0, 0], [1, 0, 1]];
//! let mut pixels = PixelBuffer::zeroed(9, 9);
//! for y in 0..9 {
//!     for x in 0..9 {
//!         pixels.set(x, y, PATTERN[(y % 3) as usize][(x % 3) as usize]);
//!     }
//! }
//!
//! let outcome = codec::hide(&mut pixels, &b"!"[..], &CodecOptions::default())?;
//! assert_eq!(outcome.key, 8);
//!
//! let recovered = codec::extract(&pixels, outcome.key, &CodecOptions::default())?;
//! assert_eq!(recovered.data, b"!");
//! # Ok::<(), bdpp_core::BdppError>(())
//! ```
//!
//! ## Hide a file inside a bitmap on disk
//!
//! ```rust,no_run
//! use bdpp_core::codec::CodecOptions;
//! use std::path::Path;
//!
//! let outcome = bdpp_core::commands::hide(
//!     Path::new("cover.bmp"),
//!     Path::new("stego.bmp"),
//!     std::fs::read("secret.bin")?,
//!     &CodecOptions::default(),
//! )?;
//! println!("key: {}", outcome.key);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod bit_iterator;
pub use bit_iterator::BitIterator;

pub mod block;
pub mod bmp;
pub mod codec;
pub mod commands;
pub mod error;
pub mod pixel;
pub mod result;
pub mod suitability;

pub use crate::bmp::Bmp;
pub use crate::codec::{CapacityStats, CodecOptions, ExtractOutcome, HideOutcome, Polarity};
pub use crate::error::BdppError;
pub use crate::pixel::PixelBuffer;
pub use crate::result::Result;
